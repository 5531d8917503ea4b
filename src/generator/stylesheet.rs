use crate::schema::Theme;

const FONT_IMPORT: &str = "@import url('https://fonts.googleapis.com/css2?family=Cormorant+Garamond:wght@300;400;600&family=Montserrat:wght@300;400;500&display=swap');\n";

/// `:root` block binding the theme tokens to custom properties.
pub fn root_block(theme: &Theme) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in theme.css_variables() {
        css.push_str(&format!("    {}: {};\n", name, css_value(value)));
    }
    css.push_str("}\n");
    css
}

/// Complete stylesheet for a theme: font import, `:root` tokens, then the fixed rules.
pub fn stylesheet(theme: &Theme) -> String {
    let theme = theme.resolved();
    let mut css = String::with_capacity(FONT_IMPORT.len() + BASE_CSS.len() + 512);
    css.push_str(FONT_IMPORT);
    css.push_str(&root_block(&theme));
    css.push_str(BASE_CSS);
    css
}

// Token values land inside a <style> element; keep them from closing the
// declaration, the rule, or the element.
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect::<String>()
        .trim()
        .to_string()
}

const BASE_CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

html {
    scroll-behavior: smooth;
}

body {
    font-family: var(--font-body);
    color: var(--color-dark);
    background-color: var(--color-light);
    overflow-x: hidden;
    position: relative;
    line-height: 1.6;
}

h1, h2, h3, h4, h5, h6 {
    font-family: var(--font-heading);
    font-weight: 400;
    color: var(--color-primary);
}

img {
    max-width: 100%;
    display: block;
}

a {
    color: inherit;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 5rem 2rem;
}

.btn,
.button {
    display: inline-block;
    background-color: var(--color-primary);
    color: white;
    padding: 0.8rem 1.8rem;
    border-radius: 50px;
    border: none;
    text-decoration: none;
    cursor: pointer;
    transition: all 0.3s ease;
}

.btn:hover,
.button:hover {
    background-color: var(--color-accent);
    color: var(--color-dark);
}

hr {
    border: none;
    height: 1px;
    background-color: var(--color-neutral);
    margin: 2rem 0;
}

/* Header */
.header {
    padding: 2rem 0;
    position: relative;
    width: 100%;
    z-index: 10;
}

.nav-container {
    max-width: 1400px;
    margin: 0 auto;
    padding: 0 2rem;
    display: flex;
    justify-content: space-between;
    align-items: center;
}

.logo {
    font-family: var(--font-heading);
    font-size: 2rem;
    color: var(--color-primary);
    position: relative;
}

.logo::after {
    content: '';
    position: absolute;
    bottom: -8px;
    left: 0;
    width: 40px;
    height: 2px;
    background-color: var(--color-accent);
}

.nav-menu {
    display: flex;
    list-style: none;
    gap: 2.5rem;
}

.nav-menu li a {
    text-decoration: none;
    color: var(--color-dark);
    font-size: 0.95rem;
    letter-spacing: 0.5px;
    position: relative;
    padding-bottom: 5px;
    transition: color 0.3s;
}

.nav-menu li a::after {
    content: '';
    position: absolute;
    bottom: 0;
    left: 0;
    width: 0;
    height: 1px;
    background-color: var(--color-accent);
    transition: width 0.3s ease;
}

.nav-menu li a:hover {
    color: var(--color-primary);
}

.nav-menu li a:hover::after {
    width: 100%;
}

.cta-btn {
    background-color: var(--color-primary);
    color: white;
    border: none;
    padding: 0.8rem 1.8rem;
    font-family: var(--font-body);
    font-size: 0.9rem;
    border-radius: 50px;
    cursor: pointer;
    text-decoration: none;
    transition: all 0.3s ease;
    position: relative;
    overflow: hidden;
    z-index: 1;
}

.cta-btn::before {
    content: '';
    position: absolute;
    top: 0;
    left: -100%;
    width: 100%;
    height: 100%;
    background-color: var(--color-accent);
    transition: all 0.4s ease;
    z-index: -1;
}

.cta-btn:hover::before {
    left: 0;
}

.mobile-toggle {
    display: none;
    cursor: pointer;
    width: 30px;
    height: 20px;
    position: relative;
    z-index: 20;
}

.mobile-toggle span {
    display: block;
    position: absolute;
    height: 2px;
    width: 100%;
    background: var(--color-primary);
    transition: all 0.3s ease;
}

.mobile-toggle span:nth-child(1) { top: 0; }
.mobile-toggle span:nth-child(2) { top: 9px; }
.mobile-toggle span:nth-child(3) { top: 18px; }

/* Hero */
.hero {
    min-height: 90vh;
    overflow: hidden;
    position: relative;
    display: flex;
    align-items: center;
    margin-top: -80px;
    padding-top: 80px;
    clip-path: ellipse(120% 100% at 50% 0%);
    background-color: var(--color-primary);
    background-size: cover;
    background-position: center;
}

.hero-pattern {
    position: absolute;
    inset: 0;
    background: linear-gradient(to bottom, rgba(10, 75, 68, 0.9), rgba(10, 75, 68, 0.75));
}

.hero-container {
    max-width: 1400px;
    margin: 0 auto;
    padding: 0 2rem;
    display: flex;
    align-items: center;
    gap: 3rem;
    position: relative;
    z-index: 1;
}

.hero-content {
    flex: 1;
    color: white;
    max-width: 600px;
    position: relative;
}

.hero-title {
    font-family: var(--font-heading);
    font-size: 4.5rem;
    font-weight: 300;
    line-height: 1.1;
    margin-bottom: 1.5rem;
    color: white;
}

.hero-subtitle {
    font-size: 1.1rem;
    font-weight: 300;
    margin-bottom: 2.5rem;
    opacity: 0.9;
}

.hero-btn {
    display: inline-block;
    background-color: var(--color-accent);
    color: var(--color-dark);
    padding: 1rem 2.5rem;
    border-radius: 50px;
    font-size: 1rem;
    text-decoration: none;
    transition: all 0.3s ease;
}

.hero-btn:hover {
    background-color: white;
    transform: translateY(-3px);
    box-shadow: 0 10px 20px rgba(0, 0, 0, 0.1);
}

.hero-image {
    flex: 1;
    position: relative;
}

.hero-img-shape {
    position: relative;
    width: 100%;
    height: 500px;
    border-radius: 63% 37% 54% 46% / 55% 52% 48% 45%;
    overflow: hidden;
    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.15);
    transition: all 0.3s ease;
}

.hero-img-shape img {
    width: 100%;
    height: 100%;
    object-fit: cover;
}

.hero-img-shape:hover {
    border-radius: 40% 60% 60% 40% / 60% 30% 70% 40%;
}

/* Section headings */
.section-title-container {
    text-align: center;
    margin-bottom: 4rem;
}

.section-title {
    font-size: 3rem;
    margin-bottom: 1rem;
}

.section-subtitle {
    max-width: 600px;
    margin: 0 auto;
    opacity: 0.8;
}

/* Services */
.services-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 2.5rem;
}

.service-card {
    background-color: white;
    border-radius: 20px;
    overflow: hidden;
    box-shadow: 0 10px 30px rgba(0, 0, 0, 0.05);
    transition: transform 0.3s ease, box-shadow 0.3s ease;
}

.service-card:hover {
    transform: translateY(-8px);
    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.08);
}

.service-card img {
    width: 100%;
    height: 220px;
    object-fit: cover;
}

.service-content {
    padding: 2rem;
}

.service-title {
    font-size: 1.6rem;
    margin-bottom: 0.8rem;
}

.service-desc {
    margin-bottom: 1.5rem;
    opacity: 0.85;
}

.service-details {
    display: flex;
    justify-content: space-between;
    padding: 1rem 0;
    border-top: 1px solid var(--color-neutral);
    margin-bottom: 1rem;
}

.detail-label {
    font-size: 0.8rem;
    text-transform: uppercase;
    letter-spacing: 1px;
    opacity: 0.6;
}

.detail-value {
    font-weight: 500;
    color: var(--color-primary);
}

.service-link {
    color: var(--color-accent);
    text-decoration: none;
    font-weight: 500;
}

/* Philosophy */
.philosophy-container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 6rem 2rem;
    display: flex;
    flex-wrap: wrap;
    gap: 4rem;
    align-items: center;
}

.philosophy-images {
    flex: 1;
    min-width: 300px;
    position: relative;
    height: 500px;
}

.philosophy-img-1,
.philosophy-img-2 {
    position: absolute;
    border-radius: 30px;
    overflow: hidden;
    box-shadow: 0 20px 40px rgba(0, 0, 0, 0.1);
}

.philosophy-img-1 {
    width: 70%;
    height: 75%;
    top: 0;
    left: 0;
}

.philosophy-img-2 {
    width: 55%;
    height: 55%;
    bottom: 0;
    right: 0;
    border: 8px solid var(--color-light);
}

.philosophy-img-1 img,
.philosophy-img-2 img {
    width: 100%;
    height: 100%;
    object-fit: cover;
}

.philosophy-content {
    flex: 1;
    min-width: 300px;
}

.philosophy-title {
    font-size: 3rem;
    margin-bottom: 1.5rem;
}

.philosophy-text {
    margin-bottom: 1.2rem;
}

.principles {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
    gap: 1.5rem;
    width: 100%;
}

.principle {
    padding: 1.5rem;
    border-radius: 16px;
    background-color: white;
}

.principle-icon {
    font-size: 1.8rem;
    color: var(--color-accent);
    margin-bottom: 0.8rem;
}

.principle-title {
    font-size: 1.3rem;
    margin-bottom: 0.5rem;
}

/* Testimonials */
.testimonials {
    background-color: var(--color-neutral);
}

.testimonials-container {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 2rem;
}

.testimonial-card {
    background-color: white;
    padding: 2.5rem;
    border-radius: 20px;
    position: relative;
}

.testimonial-content {
    font-style: italic;
    margin-bottom: 2rem;
}

.testimonial-author {
    display: flex;
    align-items: center;
    gap: 1rem;
}

.author-img img {
    width: 56px;
    height: 56px;
    border-radius: 50%;
    object-fit: cover;
}

.author-info h3 {
    font-size: 1.2rem;
}

.stars {
    color: var(--color-accent);
    letter-spacing: 2px;
}

/* Contact */
.contact-container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 6rem 2rem;
    display: flex;
    flex-wrap: wrap;
    gap: 4rem;
}

.contact-info {
    flex: 1;
    min-width: 300px;
}

.contact-title {
    font-size: 3rem;
    margin-bottom: 1rem;
}

.contact-text {
    margin-bottom: 2.5rem;
}

.contact-item {
    display: flex;
    gap: 1rem;
    margin-bottom: 1.5rem;
}

.contact-icon {
    width: 48px;
    height: 48px;
    border-radius: 50%;
    background-color: var(--color-primary);
    color: white;
    display: flex;
    justify-content: center;
    align-items: center;
    flex-shrink: 0;
}

.contact-form {
    flex: 1;
    min-width: 300px;
    background-color: white;
    padding: 3rem;
    border-radius: 20px;
}

.form-group {
    margin-bottom: 1.5rem;
}

.form-group label {
    display: block;
    margin-bottom: 0.5rem;
    font-size: 0.9rem;
}

.form-group input,
.form-group textarea {
    width: 100%;
    padding: 0.9rem 1.2rem;
    border: 1px solid var(--color-neutral);
    border-radius: 10px;
    font-family: var(--font-body);
    font-size: 1rem;
    background-color: var(--color-light);
}

.form-group textarea {
    min-height: 150px;
    resize: vertical;
}

.submit-btn {
    background-color: var(--color-primary);
    color: white;
    border: none;
    padding: 1rem 2.5rem;
    border-radius: 50px;
    font-size: 1rem;
    cursor: pointer;
    transition: background-color 0.3s ease;
}

.submit-btn:hover {
    background-color: var(--color-accent);
}

/* Footer */
.footer {
    padding: 5rem 0 2rem;
    position: relative;
    overflow: hidden;
    background-color: var(--color-primary);
    color: white;
}

.footer-container {
    max-width: 1400px;
    margin: 0 auto;
    padding: 0 2rem;
}

.footer-top {
    display: flex;
    flex-wrap: wrap;
    gap: 3rem;
    margin-bottom: 4rem;
}

.footer-info {
    flex: 2;
    min-width: 300px;
}

.footer-logo {
    font-family: var(--font-heading);
    font-size: 2rem;
    color: white;
    margin-bottom: 1.5rem;
}

.footer-desc {
    max-width: 400px;
    margin-bottom: 2rem;
    line-height: 1.7;
    opacity: 0.8;
}

.footer-social {
    display: flex;
    gap: 1rem;
}

.social-link {
    width: 40px;
    height: 40px;
    border-radius: 50%;
    background-color: rgba(255, 255, 255, 0.1);
    display: flex;
    justify-content: center;
    align-items: center;
    color: white;
    text-decoration: none;
    transition: all 0.3s ease;
}

.social-link:hover {
    background-color: var(--color-accent);
    transform: translateY(-3px);
}

.footer-nav {
    flex: 1;
    min-width: 150px;
}

.footer-heading {
    font-family: var(--font-heading);
    font-size: 1.3rem;
    color: white;
    margin-bottom: 1.5rem;
    position: relative;
}

.footer-heading::after {
    content: '';
    position: absolute;
    bottom: -8px;
    left: 0;
    width: 40px;
    height: 2px;
    background-color: var(--color-accent);
}

.footer-links {
    list-style: none;
    display: flex;
    flex-direction: column;
    gap: 0.8rem;
}

.footer-links li a {
    color: white;
    text-decoration: none;
    opacity: 0.8;
    transition: all 0.3s ease;
}

.footer-links li a:hover {
    opacity: 1;
}

.footer-bottom {
    padding-top: 2rem;
    text-align: center;
    border-top: 1px solid rgba(255, 255, 255, 0.1);
    opacity: 0.7;
    font-size: 0.9rem;
}

/* Misc */
.unknown-block {
    padding: 1rem;
    border: 1px dashed var(--color-accent);
    font-family: monospace;
    font-size: 0.85rem;
}

.animate-on-scroll {
    opacity: 0;
    transform: translateY(30px);
    transition: opacity 0.8s ease, transform 0.8s ease;
}

.animate-on-scroll.visible {
    opacity: 1;
    transform: translateY(0);
}

/* Responsive */
@media (max-width: 992px) {
    .hero-container {
        flex-direction: column;
    }

    .hero-content {
        text-align: center;
        max-width: 100%;
    }

    .hero-title {
        font-size: 3.5rem;
    }

    .footer-top {
        flex-direction: column;
        gap: 2rem;
    }
}

@media (max-width: 768px) {
    .header {
        padding: 1.5rem 0;
    }

    .nav-menu {
        position: fixed;
        top: 0;
        right: -100%;
        width: 80%;
        max-width: 400px;
        height: 100vh;
        background-color: white;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        gap: 2rem;
        transition: all 0.5s ease;
        z-index: 15;
        box-shadow: -10px 0 30px rgba(0, 0, 0, 0.1);
    }

    .nav-menu.active {
        right: 0;
    }

    .mobile-toggle {
        display: block;
    }

    .hero {
        min-height: auto;
        padding: 6rem 0 4rem;
    }

    .hero-title {
        font-size: 3rem;
    }

    .philosophy-images {
        height: 360px;
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::theme::extract_theme;

    #[test]
    fn root_block_reads_back() {
        let mut theme = Theme::default();
        theme.colors.primary = "#123456".into();
        theme.fonts.body = "'Arial', sans-serif".into();
        let css = stylesheet(&theme);
        assert!(css.contains("--color-primary: #123456;"));
        assert_eq!(extract_theme(&css), theme);
    }

    #[test]
    fn token_values_cannot_escape_the_rule() {
        let mut theme = Theme::default();
        theme.colors.accent = "red;} body{display:none".into();
        theme.colors.dark = "</style><script>".into();
        let css = root_block(&theme);
        assert!(css.contains("--color-accent: red bodydisplay:none;"));
        assert!(!css.contains("</style>"));
        assert_eq!(css.matches('}').count(), 1);
    }
}

use super::escape_html as esc;
use crate::schema::blocks::*;
use crate::schema::Block;

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';

/// Markup for one block, in the class vocabulary the parser reads back.
pub fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Heading(h) => {
            let level = h.tag_level();
            out.push_str(&format!(
                "<h{level} class=\"{}\"{}>{}</h{level}>\n",
                esc(&h.class_name),
                style_attr(h.style.as_deref()),
                esc(&h.text),
            ));
        }
        Block::Paragraph(p) => out.push_str(&format!(
            "<p class=\"{}\"{}>{}</p>\n",
            esc(&p.class_name),
            style_attr(p.style.as_deref()),
            esc(&p.text),
        )),
        Block::Image(img) => image(out, img),
        Block::Button(b) => out.push_str(&format!(
            "<a href=\"{}\" class=\"{}\">{}</a>\n",
            esc(url_or_hash(&b.url)),
            esc(&button_class(&b.class_name)),
            esc(&b.text),
        )),
        Block::Divider(d) => out.push_str(&format!("<hr class=\"{}\">\n", esc(&d.class_name))),
        Block::Container(c) => {
            out.push_str(&format!("<div class=\"{}\">\n", esc(&c.class_name)));
            for child in &c.children {
                render_block(out, child);
            }
            out.push_str("</div>\n");
        }
        Block::Logo(l) => out.push_str(&format!("<div class=\"logo\">{}</div>\n", esc(&l.text))),
        Block::Navigation(nav) => navigation(out, nav),
        Block::HeroContent(h) => hero_content(out, h),
        Block::HeroImage(h) => out.push_str(&format!(
            "<div class=\"hero-image\">\n<div class=\"hero-img-shape\">\n<img src=\"{}\" alt=\"{}\">\n</div>\n</div>\n",
            esc(&h.src),
            esc(&h.alt),
        )),
        // Applied to the section element itself.
        Block::Background(_) => {}
        Block::SectionHeader(h) => section_header(out, h),
        Block::ServiceCard(card) => service_card(out, card),
        Block::ServicesContainer(c) => {
            out.push_str("<div class=\"services-grid\">\n");
            c.items.iter().for_each(|card| service_card(out, card));
            out.push_str("</div>\n");
        }
        Block::ImageGallery(g) => image_gallery(out, g),
        Block::RichText(rt) => rich_text(out, rt),
        Block::Card(card) => principle(out, card),
        Block::CardsContainer(c) => {
            out.push_str("<div class=\"principles\">\n");
            c.items.iter().for_each(|card| principle(out, card));
            out.push_str("</div>\n");
        }
        Block::Testimonial(t) => testimonial(out, t),
        Block::TestimonialsCarousel(c) => {
            out.push_str("<div class=\"testimonials-container\">\n");
            c.items.iter().for_each(|t| testimonial(out, t));
            out.push_str("</div>\n");
        }
        Block::ContactInfo(info) => contact_info(out, info),
        Block::Form(form) => contact_form(out, form),
        Block::Text(t) => out.push_str(&format!("<p class=\"text-block\">{}</p>\n", esc(&t.content))),
        Block::SocialLinks(links) => social_links(out, links),
        Block::FooterColumns(cols) => {
            for column in &cols.columns {
                footer_column(out, column);
            }
        }
        Block::Copyright(c) => copyright(out, &c.text),
        Block::Unrecognized(raw) => {
            let name: &str = if raw.type_name.is_empty() { "unknown" } else { &raw.type_name };
            out.push_str(&format!(
                "<div class=\"unknown-block\" data-block-type=\"{0}\">{0}</div>\n",
                esc(name)
            ));
        }
    }
}

fn style_attr(style: Option<&str>) -> String {
    match style.map(str::trim) {
        Some(s) if !s.is_empty() => format!(" style=\"{}\"", esc(s)),
        _ => String::new(),
    }
}

fn url_or_hash(url: &str) -> &str {
    if url.trim().is_empty() {
        "#"
    } else {
        url
    }
}

/// Generic buttons always carry a `btn` token so the parser picks them up again.
pub fn button_class(class_name: &str) -> String {
    let class_name = class_name.trim();
    let has_token = class_name
        .split_whitespace()
        .any(|token| token == "btn" || token == "button");
    match (class_name.is_empty(), has_token) {
        (true, _) => "btn".to_string(),
        (false, true) => class_name.to_string(),
        (false, false) => format!("btn {}", class_name),
    }
}

fn image(out: &mut String, img: &Image) {
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\" class=\"{}\">\n",
        esc(&img.src),
        esc(&img.alt),
        esc(&img.class_name),
    ));
}

pub fn navigation(out: &mut String, nav: &Navigation) {
    out.push_str("<nav>\n<ul class=\"nav-menu\">\n");
    for item in &nav.items {
        out.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            esc(url_or_hash(&item.url)),
            esc(&item.label),
        ));
    }
    out.push_str("</ul>\n</nav>\n");
}

fn hero_content(out: &mut String, h: &HeroContent) {
    out.push_str("<div class=\"hero-content\">\n");
    out.push_str(&format!("<h1 class=\"hero-title\">{}</h1>\n", esc(&h.title)));
    if !h.subtitle.is_empty() {
        out.push_str(&format!("<p class=\"hero-subtitle\">{}</p>\n", esc(&h.subtitle)));
    }
    if !h.button_text.is_empty() {
        out.push_str(&format!(
            "<a href=\"{}\" class=\"hero-btn\">{}</a>\n",
            esc(url_or_hash(&h.button_link)),
            esc(&h.button_text),
        ));
    }
    out.push_str("</div>\n");
}

fn section_header(out: &mut String, h: &SectionHeader) {
    out.push_str("<div class=\"section-title-container\">\n");
    out.push_str(&format!("<h2 class=\"section-title\">{}</h2>\n", esc(&h.title)));
    if !h.subtitle.is_empty() {
        out.push_str(&format!("<p class=\"section-subtitle\">{}</p>\n", esc(&h.subtitle)));
    }
    out.push_str("</div>\n");
}

fn service_card(out: &mut String, card: &ServiceCard) {
    out.push_str("<div class=\"service-card animate-on-scroll\">\n");
    if !card.image.is_empty() {
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            esc(&card.image),
            esc(&card.image_alt),
        ));
    }
    out.push_str("<div class=\"service-content\">\n");
    out.push_str(&format!("<h3 class=\"service-title\">{}</h3>\n", esc(&card.title)));
    out.push_str(&format!("<p class=\"service-desc\">{}</p>\n", esc(&card.description)));
    // Both values are always emitted: the parser reads duration first, price last.
    out.push_str(&format!(
        "<div class=\"service-details\">\n\
         <div class=\"detail\"><span class=\"detail-label\">Durée</span><span class=\"detail-value\">{}</span></div>\n\
         <div class=\"detail\"><span class=\"detail-label\">Tarif</span><span class=\"detail-value\">{}</span></div>\n\
         </div>\n",
        esc(&card.duration),
        esc(&card.price),
    ));
    if !card.link_text.is_empty() {
        out.push_str(&format!(
            "<a href=\"{}\" class=\"service-link\">{}</a>\n",
            esc(url_or_hash(&card.link_url)),
            esc(&card.link_text),
        ));
    }
    out.push_str("</div>\n</div>\n");
}

fn image_gallery(out: &mut String, gallery: &ImageGallery) {
    out.push_str("<div class=\"philosophy-images\">\n");
    for (i, img) in gallery.items.iter().enumerate() {
        let class_name = if img.class_name.trim().is_empty() {
            format!("philosophy-img-{}", i % 2 + 1)
        } else {
            img.class_name.clone()
        };
        out.push_str(&format!(
            "<div class=\"{}\"><img src=\"{}\" alt=\"{}\"></div>\n",
            esc(&class_name),
            esc(&img.src),
            esc(&img.alt),
        ));
    }
    out.push_str("</div>\n");
}

fn rich_text(out: &mut String, rt: &RichText) {
    out.push_str("<div class=\"philosophy-content\">\n");
    out.push_str(&format!("<h2 class=\"philosophy-title\">{}</h2>\n", esc(&rt.title)));
    for paragraph in &rt.paragraphs {
        out.push_str(&format!("<p class=\"philosophy-text\">{}</p>\n", esc(paragraph)));
    }
    out.push_str("</div>\n");
}

fn principle(out: &mut String, card: &Card) {
    out.push_str(&format!(
        "<div class=\"principle animate-on-scroll\">\n\
         <div class=\"principle-icon\">{}</div>\n\
         <h3 class=\"principle-title\">{}</h3>\n\
         <p class=\"principle-desc\">{}</p>\n\
         </div>\n",
        esc(&card.icon),
        esc(&card.title),
        esc(&card.description),
    ));
}

pub fn stars(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    let mut s = String::with_capacity(MAX_RATING as usize * 3);
    s.extend(std::iter::repeat(FILLED_STAR).take(filled));
    s.extend(std::iter::repeat(EMPTY_STAR).take(MAX_RATING as usize - filled));
    s
}

fn testimonial(out: &mut String, t: &Testimonial) {
    out.push_str("<div class=\"testimonial-card\">\n");
    out.push_str(&format!("<p class=\"testimonial-content\">{}</p>\n", esc(&t.content)));
    out.push_str("<div class=\"testimonial-author\">\n");
    if !t.author.image.is_empty() {
        out.push_str(&format!(
            "<div class=\"author-img\"><img src=\"{}\" alt=\"{}\"></div>\n",
            esc(&t.author.image),
            esc(&t.author.name),
        ));
    }
    out.push_str(&format!(
        "<div class=\"author-info\">\n<h3>{}</h3>\n<div class=\"stars\" data-rating=\"{}\">{}</div>\n</div>\n",
        esc(&t.author.name),
        t.author.rating.min(MAX_RATING),
        stars(t.author.rating),
    ));
    out.push_str("</div>\n</div>\n");
}

fn contact_info(out: &mut String, info: &ContactInfo) {
    out.push_str("<div class=\"contact-info\">\n");
    out.push_str(&format!("<h2 class=\"contact-title\">{}</h2>\n", esc(&info.title)));
    out.push_str(&format!("<p class=\"contact-text\">{}</p>\n", esc(&info.description)));
    for item in &info.items {
        out.push_str(&format!(
            "<div class=\"contact-item\">\n\
             <div class=\"contact-icon\">{}</div>\n\
             <div class=\"contact-details\"><h3>{}</h3><p>{}</p></div>\n\
             </div>\n",
            esc(&item.icon),
            esc(&item.title),
            esc(&item.value),
        ));
    }
    out.push_str("</div>\n");
}

fn contact_form(out: &mut String, form: &Form) {
    out.push_str("<div class=\"contact-form\">\n<form>\n");
    for field in &form.fields {
        form_field(out, field);
    }
    let submit: &str = if form.submit_text.trim().is_empty() {
        "Envoyer"
    } else {
        &form.submit_text
    };
    out.push_str(&format!(
        "<button type=\"submit\" class=\"submit-btn\">{}</button>\n</form>\n</div>\n",
        esc(submit)
    ));
}

fn form_field(out: &mut String, field: &FormField) {
    let mut attrs = String::new();
    if !field.name.is_empty() {
        attrs.push_str(&format!(" id=\"{0}\" name=\"{0}\"", esc(&field.name)));
    }
    if !field.placeholder.is_empty() {
        attrs.push_str(&format!(" placeholder=\"{}\"", esc(&field.placeholder)));
    }
    if field.required {
        attrs.push_str(" required");
    }

    out.push_str("<div class=\"form-group\">\n");
    if field.name.is_empty() {
        out.push_str(&format!("<label>{}</label>\n", esc(&field.label)));
    } else {
        out.push_str(&format!(
            "<label for=\"{}\">{}</label>\n",
            esc(&field.name),
            esc(&field.label)
        ));
    }
    match field.kind {
        FieldKind::Textarea => out.push_str(&format!("<textarea{}></textarea>\n", attrs)),
        FieldKind::Input => {
            let input_type = match field.input_type.trim() {
                "" | "textarea" => "text",
                other => other,
            };
            out.push_str(&format!("<input type=\"{}\"{}>\n", esc(input_type), attrs));
        }
    }
    out.push_str("</div>\n");
}

pub fn social_links(out: &mut String, links: &SocialLinks) {
    out.push_str("<div class=\"footer-social\">\n");
    for link in &links.items {
        out.push_str(&format!(
            "<a href=\"{}\" class=\"social-link\">{}</a>\n",
            esc(url_or_hash(&link.url)),
            esc(&link.icon),
        ));
    }
    out.push_str("</div>\n");
}

fn footer_column(out: &mut String, column: &FooterColumn) {
    out.push_str("<div class=\"footer-nav\">\n");
    out.push_str(&format!("<h3 class=\"footer-heading\">{}</h3>\n", esc(&column.heading)));
    out.push_str("<ul class=\"footer-links\">\n");
    for link in &column.links {
        if link.is_text {
            out.push_str(&format!("<li>{}</li>\n", esc(&link.label)));
        } else {
            out.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>\n",
                esc(url_or_hash(&link.url)),
                esc(&link.label),
            ));
        }
    }
    out.push_str("</ul>\n</div>\n");
}

pub fn copyright(out: &mut String, text: &str) {
    out.push_str(&format!("<div class=\"footer-bottom\">\n<p>{}</p>\n</div>\n", esc(text)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::blocks::RawBlock;

    fn render(block: &Block) -> String {
        let mut out = String::new();
        render_block(&mut out, block);
        out
    }

    #[test]
    fn heading_without_class_or_style() {
        let block = Block::Heading(Heading {
            id: "h".into(),
            level: 2,
            text: "Hi".into(),
            ..Default::default()
        });
        assert!(render(&block).contains("<h2 class=\"\">Hi</h2>"));
    }

    #[test]
    fn heading_level_is_clamped() {
        let block = Block::Heading(Heading {
            level: 9,
            text: "Deep".into(),
            ..Default::default()
        });
        assert!(render(&block).contains("<h6 class=\"\">Deep</h6>"));
    }

    #[test]
    fn unknown_block_is_diagnostic() {
        let block = Block::Unrecognized(RawBlock {
            id: "x".into(),
            type_name: "countdown".into(),
            ..Default::default()
        });
        assert_eq!(
            render(&block),
            "<div class=\"unknown-block\" data-block-type=\"countdown\">countdown</div>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        let block = Block::Paragraph(Paragraph {
            text: "<script>alert(\"x\") & co</script>".into(),
            ..Default::default()
        });
        let html = render(&block);
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;) &amp; co&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn button_classes() {
        assert_eq!(button_class(""), "btn");
        assert_eq!(button_class("btn primary"), "btn primary");
        assert_eq!(button_class("button"), "button");
        assert_eq!(button_class("hero-cta"), "btn hero-cta");
    }

    #[test]
    fn star_strings() {
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(0), "☆☆☆☆☆");
        assert_eq!(stars(12), "★★★★★");
    }
}

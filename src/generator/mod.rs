pub mod blocks;
pub mod script;
pub mod sections;
pub mod stylesheet;

use chrono::Datelike;

use crate::parser::RUNTIME_SCRIPT_ATTR;
use crate::schema::defaults::SITE_NAME;
use crate::schema::{PageDocument, Theme};

/// Values that would otherwise make generation depend on the clock or on
/// site-wide settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub year: i32,
    pub site_name: String,
}

impl RenderOptions {
    pub fn new(year: i32, site_name: &str) -> Self {
        RenderOptions {
            year,
            site_name: site_name.to_string(),
        }
    }

    /// Current year, with the given site name.
    pub fn current(site_name: &str) -> Self {
        Self::new(chrono::Local::now().year(), site_name)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::current(SITE_NAME)
    }
}

/// Render a document with the current year and the default site name.
pub fn generate_html_from_structure(doc: &PageDocument) -> String {
    generate_html(doc, &RenderOptions::default())
}

/// Render a complete, self-contained HTML page. Every missing field falls back
/// to a default; there is no error path.
pub fn generate_html(doc: &PageDocument, opts: &RenderOptions) -> String {
    let theme = doc.theme.clone().unwrap_or_default();
    let title = if doc.title.trim().is_empty() {
        &opts.site_name
    } else {
        &doc.title
    };

    let mut out = String::with_capacity(48 * 1024);
    out.push_str("<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    out.push_str(&format!(
        "<meta name=\"description\" content=\"{}\">\n",
        escape_html(&doc.meta.description)
    ));
    out.push_str(&format!(
        "<meta name=\"keywords\" content=\"{}\">\n",
        escape_html(&doc.meta.keywords)
    ));
    out.push_str("<style>\n");
    out.push_str(&stylesheet::stylesheet(&theme));
    out.push_str("</style>\n</head>\n<body>\n");

    for section in &doc.sections {
        sections::render_section(&mut out, section, opts);
    }

    for body in doc.scripts.iter().filter(|s| !s.trim().is_empty()) {
        out.push_str(&format!("<script>\n{}\n</script>\n", script_body(body)));
    }
    out.push_str(&format!(
        "<script {}>\n{}</script>\n",
        RUNTIME_SCRIPT_ATTR,
        script::RUNTIME_JS
    ));
    out.push_str("</body>\n</html>\n");
    out
}

/// Standalone stylesheet for publishing as `css/main.css`.
pub fn site_css(theme: &Theme) -> String {
    stylesheet::stylesheet(theme)
}

/// Standalone runtime script for publishing as `js/main.js`.
pub fn site_js() -> &'static str {
    script::RUNTIME_JS
}

// An inline script cannot contain its own end tag.
fn script_body(body: &str) -> String {
    body.replace("</script", "<\\/script")
}

/// Escape `&`, `<`, `>` and `"` for text and double-quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_html_page;
    use crate::schema::blocks::*;
    use crate::schema::{Block, Section, SectionKind, SectionType};

    fn opts() -> RenderOptions {
        RenderOptions::new(2031, "Ayurveda Équilibre")
    }

    fn page(sections: Vec<Section>) -> PageDocument {
        PageDocument {
            title: "Test".into(),
            sections,
            ..Default::default()
        }
    }

    fn section(class_name: &str, section_type: SectionType, content: Vec<Block>) -> Section {
        Section {
            id: format!("{}-id", class_name),
            section_type,
            class_name: class_name.into(),
            content,
        }
    }

    fn reparse(doc: &PageDocument) -> PageDocument {
        parse_html_page(&generate_html(doc, &opts())).unwrap()
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_html(r#"a & b < c > d "e" 'f'"#), "a &amp; b &lt; c &gt; d &quot;e&quot; 'f'");
    }

    #[test]
    fn generation_is_idempotent() {
        let html = std::fs::read_to_string("tests/fixtures/ayurveda.html").unwrap();
        let doc = parse_html_page(&html).unwrap();
        assert_eq!(generate_html(&doc, &opts()), generate_html(&doc, &opts()));
    }

    #[test]
    fn empty_document_renders_a_page() {
        let html = generate_html(&PageDocument::default(), &opts());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ayurveda Équilibre</title>"));
        assert!(html.contains("--color-primary: #0a4b44;"));
        assert!(html.contains("<script data-runtime>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn stripped_document_has_no_undefined_or_null() {
        let json = br#"{"sections":[
            {"type":"header","className":"header","content":[{"type":"logo"},{"type":"navigation","items":[{}]},{"type":"button"}]},
            {"type":"section","className":"hero","content":[{"type":"heroContent"},{"type":"heroImage"},{"type":"background"}]},
            {"type":"section","className":"services","content":[{"type":"sectionHeader"},{"type":"servicesContainer","items":[{}]}]},
            {"type":"section","className":"philosophy","content":[{"type":"imageGallery","items":[{}]},{"type":"richText"},{"type":"cardsContainer","items":[{}]}]},
            {"type":"section","className":"testimonials","content":[{"type":"testimonialsCarousel","items":[{"author":null}]}]},
            {"type":"section","className":"contact","content":[{"type":"contactInfo","items":[{}]},{"type":"form","fields":[{},{"type":"textarea"}]}]},
            {"type":"section","content":[{"type":"heading"},{"type":"paragraph"},{"type":"image"},{"type":"button"},{"type":"divider"},{"type":"container","children":[{}]}]},
            {"type":"footer","className":"footer","content":[{"type":"text"},{"type":"socialLinks","items":[{}]},{"type":"footerColumns","columns":[{"links":[{}]}]},{"type":"copyright"}]},
            {"content":[{"type":null}]},
            {}
        ]}"#;
        let doc = PageDocument::from_json(json).unwrap();
        let html = generate_html(&doc, &opts());
        assert!(!html.contains("undefined"));
        assert!(!html.contains("null"));
        assert!(!html.contains("NaN"));
    }

    #[test]
    fn unknown_block_renders_diagnostic() {
        let doc = PageDocument::from_json(
            br#"{"sections":[{"type":"section","className":"services","content":[{"type":"countdown","id":"c"}]}]}"#,
        )
        .unwrap();
        let html = generate_html(&doc, &opts());
        assert!(html.contains("<div class=\"unknown-block\" data-block-type=\"countdown\">countdown</div>"));
    }

    #[test]
    fn heading_scenario() {
        let doc = page(vec![section(
            "content",
            SectionType::Section,
            vec![Block::Heading(Heading {
                id: "h".into(),
                level: 2,
                text: "Hi".into(),
                ..Default::default()
            })],
        )]);
        assert!(generate_html(&doc, &opts()).contains("<h2 class=\"\">Hi</h2>"));
    }

    #[test]
    fn custom_class_paragraph_round_trip() {
        let doc = page(vec![section(
            "totally-custom-xyz",
            SectionType::Section,
            vec![Block::Paragraph(Paragraph {
                id: "p".into(),
                text: "Le texte exact, avec « guillemets » & symboles <3".into(),
                ..Default::default()
            })],
        )]);
        let back = reparse(&doc);
        let s = &back.sections[0];
        assert_eq!(s.kind(), SectionKind::Generic);
        assert_eq!(s.class_name, "totally-custom-xyz");
        assert_eq!(s.content.len(), 1);
        let Block::Paragraph(p) = &s.content[0] else { panic!("expected paragraph") };
        assert_eq!(p.text, "Le texte exact, avec « guillemets » & symboles <3");
    }

    #[test]
    fn multi_line_paragraph_round_trip() {
        let doc = page(vec![section(
            "totally-custom-xyz",
            SectionType::Section,
            vec![Block::Paragraph(Paragraph {
                id: "p".into(),
                text: "Ligne 1\nLigne  2".into(),
                ..Default::default()
            })],
        )]);
        let back = reparse(&doc);
        let Block::Paragraph(p) = &back.sections[0].content[0] else { panic!("expected paragraph") };
        assert_eq!(p.text, "Ligne 1\nLigne  2");
    }

    #[test]
    fn malformed_fields_still_render_content() {
        let doc = PageDocument::from_json(
            br#"{"sections":[{"type":"section","className":"contact","content":[
                {"type":"heading","level":"3","text":"Nos valeurs"},
                {"type":"form","fields":[{"type":"input","label":"Email","name":"email","required":"true"}],"submitText":"Envoyer"}
            ]}]}"#,
        )
        .unwrap();
        let html = generate_html(&doc, &opts());
        assert!(!html.contains("class=\"unknown-block\""));
        assert!(html.contains("<h3 class=\"\">Nos valeurs</h3>"));
        assert!(html.contains("<label for=\"email\">Email</label>"));
        assert!(html.contains("<input type=\"text\" id=\"email\" name=\"email\" required>"));
    }

    #[test]
    fn every_kind_round_trips_its_primary_text() {
        let doc = page(vec![
            section(
                "header",
                SectionType::Header,
                vec![Block::Logo(Logo { id: "l".into(), text: "Acme".into() })],
            ),
            section(
                "hero",
                SectionType::Section,
                vec![Block::HeroContent(HeroContent {
                    title: "Hero title".into(),
                    ..Default::default()
                })],
            ),
            section(
                "services",
                SectionType::Section,
                vec![Block::ServicesContainer(ServicesContainer {
                    id: "sc".into(),
                    items: vec![ServiceCard {
                        title: "Massage".into(),
                        price: "90 €".into(),
                        ..Default::default()
                    }],
                })],
            ),
            section(
                "philosophy",
                SectionType::Section,
                vec![Block::RichText(RichText {
                    id: "rt".into(),
                    title: "Notre voie".into(),
                    paragraphs: vec!["Un".into(), "Deux".into()],
                })],
            ),
            section(
                "testimonials",
                SectionType::Section,
                vec![Block::TestimonialsCarousel(TestimonialsCarousel {
                    id: "tc".into(),
                    items: vec![Testimonial {
                        content: "Parfait".into(),
                        author: Author {
                            name: "Léa".into(),
                            image: String::new(),
                            rating: 3,
                        },
                        ..Default::default()
                    }],
                })],
            ),
            section(
                "contact",
                SectionType::Section,
                vec![Block::ContactInfo(ContactInfo {
                    title: "Écrivez-nous".into(),
                    ..Default::default()
                })],
            ),
            section(
                "footer",
                SectionType::Footer,
                vec![Block::FooterColumns(FooterColumns {
                    id: "fc".into(),
                    columns: vec![FooterColumn {
                        heading: "Liens".into(),
                        links: vec![FooterLink {
                            label: "Adresse".into(),
                            is_text: true,
                            ..Default::default()
                        }],
                        ..Default::default()
                    }],
                })],
            ),
        ]);

        let back = reparse(&doc);
        assert_eq!(back.sections.len(), 7);
        let kinds: Vec<SectionKind> = back.sections.iter().map(Section::kind).collect();
        let expected: Vec<SectionKind> = doc.sections.iter().map(Section::kind).collect();
        assert_eq!(kinds, expected);

        let Block::Logo(logo) = &back.sections[0].content[0] else { panic!("logo") };
        assert_eq!(logo.text, "Acme");
        let Block::HeroContent(hero) = &back.sections[1].content[0] else { panic!("hero") };
        assert_eq!(hero.title, "Hero title");
        let Block::ServicesContainer(sc) = &back.sections[2].content[0] else { panic!("services") };
        assert_eq!(sc.items[0].title, "Massage");
        assert_eq!(sc.items[0].duration, "");
        assert_eq!(sc.items[0].price, "90 €");
        let Block::RichText(rt) = &back.sections[3].content[0] else { panic!("richText") };
        assert_eq!(rt.title, "Notre voie");
        assert_eq!(rt.paragraphs, vec!["Un".to_string(), "Deux".to_string()]);
        let Block::TestimonialsCarousel(tc) = &back.sections[4].content[0] else { panic!("testimonials") };
        assert_eq!(tc.items[0].content, "Parfait");
        assert_eq!(tc.items[0].author.rating, 3);
        let Block::ContactInfo(ci) = &back.sections[5].content[0] else { panic!("contact") };
        assert_eq!(ci.title, "Écrivez-nous");
        let footer = &back.sections[6];
        let Some(Block::FooterColumns(fc)) = footer.content.iter().find(|b| b.type_name() == "footerColumns") else {
            panic!("footerColumns")
        };
        assert_eq!(fc.columns[0].heading, "Liens");
        assert!(fc.columns[0].links[0].is_text);
        let Some(Block::Copyright(c)) = footer.content.last() else { panic!("copyright") };
        assert_eq!(c.text, "© 2031 Ayurveda Équilibre. Tous droits réservés.");
    }

    #[test]
    fn fixture_round_trip_is_stable() {
        let html = std::fs::read_to_string("tests/fixtures/ayurveda.html").unwrap();
        let first = parse_html_page(&html).unwrap();
        let second = reparse(&first);
        assert_eq!(first.sections.len(), second.sections.len());
        assert_eq!(first.theme, second.theme);
        assert_eq!(first.scripts, second.scripts);
        for (a, b) in first.sections.iter().zip(&second.sections) {
            assert_eq!(a.kind(), b.kind(), "section {}", a.id);
            let types_a: Vec<&str> = a.content.iter().map(Block::type_name).collect();
            let types_b: Vec<&str> = b.content.iter().map(Block::type_name).collect();
            assert_eq!(types_a, types_b, "section {}", a.id);
        }
    }
}

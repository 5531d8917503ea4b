pub mod dom;
pub mod extract;
pub mod theme;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::error::ParseError;
use crate::schema::{classify_section, Meta, PageDocument, Section, SectionType};

/// Attribute marking the generator's own runtime script, which is not page content.
pub const RUNTIME_SCRIPT_ATTR: &str = "data-runtime";

/// Three passes over one document: head metadata and theme, top-level sections
/// through their kind's extractor, then inline scripts.
pub fn parse_html_page(html: &str) -> Result<PageDocument, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::Unparseable("empty input".into()));
    }
    if !html.contains('<') {
        return Err(ParseError::Unparseable("no markup found".into()));
    }

    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = dom::first_text(root, "title");
    let meta = Meta {
        description: dom::first_attr(root, r#"meta[name="description"]"#, "content"),
        keywords: dom::first_attr(root, r#"meta[name="keywords"]"#, "content"),
    };

    let css = dom::all(root, "style")
        .into_iter()
        .map(|style| style.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");
    let theme = theme::extract_theme(&css);

    let sections: Vec<Section> = top_level_sections(&document)
        .into_iter()
        .enumerate()
        .map(|(index, element)| parse_section(index, element))
        .collect();

    let scripts = inline_scripts(root);
    debug!(title = %title, sections = sections.len(), scripts = scripts.len(), "parsed page");

    Ok(PageDocument {
        title,
        meta,
        theme: Some(theme),
        sections,
        scripts,
        ..Default::default()
    })
}

fn top_level_sections(document: &Html) -> Vec<ElementRef<'_>> {
    let Ok(selector) = Selector::parse("body > header, body > section, body > footer") else {
        return Vec::new();
    };
    document.select(&selector).collect()
}

fn parse_section(index: usize, element: ElementRef) -> Section {
    let section_type = SectionType::from_tag(dom::tag_name(element));
    let class_name = dom::attr(element, "class");
    let kind = classify_section(section_type, &class_name);
    Section {
        id: dom::attr_or(element, "id", &format!("section-{}", index)),
        section_type,
        content: extract::extract_section(kind, element),
        class_name,
    }
}

fn inline_scripts(root: ElementRef) -> Vec<String> {
    dom::all(root, "script")
        .into_iter()
        .filter(|s| s.value().attr("src").is_none())
        .filter(|s| s.value().attr(RUNTIME_SCRIPT_ATTR).is_none())
        .map(|s| s.text().collect::<String>().trim().to_string())
        .filter(|body| !body.is_empty())
        .collect()
}

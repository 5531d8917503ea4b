pub mod blocks;
pub mod defaults;
mod lenient;
pub mod theme;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub use blocks::Block;
pub use theme::{DefaultTheme, Theme};

/// The JSON representation of one page; the unit of storage and editing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageDocument {
    pub title: String,
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    pub sections: Vec<Section>,
    pub scripts: Vec<String>,
    // Editor bookkeeping, kept when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub description: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub class_name: String,
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Header,
    #[default]
    Section,
    Footer,
    #[serde(other)]
    Other,
}

impl SectionType {
    /// Tag name a section of this type is emitted as.
    pub fn tag(self) -> &'static str {
        match self {
            SectionType::Header => "header",
            SectionType::Footer => "footer",
            SectionType::Section | SectionType::Other => "section",
        }
    }

    pub fn from_tag(tag: &str) -> SectionType {
        match tag.to_ascii_lowercase().as_str() {
            "header" => SectionType::Header,
            "section" => SectionType::Section,
            "footer" => SectionType::Footer,
            _ => SectionType::Other,
        }
    }
}

/// Which extraction/rendering routine a section goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Hero,
    Services,
    Philosophy,
    Testimonials,
    Contact,
    Header,
    Footer,
    Generic,
}

/// Class-name fragments checked in priority order, before the tag rules.
const CLASS_DISPATCH: &[(&str, SectionKind)] = &[
    ("hero", SectionKind::Hero),
    ("services", SectionKind::Services),
    ("philosophy", SectionKind::Philosophy),
    ("testimonials", SectionKind::Testimonials),
    ("contact", SectionKind::Contact),
];

/// Resolve a section's kind. Parser and generator both dispatch through here.
pub fn classify_section(section_type: SectionType, class_name: &str) -> SectionKind {
    if let Some((_, kind)) = CLASS_DISPATCH
        .iter()
        .find(|(fragment, _)| class_name.contains(fragment))
    {
        return *kind;
    }
    match section_type {
        SectionType::Header => SectionKind::Header,
        SectionType::Footer => SectionKind::Footer,
        SectionType::Section | SectionType::Other => SectionKind::Generic,
    }
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        classify_section(self.section_type, &self.class_name)
    }

    /// Editor skeleton: a section with no content yet.
    pub fn skeleton(id: &str, section_type: SectionType, class_name: &str) -> Section {
        Section {
            id: id.to_string(),
            section_type,
            class_name: class_name.to_string(),
            content: Vec::new(),
        }
    }
}

/// `<prefix>-<uuid>`, the id format used for every minted block id.
pub fn mint_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

impl PageDocument {
    /// Decode a stored document. `null` values count as absent so that every
    /// field falls back to its schema default.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<PageDocument> {
        let mut value: Value = serde_json::from_slice(bytes)?;
        prune_nulls(&mut value);
        serde_json::from_value(value)
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec_pretty(self)
    }

    /// New page with the editor's default header/main/footer skeleton.
    pub fn new_page(title: &str) -> PageDocument {
        PageDocument {
            title: title.to_string(),
            sections: vec![
                Section::skeleton("header", SectionType::Header, "header"),
                Section::skeleton("main-content", SectionType::Section, "main-content"),
                Section::skeleton("footer", SectionType::Footer, "footer"),
            ],
            ..Default::default()
        }
    }

    /// Fill in missing section and block ids; existing ids are kept.
    pub fn ensure_ids(&mut self) {
        for (index, section) in self.sections.iter_mut().enumerate() {
            if section.id.trim().is_empty() {
                section.id = format!("section-{}", index);
            }
            section.content.iter_mut().for_each(Block::ensure_ids);
        }
    }
}

/// Drop object entries whose value is `null`, recursively.
pub fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(prune_nulls);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_priority_order() {
        assert_eq!(classify_section(SectionType::Section, "hero services"), SectionKind::Hero);
        assert_eq!(classify_section(SectionType::Section, "our-services"), SectionKind::Services);
        assert_eq!(classify_section(SectionType::Header, "header"), SectionKind::Header);
        assert_eq!(classify_section(SectionType::Header, "hero-header"), SectionKind::Hero);
        assert_eq!(classify_section(SectionType::Footer, "footer"), SectionKind::Footer);
        assert_eq!(classify_section(SectionType::Section, "totally-custom-xyz"), SectionKind::Generic);
        assert_eq!(classify_section(SectionType::Other, ""), SectionKind::Generic);
    }

    #[test]
    fn nulls_fall_back_to_defaults() {
        let json = br#"{
            "title": null,
            "meta": null,
            "theme": {"colors": {"primary": null}},
            "sections": [
                {"id": "s", "type": "section", "className": null, "content": [
                    {"type": "heading", "id": "h", "level": null, "text": null}
                ]}
            ]
        }"#;
        let doc = PageDocument::from_json(json).unwrap();
        assert_eq!(doc.title, "");
        let theme = doc.theme.unwrap();
        assert_eq!(theme.colors.primary, DefaultTheme::PRIMARY);
        match &doc.sections[0].content[0] {
            Block::Heading(h) => {
                assert_eq!(h.level, 2);
                assert_eq!(h.text, "");
            }
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn unknown_section_type_is_other() {
        let doc = PageDocument::from_json(br#"{"sections":[{"id":"a","type":"aside"}]}"#).unwrap();
        assert_eq!(doc.sections[0].section_type, SectionType::Other);
        assert_eq!(doc.sections[0].kind(), SectionKind::Generic);
    }

    #[test]
    fn ensure_ids_fills_sections_and_blocks() {
        let mut doc = PageDocument::from_json(
            br#"{"sections":[{"type":"section","content":[{"type":"paragraph","text":"x"}]}]}"#,
        )
        .unwrap();
        doc.ensure_ids();
        assert_eq!(doc.sections[0].id, "section-0");
        assert!(doc.sections[0].content[0].id().starts_with("paragraph-"));
    }

    #[test]
    fn new_page_has_skeleton() {
        let doc = PageDocument::new_page("Nouvelle page");
        let kinds: Vec<_> = doc.sections.iter().map(Section::kind).collect();
        assert_eq!(kinds, vec![SectionKind::Header, SectionKind::Generic, SectionKind::Footer]);
        assert!(doc.sections.iter().all(|s| s.content.is_empty()));
    }
}

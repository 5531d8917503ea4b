use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

use super::{lenient, mint_id};

/// One typed content unit inside a section, tagged by `"type"` on the wire.
///
/// Known types decode into their own struct, with malformed fields defaulted
/// one by one. Unknown types (or payloads that are not objects) are kept
/// verbatim as [`Block::Unrecognized`] so documents written by newer editors
/// survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "camelCase")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Image(Image),
    Button(Button),
    Divider(Divider),
    Container(Container),
    Logo(Logo),
    Navigation(Navigation),
    HeroContent(HeroContent),
    HeroImage(HeroImage),
    Background(Background),
    SectionHeader(SectionHeader),
    ServiceCard(ServiceCard),
    ServicesContainer(ServicesContainer),
    ImageGallery(ImageGallery),
    RichText(RichText),
    Card(Card),
    CardsContainer(CardsContainer),
    Testimonial(Testimonial),
    TestimonialsCarousel(TestimonialsCarousel),
    ContactInfo(ContactInfo),
    Form(Form),
    Text(Text),
    SocialLinks(SocialLinks),
    FooterColumns(FooterColumns),
    Copyright(Copyright),
    #[serde(skip)]
    Unrecognized(RawBlock),
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match Block::deserialize(value.clone()) {
            Ok(block) => Ok(block),
            Err(err) => {
                let raw = RawBlock::from_value(value);
                debug!(block_type = %raw.type_name, error = %err, "keeping block as unrecognized");
                Ok(Block::Unrecognized(raw))
            }
        }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Block::Unrecognized(raw) => raw.fields.serialize(serializer),
            known => Block::serialize(known, serializer),
        }
    }
}

/// A block whose `type` this crate does not model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawBlock {
    pub id: String,
    pub type_name: String,
    /// The full original object, `type` and `id` included.
    pub fields: Map<String, Value>,
}

impl RawBlock {
    pub fn from_value(value: Value) -> RawBlock {
        let fields = match value {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".into(), other);
                map
            }
        };
        let read = |key: &str| {
            fields
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        RawBlock {
            id: read("id"),
            type_name: read("type"),
            fields,
        }
    }
}

// ── Simple blocks ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Heading {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::level")]
    pub level: u8,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::opt_text")]
    pub style: Option<String>,
}

impl Default for Heading {
    fn default() -> Self {
        Heading {
            id: String::new(),
            level: 2,
            text: String::new(),
            class_name: String::new(),
            style: None,
        }
    }
}

impl Heading {
    /// Level clamped into the valid `h1`..`h6` range.
    pub fn tag_level(&self) -> u8 {
        self.level.clamp(1, 6)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paragraph {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "lenient::opt_text")]
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Image {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub src: String,
    #[serde(deserialize_with = "lenient::text")]
    pub alt: String,
    #[serde(deserialize_with = "lenient::text")]
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Button {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(deserialize_with = "lenient::text")]
    pub class_name: String,
}

impl Default for Button {
    fn default() -> Self {
        Button {
            id: String::new(),
            text: String::new(),
            url: "#".into(),
            class_name: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Divider {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Container {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub class_name: String,
    #[serde(deserialize_with = "lenient::list")]
    pub children: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Logo {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Copyright {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub text: String,
}

// ── Header / hero ──

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Navigation {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavItem {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
}

impl Default for NavItem {
    fn default() -> Self {
        NavItem {
            id: String::new(),
            label: String::new(),
            url: "#".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,
    #[serde(deserialize_with = "lenient::text")]
    pub button_text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub button_link: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        HeroContent {
            id: String::new(),
            title: String::new(),
            subtitle: String::new(),
            button_text: String::new(),
            button_link: "#".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroImage {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub src: String,
    #[serde(deserialize_with = "lenient::text")]
    pub alt: String,
}

/// Background image url lifted from a section's inline `style`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionHeader {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub subtitle: String,
}

// ── Services ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceCard {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image_alt: String,
    #[serde(deserialize_with = "lenient::text")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::text")]
    pub price: String,
    #[serde(deserialize_with = "lenient::text")]
    pub link_text: String,
    #[serde(deserialize_with = "lenient::text")]
    pub link_url: String,
}

impl Default for ServiceCard {
    fn default() -> Self {
        ServiceCard {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            image: String::new(),
            image_alt: String::new(),
            duration: String::new(),
            price: String::new(),
            link_text: String::new(),
            link_url: "#".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesContainer {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<ServiceCard>,
}

// ── Philosophy ──

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageGallery {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RichText {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::texts")]
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsContainer {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<Card>,
}

// ── Testimonials ──

pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub content: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub author: Author,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub image: String,
    #[serde(deserialize_with = "lenient::rating")]
    pub rating: u8,
}

impl Default for Author {
    fn default() -> Self {
        Author {
            name: String::new(),
            image: String::new(),
            rating: MAX_RATING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonialsCarousel {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<Testimonial>,
}

// ── Contact ──

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<ContactItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactItem {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: String,
    #[serde(deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(deserialize_with = "lenient::text")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Form {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub fields: Vec<FormField>,
    #[serde(deserialize_with = "lenient::text")]
    pub submit_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Input,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormField {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "lenient::or_default")]
    pub kind: FieldKind,
    #[serde(deserialize_with = "lenient::text")]
    pub input_type: String,
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(deserialize_with = "lenient::text")]
    pub placeholder: String,
    #[serde(deserialize_with = "lenient::flag")]
    pub required: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
}

impl Default for FormField {
    fn default() -> Self {
        FormField {
            id: String::new(),
            kind: FieldKind::Input,
            input_type: "text".into(),
            label: String::new(),
            placeholder: String::new(),
            required: false,
            name: String::new(),
        }
    }
}

// ── Footer ──

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub items: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub icon: String,
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
}

impl Default for SocialLink {
    fn default() -> Self {
        SocialLink {
            id: String::new(),
            icon: String::new(),
            url: "#".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterColumns {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::list")]
    pub columns: Vec<FooterColumn>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterColumn {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub heading: String,
    #[serde(deserialize_with = "lenient::list")]
    pub links: Vec<FooterLink>,
}

/// A footer column entry: a link, or plain text when `is_text` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterLink {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    #[serde(deserialize_with = "lenient::text")]
    pub url: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    #[serde(deserialize_with = "lenient::flag")]
    pub is_text: bool,
}

// ── Accessors ──

impl Block {
    /// Wire name of this block's type.
    pub fn type_name(&self) -> &str {
        match self {
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::Image(_) => "image",
            Block::Button(_) => "button",
            Block::Divider(_) => "divider",
            Block::Container(_) => "container",
            Block::Logo(_) => "logo",
            Block::Navigation(_) => "navigation",
            Block::HeroContent(_) => "heroContent",
            Block::HeroImage(_) => "heroImage",
            Block::Background(_) => "background",
            Block::SectionHeader(_) => "sectionHeader",
            Block::ServiceCard(_) => "serviceCard",
            Block::ServicesContainer(_) => "servicesContainer",
            Block::ImageGallery(_) => "imageGallery",
            Block::RichText(_) => "richText",
            Block::Card(_) => "card",
            Block::CardsContainer(_) => "cardsContainer",
            Block::Testimonial(_) => "testimonial",
            Block::TestimonialsCarousel(_) => "testimonialsCarousel",
            Block::ContactInfo(_) => "contactInfo",
            Block::Form(_) => "form",
            Block::Text(_) => "text",
            Block::SocialLinks(_) => "socialLinks",
            Block::FooterColumns(_) => "footerColumns",
            Block::Copyright(_) => "copyright",
            Block::Unrecognized(raw) => &raw.type_name,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Block::Heading(b) => &b.id,
            Block::Paragraph(b) => &b.id,
            Block::Image(b) => &b.id,
            Block::Button(b) => &b.id,
            Block::Divider(b) => &b.id,
            Block::Container(b) => &b.id,
            Block::Logo(b) => &b.id,
            Block::Navigation(b) => &b.id,
            Block::HeroContent(b) => &b.id,
            Block::HeroImage(b) => &b.id,
            Block::Background(b) => &b.id,
            Block::SectionHeader(b) => &b.id,
            Block::ServiceCard(b) => &b.id,
            Block::ServicesContainer(b) => &b.id,
            Block::ImageGallery(b) => &b.id,
            Block::RichText(b) => &b.id,
            Block::Card(b) => &b.id,
            Block::CardsContainer(b) => &b.id,
            Block::Testimonial(b) => &b.id,
            Block::TestimonialsCarousel(b) => &b.id,
            Block::ContactInfo(b) => &b.id,
            Block::Form(b) => &b.id,
            Block::Text(b) => &b.id,
            Block::SocialLinks(b) => &b.id,
            Block::FooterColumns(b) => &b.id,
            Block::Copyright(b) => &b.id,
            Block::Unrecognized(raw) => &raw.id,
        }
    }

    /// Mint ids for this block and its nested items where they are missing.
    /// Existing ids are never touched.
    pub fn ensure_ids(&mut self) {
        let prefix = id_prefix(self.type_name());
        match self {
            Block::Heading(b) => fill(&mut b.id, &prefix),
            Block::Paragraph(b) => fill(&mut b.id, &prefix),
            Block::Image(b) => fill(&mut b.id, &prefix),
            Block::Button(b) => fill(&mut b.id, &prefix),
            Block::Divider(b) => fill(&mut b.id, &prefix),
            Block::Container(b) => {
                fill(&mut b.id, &prefix);
                b.children.iter_mut().for_each(Block::ensure_ids);
            }
            Block::Logo(b) => fill(&mut b.id, &prefix),
            Block::Navigation(b) => {
                fill(&mut b.id, &prefix);
                b.items.iter_mut().for_each(|i| fill(&mut i.id, "nav-item"));
            }
            Block::HeroContent(b) => fill(&mut b.id, &prefix),
            Block::HeroImage(b) => fill(&mut b.id, &prefix),
            Block::Background(b) => fill(&mut b.id, &prefix),
            Block::SectionHeader(b) => fill(&mut b.id, &prefix),
            Block::ServiceCard(b) => fill(&mut b.id, &prefix),
            Block::ServicesContainer(b) => {
                fill(&mut b.id, &prefix);
                b.items.iter_mut().for_each(|i| fill(&mut i.id, "service"));
            }
            Block::ImageGallery(b) => {
                fill(&mut b.id, &prefix);
                b.items.iter_mut().for_each(|i| fill(&mut i.id, "gallery-img"));
            }
            Block::RichText(b) => fill(&mut b.id, &prefix),
            Block::Card(b) => fill(&mut b.id, &prefix),
            Block::CardsContainer(b) => {
                fill(&mut b.id, &prefix);
                b.items.iter_mut().for_each(|i| fill(&mut i.id, "card"));
            }
            Block::Testimonial(b) => fill(&mut b.id, &prefix),
            Block::TestimonialsCarousel(b) => {
                fill(&mut b.id, &prefix);
                b.items.iter_mut().for_each(|i| fill(&mut i.id, "testimonial"));
            }
            Block::ContactInfo(b) => {
                fill(&mut b.id, &prefix);
                b.items.iter_mut().for_each(|i| fill(&mut i.id, "contact-item"));
            }
            Block::Form(b) => {
                fill(&mut b.id, &prefix);
                b.fields.iter_mut().for_each(|f| fill(&mut f.id, "form-field"));
            }
            Block::Text(b) => fill(&mut b.id, &prefix),
            Block::SocialLinks(b) => {
                fill(&mut b.id, &prefix);
                b.items.iter_mut().for_each(|i| fill(&mut i.id, "social-link"));
            }
            Block::FooterColumns(b) => {
                fill(&mut b.id, &prefix);
                for column in &mut b.columns {
                    fill(&mut column.id, "footer-nav");
                    column
                        .links
                        .iter_mut()
                        .for_each(|l| fill(&mut l.id, "footer-link"));
                }
            }
            Block::Copyright(b) => fill(&mut b.id, &prefix),
            Block::Unrecognized(raw) => {
                if raw.id.is_empty() {
                    raw.id = mint_id(&prefix);
                    raw.fields.insert("id".into(), Value::String(raw.id.clone()));
                }
            }
        }
    }
}

fn fill(id: &mut String, prefix: &str) {
    if id.trim().is_empty() {
        *id = mint_id(prefix);
    }
}

/// `heroContent` → `hero-content`.
pub fn id_prefix(type_name: &str) -> String {
    let mut out = String::with_capacity(type_name.len() + 4);
    for ch in type_name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    if out.is_empty() {
        "block".into()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn heading_defaults() {
        let block: Block = serde_json::from_value(json!({"type": "heading", "id": "h1", "text": "Hi"})).unwrap();
        match block {
            Block::Heading(h) => {
                assert_eq!(h.level, 2);
                assert_eq!(h.class_name, "");
                assert!(h.style.is_none());
            }
            other => panic!("expected heading, got {:?}", other),
        }
    }

    #[test]
    fn camel_case_wire_names() {
        let block = Block::HeroContent(HeroContent {
            id: "hero-content-1".into(),
            title: "T".into(),
            button_text: "Go".into(),
            ..Default::default()
        });
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "heroContent");
        assert_eq!(value["buttonText"], "Go");
        assert_eq!(value["buttonLink"], "#");
    }

    #[test]
    fn unknown_type_is_preserved_verbatim() {
        let input = json!({"type": "countdown", "id": "c-1", "target": "2030-01-01"});
        let block: Block = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(block.type_name(), "countdown");
        assert_eq!(block.id(), "c-1");
        assert!(matches!(block, Block::Unrecognized(_)));
        assert_eq!(serde_json::to_value(&block).unwrap(), input);
    }

    #[test]
    fn string_heading_level_is_read() {
        let block: Block =
            serde_json::from_value(json!({"type": "heading", "level": "3", "text": "Nos valeurs"})).unwrap();
        let Block::Heading(h) = block else { panic!("expected heading") };
        assert_eq!(h.level, 3);
        assert_eq!(h.text, "Nos valeurs");

        let levels: Vec<u8> = [json!(9), json!(0), json!("deux"), json!(null), json!(4.4)]
            .into_iter()
            .map(|level| {
                let block: Block = serde_json::from_value(json!({"type": "heading", "level": level})).unwrap();
                match block {
                    Block::Heading(h) => h.level,
                    other => panic!("expected heading, got {:?}", other),
                }
            })
            .collect();
        assert_eq!(levels, vec![6, 2, 2, 2, 4]);
    }

    #[test]
    fn string_required_flag_keeps_form() {
        let block: Block = serde_json::from_value(json!({
            "type": "form",
            "submitText": "Envoyer",
            "fields": [
                {"type": "input", "label": "Email", "required": "true"},
                {"type": "input", "label": "Nom", "required": "false"},
                {"type": "select", "label": "Soin", "required": 1}
            ]
        }))
        .unwrap();
        let Block::Form(form) = block else { panic!("expected form") };
        let fields: Vec<(&str, bool, FieldKind)> = form
            .fields
            .iter()
            .map(|f| (f.label.as_str(), f.required, f.kind))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("Email", true, FieldKind::Input),
                ("Nom", false, FieldKind::Input),
                ("Soin", true, FieldKind::Input),
            ]
        );
    }

    #[test]
    fn numeric_text_fields_are_stringified() {
        let block: Block = serde_json::from_value(json!({
            "type": "serviceCard",
            "id": 7,
            "title": "Massage",
            "price": 85,
            "duration": {"minutes": 60}
        }))
        .unwrap();
        let Block::ServiceCard(card) = block else { panic!("expected service card") };
        assert_eq!(card.id, "7");
        assert_eq!(card.price, "85");
        assert_eq!(card.duration, "");
        assert_eq!(card.link_url, "#");
    }

    #[test]
    fn malformed_lists_fall_back() {
        let block: Block = serde_json::from_value(json!({
            "type": "richText",
            "title": "Philosophie",
            "paragraphs": ["Un", 2, {"x": 1}]
        }))
        .unwrap();
        let Block::RichText(rich) = block else { panic!("expected rich text") };
        assert_eq!(rich.paragraphs, vec!["Un".to_string(), "2".to_string()]);

        let block: Block =
            serde_json::from_value(json!({"type": "navigation", "items": "none"})).unwrap();
        assert!(matches!(block, Block::Navigation(ref n) if n.items.is_empty()));
    }

    #[test]
    fn unreadable_rating_is_full() {
        let block: Block = serde_json::from_value(json!({
            "type": "testimonial",
            "content": "Super",
            "author": {"name": "Léa", "rating": "beaucoup"}
        }))
        .unwrap();
        let Block::Testimonial(t) = block else { panic!("expected testimonial") };
        assert_eq!(t.author.rating, MAX_RATING);
        assert_eq!(t.author.name, "Léa");
    }

    #[test]
    fn fractional_rating_is_rounded() {
        let block: Block = serde_json::from_value(json!({
            "type": "testimonial",
            "content": "Great",
            "author": {"name": "Ana", "rating": 4.5}
        }))
        .unwrap();
        match block {
            Block::Testimonial(t) => assert_eq!(t.author.rating, 5),
            other => panic!("expected testimonial, got {:?}", other),
        }
    }

    #[test]
    fn form_field_type_tag() {
        let field: FormField = serde_json::from_value(json!({"type": "textarea", "name": "msg"})).unwrap();
        assert_eq!(field.kind, FieldKind::Textarea);
        assert_eq!(field.input_type, "text");
    }

    #[test]
    fn ensure_ids_keeps_existing_and_fills_nested() {
        let mut block = Block::Navigation(Navigation {
            id: "main-navigation".into(),
            items: vec![NavItem::default(), NavItem { id: "keep".into(), ..Default::default() }],
        });
        block.ensure_ids();
        let Block::Navigation(nav) = &block else { unreachable!() };
        assert_eq!(nav.id, "main-navigation");
        assert!(nav.items[0].id.starts_with("nav-item-"));
        assert_eq!(nav.items[1].id, "keep");
    }

    #[test]
    fn prefix_from_type_name() {
        assert_eq!(id_prefix("heroContent"), "hero-content");
        assert_eq!(id_prefix("testimonialsCarousel"), "testimonials-carousel");
        assert_eq!(id_prefix(""), "block");
    }
}

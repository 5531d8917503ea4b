//! Default content: the blocks the generator renders for empty sections and
//! the fresh blocks the editor inserts. Kept here so the copy lives in one place.

use super::blocks::*;
use super::{mint_id, SectionKind};

pub const SITE_NAME: &str = "Ayurveda Équilibre";
pub const COPYRIGHT_SUFFIX: &str = "Tous droits réservés.";

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1600334129128-685c5582fd35?auto=format&fit=crop&w=1470&q=80";
const SERVICE_IMAGE: &str = "https://images.unsplash.com/photo-1544161515-4ab6ce6db874?auto=format&fit=crop&w=800&q=80";
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x200";

fn nav_items() -> Vec<NavItem> {
    [
        ("Accueil", "#accueil"),
        ("Soins", "#services"),
        ("Philosophie", "#philosophy"),
        ("Contact", "#contact"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (label, url))| NavItem {
        id: format!("placeholder-nav-item-{}", i),
        label: label.to_string(),
        url: url.to_string(),
    })
    .collect()
}

/// Blocks rendered in place of an empty section. Ids are fixed so that
/// generation stays deterministic.
pub fn placeholder_content(kind: SectionKind) -> Vec<Block> {
    match kind {
        SectionKind::Header => vec![
            Block::Logo(Logo {
                id: "placeholder-logo".into(),
                text: SITE_NAME.into(),
            }),
            Block::Navigation(Navigation {
                id: "placeholder-navigation".into(),
                items: nav_items(),
            }),
            Block::Button(Button {
                id: "placeholder-cta".into(),
                text: "Prendre RDV".into(),
                url: "#contact".into(),
                class_name: "cta-btn".into(),
            }),
        ],
        SectionKind::Hero => vec![
            Block::HeroContent(HeroContent {
                id: "placeholder-hero-content".into(),
                title: "Retrouvez l'harmonie naturelle".into(),
                subtitle: "Découvrez les bienfaits millénaires de l'Ayurveda pour équilibrer votre corps et votre esprit".into(),
                button_text: "Découvrir nos soins".into(),
                button_link: "#services".into(),
            }),
            Block::HeroImage(HeroImage {
                id: "placeholder-hero-image".into(),
                src: HERO_IMAGE.into(),
                alt: "Ayurvedic treatment".into(),
            }),
        ],
        SectionKind::Services => vec![
            Block::SectionHeader(SectionHeader {
                id: "placeholder-services-header".into(),
                title: "Nos Soins".into(),
                subtitle: "Des rituels ayurvédiques authentiques, adaptés à votre constitution".into(),
            }),
            Block::ServicesContainer(ServicesContainer {
                id: "placeholder-services".into(),
                items: vec![ServiceCard {
                    id: "placeholder-service-0".into(),
                    title: "Abhyanga".into(),
                    description: "Massage à l'huile chaude qui nourrit les tissus et apaise le mental.".into(),
                    image: SERVICE_IMAGE.into(),
                    image_alt: "Massage Abhyanga".into(),
                    duration: "60 min".into(),
                    price: "85 €".into(),
                    link_text: "En savoir plus".into(),
                    link_url: "#contact".into(),
                }],
            }),
        ],
        SectionKind::Philosophy => vec![Block::RichText(RichText {
            id: "placeholder-philosophy".into(),
            title: "Notre Philosophie".into(),
            paragraphs: vec![
                "L'Ayurveda considère chaque personne comme un équilibre unique entre corps, esprit et conscience.".into(),
            ],
        })],
        SectionKind::Testimonials => vec![
            Block::SectionHeader(SectionHeader {
                id: "placeholder-testimonials-header".into(),
                title: "Témoignages".into(),
                subtitle: "Ce que nos clients disent de nous".into(),
            }),
            Block::TestimonialsCarousel(TestimonialsCarousel {
                id: "placeholder-testimonials".into(),
                items: vec![Testimonial {
                    id: "placeholder-testimonial-0".into(),
                    content: "Une expérience apaisante, je me sens renouvelée.".into(),
                    author: Author {
                        name: "Claire".into(),
                        image: String::new(),
                        rating: MAX_RATING,
                    },
                }],
            }),
        ],
        SectionKind::Contact => vec![
            Block::ContactInfo(ContactInfo {
                id: "placeholder-contact-info".into(),
                title: "Contactez-nous".into(),
                description: "Prenez rendez-vous ou posez-nous vos questions.".into(),
                items: Vec::new(),
            }),
            Block::Form(Form {
                id: "placeholder-contact-form".into(),
                fields: vec![
                    form_field("name", "Nom", FieldKind::Input, "text"),
                    form_field("email", "Email", FieldKind::Input, "email"),
                    form_field("message", "Message", FieldKind::Textarea, "textarea"),
                ],
                submit_text: "Envoyer".into(),
            }),
        ],
        SectionKind::Footer => vec![
            Block::Logo(Logo {
                id: "placeholder-footer-logo".into(),
                text: SITE_NAME.into(),
            }),
            Block::Text(Text {
                id: "placeholder-footer-desc".into(),
                content: "Un espace dédié à l'équilibre holistique où la sagesse ancestrale rencontre le bien-être moderne.".into(),
            }),
            Block::FooterColumns(FooterColumns {
                id: "placeholder-footer-columns".into(),
                columns: vec![FooterColumn {
                    id: "placeholder-footer-nav".into(),
                    heading: "Navigation".into(),
                    links: nav_items()
                        .into_iter()
                        .map(|item| FooterLink {
                            id: item.id.replace("nav-item", "footer-link"),
                            label: item.label,
                            url: item.url,
                            is_text: false,
                        })
                        .collect(),
                }],
            }),
        ],
        SectionKind::Generic => vec![
            Block::Heading(Heading {
                id: "placeholder-heading".into(),
                text: "Contenu à définir".into(),
                ..Default::default()
            }),
            Block::Paragraph(Paragraph {
                id: "placeholder-paragraph".into(),
                text: "Cette section n'a pas encore de contenu défini.".into(),
                ..Default::default()
            }),
        ],
    }
}

fn form_field(name: &str, label: &str, kind: FieldKind, input_type: &str) -> FormField {
    FormField {
        id: format!("placeholder-field-{}", name),
        kind,
        input_type: input_type.into(),
        label: label.into(),
        placeholder: String::new(),
        required: true,
        name: name.into(),
    }
}

impl Block {
    /// A fresh block of the given wire type with the editor's starter values
    /// and a newly minted id. `None` for types this crate does not model.
    pub fn placeholder(type_name: &str) -> Option<Block> {
        let id = mint_id(&id_prefix(type_name));
        let block = match type_name {
            "heading" => Block::Heading(Heading {
                id,
                text: "Titre".into(),
                ..Default::default()
            }),
            "paragraph" => Block::Paragraph(Paragraph {
                id,
                text: "Texte du paragraphe...".into(),
                ..Default::default()
            }),
            "image" => Block::Image(Image {
                id,
                src: PLACEHOLDER_IMAGE.into(),
                ..Default::default()
            }),
            "button" => Block::Button(Button {
                id,
                text: "Bouton".into(),
                ..Default::default()
            }),
            "divider" => Block::Divider(Divider { id, ..Default::default() }),
            "container" => Block::Container(Container { id, ..Default::default() }),
            "logo" => Block::Logo(Logo { id, text: SITE_NAME.into() }),
            "navigation" => Block::Navigation(Navigation { id, items: Vec::new() }),
            "heroContent" => Block::HeroContent(HeroContent { id, ..Default::default() }),
            "heroImage" => Block::HeroImage(HeroImage { id, ..Default::default() }),
            "background" => Block::Background(Background { id, ..Default::default() }),
            "sectionHeader" => Block::SectionHeader(SectionHeader { id, ..Default::default() }),
            "serviceCard" => Block::ServiceCard(ServiceCard { id, ..Default::default() }),
            "servicesContainer" => Block::ServicesContainer(ServicesContainer { id, items: Vec::new() }),
            "imageGallery" => Block::ImageGallery(ImageGallery { id, items: Vec::new() }),
            "richText" => Block::RichText(RichText { id, ..Default::default() }),
            "card" => Block::Card(Card { id, ..Default::default() }),
            "cardsContainer" => Block::CardsContainer(CardsContainer { id, items: Vec::new() }),
            "testimonial" => Block::Testimonial(Testimonial { id, ..Default::default() }),
            "testimonialsCarousel" => {
                Block::TestimonialsCarousel(TestimonialsCarousel { id, items: Vec::new() })
            }
            "contactInfo" => Block::ContactInfo(ContactInfo { id, ..Default::default() }),
            "form" => Block::Form(Form {
                id,
                fields: Vec::new(),
                submit_text: "Envoyer".into(),
            }),
            "text" => Block::Text(Text { id, ..Default::default() }),
            "socialLinks" => Block::SocialLinks(SocialLinks { id, items: Vec::new() }),
            "footerColumns" => Block::FooterColumns(FooterColumns { id, columns: Vec::new() }),
            "copyright" => Block::Copyright(Copyright { id, ..Default::default() }),
            _ => return None,
        };
        Some(block)
    }
}

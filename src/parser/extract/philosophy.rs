use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{Card, CardsContainer, Image, ImageGallery, RichText};
use crate::schema::{mint_id, Block};

pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks = Vec::new();

    // The gallery wrappers carry the class; the <img> sits inside (or is the wrapper itself).
    let images: Vec<Image> = dom::all(section, ".philosophy-img-1, .philosophy-img-2")
        .into_iter()
        .map(|wrapper| {
            let img = if dom::tag_name(wrapper) == "img" {
                Some(wrapper)
            } else {
                dom::first(wrapper, "img")
            };
            Image {
                id: mint_id("gallery-img"),
                src: img.map(|i| dom::attr(i, "src")).unwrap_or_default(),
                alt: img.map(|i| dom::attr(i, "alt")).unwrap_or_default(),
                class_name: dom::attr(wrapper, "class"),
            }
        })
        .collect();
    if !images.is_empty() {
        blocks.push(Block::ImageGallery(ImageGallery {
            id: mint_id("philosophy-images"),
            items: images,
        }));
    }

    if let Some(content) = dom::first(section, ".philosophy-content") {
        blocks.push(Block::RichText(RichText {
            id: mint_id("philosophy-content"),
            title: dom::first_text(content, ".philosophy-title"),
            paragraphs: dom::all(content, ".philosophy-text")
                .into_iter()
                .map(dom::text)
                .collect(),
        }));
    }

    let principles: Vec<Card> = dom::all(section, ".principle")
        .into_iter()
        .map(|p| Card {
            id: mint_id("principle"),
            icon: dom::first_text(p, ".principle-icon"),
            title: dom::first_text(p, ".principle-title"),
            description: dom::first_text(p, ".principle-desc"),
        })
        .collect();
    if !principles.is_empty() {
        blocks.push(Block::CardsContainer(CardsContainer {
            id: mint_id("principles-container"),
            items: principles,
        }));
    }

    blocks
}

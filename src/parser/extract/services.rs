use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{ServiceCard, ServicesContainer};
use crate::schema::{mint_id, Block};

pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks: Vec<Block> = super::section_header(section).into_iter().collect();

    let cards: Vec<ServiceCard> = dom::all(section, ".service-card")
        .into_iter()
        .map(service_card)
        .collect();

    if !cards.is_empty() {
        blocks.push(Block::ServicesContainer(ServicesContainer {
            id: mint_id("services-container"),
            items: cards,
        }));
    }
    blocks
}

fn service_card(card: ElementRef) -> ServiceCard {
    let img = dom::first(card, "img");
    // Duration is the first detail value, price the last.
    let details = dom::all(card, ".detail-value");
    let link = dom::first(card, ".service-link");

    ServiceCard {
        id: mint_id("service"),
        title: dom::first_text(card, ".service-title"),
        description: dom::first_text(card, ".service-desc"),
        image: img.map(|i| dom::attr(i, "src")).unwrap_or_default(),
        image_alt: img.map(|i| dom::attr(i, "alt")).unwrap_or_default(),
        duration: details.first().copied().map(dom::text).unwrap_or_default(),
        price: details.last().copied().map(dom::text).unwrap_or_default(),
        link_text: link.map(dom::text).unwrap_or_default(),
        link_url: link
            .map(|l| dom::attr_or(l, "href", "#"))
            .unwrap_or_else(|| "#".into()),
    }
}

use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{Button, Logo, NavItem, Navigation};
use crate::schema::{mint_id, Block};

pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(logo) = dom::first(section, ".logo") {
        blocks.push(Block::Logo(Logo {
            id: mint_id("header-logo"),
            text: dom::text(logo),
        }));
    }

    let items: Vec<NavItem> = dom::all(section, ".nav-menu li")
        .into_iter()
        .map(|li| {
            let link = dom::first(li, "a");
            NavItem {
                id: mint_id("nav-item"),
                label: link.map(dom::text).unwrap_or_else(|| dom::text(li)),
                url: link
                    .map(|a| dom::attr_or(a, "href", "#"))
                    .unwrap_or_else(|| "#".into()),
            }
        })
        .collect();
    if !items.is_empty() {
        blocks.push(Block::Navigation(Navigation {
            id: mint_id("main-navigation"),
            items,
        }));
    }

    if let Some(cta) = dom::first(section, ".cta-btn") {
        blocks.push(Block::Button(Button {
            id: mint_id("header-cta"),
            text: dom::text(cta),
            url: dom::attr_or(cta, "href", "#"),
            class_name: dom::attr(cta, "class"),
        }));
    }

    blocks
}

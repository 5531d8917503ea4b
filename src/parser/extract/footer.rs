use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{
    Copyright, FooterColumn, FooterColumns, FooterLink, Logo, SocialLink, SocialLinks, Text,
};
use crate::schema::{mint_id, Block};

pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(logo) = dom::first(section, ".footer-logo") {
        blocks.push(Block::Logo(Logo {
            id: mint_id("footer-logo"),
            text: dom::text(logo),
        }));
    }

    if let Some(desc) = dom::first(section, ".footer-desc") {
        blocks.push(Block::Text(Text {
            id: mint_id("footer-description"),
            content: dom::text(desc),
        }));
    }

    let social: Vec<SocialLink> = dom::all(section, ".social-link")
        .into_iter()
        .map(|link| SocialLink {
            id: mint_id("social-link"),
            icon: dom::text(link),
            url: dom::attr_or(link, "href", "#"),
        })
        .collect();
    if !social.is_empty() {
        blocks.push(Block::SocialLinks(SocialLinks {
            id: mint_id("social-links"),
            items: social,
        }));
    }

    let columns: Vec<FooterColumn> = dom::all(section, ".footer-nav")
        .into_iter()
        .map(|nav| FooterColumn {
            id: mint_id("footer-nav"),
            heading: dom::first_text(nav, ".footer-heading"),
            links: dom::all(nav, ".footer-links li")
                .into_iter()
                .map(footer_link)
                .collect(),
        })
        .collect();
    if !columns.is_empty() {
        blocks.push(Block::FooterColumns(FooterColumns {
            id: mint_id("footer-columns"),
            columns,
        }));
    }

    if let Some(bottom) = dom::first(section, ".footer-bottom") {
        blocks.push(Block::Copyright(Copyright {
            id: mint_id("footer-copyright"),
            text: dom::collapsed_text(bottom),
        }));
    }

    blocks
}

fn footer_link(li: ElementRef) -> FooterLink {
    match dom::first(li, "a") {
        Some(a) => FooterLink {
            id: mint_id("footer-link"),
            label: dom::text(a),
            url: dom::attr_or(a, "href", "#"),
            is_text: false,
        },
        None => FooterLink {
            id: mint_id("footer-text"),
            label: dom::text(li),
            url: String::new(),
            is_text: true,
        },
    }
}

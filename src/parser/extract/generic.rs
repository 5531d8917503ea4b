use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{Button, Heading, Image, Paragraph};
use crate::schema::{mint_id, Block};

/// Headings, then paragraphs, then images, then buttons; document order within each group.
pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks = Vec::new();

    for h in dom::all(section, "h1, h2, h3, h4, h5, h6") {
        let level = dom::tag_name(h)[1..].parse::<u8>().unwrap_or(2);
        blocks.push(Block::Heading(Heading {
            id: mint_id("heading"),
            level,
            text: dom::text(h),
            class_name: dom::attr(h, "class"),
            style: None,
        }));
    }

    for p in dom::all(section, "p") {
        blocks.push(Block::Paragraph(Paragraph {
            id: mint_id("paragraph"),
            text: dom::text(p),
            class_name: dom::attr(p, "class"),
            style: None,
        }));
    }

    for img in dom::all(section, "img") {
        blocks.push(Block::Image(Image {
            id: mint_id("image"),
            src: dom::attr(img, "src"),
            alt: dom::attr(img, "alt"),
            class_name: dom::attr(img, "class"),
        }));
    }

    for button in dom::all(section, "button, a.btn, .button") {
        blocks.push(Block::Button(Button {
            id: mint_id("button"),
            text: dom::text(button),
            url: dom::attr_or(button, "href", "#"),
            class_name: dom::attr(button, "class"),
        }));
    }

    blocks
}

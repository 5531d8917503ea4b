use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{Author, Testimonial, TestimonialsCarousel, MAX_RATING};
use crate::schema::{mint_id, Block};

pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks: Vec<Block> = super::section_header(section).into_iter().collect();

    let items: Vec<Testimonial> = dom::all(section, ".testimonial-card")
        .into_iter()
        .map(|card| Testimonial {
            id: mint_id("testimonial"),
            content: dom::first_text(card, ".testimonial-content"),
            author: Author {
                name: dom::first_text(card, ".author-info h3"),
                image: dom::first_attr(card, ".author-img img", "src"),
                rating: dom::first(card, ".stars").map_or(MAX_RATING, rating),
            },
        })
        .collect();

    if !items.is_empty() {
        blocks.push(Block::TestimonialsCarousel(TestimonialsCarousel {
            id: mint_id("testimonials-carousel"),
            items,
        }));
    }
    blocks
}

/// `data-rating` when present, otherwise the number of filled star glyphs.
pub fn rating(stars: ElementRef) -> u8 {
    if let Some(explicit) = stars
        .value()
        .attr("data-rating")
        .and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())
    {
        return explicit.round().clamp(0.0, MAX_RATING as f64) as u8;
    }
    let filled = dom::text(stars)
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '☆')
        .count();
    filled.min(MAX_RATING as usize) as u8
}

//! One extraction routine per section kind. Each reads the fixed class
//! vocabulary of its section and returns the blocks it found; a miss simply
//! contributes nothing.

pub mod contact;
pub mod footer;
pub mod generic;
pub mod header;
pub mod hero;
pub mod philosophy;
pub mod services;
pub mod testimonials;

use scraper::ElementRef;

use super::dom;
use crate::schema::blocks::SectionHeader;
use crate::schema::{mint_id, Block, SectionKind};

pub fn extract_section(kind: SectionKind, section: ElementRef) -> Vec<Block> {
    match kind {
        SectionKind::Hero => hero::extract(section),
        SectionKind::Services => services::extract(section),
        SectionKind::Philosophy => philosophy::extract(section),
        SectionKind::Testimonials => testimonials::extract(section),
        SectionKind::Contact => contact::extract(section),
        SectionKind::Header => header::extract(section),
        SectionKind::Footer => footer::extract(section),
        SectionKind::Generic => generic::extract(section),
    }
}

/// `.section-title-container` shared by the services and testimonials sections.
fn section_header(section: ElementRef) -> Option<Block> {
    let container = dom::first(section, ".section-title-container")?;
    Some(Block::SectionHeader(SectionHeader {
        id: mint_id("section-header"),
        title: dom::first_text(container, ".section-title"),
        subtitle: dom::first_text(container, ".section-subtitle"),
    }))
}

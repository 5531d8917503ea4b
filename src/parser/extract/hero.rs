use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::parser::dom;
use crate::schema::blocks::{Background, HeroContent, HeroImage};
use crate::schema::{mint_id, Block};

static BACKGROUND_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)background(?:-image)?\s*:\s*url\(\s*['"]?(.*?)['"]?\s*\)"#).unwrap()
});

pub fn extract(section: ElementRef) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(content) = dom::first(section, ".hero-container .hero-content") {
        let button = dom::first(content, ".hero-btn");
        blocks.push(Block::HeroContent(HeroContent {
            id: mint_id("hero-content"),
            title: dom::first_text(content, ".hero-title"),
            subtitle: dom::first_text(content, ".hero-subtitle"),
            button_text: button.map(dom::text).unwrap_or_default(),
            button_link: button
                .map(|b| dom::attr_or(b, "href", "#"))
                .unwrap_or_else(|| "#".into()),
        }));
    }

    if let Some(img) = dom::first(section, ".hero-container .hero-image img") {
        blocks.push(Block::HeroImage(HeroImage {
            id: mint_id("hero-image"),
            src: dom::attr(img, "src"),
            alt: dom::attr(img, "alt"),
        }));
    }

    if let Some(url) = background_url(&dom::attr(section, "style")) {
        blocks.push(Block::Background(Background {
            id: mint_id("hero-background"),
            value: url,
        }));
    }

    blocks
}

/// Image url of a `background` / `background-image` declaration in an inline style.
pub fn background_url(style: &str) -> Option<String> {
    let url = BACKGROUND_URL_RE.captures(style)?.get(1)?.as_str().trim();
    (!url.is_empty()).then(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_forms() {
        assert_eq!(
            background_url("background-image: url('/img/bg.jpg'); color: red").as_deref(),
            Some("/img/bg.jpg")
        );
        assert_eq!(
            background_url(r#"BACKGROUND: url("https://cdn.example.com/a.png") no-repeat"#).as_deref(),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(background_url("background: url(plain.webp)").as_deref(), Some("plain.webp"));
        assert_eq!(background_url("color: red"), None);
        assert_eq!(background_url("background: url()"), None);
    }
}

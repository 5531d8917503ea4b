use std::borrow::Cow;

use super::blocks::{self, render_block};
use super::{escape_html as esc, RenderOptions};
use crate::schema::blocks::Button;
use crate::schema::defaults::{self, COPYRIGHT_SUFFIX};
use crate::schema::{Block, Section, SectionKind};

/// Render one section. Empty sections get their kind's placeholder blocks.
pub fn render_section(out: &mut String, section: &Section, opts: &RenderOptions) {
    let kind = section.kind();
    let content: Cow<[Block]> = if section.content.is_empty() {
        Cow::Owned(defaults::placeholder_content(kind))
    } else {
        Cow::Borrowed(section.content.as_slice())
    };

    let tag = section.section_type.tag();
    out.push_str(&open_tag(tag, section, &content));

    match kind {
        SectionKind::Header => header(out, &content),
        SectionKind::Footer => footer(out, &content, opts),
        SectionKind::Hero => wrapped(out, "<div class=\"hero-pattern\"></div>\n<div class=\"hero-container\">\n", &content),
        SectionKind::Services | SectionKind::Testimonials | SectionKind::Generic => {
            wrapped(out, "<div class=\"container\">\n", &content)
        }
        SectionKind::Philosophy => wrapped(out, "<div class=\"philosophy-container\">\n", &content),
        SectionKind::Contact => wrapped(out, "<div class=\"contact-container\">\n", &content),
    }

    out.push_str(&format!("</{}>\n", tag));
}

fn open_tag(tag: &str, section: &Section, content: &[Block]) -> String {
    let mut attrs = String::new();
    if !section.id.trim().is_empty() {
        attrs.push_str(&format!(" id=\"{}\"", esc(&section.id)));
    }
    attrs.push_str(&format!(" class=\"{}\"", esc(&section.class_name)));
    let background = content.iter().find_map(|block| match block {
        Block::Background(bg) if !bg.value.trim().is_empty() => Some(bg.value.trim()),
        _ => None,
    });
    if let Some(url) = background {
        // Quotes inside the url would end the css string early.
        let url = url.replace(['\'', '"'], "");
        attrs.push_str(&format!(" style=\"background-image: url('{}');\"", esc(&url)));
    }
    format!("<{}{}>\n", tag, attrs)
}

fn wrapped(out: &mut String, opening: &str, content: &[Block]) {
    out.push_str(opening);
    content.iter().for_each(|block| render_block(out, block));
    out.push_str("</div>\n");
}

fn header(out: &mut String, content: &[Block]) {
    out.push_str("<div class=\"nav-container\">\n");
    for block in content {
        match block {
            Block::Button(button) => cta_button(out, button),
            other => render_block(out, other),
        }
    }
    out.push_str("<div class=\"mobile-toggle\">\n<span></span>\n<span></span>\n<span></span>\n</div>\n");
    out.push_str("</div>\n");
}

fn cta_button(out: &mut String, button: &Button) {
    let class_name = if button.class_name.trim().is_empty() {
        "cta-btn"
    } else {
        button.class_name.trim()
    };
    let url: &str = if button.url.trim().is_empty() { "#" } else { &button.url };
    out.push_str(&format!(
        "<a href=\"{}\" class=\"{}\">{}</a>\n",
        esc(url),
        esc(class_name),
        esc(&button.text),
    ));
}

/// Logo, description and social links form the info column; copyright goes to
/// the bottom bar, generated from the site name and year when absent.
fn footer(out: &mut String, content: &[Block], opts: &RenderOptions) {
    out.push_str("<div class=\"footer-container\">\n<div class=\"footer-top\">\n");

    let is_info = |b: &Block| matches!(b, Block::Logo(_) | Block::Text(_) | Block::SocialLinks(_));
    if content.iter().any(is_info) {
        out.push_str("<div class=\"footer-info\">\n");
        for block in content.iter().filter(|b| is_info(*b)) {
            match block {
                Block::Logo(logo) => {
                    out.push_str(&format!("<div class=\"footer-logo\">{}</div>\n", esc(&logo.text)))
                }
                Block::Text(text) => {
                    out.push_str(&format!("<p class=\"footer-desc\">{}</p>\n", esc(&text.content)))
                }
                Block::SocialLinks(links) => blocks::social_links(out, links),
                _ => {}
            }
        }
        out.push_str("</div>\n");
    }

    for block in content
        .iter()
        .filter(|b| !is_info(*b) && !matches!(b, Block::Copyright(_)))
    {
        render_block(out, block);
    }
    out.push_str("</div>\n");

    match content.iter().find_map(|b| match b {
        Block::Copyright(c) if !c.text.trim().is_empty() => Some(c.text.as_str()),
        _ => None,
    }) {
        Some(text) => blocks::copyright(out, text),
        None => blocks::copyright(out, &default_copyright(opts)),
    }

    out.push_str("</div>\n");
}

pub fn default_copyright(opts: &RenderOptions) -> String {
    format!("© {} {}. {}", opts.year, opts.site_name, COPYRIGHT_SUFFIX)
}

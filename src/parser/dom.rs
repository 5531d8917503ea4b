//! Thin query helpers over `scraper`. Every lookup degrades to "nothing found"
//! rather than failing, which is what the extractors want.

use scraper::{ElementRef, Selector};

pub fn all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => scope.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

pub fn first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    scope.select(&selector).next()
}

/// Text content with the ends trimmed; interior whitespace is kept as written.
pub fn text(el: ElementRef) -> String {
    let raw: String = el.text().collect();
    raw.trim().to_string()
}

/// Text content with whitespace runs collapsed, for wrappers whose markup
/// indentation is not part of the value.
pub fn collapsed_text(el: ElementRef) -> String {
    let raw: String = el.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn attr(el: ElementRef, name: &str) -> String {
    el.value().attr(name).unwrap_or_default().trim().to_string()
}

/// Attribute value, or `fallback` when it is missing or blank.
pub fn attr_or(el: ElementRef, name: &str, fallback: &str) -> String {
    match el.value().attr(name).map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}

pub fn first_text(scope: ElementRef, css: &str) -> String {
    first(scope, css).map(text).unwrap_or_default()
}

pub fn first_attr(scope: ElementRef, css: &str, name: &str) -> String {
    first(scope, css).map(|el| attr(el, name)).unwrap_or_default()
}

pub fn tag_name<'a>(el: ElementRef<'a>) -> &'a str {
    el.value().name()
}

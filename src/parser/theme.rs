use std::sync::LazyLock;

use regex::Regex;

use crate::schema::Theme;

static ROOT_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":root\s*\{([^}]+)\}").unwrap());
static CUSTOM_PROP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(--[a-zA-Z0-9-]+)\s*:\s*([^;]+)").unwrap());

/// Custom properties declared in the first `:root { ... }` block, in source order.
/// Values are split at the first colon only, so `url(https://...)` survives.
pub fn extract_css_vars(css: &str) -> Vec<(String, String)> {
    let Some(body) = ROOT_BLOCK_RE.captures(css).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    CUSTOM_PROP_RE
        .captures_iter(body.as_str())
        .map(|c| (c[1].to_string(), c[2].trim().to_string()))
        .filter(|(_, value)| !value.is_empty())
        .collect()
}

/// Map the seven known theme properties onto a [`Theme`]. Unknown properties
/// are ignored and missing ones keep their default. Never fails.
pub fn extract_theme(css: &str) -> Theme {
    let mut theme = Theme::default();
    for (name, value) in extract_css_vars(css) {
        let slot = match name.as_str() {
            "--color-primary" => &mut theme.colors.primary,
            "--color-accent" => &mut theme.colors.accent,
            "--color-light" => &mut theme.colors.light,
            "--color-dark" => &mut theme.colors.dark,
            "--color-neutral" => &mut theme.colors.neutral,
            "--font-heading" => &mut theme.fonts.heading,
            "--font-body" => &mut theme.fonts.body,
            _ => continue,
        };
        *slot = value;
    }
    theme
}

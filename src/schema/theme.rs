use serde::{Deserialize, Serialize};

/// Fallback design tokens. Every color/font lookup that finds nothing resolves here.
pub struct DefaultTheme;

impl DefaultTheme {
    pub const ID: &'static str = "default";
    pub const NAME: &'static str = "Thème par défaut";
    pub const PRIMARY: &'static str = "#0a4b44";
    pub const ACCENT: &'static str = "#d4a039";
    pub const LIGHT: &'static str = "#f9f5f0";
    pub const DARK: &'static str = "#1f332e";
    pub const NEUTRAL: &'static str = "#e6e0d4";
    pub const FONT_HEADING: &'static str = "'Cormorant Garamond', serif";
    pub const FONT_BODY: &'static str = "'Montserrat', sans-serif";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub colors: Colors,
    pub fonts: Fonts,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            id: DefaultTheme::ID.to_string(),
            name: DefaultTheme::NAME.to_string(),
            colors: Colors::default(),
            fonts: Fonts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub primary: String,
    pub accent: String,
    pub light: String,
    pub dark: String,
    pub neutral: String,
}

impl Default for Colors {
    fn default() -> Self {
        Colors {
            primary: DefaultTheme::PRIMARY.to_string(),
            accent: DefaultTheme::ACCENT.to_string(),
            light: DefaultTheme::LIGHT.to_string(),
            dark: DefaultTheme::DARK.to_string(),
            neutral: DefaultTheme::NEUTRAL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
}

impl Default for Fonts {
    fn default() -> Self {
        Fonts {
            heading: DefaultTheme::FONT_HEADING.to_string(),
            body: DefaultTheme::FONT_BODY.to_string(),
        }
    }
}

impl Theme {
    /// Copy of this theme where blank tokens are replaced by their defaults.
    pub fn resolved(&self) -> Theme {
        let pick = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.trim().to_string()
            }
        };
        Theme {
            id: pick(&self.id, DefaultTheme::ID),
            name: pick(&self.name, DefaultTheme::NAME),
            colors: Colors {
                primary: pick(&self.colors.primary, DefaultTheme::PRIMARY),
                accent: pick(&self.colors.accent, DefaultTheme::ACCENT),
                light: pick(&self.colors.light, DefaultTheme::LIGHT),
                dark: pick(&self.colors.dark, DefaultTheme::DARK),
                neutral: pick(&self.colors.neutral, DefaultTheme::NEUTRAL),
            },
            fonts: Fonts {
                heading: pick(&self.fonts.heading, DefaultTheme::FONT_HEADING),
                body: pick(&self.fonts.body, DefaultTheme::FONT_BODY),
            },
        }
    }

    /// `(custom property, value)` pairs in the order they are emitted under `:root`.
    pub fn css_variables(&self) -> [(&'static str, &str); 7] {
        [
            ("--color-primary", &self.colors.primary),
            ("--color-accent", &self.colors.accent),
            ("--color-light", &self.colors.light),
            ("--color-dark", &self.colors.dark),
            ("--color-neutral", &self.colors.neutral),
            ("--font-heading", &self.fonts.heading),
            ("--font-body", &self.fonts.body),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let theme: Theme = serde_json::from_str(r##"{"colors":{"primary":"#000000"}}"##).unwrap();
        assert_eq!(theme.colors.primary, "#000000");
        assert_eq!(theme.colors.accent, DefaultTheme::ACCENT);
        assert_eq!(theme.fonts.body, DefaultTheme::FONT_BODY);
        assert_eq!(theme.id, "default");
    }

    #[test]
    fn blank_tokens_resolve_to_defaults() {
        let mut theme = Theme::default();
        theme.colors.dark = "  ".into();
        theme.fonts.heading = String::new();
        let resolved = theme.resolved();
        assert_eq!(resolved.colors.dark, DefaultTheme::DARK);
        assert_eq!(resolved.fonts.heading, DefaultTheme::FONT_HEADING);
    }
}

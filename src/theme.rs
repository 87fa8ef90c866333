//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Page --
    pub heading: Style,
    pub message: Style,
    pub error: Style,

    // -- Cards --
    pub card_border: Style,
    pub card_title: Style,
    pub card_body: Style,
    pub card_image: Style,
    pub card_footer: Style,
    pub card_link: Style,

    // -- Chrome --
    pub status_bar: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            message: Style::default().fg(Color::Gray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_body: Style::default(),
            card_image: Style::default().fg(Color::Blue).bg(Color::Black),
            card_footer: Style::default().fg(Color::DarkGray),
            card_link: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
        }
    }

    /// Light palette for light terminal backgrounds.
    fn light() -> Self {
        Self {
            heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            message: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            card_border: Style::default().fg(Color::Gray),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_body: Style::default().fg(Color::Black),
            card_image: Style::default().fg(Color::Blue).bg(Color::Gray),
            card_footer: Style::default().fg(Color::DarkGray),
            card_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup, built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 10] = [
    "heading",
    "message",
    "error",
    "card_border",
    "card_title",
    "card_body",
    "card_image",
    "card_footer",
    "card_link",
    "status_bar",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 10] = [
            p.heading,
            p.message,
            p.error,
            p.card_border,
            p.card_title,
            p.card_body,
            p.card_image,
            p.card_footer,
            p.card_link,
            p.status_bar,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.status_bar, light.status_bar);
        assert_ne!(dark.heading, light.heading);
    }

    #[test]
    fn error_style_is_red_in_both_variants() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            assert_eq!(variant.palette().error.fg, Some(Color::Red));
        }
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(ThemeVariant::from_str_name("dark"), Some(ThemeVariant::Dark));
        assert_eq!(ThemeVariant::from_str_name("Light"), Some(ThemeVariant::Light));
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycles() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next(), ThemeVariant::Dark);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.resolve("heading"), palette.heading);
        assert_eq!(sm.resolve("card_image"), palette.card_image);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let sm = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let sm = StyleMap::from_palette(&ThemeVariant::Light.palette());
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing", name);
        }
    }
}

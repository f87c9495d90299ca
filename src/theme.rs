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
    /// Parse a variant name from config (case-insensitive).
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
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Inventory list --
    pub section_header: Style,
    pub section_count: Style,
    pub row_normal: Style,
    pub row_selected: Style,
    pub row_subcategory: Style,
    pub kind_spirit: Style,
    pub kind_modifier: Style,
    pub empty_notice: Style,

    // -- Dialogs --
    pub dialog_title: Style,
    pub dialog_field: Style,
    pub dialog_field_focused: Style,
    pub dialog_hint: Style,
    pub suggestion_selected: Style,
    pub filter_active: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub toast: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub error_text: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            section_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            section_count: Style::default().fg(Color::DarkGray),
            row_normal: Style::default(),
            row_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            row_subcategory: Style::default().fg(Color::Gray),
            kind_spirit: Style::default().fg(Color::Yellow),
            kind_modifier: Style::default().fg(Color::Green),
            empty_notice: Style::default().fg(Color::DarkGray),

            dialog_title: Style::default().add_modifier(Modifier::BOLD),
            dialog_field: Style::default(),
            dialog_field_focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            dialog_hint: Style::default().fg(Color::DarkGray),
            suggestion_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            filter_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            toast: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            error_text: Style::default().fg(Color::Red),
        }
    }

    fn light() -> Self {
        Self {
            section_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            section_count: Style::default().fg(Color::Gray),
            row_normal: Style::default().fg(Color::Black),
            row_selected: Style::default().bg(Color::Blue).fg(Color::White),
            row_subcategory: Style::default().fg(Color::DarkGray),
            kind_spirit: Style::default().fg(Color::Magenta),
            kind_modifier: Style::default().fg(Color::Green),
            empty_notice: Style::default().fg(Color::Gray),

            dialog_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            dialog_field: Style::default().fg(Color::Black),
            dialog_field_focused: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            dialog_hint: Style::default().fg(Color::Gray),
            suggestion_selected: Style::default().bg(Color::Blue).fg(Color::White),
            filter_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            status_bar: Style::default().bg(Color::Blue).fg(Color::White),
            toast: Style::default()
                .bg(Color::Blue)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            panel_border: Style::default().fg(Color::Black),
            panel_border_focused: Style::default().fg(Color::Blue),
            error_text: Style::default().fg(Color::Red),
        }
    }
}

// ============================================================================
// Style Map — role name resolution
// ============================================================================

/// Resolves semantic role names to styles for the active palette.
#[derive(Debug, Clone)]
pub struct StyleMap {
    roles: HashMap<&'static str, Style>,
}

impl StyleMap {
    /// Build a style map from a palette.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let mut roles = HashMap::new();
        roles.insert("section_header", p.section_header);
        roles.insert("section_count", p.section_count);
        roles.insert("row_normal", p.row_normal);
        roles.insert("row_selected", p.row_selected);
        roles.insert("row_subcategory", p.row_subcategory);
        roles.insert("kind_spirit", p.kind_spirit);
        roles.insert("kind_modifier", p.kind_modifier);
        roles.insert("empty_notice", p.empty_notice);
        roles.insert("dialog_title", p.dialog_title);
        roles.insert("dialog_field", p.dialog_field);
        roles.insert("dialog_field_focused", p.dialog_field_focused);
        roles.insert("dialog_hint", p.dialog_hint);
        roles.insert("suggestion_selected", p.suggestion_selected);
        roles.insert("filter_active", p.filter_active);
        roles.insert("status_bar", p.status_bar);
        roles.insert("toast", p.toast);
        roles.insert("panel_border", p.panel_border);
        roles.insert("panel_border_focused", p.panel_border_focused);
        roles.insert("error_text", p.error_text);
        Self { roles }
    }

    /// Resolve a role name. Unknown roles fall back to `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.roles.get(role).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_cycle() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next(), ThemeVariant::Dark);
    }

    #[test]
    fn test_from_str_name() {
        assert_eq!(ThemeVariant::from_str_name("DARK"), Some(ThemeVariant::Dark));
        assert_eq!(
            ThemeVariant::from_str_name("light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("solarized"), None);
    }

    #[test]
    fn test_resolve_known_role() {
        let map = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        assert_ne!(map.resolve("status_bar"), Style::default());
    }

    #[test]
    fn test_resolve_unknown_role_is_default() {
        let map = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        assert_eq!(map.resolve("no_such_role"), Style::default());
    }
}

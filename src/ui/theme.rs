//! Colour themes and ANSI escape sequences.
//!
//! Themes are TOML documents with a `name` and a `[colors]` table of hex
//! strings. Four Catppuccin flavours are compiled in; a custom file can be
//! supplied with the `theme_file` option.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha` (default)
//! - `catppuccin-latte`
//! - `catppuccin-frappe`
//! - `catppuccin-macchiato`
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! favorite_fg = "#f9e2af"
//! emergency_fg = "#f38ba8"
//! modal_border = "#cba6f7"
//! error_fg = "#f38ba8"
//! status_fg = "#a6e3a1"
//! avatar_fg = "#ffffff"
//! ```

use crate::domain::error::{ContactsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_THEME: &str = "catppuccin-mocha";

/// A named colour scheme.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colours for every UI element.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, column headings, secondary info.
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Favorite star and side panel title.
    pub favorite_fg: String,
    /// Emergency marker and side panel title.
    pub emergency_fg: String,

    /// Form and confirmation box border.
    pub modal_border: String,
    /// Inline validation messages.
    pub error_fg: String,
    /// Status line after a successful operation.
    pub status_fg: String,
    /// Letter drawn on avatar backgrounds.
    pub avatar_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name. Returns `None` for unknown names.
    ///
    /// ```rust
    /// use zcontacts::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Theme`] if the file cannot be read or the TOML
    /// does not describe a complete theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ContactsError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ContactsError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Picks the theme for the configured options.
    ///
    /// A theme file wins over a theme name. Anything that fails to load is
    /// logged and replaced by the default theme.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&str>) -> Self {
        if let Some(file) = file {
            match Self::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, using default");
                }
            }
        } else if let Some(name) = name {
            if let Some(theme) = Self::from_name(name) {
                return theme;
            }
            tracing::warn!(theme_name = %name, "unknown theme, using default");
        }
        Self::default()
    }

    /// Parses `#rrggbb` into components; anything malformed becomes white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground colour sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background colour sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme does not parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).expect("embedded default theme parses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_theme_parses() {
        for name in [
            "catppuccin-mocha",
            "catppuccin-latte",
            "catppuccin-frappe",
            "catppuccin-macchiato",
        ] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
            assert!(theme.colors.header_bg.is_none());
        }
    }

    #[test]
    fn escape_sequences() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn resolve_prefers_file_and_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let custom = include_str!("../../themes/catppuccin-frappe.toml")
            .replace("catppuccin-frappe", "custom");
        std::fs::write(&path, custom).unwrap();

        let theme = Theme::resolve(Some("catppuccin-latte"), path.to_str());
        assert_eq!(theme.name, "custom");

        let missing = dir.path().join("missing.toml");
        assert_eq!(Theme::resolve(None, missing.to_str()).name, "catppuccin-mocha");
        assert_eq!(Theme::resolve(Some("nope"), None).name, "catppuccin-mocha");
    }

    #[test]
    fn incomplete_file_is_theme_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "name = \"bad\"\n").unwrap();

        assert!(matches!(Theme::from_file(&path), Err(ContactsError::Theme(_))));
    }
}

//! Named colors and fonts shared between widgets
//!
//! A [`Theme`] is an explicit value, usually wrapped in an `Arc` and handed to
//! each widget at construction. Widgets look entries up by name on every
//! frame, so swapping the `Arc` between frames restyles them immediately.
//!
//! Themes can be loaded from JSON. Keys that are not mentioned keep the
//! values of [`Theme::default`]:
//!
//! ```
//! use tui_listbox_core::theme::{keys, Theme};
//! use ratatui::style::Color;
//!
//! let theme = Theme::from_json(r##"{
//!     "colors": { "selection": "#005f87" },
//!     "fonts": { "text": { "bold": true } }
//! }"##).unwrap();
//!
//! assert_eq!(theme.color(keys::SELECTION), Color::Rgb(0x00, 0x5f, 0x87));
//! assert!(theme.font(keys::TEXT).is_bold());
//! ```

use std::collections::HashMap;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Well-known theme entry names
pub mod keys {
    /// Text color and font
    pub const TEXT: &str = "text";
    /// Fill of the selected row while the widget has focus
    pub const SELECTION: &str = "selection";
    /// Fill of the selected row while the widget is unfocused
    pub const SELECTION_INACTIVE: &str = "selectionInactive";
    /// Fill of a hovered row
    pub const BUTTON_HOVERED: &str = "buttonHovered";
}

/// Errors raised while loading a theme
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid theme JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid color {value:?} for theme key {key:?}")]
    InvalidColor { key: String, value: String },
    #[error("font {key:?} has a line height of zero")]
    ZeroLineHeight { key: String },
}

/// Cell font: text modifiers plus the number of rows one line occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    pub modifiers: Modifier,
    pub line_height: u16,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            modifiers: Modifier::empty(),
            line_height: 1,
        }
    }
}

impl Font {
    pub fn new(modifiers: Modifier, line_height: u16) -> Self {
        Self {
            modifiers,
            line_height,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.modifiers.contains(Modifier::BOLD)
    }

    /// Style carrying this font's modifiers and the given foreground
    pub fn style(&self, fg: Color) -> Style {
        Style::default().fg(fg).add_modifier(self.modifiers)
    }
}

/// Named colors and fonts
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    colors: HashMap<String, Color>,
    fonts: HashMap<String, Font>,
}

impl Default for Theme {
    fn default() -> Self {
        let colors = [
            (keys::TEXT, Color::Reset),
            (keys::SELECTION, Color::Blue),
            (keys::SELECTION_INACTIVE, Color::DarkGray),
            (keys::BUTTON_HOVERED, Color::Indexed(238)),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let fonts = [(keys::TEXT.to_string(), Font::default())]
            .into_iter()
            .collect();

        Self { colors, fonts }
    }
}

impl Theme {
    /// Create a theme with no entries at all
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    /// Look up a color, falling back to [`Color::Reset`]
    pub fn color(&self, name: &str) -> Color {
        match self.colors.get(name) {
            Some(color) => *color,
            None => {
                tracing::trace!(name, "theme color missing, using reset");
                Color::Reset
            }
        }
    }

    /// Look up a font, falling back to [`Font::default`]
    pub fn font(&self, name: &str) -> Font {
        match self.fonts.get(name) {
            Some(font) => *font,
            None => {
                tracing::trace!(name, "theme font missing, using default");
                Font::default()
            }
        }
    }

    /// Set a color (builder pattern)
    pub fn with_color(mut self, name: impl Into<String>, color: Color) -> Self {
        self.colors.insert(name.into(), color);
        self
    }

    /// Set a font (builder pattern)
    pub fn with_font(mut self, name: impl Into<String>, font: Font) -> Self {
        self.fonts.insert(name.into(), font);
        self
    }

    /// Build a theme from a config, layered over [`Theme::default`]
    pub fn from_config(config: ThemeConfig) -> Result<Self, ThemeError> {
        let mut theme = Self::default();

        for (key, value) in config.colors {
            let color = Color::from_str(&value).map_err(|_| ThemeError::InvalidColor {
                key: key.clone(),
                value: value.clone(),
            })?;
            theme.colors.insert(key, color);
        }

        for (key, font) in config.fonts {
            if font.line_height == 0 {
                return Err(ThemeError::ZeroLineHeight { key });
            }
            theme.fonts.insert(key, font.into());
        }

        Ok(theme)
    }

    /// Parse a JSON theme config, layered over [`Theme::default`]
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        let config: ThemeConfig = serde_json::from_str(json)?;
        Self::from_config(config)
    }
}

/// Serializable form of a [`Theme`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color name -> color string (`"blue"`, `"#rrggbb"`, `"238"`)
    pub colors: HashMap<String, String>,
    /// Font name -> font description
    pub fonts: HashMap<String, FontConfig>,
}

/// Serializable form of a [`Font`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub dim: bool,
    pub line_height: u16,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underlined: false,
            dim: false,
            line_height: 1,
        }
    }
}

impl From<FontConfig> for Font {
    fn from(config: FontConfig) -> Self {
        let mut modifiers = Modifier::empty();
        if config.bold {
            modifiers |= Modifier::BOLD;
        }
        if config.italic {
            modifiers |= Modifier::ITALIC;
        }
        if config.underlined {
            modifiers |= Modifier::UNDERLINED;
        }
        if config.dim {
            modifiers |= Modifier::DIM;
        }
        Font::new(modifiers, config.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_has_list_keys() {
        let theme = Theme::default();
        assert_eq!(theme.color(keys::SELECTION), Color::Blue);
        assert_eq!(theme.color(keys::SELECTION_INACTIVE), Color::DarkGray);
        assert_eq!(theme.color(keys::BUTTON_HOVERED), Color::Indexed(238));
        assert_eq!(theme.font(keys::TEXT), Font::default());
    }

    #[test]
    fn test_missing_entries_fall_back() {
        let theme = Theme::empty();
        assert_eq!(theme.color("nope"), Color::Reset);
        assert_eq!(theme.font("nope"), Font::default());
    }

    #[test]
    fn test_builder_overrides() {
        let theme = Theme::default()
            .with_color(keys::SELECTION, Color::Red)
            .with_font(keys::TEXT, Font::new(Modifier::ITALIC, 2));
        assert_eq!(theme.color(keys::SELECTION), Color::Red);
        assert_eq!(theme.font(keys::TEXT).line_height, 2);
    }

    #[test]
    fn test_from_json_layers_over_default() {
        let theme = Theme::from_json(
            r#"{ "colors": { "buttonHovered": "yellow" },
                 "fonts": { "text": { "bold": true, "line_height": 2 } } }"#,
        )
        .unwrap();

        assert_eq!(theme.color(keys::BUTTON_HOVERED), Color::Yellow);
        // untouched key keeps its default
        assert_eq!(theme.color(keys::SELECTION), Color::Blue);
        let font = theme.font(keys::TEXT);
        assert!(font.is_bold());
        assert_eq!(font.line_height, 2);
    }

    #[test]
    fn test_from_json_empty_object() {
        assert_eq!(Theme::from_json("{}").unwrap(), Theme::default());
    }

    #[test]
    fn test_from_json_rejects_bad_color() {
        let err = Theme::from_json(r#"{ "colors": { "text": "not-a-color" } }"#).unwrap_err();
        assert!(matches!(err, ThemeError::InvalidColor { ref key, .. } if key == "text"));
    }

    #[test]
    fn test_from_json_rejects_zero_line_height() {
        let err = Theme::from_json(r#"{ "fonts": { "text": { "line_height": 0 } } }"#).unwrap_err();
        assert!(matches!(err, ThemeError::ZeroLineHeight { .. }));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = Theme::from_json("{ colors").unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)));
    }

    #[test]
    fn test_font_style() {
        let style = Font::new(Modifier::BOLD, 1).style(Color::Green);
        assert_eq!(style.fg, Some(Color::Green));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }
}

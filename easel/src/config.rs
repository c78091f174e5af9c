//! Explicit UI defaults.
//!
//! Text styles and focus rings need a default font and a few colors. These
//! live in a plain value handed to whoever needs them, instead of being
//! looked up from a process-wide application object.

use crate::{Color, Font};

/// Defaults for text and focus decoration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiDefaults {
    /// The font used when a text style does not name one.
    pub font: Font,
    /// The color used when a text style does not name one.
    pub text_color: Color,
    pub disabled_text_color: Color,
    /// The color of the dotted focus rectangle.
    pub focus_ring_color: Color,
}

impl Default for UiDefaults {
    fn default() -> Self {
        UiDefaults {
            font: Font::default(),
            text_color: Color::BLACK,
            disabled_text_color: Color::GRAY,
            focus_ring_color: Color::GRAY,
        }
    }
}

impl UiDefaults {
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }
}

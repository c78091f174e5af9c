//! Traits for text layout, and the attributed-text adapter built on them.

use std::ops::{Range, RangeBounds};

use crate::kurbo::{Rect, Size};
use crate::util::{self, IndexUnit};
use crate::{Color, Error, Font, UiDefaults};

/// Horizontal (or vertical) placement of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

impl TextAlign {
    /// The offset of an item of `extent` placed in `available` space.
    pub fn offset(self, extent: f64, available: f64) -> f64 {
        match self {
            TextAlign::Start => 0.0,
            TextAlign::Center => (available - extent) / 2.0,
            TextAlign::End => available - extent,
        }
    }
}

/// Options controlling how text is laid out in a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextDrawOptions {
    pub align: TextAlign,
    pub valign: TextAlign,
    /// Break lines at word (or, failing that, glyph) boundaries to fit the
    /// box width.
    pub wrap: bool,
    /// Drop lines that do not fit the box height. Only applies when `wrap`
    /// is set.
    pub ellipsis: bool,
}

impl Default for TextDrawOptions {
    fn default() -> Self {
        TextDrawOptions {
            align: TextAlign::Start,
            valign: TextAlign::Start,
            wrap: true,
            ellipsis: false,
        }
    }
}

/// The default style of a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAttributes {
    pub font: Font,
    pub color: Color,
    pub options: TextDrawOptions,
}

impl TextAttributes {
    /// Build attributes, taking whatever is `None` from `defaults`.
    pub fn new(font: Option<Font>, color: Option<Color>, defaults: &UiDefaults) -> TextAttributes {
        TextAttributes {
            font: font.unwrap_or_else(|| defaults.font.clone()),
            color: color.unwrap_or(defaults.text_color),
            options: TextDrawOptions::default(),
        }
    }

    /// Attributes for the label of a disabled control.
    pub fn disabled(font: Option<Font>, defaults: &UiDefaults) -> TextAttributes {
        TextAttributes::new(font, Some(defaults.disabled_text_color), defaults)
    }

    pub fn with_options(mut self, options: TextDrawOptions) -> Self {
        self.options = options;
        self
    }
}

/// A backend's factory for text layouts.
pub trait Text {
    type TextLayout: TextLayout;

    /// Create a layout of `text` in the default style given by `attributes`.
    fn new_text_layout(
        &mut self,
        text: &str,
        attributes: &TextAttributes,
    ) -> Result<Self::TextLayout, Error>;
}

/// A backend-native text layout.
///
/// Ranges passed to the setters are already translated into
/// [`INDEX_UNIT`](Self::INDEX_UNIT); `None` means the whole text.
pub trait TextLayout {
    /// The unit this layout's ranges are expressed in.
    const INDEX_UNIT: IndexUnit;

    fn text(&self) -> &str;

    fn set_font(&mut self, font: &Font, range: Option<Range<usize>>);

    fn set_color(&mut self, color: Color, range: Option<Range<usize>>);

    /// Lay the text out in a box of `size` and return its bounds, anchored
    /// at the origin and rounded up to whole pixels.
    fn bounds_for(&self, size: Size, options: &TextDrawOptions) -> Rect;
}

/// A run of text with character-ranged style overrides.
///
/// Ranges are in `char`s. The whole-string ranges `..` and `0..` are passed
/// to the backend without any index translation.
pub struct AttributedText<L> {
    layout: L,
    options: TextDrawOptions,
}

impl<L: TextLayout> AttributedText<L> {
    /// Create attributed text styled with `attributes`, or with `defaults`
    /// when no attributes are given.
    pub fn new<T>(
        text_factory: &mut T,
        text: &str,
        attributes: Option<&TextAttributes>,
        defaults: &UiDefaults,
    ) -> Result<Self, Error>
    where
        T: Text<TextLayout = L>,
    {
        let fallback;
        let attributes = match attributes {
            Some(attributes) => attributes,
            None => {
                fallback = TextAttributes::new(None, None, defaults);
                &fallback
            }
        };
        let layout = text_factory.new_text_layout(text, attributes)?;
        Ok(AttributedText {
            layout,
            options: attributes.options,
        })
    }

    pub fn set_font(&mut self, font: &Font) {
        self.set_font_for(font, ..);
    }

    pub fn set_font_for(&mut self, font: &Font, range: impl RangeBounds<usize>) {
        let range = util::layout_range(self.layout.text(), range, L::INDEX_UNIT);
        self.layout.set_font(font, range);
    }

    pub fn set_color(&mut self, color: Color) {
        self.set_color_for(color, ..);
    }

    pub fn set_color_for(&mut self, color: Color, range: impl RangeBounds<usize>) {
        let range = util::layout_range(self.layout.text(), range, L::INDEX_UNIT);
        self.layout.set_color(color, range);
    }

    /// The options used when this text is drawn into a rectangle.
    pub fn draw_options(&self) -> &TextDrawOptions {
        &self.options
    }

    pub fn set_draw_options(&mut self, options: TextDrawOptions) {
        self.options = options;
    }

    /// The bounds of the text laid out in `size` with `options`.
    pub fn get_bounds_for(&self, size: Size, options: &TextDrawOptions) -> Rect {
        self.layout.bounds_for(size, options)
    }

    pub fn text(&self) -> &str {
        self.layout.text()
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }
}

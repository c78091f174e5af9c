//! A render target that records what it is asked to do.
//!
//! This is what the core crate's tests paint on, but it is made public in
//! case it might come in handy: layout code can measure text with
//! [`RecordingText`] without a real backend, and backend authors can
//! compare their behavior with it.

use std::ops::Range;

use crate::kurbo::{Affine, Rect, Shape, Size};
use crate::target::{DrawStatus, Image, RenderTarget};
use crate::text::{Text, TextAttributes, TextDrawOptions, TextLayout};
use crate::theme::{ControlState, ThemePart};
use crate::util::{self, IndexUnit};
use crate::{Color, Error, ErrorKind, Font, Path, StrokeStyle};

/// Geometry as a list of paths whose interiors are intersected.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedGeometry {
    pub parts: Vec<(Path, Affine)>,
}

impl RecordedGeometry {
    /// The bounds of the region, as the intersection of each part's bounds.
    pub fn bounding_box(&self) -> Rect {
        let mut parts = self
            .parts
            .iter()
            .map(|(path, transform)| {
                transform.transform_rect_bbox(path.to_bez_path().bounding_box())
            });
        let first = parts.next().unwrap_or(Rect::ZERO);
        parts.fold(first, |acc, r| acc.intersect(r))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedImage {
    pub size: Size,
}

impl Image for RecordedImage {
    fn size(&self) -> Size {
        self.size
    }
}

/// A theme buffer that remembers what was painted into it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedBuffer {
    pub size: Size,
    pub painted: Vec<(ThemePart, ControlState, Rect)>,
}

/// One recorded target call.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    BeginDraw,
    EndDraw,
    SetTransform(Affine),
    PushLayer {
        layer: u64,
        mask: RecordedGeometry,
    },
    PopLayer,
    DrawGeometry {
        geometry: RecordedGeometry,
        color: Color,
        width: f64,
        dashed: bool,
    },
    FillGeometry {
        geometry: RecordedGeometry,
        color: Color,
    },
    DrawRectangle {
        rect: Rect,
        color: Color,
        width: f64,
        dashed: bool,
    },
    FillRectangle { rect: Rect, color: Color },
    DrawImage { src: Rect, dest: Rect },
    DrawText { text: String, rect: Rect },
    DrawBuffer {
        buffer: RecordedBuffer,
        dest: Rect,
    },
}

/// A render target that doesn't render, but keeps a log.
#[derive(Debug)]
pub struct RecordingTarget {
    commands: Vec<Command>,
    transform: Affine,
    scale: f64,
    layers: Vec<u64>,
    next_layer: u64,
    lost: bool,
    fail_layers: bool,
    fail_stroke_styles: bool,
    fail_state_blocks: bool,
}

impl Default for RecordingTarget {
    fn default() -> Self {
        RecordingTarget::with_scale(1.0)
    }
}

impl RecordingTarget {
    pub fn new() -> RecordingTarget {
        RecordingTarget::default()
    }

    pub fn with_scale(scale: f64) -> RecordingTarget {
        RecordingTarget {
            commands: Vec::new(),
            transform: Affine::IDENTITY,
            scale,
            layers: Vec::new(),
            next_layer: 0,
            lost: false,
            fail_layers: false,
            fail_stroke_styles: false,
            fail_state_blocks: false,
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The number of layers currently pushed.
    pub fn layer_depth(&self) -> usize {
        self.layers.len()
    }

    /// The transform most recently set.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Simulate a device reset; the session will ask to be recreated.
    pub fn lose_device(&mut self) {
        self.lost = true;
    }

    pub fn fail_layers(&mut self, fail: bool) {
        self.fail_layers = fail;
    }

    pub fn fail_stroke_styles(&mut self, fail: bool) {
        self.fail_stroke_styles = fail;
    }

    pub fn fail_state_blocks(&mut self, fail: bool) {
        self.fail_state_blocks = fail;
    }
}

impl RenderTarget for RecordingTarget {
    type Geometry = RecordedGeometry;
    type Layer = u64;
    type StateBlock = Affine;
    type StrokeStyle = StrokeStyle;
    type Image = RecordedImage;
    type Canvas = RecordedImage;
    type TextLayout = RecordingTextLayout;
    type Buffer = RecordedBuffer;

    fn begin_draw(&mut self) {
        self.commands.push(Command::BeginDraw);
    }

    fn end_draw(&mut self) -> DrawStatus {
        while self.layers.pop().is_some() {
            self.commands.push(Command::PopLayer);
        }
        self.commands.push(Command::EndDraw);
        if self.lost {
            DrawStatus::RecreateTarget
        } else {
            DrawStatus::Presented
        }
    }

    fn scale_factor(&self) -> f64 {
        self.scale
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.commands.push(Command::SetTransform(transform));
    }

    fn save_drawing_state(&mut self) -> Result<Affine, Error> {
        if self.fail_state_blocks {
            return Err(Error::backend("state block allocation disabled"));
        }
        Ok(self.transform)
    }

    fn restore_drawing_state(&mut self, block: &Affine) {
        self.set_transform(*block);
    }

    fn create_geometry(&mut self, path: &Path) -> Result<RecordedGeometry, Error> {
        Ok(RecordedGeometry {
            parts: vec![(path.clone(), Affine::IDENTITY)],
        })
    }

    fn transform_geometry(
        &mut self,
        geometry: &RecordedGeometry,
        transform: Affine,
    ) -> Result<RecordedGeometry, Error> {
        let parts = geometry
            .parts
            .iter()
            .map(|(path, t)| (path.clone(), transform * *t))
            .collect();
        Ok(RecordedGeometry { parts })
    }

    fn intersect_geometry(
        &mut self,
        a: &RecordedGeometry,
        b: &RecordedGeometry,
    ) -> Result<RecordedGeometry, Error> {
        let parts = a.parts.iter().chain(&b.parts).cloned().collect();
        Ok(RecordedGeometry { parts })
    }

    fn create_layer(&mut self) -> Result<u64, Error> {
        if self.fail_layers {
            return Err(Error::backend("layer allocation disabled"));
        }
        self.next_layer += 1;
        Ok(self.next_layer)
    }

    fn push_layer(&mut self, layer: &u64, mask: &RecordedGeometry) {
        self.layers.push(*layer);
        self.commands.push(Command::PushLayer {
            layer: *layer,
            mask: mask.clone(),
        });
    }

    fn pop_layer(&mut self) {
        if self.layers.pop().is_some() {
            self.commands.push(Command::PopLayer);
        }
    }

    fn create_stroke_style(&mut self, style: &StrokeStyle) -> Result<StrokeStyle, Error> {
        if self.fail_stroke_styles {
            return Err(ErrorKind::NotSupported.into());
        }
        Ok(style.clone())
    }

    fn draw_geometry(
        &mut self,
        geometry: &RecordedGeometry,
        color: Color,
        width: f64,
        style: Option<&StrokeStyle>,
    ) {
        self.commands.push(Command::DrawGeometry {
            geometry: geometry.clone(),
            color,
            width,
            dashed: style.map_or(false, |s| s.dash.is_some()),
        });
    }

    fn fill_geometry(&mut self, geometry: &RecordedGeometry, color: Color) {
        self.commands.push(Command::FillGeometry {
            geometry: geometry.clone(),
            color,
        });
    }

    fn draw_rectangle(
        &mut self,
        rect: Rect,
        color: Color,
        width: f64,
        style: Option<&StrokeStyle>,
    ) {
        self.commands.push(Command::DrawRectangle {
            rect,
            color,
            width,
            dashed: style.map_or(false, |s| s.dash.is_some()),
        });
    }

    fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        self.commands.push(Command::FillRectangle { rect, color });
    }

    fn draw_image(&mut self, image: &RecordedImage, src: Rect, dest: Rect) {
        let bounds = Rect::from_origin_size((0.0, 0.0), image.size);
        if let Some((src, dest)) = util::clip_source_rect(src, bounds, dest) {
            self.commands.push(Command::DrawImage { src, dest });
        }
    }

    fn draw_canvas(&mut self, canvas: &RecordedImage, src: Rect, dest: Rect) {
        self.draw_image(canvas, src, dest);
    }

    fn draw_text_layout(
        &mut self,
        layout: &RecordingTextLayout,
        rect: Rect,
        _options: &TextDrawOptions,
    ) {
        self.commands.push(Command::DrawText {
            text: layout.text.clone(),
            rect,
        });
    }

    fn create_buffer(&mut self, size: Size) -> Result<RecordedBuffer, Error> {
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(ErrorKind::InvalidInput.into());
        }
        Ok(RecordedBuffer {
            size,
            painted: Vec::new(),
        })
    }

    fn draw_buffer(&mut self, buffer: &RecordedBuffer, dest: Rect) -> Result<(), Error> {
        self.commands.push(Command::DrawBuffer {
            buffer: buffer.clone(),
            dest,
        });
        Ok(())
    }
}

/// A text factory producing [`RecordingTextLayout`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingText;

/// A style override recorded by a [`RecordingTextLayout`].
#[derive(Debug, Clone, PartialEq)]
pub enum StyleSpan {
    Font(Font, Option<Range<usize>>),
    Color(Color, Option<Range<usize>>),
}

/// A text layout with fixed-pitch metrics.
///
/// Every character advances by `0.6` of the font size and lines are `1.2`
/// font sizes tall, which is enough to exercise wrapping, alignment and
/// ellipsis deterministically. Ranges are kept in UTF-16 code units.
#[derive(Debug, Clone)]
pub struct RecordingTextLayout {
    text: String,
    attributes: TextAttributes,
    spans: Vec<StyleSpan>,
}

impl RecordingTextLayout {
    pub fn spans(&self) -> &[StyleSpan] {
        &self.spans
    }

    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }

    fn advance(&self) -> f64 {
        self.attributes.font.size * 0.6
    }

    fn line_height(&self) -> f64 {
        self.attributes.font.size * 1.2
    }

    /// The width of each laid out line, in characters.
    fn line_lengths(&self, max_chars: Option<usize>) -> Vec<usize> {
        let mut lines = Vec::new();
        for paragraph in self.text.split('\n') {
            let Some(max) = max_chars else {
                lines.push(paragraph.chars().count());
                continue;
            };
            let max = max.max(1);
            let mut current = 0;
            for word in paragraph.split(' ') {
                let mut len = word.chars().count();
                let needed = if current == 0 { len } else { current + 1 + len };
                if needed <= max {
                    current = needed;
                    continue;
                }
                if current > 0 {
                    lines.push(current);
                }
                while len > max {
                    lines.push(max);
                    len -= max;
                }
                current = len;
            }
            lines.push(current);
        }
        lines
    }
}

impl Text for RecordingText {
    type TextLayout = RecordingTextLayout;

    fn new_text_layout(
        &mut self,
        text: &str,
        attributes: &TextAttributes,
    ) -> Result<RecordingTextLayout, Error> {
        Ok(RecordingTextLayout {
            text: text.to_owned(),
            attributes: attributes.clone(),
            spans: Vec::new(),
        })
    }
}

impl TextLayout for RecordingTextLayout {
    const INDEX_UNIT: IndexUnit = IndexUnit::Utf16;

    fn text(&self) -> &str {
        &self.text
    }

    fn set_font(&mut self, font: &Font, range: Option<Range<usize>>) {
        self.spans.push(StyleSpan::Font(font.clone(), range));
    }

    fn set_color(&mut self, color: Color, range: Option<Range<usize>>) {
        self.spans.push(StyleSpan::Color(color, range));
    }

    fn bounds_for(&self, size: Size, options: &TextDrawOptions) -> Rect {
        let advance = self.advance();
        let max_chars = (options.wrap && size.width.is_finite() && advance > 0.0)
            .then(|| (size.width / advance).floor() as usize);
        let lines = self.line_lengths(max_chars);
        let line_height = self.line_height();
        let visible = util::visible_line_count(
            &vec![line_height; lines.len()],
            size.height,
            options.wrap,
            options.ellipsis,
        );
        let width = lines[..visible].iter().copied().max().unwrap_or(0) as f64 * advance;
        let height = visible as f64 * line_height;
        Rect::new(0.0, 0.0, width.ceil(), height.ceil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributedText, FontFamily, UiDefaults};

    fn text(s: &str) -> AttributedText<RecordingTextLayout> {
        let defaults = UiDefaults::default().with_font(Font::new(FontFamily::MONOSPACE, 10.0));
        AttributedText::new(&mut RecordingText, s, None, &defaults).unwrap()
    }

    #[test]
    fn single_line_bounds() {
        let t = text("hello");
        let bounds = t.get_bounds_for(Size::new(100.0, 100.0), &TextDrawOptions::default());
        assert_eq!(bounds, Rect::new(0.0, 0.0, 30.0, 12.0));
    }

    #[test]
    fn wrapping_breaks_at_words() {
        let t = text("aaa bbb ccc");
        // Six characters fit on a line.
        let bounds = t.get_bounds_for(Size::new(36.0, 100.0), &TextDrawOptions::default());
        assert_eq!(bounds, Rect::new(0.0, 0.0, 18.0, 36.0));
        let no_wrap = TextDrawOptions {
            wrap: false,
            ..Default::default()
        };
        let bounds = t.get_bounds_for(Size::new(36.0, 100.0), &no_wrap);
        assert_eq!(bounds, Rect::new(0.0, 0.0, 66.0, 12.0));
    }

    #[test]
    fn long_words_break_at_glyphs() {
        let t = text("abcdefghij");
        let bounds = t.get_bounds_for(Size::new(24.0, 100.0), &TextDrawOptions::default());
        // 4 + 4 + 2 characters.
        assert_eq!(bounds.height(), 36.0);
        assert_eq!(bounds.width(), 24.0);
    }

    #[test]
    fn ellipsis_drops_lines_that_do_not_fit() {
        let t = text("aaa bbb ccc");
        let options = TextDrawOptions {
            ellipsis: true,
            ..Default::default()
        };
        let bounds = t.get_bounds_for(Size::new(36.0, 25.0), &options);
        assert_eq!(bounds.height(), 24.0);
    }

    #[test]
    fn intersections_accumulate() {
        let mut target = RecordingTarget::new();
        let mut path = crate::PathBuilder::new();
        path.rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let a = target.create_geometry(path.finish().unwrap()).unwrap();
        let b = target
            .transform_geometry(&a, Affine::translate((5.0, 5.0)))
            .unwrap();
        let both = target.intersect_geometry(&a, &b).unwrap();
        assert_eq!(both.parts.len(), 2);
        assert_eq!(both.bounding_box(), Rect::new(5.0, 5.0, 10.0, 10.0));
    }
}

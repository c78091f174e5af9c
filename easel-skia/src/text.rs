//! Text layout and rendering with cosmic-text.

use std::cell::RefCell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use cosmic_text::{
    Align, Attrs, AttrsList, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache,
    Weight, Wrap,
};
use easel::kurbo::{Affine, Rect, Size};
use easel::util::visible_line_count;
use easel::{
    Color, Error, Font, FontFamilyInner, FontStyle, IndexUnit, Text, TextAlign, TextAttributes,
    TextDrawOptions, TextLayout,
};
use tiny_skia::{Mask, Pixmap};

use crate::conv;

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f64 = 1.2;

/// The font database, shared by a factory and the layouts it creates.
type FontContext = Rc<RefCell<FontSystem>>;

/// The text layout factory.
#[derive(Clone)]
pub struct SkiaText {
    fonts: FontContext,
}

impl SkiaText {
    /// A factory using the fonts installed on the system.
    pub fn new() -> SkiaText {
        SkiaText::with_font_system(FontSystem::new())
    }

    pub fn with_font_system(fonts: FontSystem) -> SkiaText {
        SkiaText {
            fonts: Rc::new(RefCell::new(fonts)),
        }
    }

    /// Make a font file's faces available to layouts from this factory.
    pub fn load_font_data(&self, data: Vec<u8>) {
        self.fonts.borrow_mut().db_mut().load_font_data(data);
    }
}

impl Default for SkiaText {
    fn default() -> Self {
        SkiaText::new()
    }
}

impl fmt::Debug for SkiaText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SkiaText").finish_non_exhaustive()
    }
}

impl Text for SkiaText {
    type TextLayout = SkiaTextLayout;

    fn new_text_layout(
        &mut self,
        text: &str,
        attributes: &TextAttributes,
    ) -> Result<SkiaTextLayout, Error> {
        Ok(SkiaTextLayout {
            fonts: self.fonts.clone(),
            text: text.to_owned(),
            font: attributes.font.clone(),
            color: attributes.color,
            spans: Vec::new(),
        })
    }
}

#[derive(Debug, Clone)]
enum SpanStyle {
    Font(Font),
    Color(Color),
}

/// A style override over a byte range.
#[derive(Debug, Clone)]
struct Span {
    range: Range<usize>,
    style: SpanStyle,
}

/// A styled string, shaped on demand for the box it is measured or drawn in.
///
/// Ranges are UTF-8 byte offsets. A ranged font override carries its own
/// size, and a line is as tall as its largest font.
#[derive(Clone)]
pub struct SkiaTextLayout {
    fonts: FontContext,
    text: String,
    font: Font,
    color: Color,
    spans: Vec<Span>,
}

impl fmt::Debug for SkiaTextLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SkiaTextLayout")
            .field("text", &self.text)
            .field("font", &self.font)
            .field("color", &self.color)
            .field("spans", &self.spans)
            .finish_non_exhaustive()
    }
}

/// Font size and line height of `font`, in pixels at `scale`.
fn to_metrics(font: &Font, scale: f64) -> Metrics {
    let size = (font.size * scale) as f32;
    Metrics::new(size, size * LINE_HEIGHT as f32)
}

fn to_attrs(font: &Font, color: Color, scale: f64) -> Attrs<'_> {
    let family = match font.family.inner() {
        FontFamilyInner::Serif => Family::Serif,
        FontFamilyInner::Monospace => Family::Monospace,
        FontFamilyInner::Named(name) => Family::Name(name),
        _ => Family::SansSerif,
    };
    let style = match font.style {
        FontStyle::Regular => Style::Normal,
        FontStyle::Italic => Style::Italic,
    };
    let (r, g, b, a) = color.as_rgba8();
    Attrs::new()
        .family(family)
        .weight(Weight(font.weight.to_raw()))
        .style(style)
        .color(cosmic_text::Color::rgba(r, g, b, a))
        .metrics(to_metrics(font, scale))
}

fn to_align(align: TextAlign) -> Align {
    match align {
        TextAlign::Start => Align::Left,
        TextAlign::Center => Align::Center,
        TextAlign::End => Align::Right,
    }
}

/// Where glyphs are rasterized to.
pub(crate) struct GlyphCanvas<'a> {
    pub cache: &'a mut SwashCache,
    pub pixmap: &'a mut Pixmap,
    pub mask: Option<&'a Mask>,
}

/// The shaped text, with the lines that fit the box. Measured in pixels
/// at the scale it was shaped for.
struct Shaped {
    buffer: Buffer,
    width: f64,
    height: f64,
}

impl SkiaTextLayout {
    fn shape(
        &self,
        fonts: &mut FontSystem,
        size: Size,
        options: &TextDrawOptions,
        scale: f64,
    ) -> Shaped {
        let mut buffer = Buffer::new(fonts, to_metrics(&self.font, scale));
        let width = size
            .width
            .is_finite()
            .then_some((size.width.max(0.0) * scale) as f32);
        buffer.set_size(fonts, width, None);
        let wrap = if options.wrap { Wrap::WordOrGlyph } else { Wrap::None };
        buffer.set_wrap(fonts, wrap);
        let attrs = to_attrs(&self.font, self.color, scale);
        buffer.set_text(fonts, &self.text, attrs, Shaping::Advanced);
        self.apply_spans(&mut buffer, options.align, scale);
        buffer.shape_until_scroll(fonts, false);

        let lines: Vec<(f64, f64)> = buffer
            .layout_runs()
            .map(|run| (run.line_w as f64, run.line_height as f64))
            .collect();
        let heights: Vec<f64> = lines.iter().map(|(_, h)| *h).collect();
        let visible = visible_line_count(
            &heights,
            size.height * scale,
            options.wrap,
            options.ellipsis,
        );
        let lines = &lines[..visible];
        Shaped {
            buffer,
            width: lines.iter().fold(0.0, |acc, (w, _)| f64::max(acc, *w)),
            height: lines.iter().map(|(_, h)| h).sum(),
        }
    }

    /// Style each buffer line from the overrides that touch it.
    fn apply_spans(&self, buffer: &mut Buffer, align: TextAlign, scale: f64) {
        let mut offset = 0;
        for line in buffer.lines.iter_mut() {
            let start = self.text[offset..]
                .find(line.text())
                .map_or(offset, |i| offset + i);
            let end = start + line.text().len();
            offset = end;
            line.set_align(Some(to_align(align)));
            if self.spans.is_empty() {
                continue;
            }

            let mut cuts = vec![start, end];
            for span in &self.spans {
                for cut in [span.range.start, span.range.end] {
                    if cut > start && cut < end {
                        cuts.push(cut);
                    }
                }
            }
            cuts.sort_unstable();
            cuts.dedup();

            let mut list = AttrsList::new(to_attrs(&self.font, self.color, scale));
            for pair in cuts.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let mut font = &self.font;
                let mut color = self.color;
                let mut styled = false;
                for span in &self.spans {
                    if span.range.start <= a && b <= span.range.end {
                        styled = true;
                        match &span.style {
                            SpanStyle::Font(f) => font = f,
                            SpanStyle::Color(c) => color = *c,
                        }
                    }
                }
                if styled {
                    list.add_span(a - start..b - start, to_attrs(font, color, scale));
                }
            }
            line.set_attrs_list(list);
        }
    }

    /// Rasterize at `scale` device pixels per DIP, placing the box `rect`
    /// through the DIP-space `transform`.
    pub(crate) fn draw(
        &self,
        canvas: GlyphCanvas<'_>,
        transform: Affine,
        scale: f64,
        rect: Rect,
        options: &TextDrawOptions,
    ) {
        let mut fonts = self.fonts.borrow_mut();
        let shaped = self.shape(&mut fonts, rect.size(), options, scale);
        let max_y = shaped.height.ceil() as i32;
        let dy = options.valign.offset(shaped.height / scale, rect.height());
        // Glyphs come out in device pixels; only the box origin is in DIPs.
        let transform = Affine::scale(scale)
            * transform
            * Affine::translate((rect.x0, rect.y0 + dy))
            * Affine::scale(scale.recip());
        let transform = conv::to_transform(transform);
        let (r, g, b, a) = self.color.as_rgba8();
        let default_color = cosmic_text::Color::rgba(r, g, b, a);

        shaped
            .buffer
            .draw(&mut fonts, canvas.cache, default_color, |x, y, w, h, color| {
                if y >= max_y || color.a() == 0 {
                    return;
                }
                let Some(px) = tiny_skia::Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
                else {
                    return;
                };
                let mut paint = tiny_skia::Paint::default();
                paint.set_color_rgba8(color.r(), color.g(), color.b(), color.a());
                canvas.pixmap.fill_rect(px, &paint, transform, canvas.mask);
            });
    }

    fn push_span(&mut self, range: Range<usize>, style: SpanStyle) {
        if range.is_empty() {
            return;
        }
        self.spans.push(Span { range, style });
    }
}

impl TextLayout for SkiaTextLayout {
    const INDEX_UNIT: IndexUnit = IndexUnit::Utf8;

    fn text(&self) -> &str {
        &self.text
    }

    fn set_font(&mut self, font: &Font, range: Option<Range<usize>>) {
        match range {
            Some(range) => self.push_span(range, SpanStyle::Font(font.clone())),
            None => {
                self.font = font.clone();
                self.spans.retain(|s| !matches!(s.style, SpanStyle::Font(_)));
            }
        }
    }

    fn set_color(&mut self, color: Color, range: Option<Range<usize>>) {
        match range {
            Some(range) => self.push_span(range, SpanStyle::Color(color)),
            None => {
                self.color = color;
                self.spans.retain(|s| !matches!(s.style, SpanStyle::Color(_)));
            }
        }
    }

    fn bounds_for(&self, size: Size, options: &TextDrawOptions) -> Rect {
        let mut fonts = self.fonts.borrow_mut();
        let shaped = self.shape(&mut fonts, size, options, 1.0);
        Rect::new(0.0, 0.0, shaped.width.ceil(), shaped.height.ceil())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel::{AttributedText, FontFamily, UiDefaults};

    fn layout(text: &str) -> SkiaTextLayout {
        let attributes = TextAttributes::new(None, None, &UiDefaults::default());
        SkiaText::new().new_text_layout(text, &attributes).unwrap()
    }

    #[test]
    fn ranged_overrides_are_kept_in_bytes() {
        let mut factory = SkiaText::new();
        let mut text =
            AttributedText::new(&mut factory, "héllo wörld", None, &UiDefaults::default())
                .unwrap();
        text.set_color_for(Color::RED, 2..5);
        let spans = &text.layout().spans;
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].range, 3..6);
    }

    #[test]
    fn whole_text_overrides_replace_ranges() {
        let mut l = layout("abc");
        l.set_color(Color::RED, Some(0..1));
        l.set_font(&Font::new(FontFamily::SERIF, 20.0), Some(1..2));
        l.set_color(Color::WHITE, None);
        assert_eq!(l.color, Color::WHITE);
        assert_eq!(l.spans.len(), 1);
        assert!(matches!(l.spans[0].style, SpanStyle::Font(_)));
    }

    #[test]
    fn empty_ranges_are_dropped() {
        let mut l = layout("abc");
        l.set_color(Color::RED, Some(2..2));
        assert!(l.spans.is_empty());
    }

    #[test]
    fn bounds_are_whole_pixels() {
        let l = layout("one\ntwo\nthree");
        let options = TextDrawOptions::default();
        let bounds = l.bounds_for(Size::new(f64::INFINITY, f64::INFINITY), &options);
        assert_eq!(bounds.origin(), easel::kurbo::Point::ZERO);
        assert_eq!(bounds.height(), bounds.height().ceil());
        assert_eq!(bounds.width(), bounds.width().ceil());
        let line_height = (easel::DEFAULT_FONT_SIZE * LINE_HEIGHT).ceil();
        assert!(bounds.height() >= 3.0 * line_height - 1.0);
    }

    #[test]
    fn ellipsis_limits_lines() {
        let l = layout("one\ntwo\nthree\nfour");
        let options = TextDrawOptions {
            ellipsis: true,
            ..TextDrawOptions::default()
        };
        let line_height = easel::DEFAULT_FONT_SIZE * LINE_HEIGHT;
        let bounds = l.bounds_for(Size::new(500.0, line_height * 2.5), &options);
        assert_eq!(bounds.height(), (2.0 * line_height).ceil());
    }

    #[test]
    fn ranged_font_size_grows_bounds() {
        let mut l = layout("abcdef");
        let options = TextDrawOptions::default();
        let size = Size::new(1000.0, 1000.0);
        let plain = l.bounds_for(size, &options);
        l.set_font(&Font::new(FontFamily::SYSTEM_UI, 48.0), Some(0..3));
        let ranged = l.bounds_for(size, &options);
        assert!(ranged.height() >= (48.0 * LINE_HEIGHT).floor());
        assert!(ranged.height() > plain.height());
    }

    #[test]
    fn tall_ranged_line_counts_against_ellipsis() {
        let mut l = layout("one\ntwo\nthree");
        let options = TextDrawOptions {
            ellipsis: true,
            ..TextDrawOptions::default()
        };
        let line_height = easel::DEFAULT_FONT_SIZE * LINE_HEIGHT;
        let size = Size::new(500.0, line_height * 2.5);
        assert_eq!(l.bounds_for(size, &options).height(), (2.0 * line_height).ceil());
        // "two" now takes more than the remaining room.
        l.set_font(&Font::new(FontFamily::SYSTEM_UI, 48.0), Some(4..7));
        assert_eq!(l.bounds_for(size, &options).height(), line_height.ceil());
    }
}

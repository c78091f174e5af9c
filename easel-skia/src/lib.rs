//! A software rendering backend for easel, on tiny-skia and cosmic-text.
//!
//! A [`Surface`] owns the pixels of a window or bitmap. Each draw session
//! binds a [`SkiaTarget`] to it and wraps the target in an
//! [`easel::Painter`]:
//!
//! ```no_run
//! use easel::kurbo::{Rect, Size};
//! use easel::{Color, Painter};
//! use easel_skia::{SkiaTarget, Surface};
//!
//! let mut surface = Surface::new(200, 100)?;
//! let target = SkiaTarget::new(&mut surface, Size::new(200.0, 100.0), 1.0)?;
//! let mut painter = Painter::new(target);
//! painter.set_fill_color(Color::RED);
//! painter.fill_rect(Rect::new(10.0, 10.0, 50.0, 50.0));
//! if painter.end_draw() {
//!     // recreate the surface and paint again
//! }
//! # Ok::<(), easel::Error>(())
//! ```

mod conv;
mod double_buffer;
mod error;
mod geometry;
mod image;
mod text;

use std::path::Path;

use easel::kurbo::{Affine, Rect, Size};
use easel::util::clip_source_rect;
use easel::{
    Color, DrawStatus, Error, ErrorKind, Image, RenderTarget, StrokeStyle, TextDrawOptions,
};
use tiny_skia::{FillRule, FilterQuality, Mask, Paint, Pattern, Pixmap, SpreadMode};

use crate::error::{OrInvalid, WrapError};
use crate::text::GlyphCanvas;

pub use crate::conv::SkiaStrokeStyle;
pub use crate::double_buffer::{BufferDc, DoubleBuffer};
pub use crate::geometry::SkiaGeometry;
pub use crate::image::{Canvas, SkiaImage};
pub use crate::text::{SkiaText, SkiaTextLayout};

/// A painter on this backend.
pub type SkiaPainter<'a> = easel::Painter<SkiaTarget<'a>>;

/// The pixels a target renders into.
///
/// A surface can be marked lost, the way a GPU device is lost when the
/// display driver resets; the next draw session on it then reports that
/// the target must be recreated.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
    lost: bool,
}

impl Surface {
    /// A transparent surface of `width` x `height` device pixels.
    pub fn new(width: u32, height: u32) -> Result<Surface, Error> {
        let pixmap = Pixmap::new(width, height).or_invalid("surface size")?;
        Ok(Surface {
            pixmap,
            lost: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(conv::to_skia_color(color));
    }

    /// The unpremultiplied color of a pixel, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba8(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA bytes, row by row.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn mark_lost(&mut self) {
        self.lost = true;
    }

    pub fn is_lost(&self) -> bool {
        self.lost
    }

    /// Replace the pixels with a transparent surface of the new size. This
    /// also recovers a lost surface.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.pixmap = Pixmap::new(width, height).or_invalid("surface size")?;
        self.lost = false;
        Ok(())
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, Error> {
        self.pixmap.encode_png().wrap()
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(Error::backend)
    }
}

/// A clip layer. The coverage lives on the target's layer stack, so the
/// layer itself is only a token.
#[derive(Debug, Clone, Copy)]
pub struct SkiaLayer(());

/// The target's drawing state.
#[derive(Debug, Clone, Copy)]
pub struct SkiaStateBlock {
    transform: Affine,
}

/// A render target bound to a [`Surface`] for one draw session.
pub struct SkiaTarget<'a> {
    surface: &'a mut Surface,
    scale: f64,
    transform: Affine,
    /// The combined coverage of each pushed layer, innermost last.
    layers: Vec<Mask>,
    /// Restricts painting to the target size when it is smaller than the
    /// surface.
    bounds: Option<Mask>,
    glyphs: Option<cosmic_text::SwashCache>,
}

fn clip_mask<'m>(layers: &'m [Mask], bounds: &'m Option<Mask>) -> Option<&'m Mask> {
    layers.last().or(bounds.as_ref())
}

impl<'a> SkiaTarget<'a> {
    /// Bind a target of `size` device pixels at `scale` device pixels per
    /// DIP to `surface`.
    pub fn new(surface: &'a mut Surface, size: Size, scale: f64) -> Result<SkiaTarget<'a>, Error> {
        let valid = size.width > 0.0
            && size.height > 0.0
            && size.width.ceil() <= surface.width() as f64
            && size.height.ceil() <= surface.height() as f64
            && scale.is_finite()
            && scale > 0.0;
        if !valid {
            log::warn!(
                "target of {size:?} at scale {scale} does not fit a {}x{} surface",
                surface.width(),
                surface.height()
            );
            return Err(ErrorKind::InvalidInput.into());
        }
        let bounds = if size.width < surface.width() as f64 || size.height < surface.height() as f64
        {
            let mut mask = Mask::new(surface.width(), surface.height()).or_invalid("mask size")?;
            let rect = conv::to_rect(size.to_rect()).or_invalid("target size")?;
            let path = tiny_skia::PathBuilder::from_rect(rect);
            mask.fill_path(&path, FillRule::Winding, false, tiny_skia::Transform::identity());
            Some(mask)
        } else {
            None
        };
        Ok(SkiaTarget {
            surface,
            scale,
            transform: Affine::IDENTITY,
            layers: Vec::new(),
            bounds,
            glyphs: None,
        })
    }

    /// The transform from DIPs to device pixels.
    fn device_transform(&self) -> Affine {
        Affine::scale(self.scale) * self.transform
    }

    pub fn surface(&self) -> &Surface {
        self.surface
    }

    /// Mark the bound surface lost. The session ends asking for the target
    /// to be recreated.
    pub fn lose_surface(&mut self) {
        self.surface.mark_lost();
    }

    fn paint_geometry(
        &mut self,
        geometry: &SkiaGeometry,
        paint: &Paint,
        stroke: Option<&tiny_skia::Stroke>,
    ) {
        let Some((path, part_transform)) = geometry.primary() else {
            return;
        };
        let device = self.device_transform();
        let (w, h) = (self.surface.width(), self.surface.height());
        let extra = geometry.rest().and_then(|rest| {
            let mut mask = rest.to_mask(w, h, device)?;
            if let Some(current) = clip_mask(&self.layers, &self.bounds) {
                geometry::multiply_masks(&mut mask, current);
            }
            Some(mask)
        });
        let mask = extra.as_ref().or(clip_mask(&self.layers, &self.bounds));
        let ts = conv::to_transform(device * part_transform);
        match stroke {
            Some(stroke) => self.surface.pixmap.stroke_path(path, paint, stroke, ts, mask),
            None => self
                .surface
                .pixmap
                .fill_path(path, paint, FillRule::Winding, ts, mask),
        }
    }

    fn draw_pixmap(&mut self, pixmap: &Pixmap, scale: f64, src: Rect, dest: Rect) {
        let bounds = Rect::new(
            0.0,
            0.0,
            pixmap.width() as f64 / scale,
            pixmap.height() as f64 / scale,
        );
        let Some((src, dest)) = clip_source_rect(src, bounds, dest) else {
            return;
        };
        let Some(dest_rect) = conv::to_rect(dest) else {
            return;
        };
        let to_dest = Affine::translate(dest.origin().to_vec2())
            * Affine::scale_non_uniform(dest.width() / src.width(), dest.height() / src.height())
            * Affine::translate(-src.origin().to_vec2())
            * Affine::scale(1.0 / scale);
        let paint = Paint {
            shader: Pattern::new(
                pixmap.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                conv::to_transform(to_dest),
            ),
            anti_alias: true,
            ..Paint::default()
        };
        let ts = conv::to_transform(self.device_transform());
        let mask = clip_mask(&self.layers, &self.bounds);
        self.surface.pixmap.fill_rect(dest_rect, &paint, ts, mask);
    }
}

impl RenderTarget for SkiaTarget<'_> {
    type Geometry = SkiaGeometry;
    type Layer = SkiaLayer;
    type StateBlock = SkiaStateBlock;
    type StrokeStyle = SkiaStrokeStyle;
    type Image = SkiaImage;
    type Canvas = Canvas;
    type TextLayout = SkiaTextLayout;
    type Buffer = DoubleBuffer;

    fn begin_draw(&mut self) {
        self.transform = Affine::IDENTITY;
        self.layers.clear();
    }

    fn end_draw(&mut self) -> DrawStatus {
        if !self.layers.is_empty() {
            log::error!("{} layers still pushed at the end of drawing", self.layers.len());
            self.layers.clear();
        }
        if self.surface.is_lost() {
            log::debug!("surface lost, asking for the target to be recreated");
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
    }

    fn save_drawing_state(&mut self) -> Result<SkiaStateBlock, Error> {
        Ok(SkiaStateBlock {
            transform: self.transform,
        })
    }

    fn restore_drawing_state(&mut self, block: &SkiaStateBlock) {
        self.transform = block.transform;
    }

    fn create_geometry(&mut self, path: &easel::Path) -> Result<SkiaGeometry, Error> {
        Ok(SkiaGeometry::from_path(path))
    }

    fn transform_geometry(
        &mut self,
        geometry: &SkiaGeometry,
        transform: Affine,
    ) -> Result<SkiaGeometry, Error> {
        Ok(geometry.transformed(transform))
    }

    fn intersect_geometry(
        &mut self,
        a: &SkiaGeometry,
        b: &SkiaGeometry,
    ) -> Result<SkiaGeometry, Error> {
        Ok(a.intersect(b))
    }

    fn create_layer(&mut self) -> Result<SkiaLayer, Error> {
        Ok(SkiaLayer(()))
    }

    fn push_layer(&mut self, _layer: &SkiaLayer, mask: &SkiaGeometry) {
        let (w, h) = (self.surface.width(), self.surface.height());
        let coverage = match mask.to_mask(w, h, Affine::scale(self.scale)) {
            Some(mut coverage) => {
                if let Some(current) = clip_mask(&self.layers, &self.bounds) {
                    geometry::multiply_masks(&mut coverage, current);
                }
                coverage
            }
            None => {
                log::error!("could not rasterize a clip mask of {w}x{h}");
                match clip_mask(&self.layers, &self.bounds) {
                    Some(current) => current.clone(),
                    // The surface has a nonzero size, so this cannot fail.
                    None => match Mask::new(w, h) {
                        Some(mask) => mask,
                        None => return,
                    },
                }
            }
        };
        self.layers.push(coverage);
    }

    fn pop_layer(&mut self) {
        if self.layers.pop().is_none() {
            log::warn!("pop_layer with no layer pushed");
        }
    }

    fn create_stroke_style(&mut self, style: &StrokeStyle) -> Result<SkiaStrokeStyle, Error> {
        SkiaStrokeStyle::new(style).or_invalid("stroke style")
    }

    fn draw_geometry(
        &mut self,
        geometry: &SkiaGeometry,
        color: Color,
        width: f64,
        style: Option<&SkiaStrokeStyle>,
    ) {
        let stroke = match style {
            Some(style) => style.stroke(width),
            None => conv::plain_stroke(width),
        };
        self.paint_geometry(geometry, &conv::solid_paint(color), Some(&stroke));
    }

    fn fill_geometry(&mut self, geometry: &SkiaGeometry, color: Color) {
        self.paint_geometry(geometry, &conv::solid_paint(color), None);
    }

    fn draw_rectangle(
        &mut self,
        rect: Rect,
        color: Color,
        width: f64,
        style: Option<&SkiaStrokeStyle>,
    ) {
        let Some(rect) = conv::to_rect(rect) else {
            return;
        };
        let path = tiny_skia::PathBuilder::from_rect(rect);
        let stroke = match style {
            Some(style) => style.stroke(width),
            None => conv::plain_stroke(width),
        };
        let ts = conv::to_transform(self.device_transform());
        let mask = clip_mask(&self.layers, &self.bounds);
        self.surface
            .pixmap
            .stroke_path(&path, &conv::solid_paint(color), &stroke, ts, mask);
    }

    fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        let Some(rect) = conv::to_rect(rect) else {
            return;
        };
        let ts = conv::to_transform(self.device_transform());
        let mask = clip_mask(&self.layers, &self.bounds);
        self.surface
            .pixmap
            .fill_rect(rect, &conv::solid_paint(color), ts, mask);
    }

    fn draw_image(&mut self, image: &SkiaImage, src: Rect, dest: Rect) {
        self.draw_pixmap(image.pixmap(), image.scale(), src, dest);
    }

    fn draw_canvas(&mut self, canvas: &Canvas, src: Rect, dest: Rect) {
        self.draw_pixmap(canvas.surface().pixmap(), canvas.scale(), src, dest);
    }

    fn draw_text_layout(
        &mut self,
        layout: &SkiaTextLayout,
        rect: Rect,
        options: &TextDrawOptions,
    ) {
        let canvas = GlyphCanvas {
            cache: self.glyphs.get_or_insert_with(cosmic_text::SwashCache::new),
            pixmap: &mut self.surface.pixmap,
            mask: clip_mask(&self.layers, &self.bounds),
        };
        layout.draw(canvas, self.transform, self.scale, rect, options);
    }

    fn create_buffer(&mut self, size: Size) -> Result<DoubleBuffer, Error> {
        DoubleBuffer::new(size.width.ceil() as u32, size.height.ceil() as u32)
    }

    fn draw_buffer(&mut self, buffer: &DoubleBuffer, dest: Rect) -> Result<(), Error> {
        let image = buffer.to_image(self.scale)?;
        let src = image.size().to_rect();
        self.draw_image(&image, src, dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel::conformance::{self, CHECKS, SURFACE_SIZE};
    use easel::theme::{ControlState, ThemeExtra, ThemePart, ThemeRenderer};
    use easel::{AttributedText, Font, FontFamily, Painter, PathBuilder, TextAttributes, UiDefaults};

    fn surface() -> Surface {
        Surface::new(SURFACE_SIZE.width as u32, SURFACE_SIZE.height as u32).unwrap()
    }

    #[test]
    fn conforms() {
        for name in CHECKS {
            let mut surface = surface();
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut painter = Painter::new(target);
            conformance::run(name, &mut painter);
            assert!(!painter.end_draw(), "{name}");
        }
    }

    #[test]
    fn target_must_fit_surface() {
        let mut surface = surface();
        assert!(SkiaTarget::new(&mut surface, Size::new(101.0, 10.0), 1.0).is_err());
        assert!(SkiaTarget::new(&mut surface, Size::new(0.0, 10.0), 1.0).is_err());
        assert!(SkiaTarget::new(&mut surface, Size::new(10.0, 10.0), 0.0).is_err());
    }

    #[test]
    fn clip_limits_fill() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
            p.set_fill_color(Color::RED);
            p.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
            assert!(!p.end_draw());
        }
        assert_eq!(surface.pixel(25, 25), Some(Color::RED));
        assert_eq!(surface.pixel(75, 75), Some(Color::TRANSPARENT));
    }

    #[test]
    fn nested_clips_intersect_and_restore() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
            p.save();
            p.clip_rect(Rect::new(25.0, 25.0, 75.0, 75.0));
            p.set_fill_color(Color::RED);
            p.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
            p.restore();
            p.set_fill_color(Color::BLACK);
            p.fill_rect(Rect::new(0.0, 0.0, 20.0, 20.0));
        }
        assert_eq!(surface.pixel(30, 30), Some(Color::RED));
        assert_eq!(surface.pixel(60, 60), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(10, 10), Some(Color::BLACK));
        assert_eq!(surface.pixel(10, 40), Some(Color::TRANSPARENT));
    }

    #[test]
    fn clip_follows_transform() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.translate((50.0, 50.0));
            p.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
            p.translate((-50.0, -50.0));
            p.set_fill_color(Color::RED);
            p.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        }
        assert_eq!(surface.pixel(55, 55), Some(Color::RED));
        assert_eq!(surface.pixel(5, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn scale_factor_maps_dips() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 2.0).unwrap();
            let mut p = Painter::new(target);
            p.set_fill_color(Color::RED);
            p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        }
        assert_eq!(surface.pixel(19, 19), Some(Color::RED));
        assert_eq!(surface.pixel(21, 21), Some(Color::TRANSPARENT));
    }

    #[test]
    fn text_is_rasterized_at_device_resolution() {
        let mut surface = Surface::new(200, 60).unwrap();
        let defaults = UiDefaults::default();
        let attrs = TextAttributes::new(Some(Font::new(FontFamily::SERIF, 20.0)), None, &defaults);
        let text =
            AttributedText::new(&mut SkiaText::new(), "Hamburgefonts", Some(&attrs), &defaults)
                .unwrap();
        {
            let target = SkiaTarget::new(&mut surface, Size::new(200.0, 60.0), 2.0).unwrap();
            let mut p = Painter::new(target);
            p.draw_attributed_text(&text, Rect::new(0.0, 0.0, 100.0, 30.0));
            assert!(!p.end_draw());
        }

        let alpha = |x: u32, y: u32| surface.pixmap().pixel(x, y).map_or(0, |c| c.alpha());
        let (mut painted, mut blocky) = (0, 0);
        for y in (0..60).step_by(2) {
            for x in (0..200).step_by(2) {
                let cell = [alpha(x, y), alpha(x + 1, y), alpha(x, y + 1), alpha(x + 1, y + 1)];
                if cell.iter().all(|a| *a == 0) {
                    continue;
                }
                painted += 1;
                if cell.iter().all(|a| *a == cell[0]) {
                    blocky += 1;
                }
            }
        }
        assert!(painted > 0);
        assert!(blocky < painted, "{blocky} of {painted} cells are pixel-doubled");
    }

    #[test]
    fn target_smaller_than_surface_is_bounded() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, Size::new(40.0, 40.0), 1.0).unwrap();
            let mut p = Painter::new(target);
            p.set_fill_color(Color::RED);
            p.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        }
        assert_eq!(surface.pixel(30, 30), Some(Color::RED));
        assert_eq!(surface.pixel(50, 50), Some(Color::TRANSPARENT));
    }

    #[test]
    fn fill_path_and_full_circle() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.set_fill_color(Color::RED);
            p.begin_path();
            p.arc((50.0, 50.0), 20.0, 0.0, 0.0);
            p.fill();
        }
        for (x, y) in [(50, 50), (50, 33), (33, 50), (67, 50), (50, 67)] {
            assert_eq!(surface.pixel(x, y), Some(Color::RED), "({x}, {y})");
        }
        assert_eq!(surface.pixel(5, 5), Some(Color::TRANSPARENT));
    }

    #[test]
    fn stroke_uses_line_width() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.set_color(Color::BLACK);
            p.set_line_width(10.0);
            p.begin_path();
            p.move_to((0.0, 50.0));
            p.line_to((100.0, 50.0));
            p.stroke();
        }
        assert_eq!(surface.pixel(50, 47), Some(Color::BLACK));
        assert_eq!(surface.pixel(50, 40), Some(Color::TRANSPARENT));
    }

    #[test]
    fn lost_surface_asks_for_recreate() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.target_mut().lose_surface();
            assert!(p.end_draw());
        }
        assert!(surface.is_lost());
        surface.resize(50, 50).unwrap();
        assert!(!surface.is_lost());
        let target = SkiaTarget::new(&mut surface, Size::new(50.0, 50.0), 1.0).unwrap();
        assert!(!Painter::new(target).end_draw());
    }

    #[test]
    fn image_is_drawn_into_dest() {
        let image = SkiaImage::from_rgba(2, 2, &[255, 0, 0, 255].repeat(4), 1.0).unwrap();
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.draw_image(&image, Rect::new(10.0, 10.0, 30.0, 30.0));
        }
        assert_eq!(surface.pixel(20, 20), Some(Color::RED));
        assert_eq!(surface.pixel(40, 40), Some(Color::TRANSPARENT));
    }

    #[test]
    fn empty_clip_hides_everything() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
            p.clip_rect(Rect::new(50.0, 50.0, 60.0, 60.0));
            p.set_fill_color(Color::RED);
            p.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
        }
        assert!(surface.data().iter().all(|b| *b == 0));
    }

    struct Blue;

    impl ThemeRenderer<DoubleBuffer> for Blue {
        fn paint(
            &self,
            _part: ThemePart,
            buffer: &mut DoubleBuffer,
            _state: ControlState,
            rect: Rect,
            _extra: &ThemeExtra,
        ) {
            buffer.dc().fill_rect(rect, Color::rgb8(0, 0, 255));
        }
    }

    #[test]
    fn theme_parts_are_limited_to_dirty_rect() {
        let mut surface = surface();
        {
            let target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
            let mut p = Painter::new(target);
            p.draw_native_theme(
                &Blue,
                ThemePart::Button,
                ControlState::Normal,
                Rect::new(10.0, 10.0, 60.0, 40.0),
                Rect::new(30.0, 0.0, 100.0, 100.0),
                &ThemeExtra::None,
            );
        }
        assert_eq!(surface.pixel(40, 20), Some(Color::rgb8(0, 0, 255)));
        assert_eq!(surface.pixel(20, 20), Some(Color::TRANSPARENT));
        assert_eq!(surface.pixel(70, 20), Some(Color::TRANSPARENT));
    }

    #[test]
    fn geometry_is_retained_per_path() {
        let mut surface = surface();
        let mut target = SkiaTarget::new(&mut surface, SURFACE_SIZE, 1.0).unwrap();
        let mut builder = PathBuilder::new();
        builder.rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let geometry = target.create_geometry(builder.finish().unwrap()).unwrap();
        let moved = target
            .transform_geometry(&geometry, Affine::translate((5.0, 0.0)))
            .unwrap();
        assert_eq!(moved.bounding_box(), Some(Rect::new(5.0, 0.0, 15.0, 10.0)));
        assert_eq!(geometry.bounding_box(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }
}

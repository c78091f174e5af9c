//! An offscreen buffer that recovers per-pixel alpha from painters that can
//! only produce opaque output.
//!
//! Everything is painted twice, once over opaque black and once over opaque
//! white. A pixel that changes between the two planes was partly
//! transparent: for each channel, `alpha = 255 - (white - black)`, and the
//! black plane holds the color already multiplied by that alpha.

use easel::kurbo::{Affine, BezPath, Rect, Size};
use easel::{Color, Error};
use tiny_skia::{FillRule, Pixmap, PremultipliedColorU8, Transform};

use crate::conv;
use crate::error::OrInvalid;
use crate::image::SkiaImage;

/// A pair of opaque pixel planes, painted identically.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    on_black: Pixmap,
    on_white: Pixmap,
}

impl DoubleBuffer {
    pub fn new(width: u32, height: u32) -> Result<DoubleBuffer, Error> {
        let mut on_black = Pixmap::new(width, height).or_invalid("buffer size")?;
        let mut on_white = on_black.clone();
        on_black.fill(tiny_skia::Color::BLACK);
        on_white.fill(tiny_skia::Color::WHITE);
        Ok(DoubleBuffer { on_black, on_white })
    }

    pub fn width(&self) -> u32 {
        self.on_black.width()
    }

    pub fn height(&self) -> u32 {
        self.on_black.height()
    }

    /// A drawing context that paints into both planes.
    pub fn dc(&mut self) -> BufferDc<'_> {
        BufferDc {
            planes: [&mut self.on_black, &mut self.on_white],
        }
    }

    /// Combine the planes into premultiplied pixels with real alpha.
    pub fn snapshot(&self) -> Result<Pixmap, Error> {
        let mut out = Pixmap::new(self.width(), self.height()).or_invalid("buffer size")?;
        let pixels = out.pixels_mut();
        let black = self.on_black.pixels();
        let white = self.on_white.pixels();
        for ((dst, b), w) in pixels.iter_mut().zip(black).zip(white) {
            let channels = [
                (b.red(), w.red()),
                (b.green(), w.green()),
                (b.blue(), w.blue()),
            ];
            let sum: u32 = channels
                .iter()
                .map(|(b, w)| 255 - (w.saturating_sub(*b)) as u32)
                .sum();
            let alpha = ((sum + 1) / 3) as u8;
            let r = b.red().min(alpha);
            let g = b.green().min(alpha);
            let bl = b.blue().min(alpha);
            if let Some(px) = PremultipliedColorU8::from_rgba(r, g, bl, alpha) {
                *dst = px;
            }
        }
        Ok(out)
    }

    /// The snapshot as an image for a surface of `scale` pixels per DIP.
    pub fn to_image(&self, scale: f64) -> Result<SkiaImage, Error> {
        SkiaImage::from_pixmap(self.snapshot()?, scale)
    }
}

/// Paints into both planes of a [`DoubleBuffer`]. Coordinates are buffer
/// pixels.
pub struct BufferDc<'a> {
    planes: [&'a mut Pixmap; 2],
}

impl BufferDc<'_> {
    pub fn size(&self) -> Size {
        Size::new(self.planes[0].width() as f64, self.planes[0].height() as f64)
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(rect) = conv::to_rect(rect) else {
            return;
        };
        let paint = conv::solid_paint(color);
        for plane in self.planes.iter_mut() {
            plane.fill_rect(rect, &paint, Transform::identity(), None);
        }
    }

    pub fn fill_path(&mut self, path: &BezPath, color: Color) {
        let Some(path) = conv::to_path(path) else {
            return;
        };
        let paint = conv::solid_paint(color);
        for plane in self.planes.iter_mut() {
            plane.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    pub fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let Some(path) = conv::to_path(path) else {
            return;
        };
        let paint = conv::solid_paint(color);
        let stroke = conv::plain_stroke(width);
        for plane in self.planes.iter_mut() {
            plane.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    /// Draw `image` scaled into `dest`.
    pub fn draw_image(&mut self, image: &SkiaImage, dest: Rect) {
        let pixmap = image.pixmap();
        let sx = dest.width() / pixmap.width() as f64;
        let sy = dest.height() / pixmap.height() as f64;
        let transform =
            Affine::translate(dest.origin().to_vec2()) * Affine::scale_non_uniform(sx, sy);
        let ts = conv::to_transform(transform);
        for plane in self.planes.iter_mut() {
            plane.draw_pixmap(0, 0, pixmap.as_ref(), &tiny_skia::PixmapPaint::default(), ts, None);
        }
    }
}

//! Bitmaps and offscreen canvases.

use easel::kurbo::Size;
use easel::{Error, ErrorKind, Image, Painter};
use tiny_skia::{ColorU8, IntSize, Pixmap};

use crate::error::{OrInvalid, WrapError};
use crate::{SkiaTarget, Surface};

/// An immutable bitmap, with the device scale it was rendered or decoded at.
#[derive(Debug, Clone)]
pub struct SkiaImage {
    pixmap: Pixmap,
    scale: f64,
}

impl SkiaImage {
    /// Wrap premultiplied pixels rendered at `scale` device pixels per DIP.
    pub fn from_pixmap(pixmap: Pixmap, scale: f64) -> Result<SkiaImage, Error> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ErrorKind::InvalidInput.into());
        }
        Ok(SkiaImage { pixmap, scale })
    }

    /// Create an image from unpremultiplied RGBA bytes, four per pixel.
    pub fn from_rgba(width: u32, height: u32, data: &[u8], scale: f64) -> Result<SkiaImage, Error> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            log::debug!("expected {expected} bytes of RGBA, got {}", data.len());
            return Err(ErrorKind::InvalidInput.into());
        }
        let size = IntSize::from_wh(width, height).or_invalid("image size")?;
        let mut premultiplied = Vec::with_capacity(expected);
        for px in data.chunks_exact(4) {
            let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            premultiplied.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        let pixmap = Pixmap::from_vec(premultiplied, size).or_invalid("image data")?;
        SkiaImage::from_pixmap(pixmap, scale)
    }

    /// Decode a PNG file's contents.
    pub fn decode_png(bytes: &[u8], scale: f64) -> Result<SkiaImage, Error> {
        let pixmap = Pixmap::decode_png(bytes).wrap()?;
        SkiaImage::from_pixmap(pixmap, scale)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Image for SkiaImage {
    fn size(&self) -> Size {
        Size::new(
            self.pixmap.width() as f64 / self.scale,
            self.pixmap.height() as f64 / self.scale,
        )
    }
}

/// An offscreen surface that is painted like a window and drawn like an
/// image.
#[derive(Debug)]
pub struct Canvas {
    surface: Surface,
    scale: f64,
}

impl Canvas {
    /// A transparent canvas of `size` DIPs at `scale` device pixels per DIP.
    pub fn new(size: Size, scale: f64) -> Result<Canvas, Error> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ErrorKind::InvalidInput.into());
        }
        let pixels = (size * scale).ceil();
        let surface = Surface::new(pixels.width as u32, pixels.height as u32)?;
        Ok(Canvas { surface, scale })
    }

    /// Start a draw session on the canvas.
    pub fn painter(&mut self) -> Result<Painter<SkiaTarget<'_>>, Error> {
        let size = Size::new(self.surface.width() as f64, self.surface.height() as f64);
        let target = SkiaTarget::new(&mut self.surface, size, self.scale)?;
        Ok(Painter::new(target))
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Copy the current contents out as an image.
    pub fn to_image(&self) -> Result<SkiaImage, Error> {
        SkiaImage::from_pixmap(self.surface.pixmap().clone(), self.scale)
    }
}

impl Image for Canvas {
    fn size(&self) -> Size {
        Size::new(
            self.surface.width() as f64 / self.scale,
            self.surface.height() as f64 / self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel::Color;

    #[test]
    fn rgba_is_premultiplied() {
        let image = SkiaImage::from_rgba(1, 1, &[200, 100, 0, 128], 1.0).unwrap();
        let px = image.pixmap().pixel(0, 0).unwrap();
        assert_eq!(px.alpha(), 128);
        assert_eq!(px.red(), 100);
        assert_eq!(px.green(), 50);
    }

    #[test]
    fn rgba_length_is_checked() {
        let err = SkiaImage::from_rgba(2, 2, &[0; 15], 1.0).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidInput));
    }

    #[test]
    fn image_size_is_in_dips() {
        let image = SkiaImage::from_rgba(4, 2, &[255; 32], 2.0).unwrap();
        assert_eq!(image.size(), Size::new(2.0, 1.0));
    }

    #[test]
    fn png_roundtrip_keeps_pixels() {
        let mut surface = Surface::new(3, 2).unwrap();
        surface.clear(Color::RED);
        let bytes = surface.encode_png().unwrap();
        let image = SkiaImage::decode_png(&bytes, 1.0).unwrap();
        assert_eq!(image.size(), Size::new(3.0, 2.0));
        assert!(SkiaImage::decode_png(b"not a png", 1.0).is_err());
    }

    #[test]
    fn canvas_paints_offscreen() {
        let mut canvas = Canvas::new(Size::new(10.0, 10.0), 2.0).unwrap();
        assert_eq!(canvas.surface().width(), 20);
        {
            let mut p = canvas.painter().unwrap();
            p.set_fill_color(Color::RED);
            p.fill_rect(easel::kurbo::Rect::new(0.0, 0.0, 5.0, 5.0));
            assert!(!p.end_draw());
        }
        assert_eq!(canvas.surface().pixel(4, 4), Some(Color::RED));
        assert_eq!(canvas.surface().pixel(15, 15), Some(Color::TRANSPARENT));
        assert_eq!(canvas.size(), Size::new(10.0, 10.0));
    }
}

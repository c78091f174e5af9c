//! Support for the tiny-skia back-end.

#[cfg(feature = "png")]
use png::{ColorType, Encoder};
#[cfg(feature = "png")]
use std::fs::File;
#[cfg(feature = "png")]
use std::io::BufWriter;
use std::marker::PhantomData;
use std::path::Path;

use easel::kurbo::Size;
use easel::{Color, Error, ErrorKind, Painter, UiDefaults};
#[doc(hidden)]
pub use easel_skia::*;

/// The render target of the selected backend.
pub type Target<'a> = SkiaTarget<'a>;

/// The text factory of the selected backend.
pub type EaselText = SkiaText;

/// The text layout type of the selected backend.
///
/// This type matches `RenderTarget::TextLayout`.
pub type EaselTextLayout = SkiaTextLayout;

/// This type matches `RenderTarget::Image`.
pub type EaselImage = SkiaImage;

/// This type matches `RenderTarget::Canvas`.
pub type EaselCanvas = Canvas;

/// The buffer theme parts are painted into.
///
/// This type matches `RenderTarget::Buffer`.
pub type EaselBuffer = DoubleBuffer;

/// A struct that can be used to create bitmap targets and the text factory
/// that goes with them.
///
/// tiny-skia is a software renderer, so the only state kept is the font
/// database, which is loaded the first time text is asked for.
pub struct Device {
    text: Option<SkiaText>,
    // Since not all backends can support `Device: Sync`, make it non-Sync here too, for fewer
    // portability surprises.
    marker: PhantomData<*const ()>,
}

impl Device {
    /// Create a new device.
    pub fn new() -> Result<Device, Error> {
        Ok(Device {
            text: None,
            marker: PhantomData,
        })
    }

    /// Create a new bitmap target of `width` x `height` pixels, at
    /// `pix_scale` pixels per DIP.
    pub fn bitmap_target(
        &mut self,
        width: usize,
        height: usize,
        pix_scale: f64,
    ) -> Result<BitmapTarget, Error> {
        let surface = Surface::new(width as u32, height as u32)?;
        if !(pix_scale.is_finite() && pix_scale > 0.0) {
            return Err(ErrorKind::InvalidInput.into());
        }
        Ok(BitmapTarget {
            surface,
            scale: pix_scale,
            defaults: UiDefaults::default(),
        })
    }

    /// The text factory for layouts drawn on this device's targets.
    pub fn text(&mut self) -> &mut EaselText {
        self.text.get_or_insert_with(SkiaText::new)
    }
}

/// A bitmap that provides painters and then can have its pixels extracted.
pub struct BitmapTarget {
    surface: Surface,
    scale: f64,
    defaults: UiDefaults,
}

impl BitmapTarget {
    /// Set the defaults painters on this bitmap use for focus rings.
    pub fn set_defaults(&mut self, defaults: UiDefaults) {
        self.defaults = defaults;
    }

    /// Start a draw session on the bitmap.
    ///
    /// The session ends when the painter is dropped, or explicitly with
    /// [`Painter::end_draw`].
    pub fn painter(&mut self) -> Result<Painter<Target<'_>>, Error> {
        let size = Size::new(self.surface.width() as f64, self.surface.height() as f64);
        let target = SkiaTarget::new(&mut self.surface, size, self.scale)?;
        Ok(Painter::with_defaults(target, self.defaults.clone()))
    }

    /// The size of the bitmap in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.surface.width() as usize, self.surface.height() as usize)
    }

    /// The color of a pixel, or `None` out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.surface.pixel(x as u32, y as u32)
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Get unpremultiplied RGBA pixels from the bitmap by copying them into
    /// `buf`. If all the pixels were copied, returns the number of bytes
    /// written. If `buf` wasn't big enough, returns an error and doesn't
    /// write anything.
    pub fn copy_raw_pixels(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let pixels = self.surface.pixmap().pixels();
        let len = pixels.len() * 4;
        if buf.len() < len {
            return Err(ErrorKind::InvalidInput.into());
        }
        for (dst, px) in buf.chunks_exact_mut(4).zip(pixels) {
            let c = px.demultiply();
            dst.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(len)
    }

    /// Get unpremultiplied RGBA pixels from the bitmap.
    pub fn to_raw_pixels(&self) -> Vec<u8> {
        let (width, height) = self.size();
        let mut buf = vec![0; width * height * 4];
        // The buffer is exactly the required size.
        let _ = self.copy_raw_pixels(&mut buf);
        buf
    }

    /// Save bitmap to RGBA PNG file
    #[cfg(feature = "png")]
    pub fn save_to_file<P: AsRef<Path>>(self, path: P) -> Result<(), Error> {
        let (width, height) = self.size();
        let data = self.to_raw_pixels();
        let file = BufWriter::new(File::create(path).map_err(Error::backend)?);
        let mut encoder = Encoder::new(file, width as u32, height as u32);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(Error::backend)?
            .write_image_data(&data)
            .map_err(Error::backend)?;
        log::debug!("saved {width}x{height} bitmap");
        Ok(())
    }

    /// Stub for feature is missing
    #[cfg(not(feature = "png"))]
    pub fn save_to_file<P: AsRef<Path>>(self, _path: P) -> Result<(), Error> {
        Err(ErrorKind::MissingFeature("png").into())
    }
}

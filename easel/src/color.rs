//! A simple representation of color

/// An sRGB color with straight (non-premultiplied) alpha, packed as
/// `0xRRGGBBAA`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u32);

impl Color {
    /// Create a color from a 32-bit rgba value (alpha as least significant byte).
    pub const fn rgba32(rgba: u32) -> Color {
        Color(rgba)
    }

    /// Create a color from a 24-bit rgb value (red most significant, blue least).
    pub const fn rgb24(rgb: u32) -> Color {
        Color::rgba32((rgb << 8) | 0xff)
    }

    /// Create a color from four 8-bit channel values.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::rgba32(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Create an opaque color from three 8-bit channel values.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color::rgba8(r, g, b, 0xff)
    }

    /// Create a color from four floating point values, each in the range 0.0 to 1.0.
    pub fn rgba<F: Into<f64>>(r: F, g: F, b: F, a: F) -> Color {
        Color::rgba8(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    /// Create an opaque color from three floating point values, each in the range 0.0 to 1.0.
    pub fn rgb<F: Into<f64>>(r: F, g: F, b: F) -> Color {
        Color::rgba8(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), 0xff)
    }

    /// Change just the alpha value of a color.
    ///
    /// The `a` value represents alpha in the range 0.0 to 1.0.
    pub fn with_alpha(self, a: impl Into<f64>) -> Color {
        Color::rgba32((self.0 & !0xff) | unit_to_u8(a) as u32)
    }

    /// Convert a color value to a 32-bit rgba value.
    pub const fn as_rgba32(self) -> u32 {
        self.0
    }

    /// Convert a color value to four 8-bit rgba values.
    pub const fn as_rgba8(self) -> (u8, u8, u8, u8) {
        (
            (self.0 >> 24) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
        )
    }

    /// Returns `true` if the color has no coverage at all.
    pub const fn is_transparent(self) -> bool {
        self.0 & 0xff == 0
    }

    /// Opaque white.
    pub const WHITE: Color = Color::rgba32(0xff_ff_ff_ff);

    /// Opaque black.
    pub const BLACK: Color = Color::rgba32(0x00_00_00_ff);

    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba32(0);

    /// Opaque red.
    pub const RED: Color = Color::rgb24(0xff_00_00);

    /// Opaque gray, as used for disabled text.
    pub const GRAY: Color = Color::rgb24(0x80_80_80);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

fn unit_to_u8(v: impl Into<f64>) -> u8 {
    (v.into().clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels() {
        let c = Color::rgba8(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.as_rgba32(), 0x12345678);
        assert_eq!(c.as_rgba8(), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(Color::rgb(1.0, 0.0, 0.0), Color::RED);
    }

    #[test]
    fn alpha_replacement_keeps_rgb() {
        let c = Color::rgb8(10, 20, 30).with_alpha(0.0);
        assert!(c.is_transparent());
        assert_eq!(c.as_rgba8(), (10, 20, 30, 0));
        assert_eq!(format!("{c:?}"), "#0a141e00");
    }
}

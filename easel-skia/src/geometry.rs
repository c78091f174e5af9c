//! Retained geometry and clip masks.
//!
//! tiny-skia has no boolean path operations, so an intersection is kept as
//! the list of regions being intersected and only resolved when it is
//! rasterized into a mask.

use easel::kurbo::{Affine, Rect};
use easel::Path;
use tiny_skia::{FillRule, Mask};

use crate::conv;

#[derive(Debug, Clone)]
struct Part {
    /// `None` for a path with nothing in it, which covers no area.
    path: Option<tiny_skia::Path>,
    transform: Affine,
}

/// Geometry on the tiny-skia backend: the intersection of one or more
/// transformed paths.
#[derive(Debug, Clone)]
pub struct SkiaGeometry {
    parts: Vec<Part>,
}

impl SkiaGeometry {
    pub(crate) fn from_path(path: &Path) -> SkiaGeometry {
        SkiaGeometry {
            parts: vec![Part {
                path: conv::to_path(&path.to_bez_path()),
                transform: Affine::IDENTITY,
            }],
        }
    }

    pub(crate) fn transformed(&self, transform: Affine) -> SkiaGeometry {
        let parts = self
            .parts
            .iter()
            .map(|part| Part {
                path: part.path.clone(),
                transform: transform * part.transform,
            })
            .collect();
        SkiaGeometry { parts }
    }

    pub(crate) fn intersect(&self, other: &SkiaGeometry) -> SkiaGeometry {
        let parts = self.parts.iter().chain(&other.parts).cloned().collect();
        SkiaGeometry { parts }
    }

    /// The number of regions intersected to form this geometry.
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// A conservative bound of the region; `None` when it is empty.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut bounds: Option<Rect> = None;
        for part in &self.parts {
            let b = part.path.as_ref()?.bounds();
            let rect = Rect::new(
                b.left() as f64,
                b.top() as f64,
                b.right() as f64,
                b.bottom() as f64,
            );
            let rect = part.transform.transform_rect_bbox(rect);
            bounds = Some(match bounds {
                Some(acc) => acc.intersect(rect),
                None => rect,
            });
        }
        bounds.filter(|r| r.width() > 0.0 && r.height() > 0.0)
    }

    /// The first region and its transform, which is what gets painted when
    /// this geometry is stroked or filled.
    pub(crate) fn primary(&self) -> Option<(&tiny_skia::Path, Affine)> {
        let part = self.parts.first()?;
        Some((part.path.as_ref()?, part.transform))
    }

    /// The regions after the first, which restrict painting of the first.
    pub(crate) fn rest(&self) -> Option<SkiaGeometry> {
        (self.parts.len() > 1).then(|| SkiaGeometry {
            parts: self.parts[1..].to_vec(),
        })
    }

    /// Rasterize the region into a `width` x `height` coverage mask, mapping
    /// it through `base` first.
    pub(crate) fn to_mask(&self, width: u32, height: u32, base: Affine) -> Option<Mask> {
        let mut mask = Mask::new(width, height)?;
        for (i, part) in self.parts.iter().enumerate() {
            let Some(path) = &part.path else {
                return Mask::new(width, height);
            };
            let transform = conv::to_transform(base * part.transform);
            if i == 0 {
                mask.fill_path(path, FillRule::Winding, true, transform);
            } else {
                let mut next = Mask::new(width, height)?;
                next.fill_path(path, FillRule::Winding, true, transform);
                multiply_masks(&mut mask, &next);
            }
        }
        Some(mask)
    }
}

/// Intersect `dst` with `src`, coverage-wise.
pub(crate) fn multiply_masks(dst: &mut Mask, src: &Mask) {
    for (d, s) in dst.data_mut().iter_mut().zip(src.data()) {
        *d = ((*d as u16 * *s as u16 + 127) / 255) as u8;
    }
}

//! Conversions between kurbo/easel types and tiny-skia types.

use easel::kurbo::{Affine, BezPath, PathEl, Rect};
use easel::{Color, LineCap, LineJoin, StrokeStyle};
use tiny_skia::{Paint, PathBuilder, Stroke, StrokeDash, Transform};

pub(crate) fn to_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

pub(crate) fn to_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    let rect = rect.abs();
    tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
}

pub(crate) fn to_skia_color(color: Color) -> tiny_skia::Color {
    let (r, g, b, a) = color.as_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

pub(crate) fn solid_paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(color));
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo path. `None` when the path has nothing to draw.
pub(crate) fn to_path(bez: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in bez.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// The native form of a stroke style. A dash pattern tiny-skia rejects
/// (odd length, negative or all-zero intervals) is an error.
///
/// Dash lengths are in line widths, as with the native APIs, so the
/// tiny-skia dash is built per stroke width.
#[derive(Debug, Clone)]
pub struct SkiaStrokeStyle {
    stroke: Stroke,
    dash: Option<(Vec<f32>, f32)>,
}

impl SkiaStrokeStyle {
    pub(crate) fn new(style: &StrokeStyle) -> Option<SkiaStrokeStyle> {
        let mut stroke = Stroke::default();
        if let Some(join) = style.line_join {
            stroke.line_join = match join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            };
        }
        if let Some(cap) = style.line_cap {
            stroke.line_cap = match cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            };
        }
        if let Some(limit) = style.miter_limit {
            stroke.miter_limit = limit as f32;
        }
        let dash = match &style.dash {
            Some(dash) => {
                let pattern: Vec<f32> = dash.pattern.iter().map(|v| *v as f32).collect();
                let offset = dash.offset as f32;
                // Validate once; the scaled copies share the same shape.
                StrokeDash::new(pattern.clone(), offset)?;
                Some((pattern, offset))
            }
            None => None,
        };
        Some(SkiaStrokeStyle { stroke, dash })
    }

    /// The tiny-skia stroke for a line of `width`.
    pub(crate) fn stroke(&self, width: f64) -> Stroke {
        let mut stroke = self.stroke.clone();
        stroke.width = width as f32;
        if let Some((pattern, offset)) = &self.dash {
            let scale = (width as f32).max(f32::EPSILON);
            let pattern = pattern.iter().map(|v| v * scale).collect();
            stroke.dash = StrokeDash::new(pattern, offset * scale);
        }
        stroke
    }
}

pub(crate) fn plain_stroke(width: f64) -> Stroke {
    Stroke {
        width: width as f32,
        ..Stroke::default()
    }
}

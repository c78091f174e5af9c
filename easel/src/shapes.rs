//! Options for stroking paths.

/// Options for drawing stroked lines.
///
/// Backends turn this into their native stroke-style object through
/// [`RenderTarget::create_stroke_style`](crate::RenderTarget::create_stroke_style).
#[derive(Clone, PartialEq, Debug, Default)]
pub struct StrokeStyle {
    pub line_join: Option<LineJoin>,
    pub line_cap: Option<LineCap>,
    pub dash: Option<Dash>,
    pub miter_limit: Option<f64>,
}

/// A dash pattern: alternating on and off lengths, in line widths, and the
/// distance into the pattern at which the stroke starts.
#[derive(Clone, PartialEq, Debug)]
pub struct Dash {
    pub pattern: Vec<f64>,
    pub offset: f64,
}

/// Options for angled joins in strokes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

/// Options for the cap of stroked lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl StrokeStyle {
    pub fn new() -> StrokeStyle {
        StrokeStyle::default()
    }

    /// The style of a focus ring: two on, two off.
    pub fn dotted() -> StrokeStyle {
        StrokeStyle::new().with_dash(vec![2.0, 2.0], 0.0)
    }

    pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = Some(line_join);
        self
    }

    pub fn with_line_cap(mut self, line_cap: LineCap) -> Self {
        self.line_cap = Some(line_cap);
        self
    }

    pub fn with_dash(mut self, pattern: Vec<f64>, offset: f64) -> Self {
        self.dash = Some(Dash { pattern, offset });
        self
    }

    pub fn with_miter_limit(mut self, miter_limit: f64) -> Self {
        self.miter_limit = Some(miter_limit);
        self
    }
}

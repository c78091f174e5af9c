//! Paths under construction and the figures they are made of.

use crate::geometry::{self, ArcSegment, ArcSize, SweepDirection};
use crate::kurbo::{self, BezPath, Point, Rect};

/// Flattening tolerance used when arcs are converted to Bézier curves.
const ARC_TOLERANCE: f64 = 0.1;

/// A single segment of a figure. The start of each segment is the end of
/// the previous one, or the figure's start point.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Line(Point),
    Cubic(Point, Point, Point),
    Arc(ArcSegment),
}

impl Segment {
    pub fn end_point(&self) -> Point {
        match self {
            Segment::Line(p) => *p,
            Segment::Cubic(_, _, p) => *p,
            Segment::Arc(arc) => arc.end,
        }
    }
}

/// How a figure was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureEnd {
    /// Ended by a `move_to`; strokes do not return to the start.
    Open,
    /// Ended by `close`; an implicit segment returns to the start.
    Closed,
}

/// One connected subpath.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    start: Point,
    segments: Vec<Segment>,
    end: FigureEnd,
}

impl Figure {
    fn new(start: Point) -> Figure {
        Figure {
            start,
            segments: Vec::new(),
            end: FigureEnd::Open,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn end(&self) -> FigureEnd {
        self.end
    }

    pub fn is_closed(&self) -> bool {
        self.end == FigureEnd::Closed
    }

    /// The point the figure's last segment ends at.
    pub fn current_point(&self) -> Point {
        self.segments
            .last()
            .map(Segment::end_point)
            .unwrap_or(self.start)
    }
}

/// An ordered list of figures, ready to be turned into backend geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    figures: Vec<Figure>,
}

impl Path {
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Convert to a kurbo path, flattening arcs into cubic Béziers.
    ///
    /// Arcs go through their endpoint description, so the size and sweep
    /// flags decide which of the two candidate arcs is produced.
    pub fn to_bez_path(&self) -> BezPath {
        let mut bez = BezPath::new();
        for figure in &self.figures {
            bez.move_to(figure.start);
            let mut current = figure.start;
            for segment in &figure.segments {
                match segment {
                    Segment::Line(p) => bez.line_to(*p),
                    Segment::Cubic(c1, c2, p) => bez.curve_to(*c1, *c2, *p),
                    Segment::Arc(arc) => append_arc(&mut bez, current, arc),
                }
                current = segment.end_point();
            }
            if figure.is_closed() {
                bez.close_path();
            }
        }
        bez
    }
}

fn append_arc(bez: &mut BezPath, from: Point, arc: &ArcSegment) {
    let svg = kurbo::SvgArc {
        from,
        to: arc.end,
        radii: (arc.radius, arc.radius).into(),
        x_rotation: 0.0,
        large_arc: arc.size == ArcSize::Large,
        sweep: arc.sweep == SweepDirection::Clockwise,
    };
    match kurbo::Arc::from_svg_arc(&svg) {
        Some(arc) => bez.extend(arc.append_iter(ARC_TOLERANCE)),
        None => bez.line_to(arc.end),
    }
}

/// Immediate-mode path construction.
///
/// The builder keeps a current point at all times, so drawing calls that
/// need one (`line_to`, `bezier_to`) start a figure there instead of
/// failing. Once [`close`](Self::close) runs the path is finished; the next
/// construction call starts a new one.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    path: Option<Path>,
    figure: Option<Figure>,
    open: bool,
    start_point: Point,
    last_point: Point,
}

impl PathBuilder {
    pub fn new() -> PathBuilder {
        PathBuilder::default()
    }

    /// Discard any path and start a new, empty one.
    pub fn begin(&mut self) {
        self.path = Some(Path::default());
        self.figure = None;
        self.open = true;
        self.start_point = Point::ZERO;
        self.last_point = Point::ZERO;
    }

    /// End the current figure as open and start a new one at `p`.
    pub fn move_to(&mut self, p: Point) {
        self.ensure_open();
        self.end_figure(FigureEnd::Open);
        self.figure = Some(Figure::new(p));
        self.start_point = p;
        self.last_point = p;
    }

    pub fn line_to(&mut self, p: Point) {
        self.push_segment(Segment::Line(p));
    }

    pub fn bezier_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.push_segment(Segment::Cubic(c1, c2, end));
    }

    /// Append an arc sweeping from `start_angle` to `end_angle`.
    ///
    /// An open figure whose current point differs from the arc's start is
    /// connected to it with a straight line.
    pub fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let plan = geometry::plan_arc(center, radius, start_angle, end_angle);
        self.ensure_open();
        match self.figure.as_mut() {
            Some(figure) => {
                if figure.current_point() != plan.start {
                    figure.segments.push(Segment::Line(plan.start));
                }
            }
            None => {
                self.figure = Some(Figure::new(plan.start));
                self.start_point = plan.start;
            }
        }
        if let Some(figure) = self.figure.as_mut() {
            figure
                .segments
                .extend(plan.segments.into_iter().map(Segment::Arc));
        }
        self.last_point = plan.end;
    }

    /// Append a rectangle as its own figure. The figure is left open.
    pub fn rect(&mut self, rect: Rect) {
        let origin = rect.origin();
        self.move_to(origin);
        self.line_to(Point::new(rect.x1, rect.y0));
        self.line_to(Point::new(rect.x1, rect.y1));
        self.line_to(Point::new(rect.x0, rect.y1));
        self.line_to(origin);
    }

    /// Close the current figure and finish the path.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        if self.figure.is_some() {
            self.end_figure(FigureEnd::Closed);
            self.last_point = self.start_point;
        }
        self.open = false;
    }

    /// Close and return the finished path, if there is one.
    pub fn finish(&mut self) -> Option<&Path> {
        self.close();
        self.path.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    pub fn last_point(&self) -> Point {
        self.last_point
    }

    fn ensure_open(&mut self) {
        if !self.open {
            self.begin();
        }
    }

    fn push_segment(&mut self, segment: Segment) {
        if !self.open || self.figure.is_none() {
            self.move_to(self.last_point);
        }
        self.last_point = segment.end_point();
        if let Some(figure) = self.figure.as_mut() {
            figure.segments.push(segment);
        }
    }

    fn end_figure(&mut self, end: FigureEnd) {
        if let Some(mut figure) = self.figure.take() {
            figure.end = end;
            self.path.get_or_insert_with(Path::default).figures.push(figure);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kurbo::{PathEl, Shape};
    use std::f64::consts::{PI, TAU};

    #[test]
    fn line_to_without_move_starts_at_last_point() {
        let mut builder = PathBuilder::new();
        builder.line_to(Point::new(10.0, 0.0));
        builder.line_to(Point::new(10.0, 10.0));
        let path = builder.finish().unwrap();
        assert_eq!(path.figures().len(), 1);
        assert_eq!(path.figures()[0].start(), Point::ZERO);
        assert_eq!(path.figures()[0].segments().len(), 2);
    }

    #[test]
    fn move_to_ends_figure_open() {
        let mut builder = PathBuilder::new();
        builder.begin();
        builder.move_to(Point::new(1.0, 1.0));
        builder.line_to(Point::new(2.0, 2.0));
        builder.move_to(Point::new(5.0, 5.0));
        assert_eq!(builder.last_point(), Point::new(5.0, 5.0));
        builder.line_to(Point::new(6.0, 5.0));
        let path = builder.finish().unwrap();
        assert_eq!(path.figures()[0].end(), FigureEnd::Open);
        assert_eq!(path.figures()[1].end(), FigureEnd::Closed);
    }

    #[test]
    fn close_is_idempotent_and_next_call_restarts() {
        let mut builder = PathBuilder::new();
        builder.move_to(Point::new(3.0, 4.0));
        builder.line_to(Point::new(8.0, 4.0));
        builder.close();
        builder.close();
        assert_eq!(builder.last_point(), Point::new(3.0, 4.0));
        assert_eq!(builder.path().unwrap().figures().len(), 1);

        builder.line_to(Point::new(9.0, 9.0));
        let path = builder.finish().unwrap();
        assert_eq!(path.figures().len(), 1);
        assert_eq!(path.figures()[0].start(), Point::new(3.0, 4.0));
    }

    #[test]
    fn rect_is_five_points_from_origin() {
        let mut builder = PathBuilder::new();
        builder.rect(Rect::new(1.0, 2.0, 11.0, 22.0));
        assert_eq!(builder.last_point(), Point::new(1.0, 2.0));
        let figure = &builder.finish().unwrap().figures()[0];
        assert_eq!(figure.start(), Point::new(1.0, 2.0));
        assert_eq!(figure.segments().len(), 4);
        assert_eq!(figure.segments()[1], Segment::Line(Point::new(11.0, 22.0)));
    }

    #[test]
    fn arc_connects_to_current_point() {
        let mut builder = PathBuilder::new();
        builder.move_to(Point::ZERO);
        builder.arc(Point::new(20.0, 0.0), 10.0, PI, TAU);
        let figure = &builder.finish().unwrap().figures()[0];
        assert_eq!(figure.segments()[0], Segment::Line(Point::new(10.0, 0.0)));
        assert!(matches!(figure.segments()[1], Segment::Arc(_)));
    }

    #[test]
    fn arc_from_its_own_start_adds_no_line() {
        let mut builder = PathBuilder::new();
        builder.move_to(Point::new(10.0, 0.0));
        builder.arc(Point::ZERO, 10.0, 0.0, PI / 2.0);
        let figure = &builder.finish().unwrap().figures()[0];
        assert_eq!(figure.segments().len(), 1);
    }

    #[test]
    fn arc_updates_last_point_to_its_end() {
        let mut builder = PathBuilder::new();
        builder.arc(Point::ZERO, 10.0, 0.0, PI);
        let last = builder.last_point();
        assert!((last.x + 10.0).abs() < 1e-9 && last.y.abs() < 1e-9);
    }

    #[test]
    fn full_circle_flattens_to_circle() {
        for end in [TAU, 0.0] {
            let mut builder = PathBuilder::new();
            builder.arc(Point::new(50.0, 50.0), 20.0, 0.0, end);
            let bez = builder.finish().unwrap().to_bez_path();
            let bbox = bez.bounding_box();
            assert!((bbox.width() - 40.0).abs() < 0.5, "{bbox:?}");
            assert!((bbox.height() - 40.0).abs() < 0.5, "{bbox:?}");
            assert!((bez.area().abs() - PI * 400.0).abs() < 5.0);
        }
    }

    #[test]
    fn large_arc_covers_three_quarters() {
        let mut builder = PathBuilder::new();
        builder.arc(Point::ZERO, 10.0, 0.0, 1.5 * PI);
        let bez = builder.finish().unwrap().to_bez_path();
        let bbox = bez.bounding_box();
        // Passes through the bottom, left and top of the circle.
        assert!((bbox.width() - 20.0).abs() < 0.1, "{bbox:?}");
        assert!((bbox.height() - 20.0).abs() < 0.1, "{bbox:?}");
    }

    #[test]
    fn degenerate_closed_figure_converts() {
        let mut builder = PathBuilder::new();
        builder.move_to(Point::new(1.0, 1.0));
        builder.line_to(Point::new(5.0, 5.0));
        let bez = builder.finish().unwrap().to_bez_path();
        assert_eq!(bez.elements().last(), Some(&PathEl::ClosePath));
        assert_eq!(bez.area(), 0.0);
    }
}

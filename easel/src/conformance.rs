//! Checks of the painter contract, shared by every backend.
//!
//! Each backend's tests open a fresh painter on a [`SURFACE_SIZE`] target
//! for every name in [`CHECKS`], hand it to [`run`], and then end the
//! session, expecting no recreate request. The checks only observe the
//! painter, so they hold for any [`RenderTarget`]; pixel-level behavior is
//! tested by each backend separately.

use std::f64::consts::PI;

use crate::kurbo::{Affine, Point, Rect, Size};
use crate::path::{FigureEnd, Segment};
use crate::{ArcSize, Color, Painter, RenderTarget};

/// The size, in DIPs, of the surface each check expects.
pub const SURFACE_SIZE: Size = Size::new(100.0, 100.0);

/// The names of all checks, in the order they should be run.
pub const CHECKS: &[&str] = &[
    "save_restore_depth",
    "restore_on_root_is_ignored",
    "restore_reverts_state",
    "transforms_compose",
    "line_to_starts_at_last_point",
    "close_returns_to_figure_start",
    "full_circle_arcs",
    "arc_size_flags",
    "degenerate_fill",
    "paint_without_path",
    "nested_clip_restores_parent",
    "unbalanced_saves",
    "paint_everything",
];

/// Run the check called `name` against `painter`.
///
/// Panics, like an assertion, when the painter does not behave.
pub fn run<T: RenderTarget>(name: &str, painter: &mut Painter<T>) {
    match name {
        "save_restore_depth" => save_restore_depth(painter),
        "restore_on_root_is_ignored" => restore_on_root_is_ignored(painter),
        "restore_reverts_state" => restore_reverts_state(painter),
        "transforms_compose" => transforms_compose(painter),
        "line_to_starts_at_last_point" => line_to_starts_at_last_point(painter),
        "close_returns_to_figure_start" => close_returns_to_figure_start(painter),
        "full_circle_arcs" => full_circle_arcs(painter),
        "arc_size_flags" => arc_size_flags(painter),
        "degenerate_fill" => degenerate_fill(painter),
        "paint_without_path" => paint_without_path(painter),
        "nested_clip_restores_parent" => nested_clip_restores_parent(painter),
        "unbalanced_saves" => unbalanced_saves(painter),
        "paint_everything" => paint_everything(painter),
        _ => panic!("No check named {name:?} exists"),
    }
}

fn save_restore_depth<T: RenderTarget>(p: &mut Painter<T>) {
    for n in 0..5 {
        for m in 0..=n {
            for _ in 0..n {
                p.save();
            }
            for _ in 0..m {
                p.restore();
            }
            assert_eq!(p.depth(), 1 + n - m, "{n} saves, {m} restores");
            while p.depth() > 1 {
                p.restore();
            }
        }
    }
}

fn restore_on_root_is_ignored<T: RenderTarget>(p: &mut Painter<T>) {
    p.set_line_width(3.0);
    p.restore();
    p.restore();
    assert_eq!(p.depth(), 1);
    assert_eq!(p.line_width(), 3.0);
}

fn restore_reverts_state<T: RenderTarget>(p: &mut Painter<T>) {
    p.set_line_width(2.0);
    p.set_stroke_color(Color::BLACK);
    p.save();
    p.set_line_width(5.0);
    p.set_color(Color::RED);
    p.rotate(PI / 3.0);
    p.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    p.restore();
    assert_eq!(p.line_width(), 2.0);
    assert_eq!(p.stroke_color(), Color::BLACK);
    assert_eq!(p.transform(), Affine::IDENTITY);
    assert!(!p.has_clip());
    p.begin_path();
    p.move_to((10.0, 10.0));
    p.line_to((90.0, 90.0));
    p.stroke();
}

fn transforms_compose<T: RenderTarget>(p: &mut Painter<T>) {
    p.translate((10.0, 20.0));
    p.scale((2.0, 3.0));
    let mapped = p.transform() * Point::new(1.0, 1.0);
    assert!((mapped - Point::new(12.0, 23.0)).hypot() < 1e-9);
    p.save();
    p.rotate(PI);
    let mapped = p.transform() * Point::new(1.0, 0.0);
    assert!((mapped - Point::new(8.0, 20.0)).hypot() < 1e-9);
    p.restore();
    let mapped = p.transform() * Point::new(1.0, 0.0);
    assert!((mapped - Point::new(12.0, 20.0)).hypot() < 1e-9);
}

fn line_to_starts_at_last_point<T: RenderTarget>(p: &mut Painter<T>) {
    p.begin_path();
    p.line_to((30.0, 40.0));
    assert_eq!(p.last_point(), Point::new(30.0, 40.0));
    p.bezier_curve_to((40.0, 40.0), (50.0, 50.0), (60.0, 60.0));
    assert_eq!(p.last_point(), Point::new(60.0, 60.0));
    p.stroke();
    let path = p.path().expect("stroke keeps the finished path");
    assert_eq!(path.figures().len(), 1);
    assert_eq!(path.figures()[0].start(), Point::ZERO);
}

fn close_returns_to_figure_start<T: RenderTarget>(p: &mut Painter<T>) {
    p.begin_path();
    p.move_to((5.0, 5.0));
    p.line_to((50.0, 5.0));
    p.move_to((10.0, 20.0));
    p.line_to((50.0, 20.0));
    p.close_path();
    assert_eq!(p.last_point(), Point::new(10.0, 20.0));
    let path = p.path().expect("path was begun");
    let ends: Vec<_> = path.figures().iter().map(|f| f.end()).collect();
    assert_eq!(ends, [FigureEnd::Open, FigureEnd::Closed]);
    p.fill();
}

fn full_circle_arcs<T: RenderTarget>(p: &mut Painter<T>) {
    for end_angle in [2.0 * PI, 0.0] {
        p.begin_path();
        p.arc((50.0, 50.0), 20.0, 0.0, end_angle);
        let path = p.path().expect("path was begun");
        let arcs = path.figures()[0]
            .segments()
            .iter()
            .filter(|s| matches!(s, Segment::Arc(_)))
            .count();
        assert_eq!(arcs, 2, "arc to {end_angle} is not a full circle");
        p.fill();
    }
}

fn arc_size_flags<T: RenderTarget>(p: &mut Painter<T>) {
    let size_of = |p: &Painter<T>| match p.path().map(|path| &path.figures()[0].segments()[0]) {
        Some(Segment::Arc(arc)) => arc.size,
        other => panic!("expected an arc, got {other:?}"),
    };
    p.begin_path();
    p.arc((50.0, 50.0), 20.0, 0.0, 1.5 * PI);
    assert_eq!(size_of(&*p), ArcSize::Large);
    p.stroke();
    p.begin_path();
    p.arc((50.0, 50.0), 20.0, 0.0, 0.5 * PI);
    assert_eq!(size_of(&*p), ArcSize::Small);
    p.stroke();
}

fn degenerate_fill<T: RenderTarget>(p: &mut Painter<T>) {
    p.begin_path();
    p.move_to((10.0, 10.0));
    p.line_to((20.0, 20.0));
    p.close_path();
    p.fill();
    p.begin_path();
    p.move_to((30.0, 30.0));
    p.fill();
    p.begin_path();
    p.fill();
    p.stroke();
    p.arc((50.0, 50.0), 0.0, 0.0, PI);
    p.fill();
}

fn paint_without_path<T: RenderTarget>(p: &mut Painter<T>) {
    p.stroke();
    p.fill();
    p.clip();
    assert!(!p.has_clip());
    assert!(p.path().is_none());
}

fn nested_clip_restores_parent<T: RenderTarget>(p: &mut Painter<T>) {
    p.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
    p.save();
    assert!(p.has_clip());
    p.clip_rect(Rect::new(25.0, 25.0, 75.0, 75.0));
    p.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    p.restore();
    assert!(p.has_clip());
    p.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
}

fn unbalanced_saves<T: RenderTarget>(p: &mut Painter<T>) {
    for i in 0..4 {
        p.save();
        p.clip_rect(Rect::new(i as f64, i as f64, 100.0, 100.0));
    }
    assert_eq!(p.depth(), 5);
}

fn paint_everything<T: RenderTarget>(p: &mut Painter<T>) {
    p.set_fill_color(Color::rgb8(0x20, 0x40, 0x80));
    p.fill_rect(Rect::new(10.0, 10.0, 90.0, 90.0));
    p.set_line_width(3.0);
    p.stroke_rect(Rect::new(10.0, 10.0, 90.0, 90.0));
    p.draw_focus_rect(Rect::new(5.0, 5.0, 95.0, 95.0));
    p.save();
    p.translate((50.0, 50.0));
    p.rotate(PI / 4.0);
    p.begin_path();
    p.rect(Rect::new(-10.0, -10.0, 10.0, 10.0));
    p.fill();
    p.restore();
}

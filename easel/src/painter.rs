//! The state-stack drawing engine.

use log::{debug, warn};

use crate::kurbo::{Affine, Point, Rect, Vec2};
use crate::target::{DrawStatus, Image, RenderTarget};
use crate::theme::{ControlState, ThemeExtra, ThemePart, ThemeRenderer};
use crate::{AttributedText, Color, Path, PathBuilder, StrokeStyle, UiDefaults};

/// One frame of the save/restore stack.
struct PainterState<T: RenderTarget> {
    line_width: f64,
    stroke_color: Color,
    fill_color: Color,
    matrix: Affine,
    /// The target state as of the `save` that pushed this frame.
    state_block: Option<T::StateBlock>,
    /// The effective clip, in untransformed target space.
    clip: Option<T::Geometry>,
    layer: Option<T::Layer>,
    /// Whether `layer` is currently pushed onto the target.
    layer_pushed: bool,
}

impl<T: RenderTarget> PainterState<T> {
    fn root() -> Self {
        PainterState {
            line_width: 1.0,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            matrix: Affine::IDENTITY,
            state_block: None,
            clip: None,
            layer: None,
            layer_pushed: false,
        }
    }

    /// A copy of this frame, with its layer not yet materialized.
    fn child(&self, state_block: Option<T::StateBlock>) -> Self {
        PainterState {
            line_width: self.line_width,
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            matrix: self.matrix,
            state_block,
            clip: self.clip.clone(),
            layer: None,
            layer_pushed: false,
        }
    }
}

/// A draw session on one render target.
///
/// Creating a painter begins the session; [`end_draw`](Self::end_draw), or
/// dropping the painter, ends it. The painter keeps a stack of drawing
/// states that always holds at least the root frame, and one path under
/// construction.
///
/// Painting calls never fail. Resource failures are logged and the call is
/// skipped, and calls that need a path when there is none do nothing.
pub struct Painter<T: RenderTarget> {
    target: T,
    states: Vec<PainterState<T>>,
    path: PathBuilder,
    defaults: UiDefaults,
    in_session: bool,
}

impl<T: RenderTarget> Painter<T> {
    /// Begin a draw session on `target`.
    pub fn new(target: T) -> Self {
        Painter::with_defaults(target, UiDefaults::default())
    }

    /// Begin a draw session, using `defaults` for focus rings.
    pub fn with_defaults(mut target: T, defaults: UiDefaults) -> Self {
        target.begin_draw();
        target.set_transform(Affine::IDENTITY);
        Painter {
            target,
            states: vec![PainterState::root()],
            path: PathBuilder::new(),
            defaults,
            in_session: true,
        }
    }

    /// End the session.
    ///
    /// Returns `true` when the target was lost and must be recreated before
    /// the next paint.
    pub fn end_draw(mut self) -> bool {
        self.finish()
    }

    fn finish(&mut self) -> bool {
        if !self.in_session {
            return false;
        }
        self.in_session = false;
        if self.states.len() > 1 {
            debug!("ending session with {} unrestored saves", self.states.len() - 1);
        }
        while self.states.len() > 1 {
            self.restore();
        }
        self.pop_layer();
        match self.target.end_draw() {
            DrawStatus::Presented => false,
            DrawStatus::RecreateTarget => {
                warn!("render target lost, it must be recreated");
                true
            }
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn defaults(&self) -> &UiDefaults {
        &self.defaults
    }

    fn top(&self) -> &PainterState<T> {
        // The root frame is never popped.
        &self.states[self.states.len() - 1]
    }

    fn top_mut(&mut self) -> &mut PainterState<T> {
        let last = self.states.len() - 1;
        &mut self.states[last]
    }

    /// The number of frames on the state stack, at least 1.
    pub fn depth(&self) -> usize {
        self.states.len()
    }

    /// Push a copy of the current state.
    pub fn save(&mut self) {
        let state_block = match self.target.save_drawing_state() {
            Ok(block) => Some(block),
            Err(e) => {
                warn!("failed to save drawing state: {e}");
                None
            }
        };
        let child = self.top().child(state_block);
        self.states.push(child);
    }

    /// Pop the current state. Does nothing on the root frame.
    pub fn restore(&mut self) {
        if self.states.len() == 1 {
            return;
        }
        self.pop_layer();
        if let Some(state) = self.states.pop() {
            match &state.state_block {
                Some(block) => self.target.restore_drawing_state(block),
                None => {
                    let matrix = self.top().matrix;
                    self.target.set_transform(matrix);
                }
            }
        }
    }

    fn pop_layer(&mut self) {
        let top = self.top_mut();
        if top.layer_pushed {
            top.layer_pushed = false;
            self.target.pop_layer();
        }
    }

    pub fn begin_path(&mut self) {
        self.path.begin();
    }

    pub fn close_path(&mut self) {
        self.path.close();
    }

    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.path.move_to(p.into());
    }

    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.path.line_to(p.into());
    }

    pub fn bezier_curve_to(
        &mut self,
        c1: impl Into<Point>,
        c2: impl Into<Point>,
        end: impl Into<Point>,
    ) {
        self.path.bezier_to(c1.into(), c2.into(), end.into());
    }

    /// Add an arc from `start_angle` to `end_angle`, in radians, sweeping
    /// in the direction of increasing angle.
    pub fn arc(&mut self, center: impl Into<Point>, radius: f64, start_angle: f64, end_angle: f64) {
        self.path.arc(center.into(), radius, start_angle, end_angle);
    }

    pub fn rect(&mut self, rect: Rect) {
        self.path.rect(rect);
    }

    /// The path under construction, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.path()
    }

    /// The current point of the path under construction.
    pub fn last_point(&self) -> Point {
        self.path.last_point()
    }

    /// Intersect the clip with the current path.
    pub fn clip(&mut self) {
        let matrix = self.top().matrix;
        let Some(path) = self.path.finish() else {
            return;
        };
        let geometry = self
            .target
            .create_geometry(path)
            .and_then(|g| self.target.transform_geometry(&g, matrix));

        self.pop_layer();
        let existing = self.top_mut().clip.take();
        let clip = match (existing, geometry) {
            (None, Ok(geometry)) => Some(geometry),
            (Some(existing), Ok(geometry)) => {
                match self.target.intersect_geometry(&existing, &geometry) {
                    Ok(clip) => Some(clip),
                    Err(e) => {
                        warn!("failed to intersect clip geometry: {e}");
                        Some(existing)
                    }
                }
            }
            (existing, Err(e)) => {
                warn!("failed to create clip geometry: {e}");
                existing
            }
        };
        self.top_mut().clip = clip;
        self.push_clip_layer();
    }

    pub fn clip_rect(&mut self, rect: Rect) {
        self.begin_path();
        self.rect(rect);
        self.clip();
    }

    fn push_clip_layer(&mut self) {
        if self.top().clip.is_none() {
            return;
        }
        if self.top().layer.is_none() {
            match self.target.create_layer() {
                Ok(layer) => self.top_mut().layer = Some(layer),
                Err(e) => {
                    warn!("failed to create clip layer: {e}");
                    return;
                }
            }
        }
        let last = self.states.len() - 1;
        let top = &mut self.states[last];
        if let (Some(layer), Some(clip)) = (&top.layer, &top.clip) {
            self.target.push_layer(layer, clip);
            top.layer_pushed = true;
        }
    }

    /// Whether the current frame restricts painting.
    pub fn has_clip(&self) -> bool {
        self.top().clip.is_some()
    }

    /// The current frame's clip geometry, in untransformed target space.
    pub fn clip_geometry(&self) -> Option<&T::Geometry> {
        self.top().clip.as_ref()
    }

    pub fn translate(&mut self, offset: impl Into<Vec2>) {
        self.concat(Affine::translate(offset.into()));
    }

    /// Rotate by `angle` radians, clockwise on a y-down surface.
    pub fn rotate(&mut self, angle: f64) {
        self.concat(Affine::rotate(angle));
    }

    pub fn scale(&mut self, scale: impl Into<Vec2>) {
        let scale = scale.into();
        self.concat(Affine::scale_non_uniform(scale.x, scale.y));
    }

    fn concat(&mut self, transform: Affine) {
        let top = self.top_mut();
        top.matrix = top.matrix * transform;
        let matrix = top.matrix;
        self.target.set_transform(matrix);
    }

    pub fn transform(&self) -> Affine {
        self.top().matrix
    }

    /// Set both the stroke and the fill color.
    pub fn set_color(&mut self, color: Color) {
        let top = self.top_mut();
        top.stroke_color = color;
        top.fill_color = color;
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.top_mut().stroke_color = color;
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.top_mut().fill_color = color;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.top_mut().line_width = width;
    }

    pub fn line_width(&self) -> f64 {
        self.top().line_width
    }

    pub fn stroke_color(&self) -> Color {
        self.top().stroke_color
    }

    pub fn fill_color(&self) -> Color {
        self.top().fill_color
    }

    /// Stroke the current path, closing any open figure first.
    pub fn stroke(&mut self) {
        let Some(path) = self.path.finish() else {
            return;
        };
        match self.target.create_geometry(path) {
            Ok(geometry) => {
                let top = self.top();
                let (color, width) = (top.stroke_color, top.line_width);
                self.target.draw_geometry(&geometry, color, width, None);
            }
            Err(e) => warn!("failed to create path geometry: {e}"),
        }
    }

    /// Fill the current path, closing any open figure first.
    pub fn fill(&mut self) {
        let Some(path) = self.path.finish() else {
            return;
        };
        match self.target.create_geometry(path) {
            Ok(geometry) => {
                let color = self.top().fill_color;
                self.target.fill_geometry(&geometry, color);
            }
            Err(e) => warn!("failed to create path geometry: {e}"),
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect) {
        let top = self.top();
        let (color, width) = (top.stroke_color, top.line_width);
        self.target.draw_rectangle(rect, color, width, None);
    }

    pub fn fill_rect(&mut self, rect: Rect) {
        let color = self.top().fill_color;
        self.target.fill_rectangle(rect, color);
    }

    pub fn draw_image(&mut self, image: &T::Image, dest: Rect) {
        let src = Rect::from_origin_size(Point::ZERO, image.size());
        self.target.draw_image(image, src, dest);
    }

    pub fn draw_image_from_rect(&mut self, image: &T::Image, src: Rect, dest: Rect) {
        self.target.draw_image(image, src, dest);
    }

    pub fn draw_canvas(&mut self, canvas: &T::Canvas, dest: Rect) {
        let src = Rect::from_origin_size(Point::ZERO, canvas.size());
        self.target.draw_canvas(canvas, src, dest);
    }

    pub fn draw_canvas_from_rect(&mut self, canvas: &T::Canvas, src: Rect, dest: Rect) {
        self.target.draw_canvas(canvas, src, dest);
    }

    /// Draw `text` laid out to fit `rect`, at `rect`'s origin.
    pub fn draw_attributed_text(&mut self, text: &AttributedText<T::TextLayout>, rect: Rect) {
        self.target
            .draw_text_layout(text.layout(), rect, text.draw_options());
    }

    /// Draw a one pixel dotted focus rectangle.
    pub fn draw_focus_rect(&mut self, rect: Rect) {
        let color = self.defaults.focus_ring_color;
        match self.target.create_stroke_style(&StrokeStyle::dotted()) {
            Ok(style) => self.target.draw_rectangle(rect, color, 1.0, Some(&style)),
            Err(e) => {
                warn!("failed to create focus ring stroke style: {e}");
                self.target.draw_rectangle(rect, color, 1.0, None);
            }
        }
    }

    /// Let `theme` paint `part` into the `dirty` region of `rect`.
    ///
    /// Only the intersection of `rect` and `dirty` is rendered: the theme
    /// paints the whole control offset into a buffer covering just that
    /// intersection, which is then composited in place.
    pub fn draw_native_theme<R>(
        &mut self,
        theme: &R,
        part: ThemePart,
        state: ControlState,
        rect: Rect,
        dirty: Rect,
        extra: &ThemeExtra,
    ) where
        R: ThemeRenderer<T::Buffer> + ?Sized,
    {
        let visible = rect.intersect(dirty);
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return;
        }
        let scale = self.target.scale_factor();
        let size = (visible.size() * scale).ceil();
        let control = (rect - visible.origin().to_vec2()).scale_from_origin(scale);

        let mut buffer = match self.target.create_buffer(size) {
            Ok(buffer) => buffer,
            Err(e) => {
                warn!("failed to create theme buffer of {size:?}: {e}");
                return;
            }
        };
        theme.paint(part, &mut buffer, state, control, extra);
        if let Err(e) = self.target.draw_buffer(&buffer, visible) {
            warn!("failed to composite theme buffer: {e}");
        }
    }
}

impl<T: RenderTarget> Drop for Painter<T> {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    use crate::kurbo::Size;
    use crate::recording::{Command, RecordingTarget};

    fn painter(target: &mut RecordingTarget) -> Painter<&mut RecordingTarget> {
        Painter::new(target)
    }

    #[test]
    fn depth_follows_saves_and_restores() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        for n in 0..4 {
            for m in 0..=n {
                for _ in 0..n {
                    p.save();
                }
                for _ in 0..m {
                    p.restore();
                }
                assert_eq!(p.depth(), 1 + n - m);
                while p.depth() > 1 {
                    p.restore();
                }
            }
        }
        p.restore();
        assert_eq!(p.depth(), 1);
    }

    #[test]
    fn restore_reverts_state() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.set_line_width(2.0);
        p.save();
        p.set_line_width(5.0);
        p.set_color(Color::RED);
        p.translate((10.0, 0.0));
        p.restore();
        assert_eq!(p.line_width(), 2.0);
        assert_eq!(p.stroke_color(), Color::BLACK);
        assert_eq!(p.transform(), Affine::IDENTITY);

        p.move_to((0.0, 0.0));
        p.line_to((5.0, 5.0));
        p.stroke();
        drop(p);
        let stroke = target
            .commands()
            .iter()
            .find_map(|c| match c {
                Command::DrawGeometry { width, .. } => Some(*width),
                _ => None,
            })
            .unwrap();
        assert_eq!(stroke, 2.0);
        assert_eq!(target.transform(), Affine::IDENTITY);
    }

    #[test]
    fn transforms_compose_in_local_space() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.translate((10.0, 20.0));
        p.scale((2.0, 2.0));
        let mapped = p.transform() * Point::new(1.0, 1.0);
        assert_eq!(mapped, Point::new(12.0, 22.0));
        p.rotate(PI / 2.0);
        let mapped = p.transform() * Point::new(1.0, 0.0);
        assert!((mapped - Point::new(10.0, 22.0)).hypot() < 1e-9);
        let pushed = p.transform();
        drop(p);
        assert!(target
            .commands()
            .contains(&Command::SetTransform(pushed)));
    }

    #[test]
    fn paint_without_path_is_a_no_op() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.stroke();
        p.fill();
        p.clip();
        assert!(!p.has_clip());
        drop(p);
        assert!(!target.commands().iter().any(|c| matches!(
            c,
            Command::DrawGeometry { .. } | Command::FillGeometry { .. } | Command::PushLayer { .. }
        )));
    }

    #[test]
    fn nested_clips_intersect() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        p.save();
        p.clip_rect(Rect::new(25.0, 25.0, 100.0, 100.0));
        let clip = p.clip_geometry().unwrap().bounding_box();
        assert_eq!(clip, Rect::new(25.0, 25.0, 50.0, 50.0));
        assert_eq!(p.target().layer_depth(), 2);
        p.restore();
        assert_eq!(p.target().layer_depth(), 1);
        let clip = p.clip_geometry().unwrap().bounding_box();
        assert_eq!(clip, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert!(!p.end_draw());
        assert_eq!(target.layer_depth(), 0);
    }

    #[test]
    fn clip_in_same_frame_replaces_layer() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
        p.clip_rect(Rect::new(10.0, 10.0, 80.0, 80.0));
        assert_eq!(p.target().layer_depth(), 1);
        let clip = p.clip_geometry().unwrap().bounding_box();
        assert_eq!(clip, Rect::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn save_without_clip_pushes_no_layer() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        p.save();
        p.save();
        assert!(p.has_clip());
        assert_eq!(p.target().layer_depth(), 1);
    }

    #[test]
    fn clip_follows_transform() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.translate((100.0, 0.0));
        p.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let clip = p.clip_geometry().unwrap().bounding_box();
        assert_eq!(clip, Rect::new(100.0, 0.0, 110.0, 10.0));
    }

    #[test]
    fn unbalanced_saves_are_unwound_at_end() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        for i in 0..3 {
            p.save();
            p.clip_rect(Rect::new(0.0, 0.0, 10.0 + i as f64, 10.0));
        }
        assert_eq!(p.target().layer_depth(), 3);
        assert!(!p.end_draw());
        assert_eq!(target.layer_depth(), 0);
        assert_eq!(target.commands().last(), Some(&Command::EndDraw));
    }

    #[test]
    fn drop_ends_session_once() {
        let mut target = RecordingTarget::new();
        {
            let mut p = painter(&mut target);
            p.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        }
        let ends = target
            .commands()
            .iter()
            .filter(|c| **c == Command::EndDraw)
            .count();
        assert_eq!(ends, 1);
        assert_eq!(target.layer_depth(), 0);
    }

    #[test]
    fn lost_target_requests_recreate() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.target_mut().lose_device();
        assert!(p.end_draw());
    }

    #[test]
    fn layer_failure_is_absorbed() {
        let mut target = RecordingTarget::new();
        target.fail_layers(true);
        let mut p = painter(&mut target);
        p.clip_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        p.save();
        p.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
        p.restore();
        assert_eq!(p.target().layer_depth(), 0);
        assert!(!p.end_draw());
    }

    #[test]
    fn restore_without_state_block_resets_transform() {
        let mut target = RecordingTarget::new();
        target.fail_state_blocks(true);
        let mut p = painter(&mut target);
        p.translate((5.0, 0.0));
        p.save();
        p.translate((10.0, 0.0));
        assert_eq!(p.target().transform(), Affine::translate((15.0, 0.0)));
        p.restore();
        assert_eq!(p.transform(), Affine::translate((5.0, 0.0)));
        assert_eq!(p.target().transform(), Affine::translate((5.0, 0.0)));
        assert!(!p.end_draw());
    }

    #[test]
    fn focus_rect_falls_back_to_solid() {
        let mut target = RecordingTarget::new();
        target.fail_stroke_styles(true);
        let mut p = painter(&mut target);
        p.draw_focus_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        drop(p);
        assert!(target.commands().iter().any(|c| matches!(
            c,
            Command::DrawRectangle { dashed: false, width, .. } if *width == 1.0
        )));
    }

    #[test]
    fn focus_rect_is_dotted() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.draw_focus_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        drop(p);
        assert!(target
            .commands()
            .iter()
            .any(|c| matches!(c, Command::DrawRectangle { dashed: true, .. })));
    }

    struct Recorder;

    impl ThemeRenderer<crate::recording::RecordedBuffer> for Recorder {
        fn paint(
            &self,
            part: ThemePart,
            buffer: &mut crate::recording::RecordedBuffer,
            state: ControlState,
            rect: Rect,
            _extra: &ThemeExtra,
        ) {
            buffer.painted.push((part, state, rect));
        }
    }

    #[test]
    fn theme_paints_only_dirty_part() {
        let mut target = RecordingTarget::with_scale(2.0);
        let mut p = painter(&mut target);
        p.draw_native_theme(
            &Recorder,
            ThemePart::Button,
            ControlState::Hovered,
            Rect::new(10.0, 10.0, 50.0, 30.0),
            Rect::new(30.0, 0.0, 100.0, 100.0),
            &ThemeExtra::None,
        );
        p.draw_native_theme(
            &Recorder,
            ThemePart::Button,
            ControlState::Normal,
            Rect::new(10.0, 10.0, 50.0, 30.0),
            Rect::new(60.0, 0.0, 100.0, 100.0),
            &ThemeExtra::None,
        );
        drop(p);
        let drawn: Vec<_> = target
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::DrawBuffer { buffer, dest } => Some((buffer.clone(), *dest)),
                _ => None,
            })
            .collect();
        assert_eq!(drawn.len(), 1);
        let (buffer, dest) = &drawn[0];
        assert_eq!(dest, &Rect::new(30.0, 10.0, 50.0, 30.0));
        assert_eq!(buffer.size, Size::new(40.0, 40.0));
        assert_eq!(
            buffer.painted,
            vec![(
                ThemePart::Button,
                ControlState::Hovered,
                Rect::new(-40.0, 0.0, 40.0, 40.0)
            )]
        );
    }

    #[test]
    fn arc_paths_reach_the_target() {
        let mut target = RecordingTarget::new();
        let mut p = painter(&mut target);
        p.begin_path();
        p.arc((50.0, 50.0), 10.0, 0.0, 2.0 * PI);
        p.fill();
        p.begin_path();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 10.0));
        p.close_path();
        p.fill();
        drop(p);
        let fills: Vec<_> = target
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::FillGeometry { geometry, .. } => Some(geometry.bounding_box()),
                _ => None,
            })
            .collect();
        assert_eq!(fills.len(), 2);
        assert!((fills[0].width() - 20.0).abs() < 0.5);
        assert_eq!(fills[1].area(), 100.0);
    }
}

//! The capability interface each backend implements.

use crate::kurbo::{Affine, Rect, Size};
use crate::{Color, Error, Path, StrokeStyle, TextDrawOptions, TextLayout};

/// Something with a size in device-independent pixels that can be drawn.
pub trait Image {
    fn size(&self) -> Size;
}

/// How a draw session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    /// Everything was flushed to the target.
    Presented,
    /// The target became invalid; the caller must create a new one and
    /// repaint on the next frame.
    RecreateTarget,
}

/// A native render target, bound to one surface for one draw session.
///
/// The methods mirror the primitives native 2D APIs offer: geometry is
/// retained, clipping is done by pushing layers with a geometric mask, and
/// painter state is snapshotted into opaque state blocks. Coordinates are
/// in device-independent pixels; the target applies its own
/// [`scale_factor`](Self::scale_factor) on top of the current transform.
///
/// Fallible methods create resources. Drawing methods cannot fail; a
/// backend that hits a problem while drawing logs it and skips the draw.
pub trait RenderTarget {
    /// Retained path geometry.
    type Geometry: Clone;
    /// A clip layer.
    type Layer;
    /// A snapshot of the target's drawing state.
    type StateBlock;
    type StrokeStyle;
    type Image: Image;
    /// An offscreen surface that can be painted into and drawn like an image.
    type Canvas: Image;
    type TextLayout: TextLayout;
    /// An offscreen buffer for theme rendering.
    type Buffer;

    fn begin_draw(&mut self);

    /// Finish the session. Any layer still pushed is popped first.
    fn end_draw(&mut self) -> DrawStatus;

    /// Device pixels per device-independent pixel.
    fn scale_factor(&self) -> f64;

    fn set_transform(&mut self, transform: Affine);

    fn save_drawing_state(&mut self) -> Result<Self::StateBlock, Error>;

    fn restore_drawing_state(&mut self, block: &Self::StateBlock);

    fn create_geometry(&mut self, path: &Path) -> Result<Self::Geometry, Error>;

    /// A copy of `geometry` mapped through `transform`.
    fn transform_geometry(
        &mut self,
        geometry: &Self::Geometry,
        transform: Affine,
    ) -> Result<Self::Geometry, Error>;

    /// The region covered by both `a` and `b`.
    fn intersect_geometry(
        &mut self,
        a: &Self::Geometry,
        b: &Self::Geometry,
    ) -> Result<Self::Geometry, Error>;

    fn create_layer(&mut self) -> Result<Self::Layer, Error>;

    /// Restrict painting to `mask`, which is in untransformed target space.
    fn push_layer(&mut self, layer: &Self::Layer, mask: &Self::Geometry);

    fn pop_layer(&mut self);

    fn create_stroke_style(&mut self, style: &StrokeStyle) -> Result<Self::StrokeStyle, Error>;

    fn draw_geometry(
        &mut self,
        geometry: &Self::Geometry,
        color: Color,
        width: f64,
        style: Option<&Self::StrokeStyle>,
    );

    fn fill_geometry(&mut self, geometry: &Self::Geometry, color: Color);

    fn draw_rectangle(
        &mut self,
        rect: Rect,
        color: Color,
        width: f64,
        style: Option<&Self::StrokeStyle>,
    );

    fn fill_rectangle(&mut self, rect: Rect, color: Color);

    /// Draw the `src` part of `image`, in the image's DIPs, into `dest`.
    fn draw_image(&mut self, image: &Self::Image, src: Rect, dest: Rect);

    fn draw_canvas(&mut self, canvas: &Self::Canvas, src: Rect, dest: Rect);

    /// Draw `layout` constrained to `rect`.
    fn draw_text_layout(
        &mut self,
        layout: &Self::TextLayout,
        rect: Rect,
        options: &TextDrawOptions,
    );

    /// Create a buffer of `size` device pixels.
    fn create_buffer(&mut self, size: Size) -> Result<Self::Buffer, Error>;

    /// Composite `buffer` into `dest`, which is in DIPs.
    fn draw_buffer(&mut self, buffer: &Self::Buffer, dest: Rect) -> Result<(), Error>;
}

impl<T: RenderTarget + ?Sized> RenderTarget for &mut T {
    type Geometry = T::Geometry;
    type Layer = T::Layer;
    type StateBlock = T::StateBlock;
    type StrokeStyle = T::StrokeStyle;
    type Image = T::Image;
    type Canvas = T::Canvas;
    type TextLayout = T::TextLayout;
    type Buffer = T::Buffer;

    fn begin_draw(&mut self) {
        (**self).begin_draw()
    }

    fn end_draw(&mut self) -> DrawStatus {
        (**self).end_draw()
    }

    fn scale_factor(&self) -> f64 {
        (**self).scale_factor()
    }

    fn set_transform(&mut self, transform: Affine) {
        (**self).set_transform(transform)
    }

    fn save_drawing_state(&mut self) -> Result<Self::StateBlock, Error> {
        (**self).save_drawing_state()
    }

    fn restore_drawing_state(&mut self, block: &Self::StateBlock) {
        (**self).restore_drawing_state(block)
    }

    fn create_geometry(&mut self, path: &Path) -> Result<Self::Geometry, Error> {
        (**self).create_geometry(path)
    }

    fn transform_geometry(
        &mut self,
        geometry: &Self::Geometry,
        transform: Affine,
    ) -> Result<Self::Geometry, Error> {
        (**self).transform_geometry(geometry, transform)
    }

    fn intersect_geometry(
        &mut self,
        a: &Self::Geometry,
        b: &Self::Geometry,
    ) -> Result<Self::Geometry, Error> {
        (**self).intersect_geometry(a, b)
    }

    fn create_layer(&mut self) -> Result<Self::Layer, Error> {
        (**self).create_layer()
    }

    fn push_layer(&mut self, layer: &Self::Layer, mask: &Self::Geometry) {
        (**self).push_layer(layer, mask)
    }

    fn pop_layer(&mut self) {
        (**self).pop_layer()
    }

    fn create_stroke_style(&mut self, style: &StrokeStyle) -> Result<Self::StrokeStyle, Error> {
        (**self).create_stroke_style(style)
    }

    fn draw_geometry(
        &mut self,
        geometry: &Self::Geometry,
        color: Color,
        width: f64,
        style: Option<&Self::StrokeStyle>,
    ) {
        (**self).draw_geometry(geometry, color, width, style)
    }

    fn fill_geometry(&mut self, geometry: &Self::Geometry, color: Color) {
        (**self).fill_geometry(geometry, color)
    }

    fn draw_rectangle(
        &mut self,
        rect: Rect,
        color: Color,
        width: f64,
        style: Option<&Self::StrokeStyle>,
    ) {
        (**self).draw_rectangle(rect, color, width, style)
    }

    fn fill_rectangle(&mut self, rect: Rect, color: Color) {
        (**self).fill_rectangle(rect, color)
    }

    fn draw_image(&mut self, image: &Self::Image, src: Rect, dest: Rect) {
        (**self).draw_image(image, src, dest)
    }

    fn draw_canvas(&mut self, canvas: &Self::Canvas, src: Rect, dest: Rect) {
        (**self).draw_canvas(canvas, src, dest)
    }

    fn draw_text_layout(
        &mut self,
        layout: &Self::TextLayout,
        rect: Rect,
        options: &TextDrawOptions,
    ) {
        (**self).draw_text_layout(layout, rect, options)
    }

    fn create_buffer(&mut self, size: Size) -> Result<Self::Buffer, Error> {
        (**self).create_buffer(size)
    }

    fn draw_buffer(&mut self, buffer: &Self::Buffer, dest: Rect) -> Result<(), Error> {
        (**self).draw_buffer(buffer, dest)
    }
}

//! A backend-agnostic 2D painting engine.
//!
//! A [`Painter`] runs one draw session on a [`RenderTarget`]. It keeps a
//! save/restore stack of drawing state, builds paths in immediate mode,
//! clips with nested layers, and forwards painting to the backend, which
//! maps it onto a native 2D API.
//!
//! ```
//! use easel::kurbo::Rect;
//! use easel::recording::RecordingTarget;
//! use easel::{Color, Painter};
//!
//! let mut target = RecordingTarget::new();
//! let mut painter = Painter::new(&mut target);
//! painter.clip_rect(Rect::new(0.0, 0.0, 50.0, 50.0));
//! painter.set_fill_color(Color::RED);
//! painter.fill_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
//! let must_recreate = painter.end_draw();
//! assert!(!must_recreate);
//! ```

pub use kurbo;

/// utilities shared by various backends
pub mod util;

pub mod geometry;
pub mod path;
pub mod recording;
pub mod theme;

mod color;
mod config;
mod error;
mod font;
mod painter;
mod shapes;
mod target;
mod text;

#[cfg(feature = "conformance")]
pub mod conformance;

pub use crate::color::*;
pub use crate::config::*;
pub use crate::error::*;
pub use crate::font::*;
pub use crate::geometry::{ArcSize, SweepDirection};
pub use crate::painter::*;
pub use crate::path::{Path, PathBuilder};
pub use crate::shapes::*;
pub use crate::target::*;
pub use crate::text::*;
pub use crate::util::IndexUnit;

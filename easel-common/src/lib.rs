//! An easel backend appropriate for the current build.
//!
//! This crate reexports the [easel] crate, alongside the backend picked by
//! cargo features. It also exposes [kurbo][easel::kurbo], which defines shape
//! and curve types useful in drawing.
//!
//! The intention of this crate is to provide a single dependency that handles
//! the common use-case: get a [`Device`], ask it for a [`BitmapTarget`], and
//! paint into it with a [`Painter`]. If you have more complicated needs (such
//! as supporting multiple backends simultaneously) you should use [easel] and
//! a backend crate directly.

pub use easel::*;

#[doc(hidden)]
pub use easel::kurbo;

cfg_if::cfg_if! {
    if #[cfg(feature = "skia")] {
        #[path = "skia_back.rs"]
        mod backend;
    } else {
        compile_error!("easel-common needs a backend; enable the \"skia\" feature");
    }
}

#[doc(hidden)]
pub use backend::*;

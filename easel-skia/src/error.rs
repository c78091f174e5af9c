//! Error conversion from png and tiny-skia failures to easel errors.

use std::fmt;

use easel::{Error, ErrorKind};

/// The png errors are wrapped so their messages say where they came from.
#[derive(Debug)]
struct WrappedPngError(Box<dyn std::error::Error>);

impl std::error::Error for WrappedPngError {}

impl fmt::Display for WrappedPngError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PNG error: {}", self.0)
    }
}

pub trait WrapError<T> {
    fn wrap(self) -> Result<T, Error>;
}

impl<T> WrapError<T> for Result<T, png::DecodingError> {
    fn wrap(self) -> Result<T, Error> {
        self.map_err(|e| Error::backend(WrappedPngError(Box::new(e))))
    }
}

impl<T> WrapError<T> for Result<T, png::EncodingError> {
    fn wrap(self) -> Result<T, Error> {
        self.map_err(|e| Error::backend(WrappedPngError(Box::new(e))))
    }
}

/// tiny-skia reports invalid sizes and parameters with `None`.
pub(crate) trait OrInvalid<T> {
    fn or_invalid(self, what: &'static str) -> Result<T, Error>;
}

impl<T> OrInvalid<T> for Option<T> {
    fn or_invalid(self, what: &'static str) -> Result<T, Error> {
        self.ok_or_else(|| {
            log::debug!("tiny-skia rejected {what}");
            Error::new(ErrorKind::InvalidInput)
        })
    }
}

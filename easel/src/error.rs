//! The common error type for easel operations.

use std::fmt;

/// An error that can occur while creating painting resources.
///
/// Painting itself never fails loudly: the painter logs these and skips
/// the affected operation. They surface from constructors and from the
/// resource-creation methods of [`RenderTarget`](crate::RenderTarget).
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    InvalidInput,
    NotSupported,
    MissingFeature(&'static str),
    BackendError(Box<dyn std::error::Error>),
}

impl Error {
    /// Create a new error of the given kind.
    pub fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Wrap a foreign error as a backend error.
    pub fn backend(e: impl Into<Box<dyn std::error::Error>>) -> Error {
        Error::new(ErrorKind::BackendError(e.into()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::InvalidInput => write!(f, "Invalid input"),
            ErrorKind::NotSupported => write!(f, "Option not supported"),
            ErrorKind::MissingFeature(feature) => write!(f, "Missing feature '{feature}'"),
            ErrorKind::BackendError(ref e) => {
                write!(f, "Backend error: ")?;
                e.fmt(f)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.0 {
            ErrorKind::BackendError(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error::new(kind)
    }
}

impl From<Box<dyn std::error::Error>> for Error {
    fn from(e: Box<dyn std::error::Error>) -> Error {
        Error::new(ErrorKind::BackendError(e))
    }
}

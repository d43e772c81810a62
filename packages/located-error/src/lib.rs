//! Error decorator that records where an error was raised.
//!
//! Layers of the transfer manager wrap lower level errors (database pool
//! failures, engine rejections, configuration parsing) before they bubble up.
//! [`LocatedError`] keeps the original error as its `source` and remembers
//! the caller location of the conversion, so logs point at the line that
//! turned a low level failure into a domain error.
//!
//! ```rust
//! use std::sync::Arc;
//! use torrust_transfer_manager_located_error::{DynError, Located, LocatedError};
//!
//! #[derive(thiserror::Error, Debug)]
//! #[error("engine refused the descriptor")]
//! struct Refused;
//!
//! let typed: LocatedError<Refused> = Located(Refused).into();
//! assert!(typed.to_string().starts_with("engine refused the descriptor, src/lib.rs"));
//!
//! let dynamic: LocatedError<dyn std::error::Error + Send + Sync> = (Arc::new(Refused) as DynError).into();
//! assert_eq!(dynamic.location().file(), typed.location().file());
//! ```
use std::error::Error;
use std::panic::Location;
use std::sync::Arc;

use tracing::debug;

/// A shareable, type-erased error.
pub type DynError = Arc<dyn std::error::Error + Send + Sync>;

/// Marks an error to be converted into a [`LocatedError`] at the call site.
pub struct Located<E>(pub E);

/// An error together with the location where it was wrapped.
#[derive(Debug)]
pub struct LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    source: Arc<E>,
    location: Box<Location<'a>>,
}

impl<'a, E> LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    /// The location where the error was wrapped.
    #[must_use]
    pub fn location(&self) -> &Location<'a> {
        &self.location
    }

    /// The wrapped error.
    #[must_use]
    pub fn inner(&self) -> &E {
        &self.source
    }
}

impl<'a, E> std::fmt::Display for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.source, self.location)
    }
}

impl<'a, E> Error for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

impl<'a, E> Clone for LocatedError<'a, E>
where
    E: Error + ?Sized + Send + Sync,
{
    fn clone(&self) -> Self {
        LocatedError {
            source: self.source.clone(),
            location: self.location.clone(),
        }
    }
}

impl<'a, E> From<Located<E>> for LocatedError<'a, E>
where
    E: Error + Send + Sync,
{
    #[track_caller]
    fn from(located: Located<E>) -> Self {
        let error = LocatedError {
            source: Arc::new(located.0),
            location: Box::new(*Location::caller()),
        };
        debug!("{error}");
        error
    }
}

impl<'a> From<DynError> for LocatedError<'a, dyn std::error::Error + Send + Sync> {
    #[track_caller]
    fn from(source: DynError) -> Self {
        let error = LocatedError {
            source,
            location: Box::new(*Location::caller()),
        };
        debug!("{error}");
        error
    }
}

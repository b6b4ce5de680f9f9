//! Error type for `roster-store-mongo`.

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] roster_core::Error),

  #[error("mongodb error: {0}")]
  Driver(#[from] mongodb::error::Error),
}

impl From<roster_core::ValidationError> for Error {
  fn from(e: roster_core::ValidationError) -> Self { Self::Core(e.into()) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
  match err.kind.as_ref() {
    ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
    ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
    _ => false,
  }
}

/// Translate a duplicate-key failure on a write that set `email` into
/// [`roster_core::Error::DuplicateEmail`]; other errors pass through.
pub(crate) fn duplicate_email(err: mongodb::error::Error, email: Option<String>) -> Error {
  match email {
    Some(email) if is_duplicate_key(&err) => {
      Error::Core(roster_core::Error::DuplicateEmail(email))
    }
    _ => Error::Driver(err),
  }
}

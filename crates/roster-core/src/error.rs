//! Error types for `roster-core`.

use thiserror::Error;

use crate::validate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("a user with email {0:?} already exists")]
  DuplicateEmail(String),

  #[error("malformed identifier: {0:?}")]
  MalformedIdentifier(String),

  #[error("store unavailable: {0}")]
  Unavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

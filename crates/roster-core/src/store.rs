//! The `UserStore` trait.
//!
//! Implemented by storage backends (`roster-store-mongo`,
//! `roster-store-sqlite`). The HTTP layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  outcome::{DeleteResult, UpdateResult},
  user::{NewUser, User, UserId, UserPatch},
};

/// Abstraction over a user store backend.
///
/// Every method is a single store operation with last-write-wins semantics.
/// Inputs are validated by the backend before the store is touched.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every stored user. No ordering guarantee, no pagination.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Users whose `is_active` flag is set.
  fn list_active(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Validate and persist a new user, returning it with its assigned id.
  ///
  /// Fails if validation fails or if the email is already taken; nothing is
  /// written in either case.
  fn create(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Set only the fields present in `patch`.
  ///
  /// An unknown id is not an error: it yields a zero-matched result.
  fn update_by_id(
    &self,
    id: UserId,
    patch: UserPatch,
  ) -> impl Future<Output = Result<UpdateResult, Self::Error>> + Send + '_;

  /// Clear the `is_active` flag, leaving every other field untouched.
  fn deactivate_by_id(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<UpdateResult, Self::Error>> + Send + '_;

  /// Remove the user. Deleting an unknown id reports zero deleted.
  fn delete_by_id(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<DeleteResult, Self::Error>> + Send + '_;

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// Release the underlying connection. Calls made afterwards fail.
  fn shutdown(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::UserStore`].
//! Listening, tracing layers and store lifetime are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(Arc::new(store));
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use roster_core::store::UserStore;

pub use error::ApiError;

/// Body of `GET /`.
pub const GREETING: &str = "Hello, World!";

/// `GET /`
async fn greeting() -> &'static str { GREETING }

/// Build a fully-materialised API router for `store`.
///
/// The id routes answer with and without a trailing slash.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: UserStore + 'static,
{
  Router::new()
    .route("/", get(greeting))
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    .route("/users/active", get(users::list_active::<S>))
    .route("/users/{id}", put(users::update::<S>).delete(users::delete::<S>))
    .route("/users/{id}/", put(users::update::<S>).delete(users::delete::<S>))
    .route("/users/{id}/deactivate", put(users::deactivate::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

//! Core types and trait definitions for the Roster user service.
//!
//! This crate is free of HTTP and driver dependencies. `bson` is used only for
//! the ObjectId identifier format shared by every backend.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod outcome;
pub mod store;
pub mod user;
pub mod validate;

pub use error::{Error, Result};
pub use validate::ValidationError;

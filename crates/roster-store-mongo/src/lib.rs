//! MongoDB backend for the Roster user store.
//!
//! Users live in the `users` collection of the connection string's default
//! database (`test` when the string names none). Email uniqueness is enforced
//! by a unique index created when the connection is verified.

mod document;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{MongoStore, COLLECTION_NAME, DEFAULT_DATABASE};

#[cfg(test)]
mod tests;

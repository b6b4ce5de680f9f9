//! Result descriptors returned by write operations in place of the record.
//!
//! These are backend-neutral; each store translates its native result into
//! them.

use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// Outcome of `update_by_id` and `deactivate_by_id`.
///
/// Upserts are never performed, so `upserted_id` is always `None` and
/// `upserted_count` always 0; both are kept for wire compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
  pub acknowledged:   bool,
  pub matched_count:  u64,
  pub modified_count: u64,
  pub upserted_id:    Option<UserId>,
  pub upserted_count: u64,
}

impl UpdateResult {
  pub fn new(matched_count: u64, modified_count: u64) -> Self {
    Self {
      acknowledged: true,
      matched_count,
      modified_count,
      upserted_id: None,
      upserted_count: 0,
    }
  }

  /// No record carried the requested id.
  pub fn unmatched() -> Self { Self::new(0, 0) }
}

/// Outcome of `delete_by_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
  pub deleted_count: u64,
}

impl DeleteResult {
  pub fn new(deleted_count: u64) -> Self { Self { deleted_count } }
}

//! Conversions between [`User`] and the plain column values stored in SQLite.
//!
//! Identifiers are stored as 24-char lowercase hex strings, flags as
//! `INTEGER` 0/1.

use roster_core::user::{User, UserId};

use crate::Result;

pub const USER_COLUMNS: &str = "id, name, email, age, is_active";

pub fn encode_id(id: UserId) -> String { id.to_hex() }

pub fn decode_id(s: &str) -> Result<UserId> { Ok(s.parse()?) }

/// A row of the `users` table before the id is decoded.
pub struct RawUser {
  pub id:        String,
  pub name:      String,
  pub email:     String,
  pub age:       Option<i64>,
  pub is_active: bool,
}

impl RawUser {
  /// Row mapper for queries selecting [`USER_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      name:      row.get(1)?,
      email:     row.get(2)?,
      age:       row.get(3)?,
      is_active: row.get(4)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      id:        decode_id(&self.id)?,
      name:      self.name,
      email:     self.email,
      age:       self.age,
      is_active: self.is_active,
    })
  }
}

//! The user record and the typed inputs that create or change one.

use std::{fmt, str::FromStr};

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

// ─── Identifier ──────────────────────────────────────────────────────────────

/// The opaque identifier assigned to a user when it is created.
///
/// Backed by a 12-byte ObjectId; on the wire and in URL paths it is the
/// 24-character lowercase hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(ObjectId);

impl UserId {
  /// Generate a fresh identifier.
  pub fn generate() -> Self { Self(ObjectId::new()) }

  pub fn from_object_id(oid: ObjectId) -> Self { Self(oid) }

  pub fn object_id(&self) -> ObjectId { self.0 }

  pub fn to_hex(&self) -> String { self.0.to_hex() }
}

impl From<ObjectId> for UserId {
  fn from(oid: ObjectId) -> Self { Self(oid) }
}

impl FromStr for UserId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    ObjectId::parse_str(s)
      .map(Self)
      .map_err(|_| Error::MalformedIdentifier(s.to_owned()))
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0.to_hex())
  }
}

impl Serialize for UserId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.0.to_hex())
  }
}

impl<'de> Deserialize<'de> for UserId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

// ─── User ────────────────────────────────────────────────────────────────────

/// A persisted user record, serialised exactly as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(rename = "_id")]
  pub id:        UserId,
  pub name:      String,
  pub email:     String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age:       Option<i64>,
  pub is_active: bool,
}

// ─── NewUser ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::UserStore::create`].
/// The identifier is always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
  pub name:      String,
  pub email:     String,
  pub age:       Option<i64>,
  pub is_active: bool,
}

impl NewUser {
  /// Convenience constructor: no age, active.
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      name:      name.into(),
      email:     email.into(),
      age:       None,
      is_active: true,
    }
  }

  pub fn with_age(mut self, age: i64) -> Self {
    self.age = Some(age);
    self
  }

  /// Attach a store-assigned identifier.
  pub fn into_user(self, id: UserId) -> User {
    User {
      id,
      name: self.name,
      email: self.email,
      age: self.age,
      is_active: self.is_active,
    }
  }
}

// ─── UserPatch ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::UserStore::update_by_id`]. Only the fields that
/// are `Some` are written; everything else keeps its stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
  pub name:      Option<String>,
  pub email:     Option<String>,
  pub age:       Option<i64>,
  pub is_active: Option<bool>,
}

impl UserPatch {
  /// The patch written by `deactivate_by_id`.
  pub fn deactivate() -> Self {
    Self {
      is_active: Some(false),
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.email.is_none()
      && self.age.is_none()
      && self.is_active.is_none()
  }

  /// Merge the patch into `user`. Returns `true` if any field changed.
  pub fn apply_to(&self, user: &mut User) -> bool {
    let mut changed = false;
    if let Some(name) = &self.name
      && *name != user.name
    {
      user.name = name.clone();
      changed = true;
    }
    if let Some(email) = &self.email
      && *email != user.email
    {
      user.email = email.clone();
      changed = true;
    }
    if let Some(age) = self.age
      && user.age != Some(age)
    {
      user.age = Some(age);
      changed = true;
    }
    if let Some(active) = self.is_active
      && active != user.is_active
    {
      user.is_active = active;
      changed = true;
    }
    changed
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn ana() -> User {
    NewUser::new("Ana", "ana@x.com")
      .with_age(30)
      .into_user("65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap())
  }

  #[test]
  fn user_serialises_with_wire_names() {
    let value = serde_json::to_value(ana()).unwrap();
    assert_eq!(
      value,
      json!({
        "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
        "name": "Ana",
        "email": "ana@x.com",
        "age": 30,
        "isActive": true,
      })
    );
  }

  #[test]
  fn absent_age_is_omitted() {
    let mut user = ana();
    user.age = None;
    let value = serde_json::to_value(user).unwrap();
    assert!(value.get("age").is_none());
  }

  #[test]
  fn malformed_identifier_is_rejected() {
    let err = "not-an-id".parse::<UserId>().unwrap_err();
    assert!(matches!(err, Error::MalformedIdentifier(ref s) if s == "not-an-id"));
  }

  #[test]
  fn identifier_display_matches_hex() {
    let id = UserId::generate();
    assert_eq!(id.to_string(), id.to_hex());
    assert_eq!(id.to_string().parse::<UserId>().unwrap(), id);
  }

  #[test]
  fn patch_touches_only_given_fields() {
    let mut user = ana();
    let patch = UserPatch {
      age: Some(5),
      ..UserPatch::default()
    };
    assert!(patch.apply_to(&mut user));
    assert_eq!(user.age, Some(5));
    assert_eq!(user.name, "Ana");
    assert_eq!(user.email, "ana@x.com");
  }

  #[test]
  fn patch_with_current_values_reports_no_change() {
    let mut user = ana();
    let patch = UserPatch {
      name: Some("Ana".into()),
      is_active: Some(true),
      ..UserPatch::default()
    };
    assert!(!patch.apply_to(&mut user));
  }

  #[test]
  fn deactivate_patch_only_sets_is_active() {
    let patch = UserPatch::deactivate();
    assert_eq!(patch.is_active, Some(false));
    assert!(patch.name.is_none() && patch.email.is_none() && patch.age.is_none());
    assert!(UserPatch::default().is_empty());
    assert!(!patch.is_empty());
  }
}

//! The BSON shape of a user and the update documents built from patches.
//!
//! Field names match what the original mongoose schema wrote (`isActive`,
//! `_id` as ObjectId), so existing collections read back unchanged.

use bson::{doc, oid::ObjectId, Document};
use roster_core::user::{NewUser, User, UserId, UserPatch};
use serde::{Deserialize, Serialize};

fn default_active() -> bool { true }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
  #[serde(rename = "_id")]
  pub id:        ObjectId,
  pub name:      String,
  pub email:     String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub age:       Option<i64>,
  #[serde(rename = "isActive", default = "default_active")]
  pub is_active: bool,
}

impl UserDocument {
  pub fn new(id: ObjectId, input: NewUser) -> Self {
    Self {
      id,
      name: input.name,
      email: input.email,
      age: input.age,
      is_active: input.is_active,
    }
  }

  pub fn into_user(self) -> User {
    User {
      id:        UserId::from_object_id(self.id),
      name:      self.name,
      email:     self.email,
      age:       self.age,
      is_active: self.is_active,
    }
  }
}

pub fn id_filter(id: UserId) -> Document { doc! { "_id": id.object_id() } }

/// The `$set` payload for `patch`: only the keys the patch carries.
pub fn set_document(patch: &UserPatch) -> Document {
  let mut set = Document::new();
  if let Some(name) = &patch.name {
    set.insert("name", name.as_str());
  }
  if let Some(email) = &patch.email {
    set.insert("email", email.as_str());
  }
  if let Some(age) = patch.age {
    set.insert("age", age);
  }
  if let Some(active) = patch.is_active {
    set.insert("isActive", active);
  }
  set
}

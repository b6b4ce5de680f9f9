//! Schema constraints checked before any input reaches a store.

use thiserror::Error;

use crate::user::{NewUser, UserPatch};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("`{0}` is required")]
  MissingField(&'static str),

  #[error("`{0}` must not be empty")]
  EmptyField(&'static str),

  #[error("`age` must be at least 0, got {0}")]
  NegativeAge(i64),
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
  if value.is_empty() {
    return Err(ValidationError::EmptyField(field));
  }
  Ok(())
}

fn non_negative(age: Option<i64>) -> Result<(), ValidationError> {
  match age {
    Some(a) if a < 0 => Err(ValidationError::NegativeAge(a)),
    _ => Ok(()),
  }
}

impl NewUser {
  pub fn validate(&self) -> Result<(), ValidationError> {
    non_empty("name", &self.name)?;
    non_empty("email", &self.email)?;
    non_negative(self.age)
  }
}

impl UserPatch {
  pub fn validate(&self) -> Result<(), ValidationError> {
    if let Some(name) = &self.name {
      non_empty("name", name)?;
    }
    if let Some(email) = &self.email {
      non_empty("email", email)?;
    }
    non_negative(self.age)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn valid_new_user_passes() {
    assert!(NewUser::new("Ana", "ana@x.com").with_age(0).validate().is_ok());
  }

  #[test]
  fn empty_name_fails() {
    let err = NewUser::new("", "ana@x.com").validate().unwrap_err();
    assert_eq!(err, ValidationError::EmptyField("name"));
  }

  #[test]
  fn empty_email_fails() {
    let err = NewUser::new("Ana", "").validate().unwrap_err();
    assert_eq!(err, ValidationError::EmptyField("email"));
  }

  #[test]
  fn negative_age_fails() {
    let err = NewUser::new("Ana", "ana@x.com")
      .with_age(-1)
      .validate()
      .unwrap_err();
    assert_eq!(err, ValidationError::NegativeAge(-1));
  }

  #[test]
  fn patch_checks_only_present_fields() {
    assert!(UserPatch::default().validate().is_ok());

    let patch = UserPatch {
      age: Some(-3),
      ..UserPatch::default()
    };
    assert_eq!(patch.validate().unwrap_err(), ValidationError::NegativeAge(-3));

    let patch = UserPatch {
      name: Some(String::new()),
      ..UserPatch::default()
    };
    assert_eq!(patch.validate().unwrap_err(), ValidationError::EmptyField("name"));
  }
}

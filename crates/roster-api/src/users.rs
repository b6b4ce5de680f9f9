//! Handlers for `/users` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/users` | Every user |
//! | `GET`    | `/users/active` | Users with `isActive: true` |
//! | `POST`   | `/users` | Body: [`CreateUserBody`]; returns the stored user |
//! | `PUT`    | `/users/:id` | Body: [`UpdateUserBody`]; returns an [`UpdateResult`] |
//! | `PUT`    | `/users/:id/deactivate` | Returns an [`UpdateResult`] |
//! | `DELETE` | `/users/:id/` | Returns a [`DeleteResult`] |
//!
//! Unknown ids are not 404s: writes report zero matched or deleted.
//!
//! A request without a `Content-Type` header is treated as an empty JSON
//! object. Any other unreadable body is an [`ApiError::Body`].

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use roster_core::{
  ValidationError,
  outcome::{DeleteResult, UpdateResult},
  store::UserStore,
  user::{NewUser, User, UserId, UserPatch},
};
use serde::Deserialize;

use crate::error::ApiError;

fn parse_id(raw: &str) -> Result<UserId, ApiError> { Ok(raw.parse()?) }

/// Unwrap an optional JSON body, falling back to the default (all-absent)
/// body when no `Content-Type` was sent.
fn read_body<T: Default>(
  body: Result<Option<Json<T>>, JsonRejection>,
) -> Result<T, ApiError> {
  Ok(body?.map(|Json(b)| b).unwrap_or_default())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /users`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<User>>, ApiError>
where
  S: UserStore,
{
  let users = store.list_all().await.map_err(ApiError::store)?;
  Ok(Json(users))
}

/// `GET /users/active`
pub async fn list_active<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: UserStore,
{
  let users = store.list_active().await.map_err(ApiError::store)?;
  Ok(Json(users))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /users`.
///
/// Every field is optional at the wire level so that a missing `name` or
/// `email` is reported by validation rather than by the JSON extractor.
/// Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserBody {
  pub name:      Option<String>,
  pub email:     Option<String>,
  pub age:       Option<i64>,
  pub is_active: Option<bool>,
}

impl TryFrom<CreateUserBody> for NewUser {
  type Error = ValidationError;

  fn try_from(b: CreateUserBody) -> Result<Self, Self::Error> {
    let input = NewUser {
      name:      b.name.ok_or(ValidationError::MissingField("name"))?,
      email:     b.email.ok_or(ValidationError::MissingField("email"))?,
      age:       b.age,
      is_active: b.is_active.unwrap_or(true),
    };
    input.validate()?;
    Ok(input)
  }
}

/// `POST /users` — returns 200 + the stored [`User`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Option<Json<CreateUserBody>>, JsonRejection>,
) -> Result<Json<User>, ApiError>
where
  S: UserStore,
{
  let input = NewUser::try_from(read_body(body)?)?;
  let user = store.create(input).await.map_err(ApiError::store)?;
  tracing::info!(id = %user.id, "user created");
  Ok(Json(user))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PUT /users/:id`. Absent and `null` keys are left
/// untouched; unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
  pub name:      Option<String>,
  pub email:     Option<String>,
  pub age:       Option<i64>,
  pub is_active: Option<bool>,
}

impl From<UpdateUserBody> for UserPatch {
  fn from(b: UpdateUserBody) -> Self {
    UserPatch {
      name:      b.name,
      email:     b.email,
      age:       b.age,
      is_active: b.is_active,
    }
  }
}

/// `PUT /users/:id` — body: any subset of `name`, `email`, `age`, `isActive`.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  body: Result<Option<Json<UpdateUserBody>>, JsonRejection>,
) -> Result<Json<UpdateResult>, ApiError>
where
  S: UserStore,
{
  let id = parse_id(&id)?;
  let patch = UserPatch::from(read_body(body)?);
  patch.validate()?;
  let result = store.update_by_id(id, patch).await.map_err(ApiError::store)?;
  Ok(Json(result))
}

// ─── Deactivate ───────────────────────────────────────────────────────────────

/// `PUT /users/:id/deactivate`
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<UpdateResult>, ApiError>
where
  S: UserStore,
{
  let id = parse_id(&id)?;
  let result = store.deactivate_by_id(id).await.map_err(ApiError::store)?;
  Ok(Json(result))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /users/:id/`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<DeleteResult>, ApiError>
where
  S: UserStore,
{
  let id = parse_id(&id)?;
  let result = store.delete_by_id(id).await.map_err(ApiError::store)?;
  Ok(Json(result))
}

//! [`SqliteStore`] — the SQLite implementation of [`UserStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{
  outcome::{DeleteResult, UpdateResult},
  store::UserStore,
  user::{NewUser, User, UserId, UserPatch},
};

use crate::{
  encode::{encode_id, RawUser, USER_COLUMNS},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A user store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_users(&self, only_active: bool) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let sql = if only_active {
          format!("SELECT {USER_COLUMNS} FROM users WHERE is_active = 1 ORDER BY rowid")
        } else {
          format!("SELECT {USER_COLUMNS} FROM users ORDER BY rowid")
        };
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  /// Merge `patch` into the row for `id` inside one transaction, writing only
  /// when something actually changed.
  async fn apply_patch(&self, id: UserId, patch: UserPatch) -> Result<UpdateResult> {
    let id_str = encode_id(id);
    let email = patch.email.clone();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current = tx
          .query_row(
            "SELECT name, email, age, is_active FROM users WHERE id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(User {
                id,
                name:      row.get(0)?,
                email:     row.get(1)?,
                age:       row.get(2)?,
                is_active: row.get(3)?,
              })
            },
          )
          .optional()?;

        let Some(mut user) = current else {
          return Ok(UpdateResult::unmatched());
        };

        if !patch.apply_to(&mut user) {
          return Ok(UpdateResult::new(1, 0));
        }

        tx.execute(
          "UPDATE users SET name = ?2, email = ?3, age = ?4, is_active = ?5 WHERE id = ?1",
          rusqlite::params![id_str, user.name, user.email, user.age, user.is_active],
        )?;
        tx.commit()?;
        Ok(UpdateResult::new(1, 1))
      })
      .await;

    outcome.map_err(|e| unique_email_violation(e, email))
  }
}

/// Translate a violation of the `email` UNIQUE constraint into
/// [`roster_core::Error::DuplicateEmail`]; other errors pass through.
fn unique_email_violation(err: tokio_rusqlite::Error, email: Option<String>) -> Error {
  let is_unique = matches!(
    &err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  );
  match email {
    Some(email) if is_unique => Error::Core(roster_core::Error::DuplicateEmail(email)),
    _ => Error::Database(err),
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<User>> { self.select_users(false).await }

  async fn list_active(&self) -> Result<Vec<User>> { self.select_users(true).await }

  async fn create(&self, input: NewUser) -> Result<User> {
    input.validate()?;

    let user = input.into_user(UserId::generate());

    let id_str    = encode_id(user.id);
    let name      = user.name.clone();
    let email     = user.email.clone();
    let age       = user.age;
    let is_active = user.is_active;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (id, name, email, age, is_active) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, name, email, age, is_active],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| unique_email_violation(e, Some(user.email.clone())))?;

    Ok(user)
  }

  async fn update_by_id(&self, id: UserId, patch: UserPatch) -> Result<UpdateResult> {
    patch.validate()?;
    self.apply_patch(id, patch).await
  }

  async fn deactivate_by_id(&self, id: UserId) -> Result<UpdateResult> {
    self.apply_patch(id, UserPatch::deactivate()).await
  }

  async fn delete_by_id(&self, id: UserId) -> Result<DeleteResult> {
    let id_str = encode_id(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM users WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    Ok(DeleteResult::new(deleted as u64))
  }

  async fn shutdown(&self) -> Result<()> {
    self.conn.clone().close().await?;
    Ok(())
  }
}

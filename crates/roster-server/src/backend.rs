//! Backend selection from the connection string, and a [`UserStore`] that
//! dispatches to whichever backend was chosen.

use std::path::PathBuf;

use roster_core::{
  outcome::{DeleteResult, UpdateResult},
  store::UserStore,
  user::{NewUser, User, UserId, UserPatch},
};
use roster_store_mongo::MongoStore;
use roster_store_sqlite::SqliteStore;
use thiserror::Error;

// ─── Connection string ───────────────────────────────────────────────────────

/// What a connection string points at, decided by its scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
  /// `mongodb://…` or `mongodb+srv://…`, passed to the driver verbatim.
  Mongo(String),
  /// `sqlite://<path>`
  SqliteFile(PathBuf),
  /// `sqlite::memory:`
  SqliteMemory,
}

impl StoreUrl {
  pub fn parse(url: &str) -> Option<Self> {
    if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
      return Some(Self::Mongo(url.to_owned()));
    }
    if url == "sqlite::memory:" {
      return Some(Self::SqliteMemory);
    }
    url
      .strip_prefix("sqlite://")
      .filter(|path| !path.is_empty())
      .map(|path| Self::SqliteFile(PathBuf::from(path)))
  }
}

// ─── Backend ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum BackendError {
  #[error(transparent)]
  Core(#[from] roster_core::Error),

  #[error(transparent)]
  Mongo(#[from] roster_store_mongo::Error),

  #[error(transparent)]
  Sqlite(#[from] roster_store_sqlite::Error),
}

/// The store the server runs against.
///
/// `Unavailable` keeps the server accepting requests when no store could be
/// set up at start-up; every store call then fails.
#[derive(Clone)]
pub enum Backend {
  Mongo(MongoStore),
  Sqlite(SqliteStore),
  Unavailable(String),
}

impl Backend {
  /// Set up the backend named by `url`. Never fails: problems are logged and
  /// yield [`Backend::Unavailable`].
  pub async fn connect(url: Option<&str>) -> Self {
    let Some(url) = url else {
      tracing::error!("ATLAS_URL is not set; running without a store");
      return Self::Unavailable("no connection string configured".to_owned());
    };

    let Some(target) = StoreUrl::parse(url) else {
      tracing::error!("unsupported connection string scheme; running without a store");
      return Self::Unavailable("unsupported connection string".to_owned());
    };

    let opened = match target {
      StoreUrl::Mongo(url) => MongoStore::connect(&url)
        .await
        .map(Self::Mongo)
        .map_err(BackendError::from),
      StoreUrl::SqliteFile(path) => SqliteStore::open(&path)
        .await
        .map(Self::Sqlite)
        .map_err(BackendError::from),
      StoreUrl::SqliteMemory => SqliteStore::open_in_memory()
        .await
        .map(Self::Sqlite)
        .map_err(BackendError::from),
    };

    opened.unwrap_or_else(|e| {
      tracing::error!(error = %e, "error connecting to the store");
      Self::Unavailable(e.to_string())
    })
  }

  pub fn kind(&self) -> &'static str {
    match self {
      Self::Mongo(_) => "mongodb",
      Self::Sqlite(_) => "sqlite",
      Self::Unavailable(_) => "unavailable",
    }
  }

  /// Logged once [`Backend::verify`] succeeds.
  pub fn connected_message(&self) -> &'static str {
    match self {
      Self::Mongo(_) => "Connected to MongoDB",
      Self::Sqlite(_) => "Connected to SQLite",
      Self::Unavailable(_) => "No store connected",
    }
  }

  /// Check that the store is reachable. For MongoDB this also creates the
  /// unique `email` index.
  pub async fn verify(&self) -> Result<(), BackendError> {
    match self {
      Self::Mongo(store) => Ok(store.verify().await?),
      Self::Sqlite(_) => Ok(()),
      Self::Unavailable(reason) => Err(roster_core::Error::Unavailable(reason.clone()).into()),
    }
  }
}

/// Run `$call` against whichever concrete store `$self` holds.
macro_rules! dispatch {
  ($self:ident, $store:ident => $call:expr) => {
    match $self {
      Backend::Mongo($store) => Ok($call.await?),
      Backend::Sqlite($store) => Ok($call.await?),
      Backend::Unavailable(reason) => {
        Err(roster_core::Error::Unavailable(reason.clone()).into())
      }
    }
  };
}

impl UserStore for Backend {
  type Error = BackendError;

  async fn list_all(&self) -> Result<Vec<User>, BackendError> {
    dispatch!(self, s => s.list_all())
  }

  async fn list_active(&self) -> Result<Vec<User>, BackendError> {
    dispatch!(self, s => s.list_active())
  }

  async fn create(&self, input: NewUser) -> Result<User, BackendError> {
    dispatch!(self, s => s.create(input))
  }

  async fn update_by_id(
    &self,
    id: UserId,
    patch: UserPatch,
  ) -> Result<UpdateResult, BackendError> {
    dispatch!(self, s => s.update_by_id(id, patch))
  }

  async fn deactivate_by_id(&self, id: UserId) -> Result<UpdateResult, BackendError> {
    dispatch!(self, s => s.deactivate_by_id(id))
  }

  async fn delete_by_id(&self, id: UserId) -> Result<DeleteResult, BackendError> {
    dispatch!(self, s => s.delete_by_id(id))
  }

  async fn shutdown(&self) -> Result<(), BackendError> {
    match self {
      Self::Mongo(store) => Ok(store.shutdown().await?),
      Self::Sqlite(store) => Ok(store.shutdown().await?),
      Self::Unavailable(_) => Ok(()),
    }
  }
}

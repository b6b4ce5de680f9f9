//! [`MongoStore`] — the MongoDB implementation of [`UserStore`].

use std::sync::Arc;

use bson::doc;
use futures::TryStreamExt as _;
use mongodb::{options::IndexOptions, Client, Collection, IndexModel};
use tokio::sync::OnceCell;

use roster_core::{
  outcome::{DeleteResult, UpdateResult},
  store::UserStore,
  user::{NewUser, User, UserId, UserPatch},
};

use crate::{
  document::{id_filter, set_document, UserDocument},
  error::duplicate_email,
  Result,
};

/// Collection holding user documents.
pub const COLLECTION_NAME: &str = "users";

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "test";

/// A user store backed by a MongoDB collection.
///
/// Cloning is cheap — the driver client is reference-counted and pools its
/// own connections. Clones share the index state.
#[derive(Clone)]
pub struct MongoStore {
  client:  Client,
  users:   Collection<UserDocument>,
  indexes: Arc<OnceCell<()>>,
}

impl MongoStore {
  /// Build a client for `url`.
  ///
  /// This only parses the connection string (and resolves SRV records); the
  /// driver connects lazily. Call [`MongoStore::verify`] to find out whether
  /// the deployment is actually reachable.
  pub async fn connect(url: &str) -> Result<Self> {
    let client = Client::with_uri_str(url).await?;
    Ok(Self::from_client(client))
  }

  pub fn from_client(client: Client) -> Self {
    let database = client
      .default_database()
      .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
    let users = database.collection(COLLECTION_NAME);
    Self {
      client,
      users,
      indexes: Arc::new(OnceCell::new()),
    }
  }

  pub fn database_name(&self) -> String { self.users.namespace().db }

  /// Create the unique `email` index once per store.
  ///
  /// Inserts and updates await this before writing. A failed attempt leaves
  /// the cell empty, so the next write tries again.
  pub async fn ensure_indexes(&self) -> Result<()> {
    self
      .indexes
      .get_or_try_init(|| async {
        let index = IndexModel::builder()
          .keys(doc! { "email": 1 })
          .options(IndexOptions::builder().unique(true).build())
          .build();
        self.users.create_index(index).await?;
        tracing::debug!(collection = COLLECTION_NAME, "unique email index ensured");
        Ok::<_, crate::Error>(())
      })
      .await?;
    Ok(())
  }

  /// Ensure the unique `email` index exists, then ping the deployment.
  pub async fn verify(&self) -> Result<()> {
    self.ensure_indexes().await?;

    self
      .client
      .database(&self.database_name())
      .run_command(doc! { "ping": 1 })
      .await?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn indexes_ensured(&self) -> bool { self.indexes.initialized() }

  async fn find(&self, filter: bson::Document) -> Result<Vec<User>> {
    let docs: Vec<UserDocument> = self.users.find(filter).await?.try_collect().await?;
    Ok(docs.into_iter().map(UserDocument::into_user).collect())
  }

  async fn apply_patch(&self, id: UserId, patch: UserPatch) -> Result<UpdateResult> {
    self.ensure_indexes().await?;

    // An empty `$set` is rejected by the server; report the match instead.
    if patch.is_empty() {
      let matched = self.users.count_documents(id_filter(id)).await?;
      return Ok(UpdateResult::new(matched, 0));
    }

    let update = doc! { "$set": set_document(&patch) };
    let result = self
      .users
      .update_one(id_filter(id), update)
      .await
      .map_err(|e| duplicate_email(e, patch.email.clone()))?;

    Ok(UpdateResult::new(result.matched_count, result.modified_count))
  }
}

impl UserStore for MongoStore {
  type Error = crate::Error;

  async fn list_all(&self) -> Result<Vec<User>> { self.find(doc! {}).await }

  async fn list_active(&self) -> Result<Vec<User>> {
    self.find(doc! { "isActive": true }).await
  }

  async fn create(&self, input: NewUser) -> Result<User> {
    input.validate()?;
    self.ensure_indexes().await?;

    let email = input.email.clone();
    let document = UserDocument::new(UserId::generate().object_id(), input);

    self
      .users
      .insert_one(&document)
      .await
      .map_err(|e| duplicate_email(e, Some(email)))?;

    Ok(document.into_user())
  }

  async fn update_by_id(&self, id: UserId, patch: UserPatch) -> Result<UpdateResult> {
    patch.validate()?;
    self.apply_patch(id, patch).await
  }

  async fn deactivate_by_id(&self, id: UserId) -> Result<UpdateResult> {
    self.apply_patch(id, UserPatch::deactivate()).await
  }

  async fn delete_by_id(&self, id: UserId) -> Result<DeleteResult> {
    let result = self.users.delete_one(id_filter(id)).await?;
    Ok(DeleteResult::new(result.deleted_count))
  }

  async fn shutdown(&self) -> Result<()> {
    self.client.clone().shutdown().await;
    Ok(())
  }
}

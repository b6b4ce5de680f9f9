//! Document mapping tests, plus store tests against a MongoDB container.
//!
//! The container tests need a reachable Docker daemon. Each one starts its
//! own `mongo:7.0` container, so they share no state.

use std::time::Duration;

use bson::{doc, oid::ObjectId};
use testcontainers::{
  ContainerAsync, GenericImage, ImageExt,
  core::{IntoContainerPort, WaitFor},
  runners::AsyncRunner,
};
use roster_core::{
  store::UserStore,
  user::{NewUser, UserId, UserPatch},
};

use crate::{
  document::{id_filter, set_document, UserDocument},
  Error, MongoStore,
};

// ─── Document mapping ────────────────────────────────────────────────────────

#[test]
fn set_document_carries_only_patched_keys() {
  let patch = UserPatch {
    age: Some(5),
    is_active: Some(false),
    ..UserPatch::default()
  };
  assert_eq!(set_document(&patch), doc! { "age": 5_i64, "isActive": false });
  assert!(set_document(&UserPatch::default()).is_empty());
}

#[test]
fn id_filter_matches_object_id() {
  let id = UserId::generate();
  assert_eq!(id_filter(id), doc! { "_id": id.object_id() });
}

#[test]
fn new_document_round_trips_into_user() {
  let oid = ObjectId::new();
  let document = UserDocument::new(oid, NewUser::new("Ana", "ana@x.com").with_age(30));
  let user = document.into_user();

  assert_eq!(user.id.object_id(), oid);
  assert_eq!(user.name, "Ana");
  assert_eq!(user.age, Some(30));
  assert!(user.is_active);
}

#[test]
fn missing_is_active_defaults_to_true() {
  let oid = ObjectId::new();
  let raw = doc! { "_id": oid, "name": "Ana", "email": "ana@x.com", "__v": 0 };
  let document: UserDocument = bson::deserialize_from_document(raw).unwrap();
  assert!(document.is_active);
  assert_eq!(document.age, None);
}

// ─── Live store ──────────────────────────────────────────────────────────────

/// Start a MongoDB container and connect a store to it. The container stops
/// when the returned handle is dropped, so keep it alive for the whole test.
async fn live_store() -> (ContainerAsync<GenericImage>, MongoStore) {
  let mongo = GenericImage::new("mongo", "7.0")
    .with_exposed_port(27017.tcp())
    .with_wait_for(WaitFor::message_on_stdout("Waiting for connections"))
    .with_startup_timeout(Duration::from_secs(60))
    .start()
    .await
    .expect("start mongo container");
  let port = mongo.get_host_port_ipv4(27017).await.expect("mapped port");

  let store = MongoStore::connect(&format!("mongodb://127.0.0.1:{port}/roster_test"))
    .await
    .expect("client");
  assert_eq!(store.database_name(), "roster_test");
  (mongo, store)
}

#[tokio::test]
async fn live_crud_cycle() {
  let (_mongo, s) = live_store().await;
  s.verify().await.unwrap();

  let ana = s.create(NewUser::new("Ana", "ana@x.com").with_age(30)).await.unwrap();
  let bo = s.create(NewUser::new("Bo", "bo@x.com")).await.unwrap();

  let patch = UserPatch {
    age: Some(5),
    ..UserPatch::default()
  };
  let updated = s.update_by_id(ana.id, patch).await.unwrap();
  assert_eq!((updated.matched_count, updated.modified_count), (1, 1));

  let deactivated = s.deactivate_by_id(ana.id).await.unwrap();
  assert_eq!((deactivated.matched_count, deactivated.modified_count), (1, 1));

  let active = s.list_active().await.unwrap();
  assert_eq!(active, vec![bo.clone()]);

  let all = s.list_all().await.unwrap();
  let stored = all.iter().find(|u| u.id == ana.id).unwrap();
  assert_eq!(stored.age, Some(5));
  assert_eq!(stored.name, "Ana");
  assert_eq!(stored.email, "ana@x.com");
  assert!(!stored.is_active);

  assert_eq!(s.delete_by_id(ana.id).await.unwrap().deleted_count, 1);
  assert_eq!(s.delete_by_id(ana.id).await.unwrap().deleted_count, 0);
  assert_eq!(s.list_all().await.unwrap(), vec![bo]);

  s.shutdown().await.unwrap();
}

#[tokio::test]
async fn live_duplicate_email_conflicts() {
  let (_mongo, s) = live_store().await;
  s.verify().await.unwrap();

  s.create(NewUser::new("Ana", "ana@x.com")).await.unwrap();
  let err = s.create(NewUser::new("Ana 2", "ana@x.com")).await.unwrap_err();
  assert!(matches!(err, Error::Core(roster_core::Error::DuplicateEmail(_))));
  assert_eq!(s.list_all().await.unwrap().len(), 1);

  s.shutdown().await.unwrap();
}

#[tokio::test]
async fn live_first_write_creates_unique_index() {
  let (_mongo, s) = live_store().await;
  assert!(!s.indexes_ensured());

  // No verify() here: the write path alone has to guard uniqueness.
  s.create(NewUser::new("Ana", "ana@x.com")).await.unwrap();
  assert!(s.indexes_ensured());

  let err = s.create(NewUser::new("Ana 2", "ana@x.com")).await.unwrap_err();
  assert!(matches!(err, Error::Core(roster_core::Error::DuplicateEmail(_))));
  assert_eq!(s.list_all().await.unwrap().len(), 1);

  s.shutdown().await.unwrap();
}

#[tokio::test]
async fn live_update_to_taken_email_conflicts() {
  let (_mongo, s) = live_store().await;

  s.create(NewUser::new("Ana", "ana@x.com")).await.unwrap();
  let bo = s.create(NewUser::new("Bo", "bo@x.com")).await.unwrap();

  let patch = UserPatch {
    email: Some("ana@x.com".to_owned()),
    ..UserPatch::default()
  };
  let err = s.update_by_id(bo.id, patch).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(roster_core::Error::DuplicateEmail(ref email)) if email == "ana@x.com"
  ));

  let all = s.list_all().await.unwrap();
  let stored = all.iter().find(|u| u.id == bo.id).unwrap();
  assert_eq!(stored.email, "bo@x.com");

  s.shutdown().await.unwrap();
}

#[tokio::test]
async fn live_repeated_deactivate_modifies_nothing() {
  let (_mongo, s) = live_store().await;

  let ana = s.create(NewUser::new("Ana", "ana@x.com")).await.unwrap();

  let first = s.deactivate_by_id(ana.id).await.unwrap();
  assert_eq!((first.matched_count, first.modified_count), (1, 1));
  let second = s.deactivate_by_id(ana.id).await.unwrap();
  assert_eq!((second.matched_count, second.modified_count), (1, 0));

  s.shutdown().await.unwrap();
}

#[tokio::test]
async fn live_empty_patch_matches_without_modifying() {
  let (_mongo, s) = live_store().await;

  let ana = s.create(NewUser::new("Ana", "ana@x.com").with_age(30)).await.unwrap();

  let result = s.update_by_id(ana.id, UserPatch::default()).await.unwrap();
  assert_eq!((result.matched_count, result.modified_count), (1, 0));
  assert_eq!(s.list_all().await.unwrap(), vec![ana]);

  s.shutdown().await.unwrap();
}

#[tokio::test]
async fn live_unknown_id_reports_zero_matched() {
  let (_mongo, s) = live_store().await;

  let result = s.update_by_id(UserId::generate(), UserPatch::default()).await.unwrap();
  assert_eq!((result.matched_count, result.modified_count), (0, 0));
  let result = s.deactivate_by_id(UserId::generate()).await.unwrap();
  assert_eq!(result.matched_count, 0);
  assert_eq!(s.delete_by_id(UserId::generate()).await.unwrap().deleted_count, 0);

  s.shutdown().await.unwrap();
}

//! Repositories must not leave claimed indexes behind when a later write fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use folioadvisor_core::errors::{DatabaseError, Error};
use folioadvisor_core::testing::fixtures::{balanced_profile, new_user};
use folioadvisor_core::Result;
use folioadvisor_storage_kv::{record_store, KeyValueStore, MemoryKvStore};

/// Wraps the in-process store and fails the next write whose key or set
/// matches `target` exactly once.
struct FailOnceKv {
    inner: MemoryKvStore,
    target: String,
    armed: AtomicBool,
}

impl FailOnceKv {
    fn new(target: &str) -> Self {
        Self {
            inner: MemoryKvStore::new(),
            target: target.to_string(),
            armed: AtomicBool::new(true),
        }
    }

    fn trip(&self, key: &str) -> Result<()> {
        if key == self.target && self.armed.swap(false, Ordering::SeqCst) {
            return Err(Error::Database(DatabaseError::ConnectionFailed(
                "connection reset".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FailOnceKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.trip(key)?;
        self.inner.set(key, value).await
    }

    async fn set_nx(&self, key: &str, value: &str) -> Result<bool> {
        self.inner.set_nx(key, value).await
    }

    async fn set_existing(&self, key: &str, value: &str) -> Result<bool> {
        self.trip(key)?;
        self.inner.set_existing(key, value).await
    }

    async fn del(&self, key: &str) -> Result<bool> {
        self.inner.del(key).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.inner.incr(key).await
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        self.trip(key)?;
        self.inner.sadd(key, member).await
    }

    async fn srem(&self, key: &str, member: &str) -> Result<()> {
        self.inner.srem(key, member).await
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        self.inner.smembers(key).await
    }
}

#[tokio::test]
async fn test_failed_user_write_releases_username() {
    let store = record_store(Arc::new(FailOnceKv::new("user:1")));

    let err = store
        .users
        .create_user(new_user("alice"))
        .await
        .expect_err("first write is dropped");
    assert!(matches!(
        err,
        Error::Database(DatabaseError::ConnectionFailed(_))
    ));
    assert!(store
        .users
        .get_user_by_username("alice")
        .await
        .unwrap()
        .is_none());

    let alice = store
        .users
        .create_user(new_user("alice"))
        .await
        .expect("name is free again");
    let found = store.users.get_user_by_username("alice").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(alice.id));
    assert_eq!(store.users.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_user_index_add_releases_username() {
    let store = record_store(Arc::new(FailOnceKv::new("users:all")));

    assert!(store.users.create_user(new_user("bob")).await.is_err());
    assert!(store.users.get_user(1).await.unwrap().is_none());

    let bob = store.users.create_user(new_user("bob")).await.unwrap();
    let listed: Vec<i64> = store
        .users
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(listed, vec![bob.id]);
}

#[tokio::test]
async fn test_failed_profile_listing_releases_profile_index() {
    let store = record_store(Arc::new(FailOnceKv::new("profiles:all")));
    let user = store.users.create_user(new_user("carol")).await.unwrap();

    assert!(store
        .profiles
        .upsert_profile(user.id, balanced_profile(5_000.0))
        .await
        .is_err());
    assert!(store
        .profiles
        .get_profile_by_user_id(user.id)
        .await
        .unwrap()
        .is_none());

    let saved = store
        .profiles
        .upsert_profile(user.id, balanced_profile(5_000.0))
        .await
        .unwrap();
    let listed = store.profiles.list_profiles().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, saved.id);
}

//! JSON document helpers shared by the repositories.

use std::sync::Arc;

use folioadvisor_core::errors::{DatabaseError, Error};
use folioadvisor_core::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::kv::KeyValueStore;

pub(crate) type SharedKv = Arc<dyn KeyValueStore>;

pub(crate) async fn read<T: DeserializeOwned>(kv: &SharedKv, key: &str) -> Result<Option<T>> {
    match kv.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub(crate) async fn write<T: Serialize>(kv: &SharedKv, key: &str, doc: &T) -> Result<()> {
    kv.set(key, &serde_json::to_string(doc)?).await
}

/// Reads an id stored as a decimal string under `key`.
pub(crate) async fn read_id(kv: &SharedKv, key: &str) -> Result<Option<i64>> {
    match kv.get(key).await? {
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            Error::Database(DatabaseError::Corrupt(format!(
                "'{key}' does not hold an id: {raw}"
            )))
        }),
        None => Ok(None),
    }
}

/// Members of an id set, ascending. Unparseable members are skipped.
pub(crate) async fn sorted_ids(kv: &SharedKv, set_key: &str) -> Result<Vec<i64>> {
    let mut ids: Vec<i64> = kv
        .smembers(set_key)
        .await?
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    ids.sort_unstable();
    Ok(ids)
}

/// Loads every document whose id is in `set_key`, in ascending id order.
/// Ids whose document has been removed in the meantime are skipped.
pub(crate) async fn read_all<T, F>(kv: &SharedKv, set_key: &str, key_of: F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: Fn(i64) -> String,
{
    let mut docs = Vec::new();
    for id in sorted_ids(kv, set_key).await? {
        if let Some(doc) = read(kv, &key_of(id)).await? {
            docs.push(doc);
        }
    }
    Ok(docs)
}

/// Fails the way a foreign key would when `user_id` has no user document.
pub(crate) async fn require_user(kv: &SharedKv, user_id: i64) -> Result<()> {
    match kv.get(&crate::keys::user(user_id)).await? {
        Some(_) => Ok(()),
        None => Err(Error::Database(DatabaseError::ForeignKeyViolation(format!(
            "user {user_id} does not exist"
        )))),
    }
}

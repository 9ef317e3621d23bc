//! In-process key-value store used for tests and single-node runs without Redis.

use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use folioadvisor_core::Result;

use crate::errors::KvError;
use crate::kv::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryKvStore {
    strings: DashMap<String, String>,
    sets: DashMap<String, HashSet<String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.strings.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.strings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str) -> Result<bool> {
        match self.strings.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                Ok(true)
            }
        }
    }

    async fn set_existing(&self, key: &str, value: &str) -> Result<bool> {
        match self.strings.get_mut(key) {
            Some(mut current) => {
                *current = value.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let removed_string = self.strings.remove(key).is_some();
        let removed_set = self.sets.remove(key).is_some();
        Ok(removed_string || removed_set)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entry = self
            .strings
            .entry(key.to_string())
            .or_insert_with(|| "0".to_string());
        let next = entry
            .parse::<i64>()
            .map_err(|_| KvError::WrongType(key.to_string()))?
            + 1;
        *entry = next.to_string();
        Ok(next)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        self.sets
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string());
        Ok(())
    }

    async fn srem(&self, key: &str, member: &str) -> Result<()> {
        if let Some(mut set) = self.sets.get_mut(key) {
            set.remove(member);
        }
        Ok(())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        Ok(self
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_nx_only_first_writer_wins() {
        let kv = MemoryKvStore::new();
        assert!(kv.set_nx("k", "a").await.unwrap());
        assert!(!kv.set_nx("k", "b").await.unwrap());
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_set_existing_never_creates() {
        let kv = MemoryKvStore::new();
        assert!(!kv.set_existing("k", "a").await.unwrap());
        assert!(kv.get("k").await.unwrap().is_none());
        kv.set("k", "a").await.unwrap();
        assert!(kv.set_existing("k", "b").await.unwrap());
        assert_eq!(kv.get("k").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_incr_starts_from_zero() {
        let kv = MemoryKvStore::new();
        assert_eq!(kv.incr("counter:x").await.unwrap(), 1);
        assert_eq!(kv.incr("counter:x").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_incr_rejects_non_integer() {
        let kv = MemoryKvStore::new();
        kv.set("counter:x", "abc").await.unwrap();
        assert!(kv.incr("counter:x").await.is_err());
    }

    #[tokio::test]
    async fn test_set_membership() {
        let kv = MemoryKvStore::new();
        kv.sadd("s", "1").await.unwrap();
        kv.sadd("s", "1").await.unwrap();
        kv.sadd("s", "2").await.unwrap();
        kv.srem("s", "1").await.unwrap();
        assert_eq!(kv.smembers("s").await.unwrap(), vec!["2".to_string()]);
        assert!(kv.smembers("missing").await.unwrap().is_empty());
    }
}

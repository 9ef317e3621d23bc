//! Key-value storage implementation for the portfolio advisor.
//!
//! Records live as JSON documents in a key-value server, with id sets and
//! INCR counters beside them. Two servers are supported: Redis, and an
//! in-process map for tests and Redis-less runs.

pub mod errors;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod redis_store;

mod documents;
mod profiles;
mod projects;
mod recommendations;
mod users;

use std::sync::Arc;

use folioadvisor_core::{RecordStore, Result};

pub use errors::KvError;
pub use kv::KeyValueStore;
pub use memory::MemoryKvStore;
pub use profiles::KvProfileRepository;
pub use projects::KvProjectRepository;
pub use recommendations::KvRecommendationRepository;
pub use redis_store::RedisKvStore;
pub use users::KvUserRepository;

/// Builds a `RecordStore` over any key-value server.
pub fn record_store(kv: Arc<dyn KeyValueStore>) -> RecordStore {
    RecordStore::new(
        Arc::new(KvUserRepository::new(Arc::clone(&kv))),
        Arc::new(KvProfileRepository::new(Arc::clone(&kv))),
        Arc::new(KvProjectRepository::new(Arc::clone(&kv))),
        Arc::new(KvRecommendationRepository::new(kv)),
    )
}

/// A `RecordStore` over a fresh in-process map.
pub fn memory_record_store() -> RecordStore {
    record_store(Arc::new(MemoryKvStore::new()))
}

/// A `RecordStore` over Redis at `redis_url`. Does not connect until first use.
pub fn redis_record_store(redis_url: &str) -> Result<RecordStore> {
    Ok(record_store(Arc::new(RedisKvStore::new(redis_url)?)))
}

//! Redis-backed key-value store.
//!
//! The connection is opened on first use. `ConnectionManager` re-establishes
//! it transparently after a failure, so a Redis restart costs the in-flight
//! command and nothing more.

use async_trait::async_trait;
use folioadvisor_core::Result;
use log::{debug, info};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;

use crate::errors::KvError;
use crate::kv::KeyValueStore;

pub struct RedisKvStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
}

impl RedisKvStore {
    /// Validates `redis_url` without connecting.
    pub fn new(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).map_err(KvError::from)?;
        Ok(Self {
            client,
            connection: OnceCell::new(),
        })
    }

    async fn conn(&self) -> Result<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = self
                    .client
                    .get_connection_manager()
                    .await
                    .map_err(KvError::from)?;
                info!("Connected to Redis");
                Ok::<_, KvError>(manager)
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl KeyValueStore for RedisKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.get(key).await.map_err(KvError::from)?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.set(key, value).await.map_err(KvError::from)?;
        Ok(())
    }

    async fn set_nx(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        let written: bool = conn.set_nx(key, value).await.map_err(KvError::from)?;
        if !written {
            debug!("SETNX lost on {}", key);
        }
        Ok(written)
    }

    async fn set_existing(&self, key: &str, value: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("XX")
            .query_async(&mut conn)
            .await
            .map_err(KvError::from)?;
        Ok(reply.is_some())
    }

    async fn del(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        let removed: i64 = conn.del(key).await.map_err(KvError::from)?;
        Ok(removed > 0)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.incr(key, 1i64).await.map_err(KvError::from)?)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn().await?;
        let _: i64 = conn.sadd(key, member).await.map_err(KvError::from)?;
        Ok(())
    }

    async fn srem(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn().await?;
        let _: i64 = conn.srem(key, member).await.map_err(KvError::from)?;
        Ok(())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.smembers(key).await.map_err(KvError::from)?)
    }
}

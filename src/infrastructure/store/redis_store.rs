//! Redis-backed store.

use super::service::{KvStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis store keeping each document as a plain string value.
///
/// Uses `ConnectionManager` for automatic reconnection. Unlike a cache, errors
/// are propagated: a failed write must not look like a successful one.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key_prefix` - namespace prepended to every key (`REDIS_KEY_PREFIX`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, key_prefix: &str) -> StoreResult<Self> {
        info!("Connecting to Redis store");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis store");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

fn op_error(e: redis::RedisError) -> StoreError {
    StoreError::Operation(e.to_string())
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        let value = conn
            .get::<_, Option<String>>(self.build_key(key))
            .await
            .map_err(op_error)?;
        debug!(key, hit = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(self.build_key(key), value)
            .await
            .map_err(op_error)?;
        debug!(key, bytes = value.len(), "Redis SET");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.del::<_, i32>(self.build_key(key))
            .await
            .map_err(op_error)?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

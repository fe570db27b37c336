//! Redis-backed mapping store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

use crate::domain::repositories::{MappingRepository, StoreError, WriteMode};

/// Mapping store keeping one Redis string per code.
///
/// Keys are `<namespace>:<code>` and never expire. Uses `ConnectionManager`
/// for connection reuse and automatic reconnects. Unlike a cache, errors are
/// propagated: a failed lookup must not read as "not found".
pub struct RedisMappingRepository {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisMappingRepository {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `namespace` - Key prefix identifying this store (e.g., `"mappings"`)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for an empty namespace and
    /// [`StoreError::Unavailable`] if the connection or PING fails.
    pub async fn connect(redis_url: &str, namespace: &str) -> Result<Self, StoreError> {
        if namespace.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "Redis key namespace must not be empty".to_string(),
            ));
        }

        info!("Connecting to Redis store '{}'", namespace);

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::InvalidConfig(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::Unavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: key_prefix(namespace),
        })
    }

    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

fn key_prefix(namespace: &str) -> String {
    format!("{}:", namespace.trim().trim_end_matches(':'))
}

#[async_trait]
impl MappingRepository for RedisMappingRepository {
    async fn put(&self, code: &str, target_url: &str, mode: WriteMode) -> Result<(), StoreError> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        match mode {
            WriteMode::CreateOnly => {
                let created: bool = conn.set_nx(&key, target_url).await.map_err(|e| {
                    error!("Redis SETNX error for {}: {}", code, e);
                    StoreError::from(e)
                })?;

                if !created {
                    return Err(StoreError::Conflict(code.to_string()));
                }
            }
            WriteMode::Upsert => {
                conn.set::<_, _, ()>(&key, target_url).await.map_err(|e| {
                    error!("Redis SET error for {}: {}", code, e);
                    StoreError::from(e)
                })?;
            }
        }

        debug!("Store PUT: {} -> {}", code, target_url);
        Ok(())
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&key).await.map_err(|e| {
            error!("Redis GET error for {}: {}", code, e);
            StoreError::from(e)
        })
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

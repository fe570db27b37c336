//! Mapping store backends.
//!
//! The backend is picked from the scheme of the store URL:
//!
//! | Scheme | Backend |
//! |---|---|
//! | `postgres://`, `postgresql://` | [`PgMappingRepository`] |
//! | `redis://`, `rediss://` | [`RedisMappingRepository`] |
//! | `memory://` | [`MemoryMappingRepository`] |
//!
//! The store name (table or key namespace) is passed separately.

mod memory_mapping_repository;
mod pg_mapping_repository;
mod redis_mapping_repository;

pub use memory_mapping_repository::MemoryMappingRepository;
pub use pg_mapping_repository::PgMappingRepository;
pub use redis_mapping_repository::RedisMappingRepository;

use std::sync::Arc;
use std::time::Duration;

use crate::domain::repositories::{MappingRepository, StoreError};

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            return Self::Rejected(db.message().to_string());
        }

        match &e {
            sqlx::Error::Configuration(_) => Self::InvalidConfig(e.to_string()),
            sqlx::Error::RowNotFound
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. } => Self::Rejected(e.to_string()),
            _ => Self::Unavailable(e.to_string()),
        }
    }
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        Self::Unavailable(e.to_string())
    }
}

/// Storage backends selectable by URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Redis,
    Memory,
}

impl StoreBackend {
    /// Determines the backend from a store URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] for unknown schemes.
    pub fn from_url(store_url: &str) -> Result<Self, StoreError> {
        let scheme = store_url
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .ok_or_else(|| {
                StoreError::InvalidConfig(format!("store URL has no scheme: {}", store_url))
            })?;

        match scheme.as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "redis" | "rediss" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(StoreError::InvalidConfig(format!(
                "unsupported store scheme '{}'",
                other
            ))),
        }
    }
}

/// Connects to the store at `store_url`, using `store_name` as the table
/// or key namespace.
///
/// # Errors
///
/// Returns [`StoreError::InvalidConfig`] for a bad URL or name, and
/// [`StoreError::Unavailable`] if the backend cannot be reached.
pub async fn connect_repository(
    store_url: &str,
    store_name: &str,
    connect_timeout: Duration,
) -> Result<Arc<dyn MappingRepository>, StoreError> {
    let repository: Arc<dyn MappingRepository> = match StoreBackend::from_url(store_url)? {
        StoreBackend::Postgres => {
            Arc::new(PgMappingRepository::connect(store_url, store_name, connect_timeout).await?)
        }
        StoreBackend::Redis => {
            Arc::new(RedisMappingRepository::connect(store_url, store_name).await?)
        }
        StoreBackend::Memory => Arc::new(MemoryMappingRepository::new()),
    };

    tracing::info!(store = store_name, "Mapping store connected");
    Ok(repository)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_url() {
        assert_eq!(
            StoreBackend::from_url("postgres://u:p@localhost/db").unwrap(),
            StoreBackend::Postgres
        );
        assert_eq!(
            StoreBackend::from_url("postgresql://localhost/db").unwrap(),
            StoreBackend::Postgres
        );
        assert_eq!(
            StoreBackend::from_url("redis://localhost:6379/0").unwrap(),
            StoreBackend::Redis
        );
        assert_eq!(
            StoreBackend::from_url("rediss://cache.internal").unwrap(),
            StoreBackend::Redis
        );
        assert_eq!(
            StoreBackend::from_url("memory://").unwrap(),
            StoreBackend::Memory
        );
    }

    #[test]
    fn test_backend_rejects_unknown_scheme() {
        assert!(matches!(
            StoreBackend::from_url("mysql://localhost/db"),
            Err(StoreError::InvalidConfig(_))
        ));
        assert!(matches!(
            StoreBackend::from_url("localhost:6379"),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sqlx_connection_errors_are_transient() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.is_transient());

        let err = StoreError::from(sqlx::Error::PoolClosed);
        assert!(err.is_transient());
    }

    #[test]
    fn test_sqlx_permanent_errors_are_not_transient() {
        let err = StoreError::from(sqlx::Error::ColumnNotFound("target_url".to_string()));
        assert!(matches!(err, StoreError::Rejected(_)));
        assert!(!err.is_transient());

        let err = StoreError::from(sqlx::Error::Configuration("bad option".into()));
        assert!(matches!(err, StoreError::InvalidConfig(_)));
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn test_connect_memory_backend() {
        let repo = connect_repository("memory://", "mappings", Duration::from_secs(1))
            .await
            .unwrap();

        assert!(repo.health_check().await);
        assert_eq!(repo.get("missing1").await.unwrap(), None);
    }
}

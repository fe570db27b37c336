//! PostgreSQL-backed mapping store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::domain::repositories::{MappingRepository, StoreError, WriteMode};

/// Postgres identifiers are truncated past this length.
const MAX_TABLE_NAME_LEN: usize = 63;

/// Mapping store using a single two-column table.
///
/// ```sql
/// CREATE TABLE <table> (code TEXT PRIMARY KEY, target_url TEXT NOT NULL)
/// ```
///
/// The table name comes from configuration, so statements are built once at
/// construction after the name is checked to be a plain identifier. Values
/// are always bound as parameters.
pub struct PgMappingRepository {
    pool: PgPool,
    insert_sql: String,
    upsert_sql: String,
    select_sql: String,
}

impl PgMappingRepository {
    /// Connects to PostgreSQL and creates the mapping table if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if `table` is not a plain SQL
    /// identifier, and [`StoreError::Unavailable`] if the database cannot be
    /// reached.
    pub async fn connect(
        database_url: &str,
        table: &str,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        validate_table_name(table)?;

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        info!("Connected to database");

        let repository = Self::new(pool, table)?;
        repository.ensure_table(table).await?;

        Ok(repository)
    }

    /// Creates a repository over an existing pool.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidConfig`] if `table` is not a plain SQL identifier.
    pub fn new(pool: PgPool, table: &str) -> Result<Self, StoreError> {
        validate_table_name(table)?;

        Ok(Self {
            pool,
            insert_sql: format!(
                "INSERT INTO {table} (code, target_url) VALUES ($1, $2) ON CONFLICT (code) DO NOTHING"
            ),
            upsert_sql: format!(
                "INSERT INTO {table} (code, target_url) VALUES ($1, $2) \
                 ON CONFLICT (code) DO UPDATE SET target_url = EXCLUDED.target_url"
            ),
            select_sql: format!("SELECT target_url FROM {table} WHERE code = $1"),
        })
    }

    async fn ensure_table(&self, table: &str) -> Result<(), StoreError> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {table} (code TEXT PRIMARY KEY, target_url TEXT NOT NULL)"
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        info!(table, "Mapping table ready");
        Ok(())
    }
}

/// Accepts `[A-Za-z_][A-Za-z0-9_]*`, at most 63 characters.
fn validate_table_name(table: &str) -> Result<(), StoreError> {
    let mut chars = table.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || table.len() > MAX_TABLE_NAME_LEN {
        return Err(StoreError::InvalidConfig(format!(
            "table name must be a plain SQL identifier, got '{}'",
            table
        )));
    }

    Ok(())
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn put(&self, code: &str, target_url: &str, mode: WriteMode) -> Result<(), StoreError> {
        let sql = match mode {
            WriteMode::CreateOnly => &self.insert_sql,
            WriteMode::Upsert => &self.upsert_sql,
        };

        let result = sqlx::query(sql)
            .bind(code)
            .bind(target_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database INSERT error for {}: {}", code, e);
                StoreError::from(e)
            })?;

        if mode == WriteMode::CreateOnly && result.rows_affected() == 0 {
            return Err(StoreError::Conflict(code.to_string()));
        }

        debug!("Store PUT: {} -> {}", code, target_url);
        Ok(())
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        sqlx::query_scalar::<_, String>(&self.select_sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Database SELECT error for {}: {}", code, e);
                StoreError::from(e)
            })
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }
}

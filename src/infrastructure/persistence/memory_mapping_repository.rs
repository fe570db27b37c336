//! In-process mapping store for development and tests.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::repositories::{MappingRepository, StoreError, WriteMode};

/// Mapping store backed by a `DashMap`.
///
/// The map is sharded, so writes to different codes do not contend. A put
/// holds the shard lock of its key through `entry()`, which keeps the
/// check-and-insert of [`WriteMode::CreateOnly`] atomic. Contents are lost
/// when the process exits.
#[derive(Debug, Default)]
pub struct MemoryMappingRepository {
    mappings: DashMap<String, String>,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn put(&self, code: &str, target_url: &str, mode: WriteMode) -> Result<(), StoreError> {
        match (self.mappings.entry(code.to_string()), mode) {
            (Entry::Occupied(_), WriteMode::CreateOnly) => {
                Err(StoreError::Conflict(code.to_string()))
            }
            (Entry::Occupied(mut slot), WriteMode::Upsert) => {
                debug!(code, "Overwriting existing mapping");
                slot.insert(target_url.to_string());
                Ok(())
            }
            (Entry::Vacant(slot), _) => {
                slot.insert(target_url.to_string());
                Ok(())
            }
        }
    }

    async fn get(&self, code: &str) -> Result<Option<String>, StoreError> {
        Ok(self.mappings.get(code).map(|entry| entry.value().clone()))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

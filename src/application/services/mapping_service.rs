//! Mapping creation and resolution service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::entities::Mapping;
use crate::domain::repositories::{MappingRepository, StoreError, WriteMode};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// Bounds applied to every store call made by [`MappingService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePolicy {
    /// Upper bound for a single store call.
    pub timeout: Duration,
    /// Extra attempts after a transient failure. `0` disables retries.
    pub max_retries: usize,
    /// How writes treat an existing code.
    pub write_mode: WriteMode,
    /// Fresh codes to try before giving up on collisions.
    pub max_code_attempts: usize,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            max_retries: 2,
            write_mode: WriteMode::CreateOnly,
            max_code_attempts: 5,
        }
    }
}

/// Service for creating and resolving mappings.
///
/// Holds no per-request state; all state lives in the store.
pub struct MappingService {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn CodeGenerator>,
    policy: StorePolicy,
}

impl MappingService {
    /// Creates a new mapping service.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: Arc<dyn CodeGenerator>,
        policy: StorePolicy,
    ) -> Self {
        Self {
            repository,
            generator,
            policy,
        }
    }

    pub fn policy(&self) -> &StorePolicy {
        &self.policy
    }

    /// Allocates a new code for `target_url` and stores the mapping.
    ///
    /// # Collisions
    ///
    /// With [`WriteMode::CreateOnly`] a taken code is reported by the store
    /// and a new code is drawn, up to `max_code_attempts` times. With
    /// [`WriteMode::Upsert`] the store never reports a collision and a
    /// repeated code silently replaces the older mapping.
    ///
    /// A create-only write that commits but times out is retried, sees its
    /// own row as a conflict, and moves on to a new code. The first mapping
    /// is then left unreferenced; it is never returned to any client.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store fails or times out,
    /// and [`AppError::CodeSpaceExhausted`] if every attempt collided.
    pub async fn create_mapping(&self, target_url: &str) -> Result<Mapping, AppError> {
        let attempts = self.policy.max_code_attempts.max(1);
        let mode = self.policy.write_mode;

        for attempt in 1..=attempts {
            let code = self.generator.generate();

            match self
                .call_store(|| self.repository.put(&code, target_url, mode))
                .await
            {
                Ok(()) => {
                    info!(path = "create", code = %code, target_url, "Mapping created");
                    return Ok(Mapping::new(code, target_url));
                }
                Err(StoreError::Conflict(_)) => {
                    warn!(path = "create", attempt, code = %code, "Short code collision, retrying");
                }
                Err(e) => {
                    error!(path = "create", code = %code, target_url, error = %e, "Failed to store mapping");
                    return Err(e.into());
                }
            }
        }

        error!(path = "create", attempts, target_url, "Gave up after repeated code collisions");
        Err(AppError::CodeSpaceExhausted { attempts })
    }

    /// Looks up the target URL for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the store fails or times out.
    /// A missing code is `Ok(None)`, never an error.
    pub async fn resolve(&self, code: &str) -> Result<Option<String>, AppError> {
        let found = self
            .call_store(|| self.repository.get(code))
            .await
            .map_err(|e| {
                error!(path = "resolve", code, error = %e, "Failed to read mapping");
                AppError::from(e)
            })?;

        match &found {
            Some(target_url) => debug!(path = "resolve", code, target_url = %target_url, "Mapping found"),
            None => info!(path = "resolve", code, "No mapping for code"),
        }

        Ok(found)
    }

    /// Checks if the store is reachable within the store timeout.
    pub async fn health_check(&self) -> bool {
        tokio::time::timeout(self.policy.timeout, self.repository.health_check())
            .await
            .unwrap_or(false)
    }

    /// Runs one store operation under the per-call timeout, retrying
    /// transient failures with jittered exponential backoff.
    async fn call_store<T, F, Fut>(&self, mut operation: F) -> Result<T, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StoreError>>,
    {
        let timeout = self.policy.timeout;
        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_millis(500))
            .map(jitter)
            .take(self.policy.max_retries);

        RetryIf::start(
            strategy,
            || {
                let call = operation();
                async move {
                    tokio::time::timeout(timeout, call)
                        .await
                        .unwrap_or(Err(StoreError::Timeout(timeout)))
                }
            },
            |e: &StoreError| {
                let transient = e.is_transient();
                if transient {
                    warn!(error = %e, "Transient store failure, retrying");
                }
                transient
            },
        )
        .await
    }
}

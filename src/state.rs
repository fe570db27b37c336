//! Shared state injected into every handler.

use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::services::MappingService;
use crate::config::Config;
use crate::domain::repositories::MappingRepository;
use crate::utils::code_generator::RandomCodeGenerator;

#[derive(Clone)]
pub struct AppState {
    pub mapping_service: Arc<MappingService>,
    /// Scheme used for created URLs when the request has no `X-Forwarded-Proto`.
    pub public_scheme: String,
    /// Status returned for codes with no mapping.
    pub not_found_status: StatusCode,
}

impl AppState {
    pub fn new(
        mapping_service: Arc<MappingService>,
        public_scheme: impl Into<String>,
        not_found_status: StatusCode,
    ) -> Self {
        Self {
            mapping_service,
            public_scheme: public_scheme.into(),
            not_found_status,
        }
    }

    /// Wires a random code generator and the configured store policy around
    /// `repository`.
    pub fn from_config(config: &Config, repository: Arc<dyn MappingRepository>) -> Self {
        let service = MappingService::new(
            repository,
            Arc::new(RandomCodeGenerator::new(config.code_length)),
            config.store_policy(),
        );

        Self::new(
            Arc::new(service),
            config.public_scheme.clone(),
            config.not_found_status(),
        )
    }
}

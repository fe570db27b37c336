//! Domain layer containing the mapping model, the store contract and
//! request classification.
//!
//! Nothing in here touches the network. Store backends live in
//! [`crate::infrastructure::persistence`] and the HTTP translation lives in
//! [`crate::api`].
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::Mapping`] record
//! - [`repositories`] - Mapping store trait and its error type
//! - [`routing`] - Pure classification of inbound request shapes
//!
//! # Request Flow
//!
//! 1. HTTP handler extracts a [`routing::RequestShape`] and a [`routing::RequestContext`]
//! 2. [`routing::classify`] picks create, resolve or usage
//! 3. [`crate::application::services::MappingService`] talks to the store
//! 4. The handler renders the outcome

pub mod entities;
pub mod repositories;
pub mod routing;

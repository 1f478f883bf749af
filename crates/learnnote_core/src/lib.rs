//! Core domain logic for the learning notes catalog.
//! This crate is the single source of truth for entry invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{
    catalog_config_from_env, logging_config_from_env, CatalogConfig, ConfigError, IdPolicy,
    LoggingConfig,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entry::{Entry, EntryDraft, EntryId, EntryValidationError};
pub use repo::entry_repo::{
    system_now_ms, Clock, EntryRepository, InMemoryEntryStore, RepoError, RepoResult,
};
pub use search::query::{filter_by_tag, search_entries, tag_frequency, SearchQuery, TagCount};
pub use service::entry_service::{EntryService, ServiceError, ServiceResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Core domain logic for Kellokortti, a personal time tracker.
//! This crate is the single source of truth for business invariants:
//! project lifecycle, name uniqueness, soft-delete state and time reporting.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{name_matches_charset, Project, ProjectId};
pub use repo::project_repo::{format_duration, AddOutcome, ProjectRepository};
pub use repo::project_store::{
    ProjectRow, ProjectStore, RepoError, RepoResult, SqliteProjectStore,
};
pub use service::project_service::ProjectService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Project use-case service.
//!
//! # Responsibility
//! - Provide the stable entry points the UI and timer layers call.
//! - Delegate persistence and business rules to the repository.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::project::Project;
use crate::repo::project_repo::{AddOutcome, ProjectRepository};
use crate::repo::project_store::{ProjectStore, RepoResult};

/// Use-case facade over [`ProjectRepository`].
pub struct ProjectService<S: ProjectStore> {
    repo: ProjectRepository<S>,
}

impl<S: ProjectStore> ProjectService<S> {
    /// Creates a service using the provided repository.
    pub fn new(repo: ProjectRepository<S>) -> Self {
        Self { repo }
    }

    /// Checks a candidate name against charset and active-uniqueness rules.
    pub fn validate_name(&self, name: &str) -> bool {
        self.repo.validate_name(name)
    }

    /// Creates or reactivates a project by name.
    pub fn add_project(&mut self, name: &str) -> RepoResult<AddOutcome> {
        self.repo.add_project(name)
    }

    /// Soft-deletes the active project with this exact name.
    pub fn delete_project(&mut self, name: &str) -> RepoResult<bool> {
        self.repo.delete_project(name)
    }

    /// Returns the live active set for display.
    pub fn get_projects(&self) -> &[Project] {
        self.repo.get_projects()
    }

    /// Records elapsed seconds against an active project.
    pub fn log_time(&self, name: &str, date: &str, seconds: i64) -> RepoResult<bool> {
        self.repo.log_time(name, date, seconds)
    }

    /// Returns the formatted total-time report for a date-prefix period.
    pub fn get_stats(&self, period: &str) -> RepoResult<String> {
        self.repo.get_stats(period)
    }
}

//! Project repository: active-set cache, lifecycle rules and reporting.
//!
//! # Responsibility
//! - Own the in-memory set of active projects loaded at construction.
//! - Enforce name validation and case-insensitive active uniqueness.
//! - Soft-delete and reactivate projects without losing time history.
//! - Aggregate recorded time into per-project reports.
//!
//! # Invariants
//! - At most one active project holds a given name, compared case-insensitively.
//! - Every state-changing operation writes the durable store before mutating
//!   the cache, so a failed write leaves cache and store in agreement.
//! - Reactivation reuses the original row identifier; history stays attached.

use crate::model::project::{name_matches_charset, Project};
use crate::repo::project_store::{ProjectStore, RepoError, RepoResult};
use log::info;

/// Outcome of an add-project request.
///
/// Rejection is an expected business outcome, not an error: the caller is
/// expected to re-prompt for a different name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Name failed validation or collided with an active project.
    Rejected,
    /// An inactive project with this name was restored under its original id.
    Reactivated,
    /// A fresh project row was created.
    Created,
}

/// Repository over active projects, backed by a durable [`ProjectStore`].
///
/// The cache is populated once at construction and mutated only through this
/// type's own operations. Mutating the durable store behind the repository's
/// back is unsupported and desynchronizes the cache.
pub struct ProjectRepository<S: ProjectStore> {
    store: S,
    projects: Vec<Project>,
}

impl<S: ProjectStore> ProjectRepository<S> {
    /// Loads the active project set from the store.
    ///
    /// Fails when the store is unreachable or its schema is not ready; the
    /// repository cannot exist over an uninitialized store.
    pub fn new(store: S) -> RepoResult<Self> {
        let projects: Vec<Project> = store
            .select_active_projects()?
            .into_iter()
            .map(|row| Project::new(row.id, row.name))
            .collect();

        info!(
            "event=repo_init module=repo status=ok active_projects={}",
            projects.len()
        );

        Ok(Self { store, projects })
    }

    /// Checks whether `name` is acceptable for a new project.
    ///
    /// False when the name is empty, contains anything outside letters and
    /// digits, or matches an active project case-insensitively. Pure over the
    /// current in-memory state; no store access.
    pub fn validate_name(&self, name: &str) -> bool {
        if !name_matches_charset(name) {
            return false;
        }
        !self
            .projects
            .iter()
            .any(|project| project.name_eq_ignore_case(name))
    }

    /// Returns the live active set for display.
    pub fn get_projects(&self) -> &[Project] {
        &self.projects
    }

    /// Adds a project by name, reactivating a soft-deleted row when one
    /// matches case-insensitively.
    ///
    /// # Contract
    /// - No durable write happens on the `Rejected` path.
    /// - `Reactivated` rebinds the original row identifier to a fresh
    ///   in-memory `Project`.
    pub fn add_project(&mut self, name: &str) -> RepoResult<AddOutcome> {
        if !self.validate_name(name) {
            return Ok(AddOutcome::Rejected);
        }

        // Re-check the live active set right before touching the store.
        if self
            .projects
            .iter()
            .any(|project| project.name_eq_ignore_case(name))
        {
            return Ok(AddOutcome::Rejected);
        }

        let wanted = name.to_lowercase();
        let all_rows = self.store.select_all_projects()?;
        if let Some(row) = all_rows
            .iter()
            .find(|row| row.name.to_lowercase() == wanted)
        {
            // Validation already excluded active collisions, so this row is
            // inactive. Flip it back and re-select under its stored name; if
            // several inactive rows ever shared a name that would be an
            // invariant violation upstream, and the first row wins.
            self.store.update_active_flag_by_name(&row.name, true)?;
            let restored = self.store.select_project_by_name(&row.name)?.ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "reactivated project `{}` not found on re-select",
                    row.name
                ))
            })?;
            self.projects.push(Project::new(restored.id, restored.name));
            return Ok(AddOutcome::Reactivated);
        }

        let created = self.store.insert_project(name)?;
        self.projects.push(Project::new(created.id, created.name));
        Ok(AddOutcome::Created)
    }

    /// Soft-deletes the active project with this exact name.
    ///
    /// Returns false without touching the store when no active project
    /// matches. The durable row keeps its identifier and time history.
    pub fn delete_project(&mut self, name: &str) -> RepoResult<bool> {
        let Some(index) = self
            .projects
            .iter()
            .position(|project| project.name == name)
        else {
            return Ok(false);
        };

        // Durable write first so a failure leaves the cache untouched.
        self.store.update_active_flag_by_name(name, false)?;
        self.projects.remove(index);
        Ok(true)
    }

    /// Records elapsed seconds for an active project on the given date.
    ///
    /// Write path used by the timer collaborator; dates are sortable strings
    /// such as `2024-01-31`. Returns false when the name is not active.
    pub fn log_time(&self, name: &str, date: &str, seconds: i64) -> RepoResult<bool> {
        let Some(project) = self.projects.iter().find(|project| project.name == name) else {
            return Ok(false);
        };

        self.store.insert_time_entry(project.id, date, seconds)?;
        Ok(true)
    }

    /// Builds a per-project total-time report for dates starting with
    /// `period`. The empty filter covers all recorded history.
    ///
    /// Projects with no matching seconds are omitted. Rows appear in the
    /// store's selection order; inactive projects with history are included.
    pub fn get_stats(&self, period: &str) -> RepoResult<String> {
        let mut totals: Vec<(String, i64)> = Vec::new();
        for row in self.store.select_all_projects()? {
            let seconds = self
                .store
                .sum_time_by_project_and_date_prefix(row.id, period)?;
            if seconds > 0 {
                totals.push((row.name, seconds));
            }
        }

        let mut text = if period.is_empty() {
            String::from(" Total time per project over all recorded time:\n\n")
        } else {
            format!(" Total time per project for period {period}:\n\n")
        };

        for (name, seconds) in totals {
            let label = format!("{name}:");
            text.push_str(&format!(" {label:<18}{}\n", format_duration(seconds)));
        }

        Ok(text)
    }
}

/// Renders seconds as `H:MM:SS` with unpadded hours, e.g. `1:30:00`.
pub fn format_duration(total_seconds: i64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

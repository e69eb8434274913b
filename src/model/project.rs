//! Project domain model and name validation.
//!
//! # Responsibility
//! - Define the project entity shared by the repository and UI layers.
//! - Own the name charset rule (single token of letters and digits).
//!
//! # Invariants
//! - `id` is assigned by the durable store and never reused for another
//!   project; it survives deactivate/reactivate cycles.
//! - `timer_seconds` belongs to the timer collaborator; the repository reads
//!   it for display but never mutates it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Stable identifier assigned by the durable store on first insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProjectId = i64;

// Single word of ASCII letters, digits, or the Latin-1 letter ranges used by
// the Finnish alphabet (À..Ö, à..ö). Rejects the empty string.
static NAME_SIEVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-zÀ-Öà-ö]+$").expect("valid name sieve regex"));

/// Returns whether `name` is a well-formed project name at the charset level.
///
/// Uniqueness against the active set is a repository concern, not checked here.
pub fn name_matches_charset(name: &str) -> bool {
    NAME_SIEVE.is_match(name)
}

/// An active project as held in the repository's in-memory set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Durable identifier, stable across soft-delete and reactivation.
    pub id: ProjectId,
    /// Human-readable name, case-insensitively unique among active projects.
    pub name: String,
    /// Accumulated running-timer value in seconds, owned by the timer
    /// collaborator. Not persisted by the repository.
    #[serde(default)]
    pub timer_seconds: i64,
}

impl Project {
    /// Creates a project bound to an identifier returned by the store.
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            timer_seconds: 0,
        }
    }

    /// Case-insensitive name comparison used for uniqueness checks.
    pub fn name_eq_ignore_case(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.to_lowercase()
    }
}

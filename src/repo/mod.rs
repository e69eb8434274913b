//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable store contract the core depends on.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Business rejections (invalid name, not found) are return values, never
//!   errors; `RepoError` is reserved for infrastructure and data faults.
//! - Durable writes precede in-memory cache mutations on every path.

pub mod project_repo;
pub mod project_store;

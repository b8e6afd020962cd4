//! Error shared by every record-store trait.
//!
//! The in-memory and future persistent stores all surface failures through
//! this small, closed set of conditions: a uniqueness/conflict violation, a
//! missing row, or the backing store being unreachable.

use thiserror::Error;

/// Failure modes common to every repository implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness or state constraint was violated (e.g. a duplicate).
    #[error("conflicting record")]
    Conflict,
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,
    /// The backing store could not be reached.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

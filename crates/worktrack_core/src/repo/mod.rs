//! Repository contracts and SQLite implementations for entity persistence.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the four entity tables.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate input before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Cascaded deletes run as one transaction: tasks, then projects, then the
//!   owning record.

use crate::db::DbError;
use crate::validate::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod client_repo;
pub mod employee_repo;
pub mod project_repo;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound { table: &'static str, id: i64 },
    /// A record that already carries a store-assigned id was offered for
    /// insertion again. Records are insert-once; edits go through `update`.
    AlreadyPersisted { table: &'static str, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "no row with id {id} in `{table}`"),
            Self::AlreadyPersisted { table, id } => {
                write!(f, "row {id} in `{table}` is already persisted")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::AlreadyPersisted { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Dependent-row counts reported before a cascaded delete.
///
/// Callers present these counts to the user and must obtain explicit
/// confirmation when either is non-zero before invoking the delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeImpact {
    /// Projects that would be removed.
    pub projects: u64,
    /// Tasks that would be removed (reached through the projects).
    pub tasks: u64,
}

impl CascadeImpact {
    /// True when the delete would remove dependent rows.
    pub fn has_dependents(&self) -> bool {
        self.projects > 0 || self.tasks > 0
    }
}

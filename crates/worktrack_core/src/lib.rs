//! Core domain logic for WorkTrack.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use logging::{init_logging, logging_status};
pub use model::client::Client;
pub use model::employee::Employee;
pub use model::project::Project;
pub use model::task::{Task, TaskStatus};
pub use repo::client_repo::{ClientRepository, SqliteClientRepository};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{CascadeImpact, RepoError, RepoResult};
pub use service::client_service::ClientService;
pub use service::employee_service::EmployeeService;
pub use service::project_service::ProjectService;
pub use service::task_service::TaskService;
pub use validate::ValidationError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

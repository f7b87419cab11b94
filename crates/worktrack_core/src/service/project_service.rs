//! Project use-case service.

use crate::model::project::Project;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;

/// Use-case wrapper for project validation and persistence.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a freshly built project, capturing the store-assigned id.
    ///
    /// The record must not already carry an id; edits go through `update`.
    pub fn save(&self, project: &mut Project) -> RepoResult<()> {
        if let Some(id) = project.id() {
            return Err(RepoError::AlreadyPersisted {
                table: "project",
                id,
            });
        }
        let id = self.repo.insert(project)?;
        project.assign_id(id);
        Ok(())
    }

    /// Validates, saves and returns a new project in one step.
    pub fn create(
        &self,
        name: &str,
        client_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<Project> {
        let mut project = Project::new(name, client_id, start_date, end_date)?;
        self.save(&mut project)?;
        Ok(project)
    }

    /// Edit flow: re-validates the fields and rewrites the row directly.
    pub fn update(
        &self,
        id: i64,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<()> {
        self.repo.update(id, name, start_date, end_date)
    }

    /// Dependent task count the caller must confirm before `delete`.
    pub fn delete_impact(&self, id: i64) -> RepoResult<u64> {
        self.repo.cascade_impact(id)
    }

    /// Deletes the project with all its tasks; returns the task count
    /// removed. Callers obtain `delete_impact` first and only call this
    /// after the user confirmed.
    pub fn delete(&self, id: i64) -> RepoResult<u64> {
        self.repo.delete_cascade(id)
    }

    pub fn get(&self, id: i64) -> RepoResult<Option<Project>> {
        self.repo.get(id)
    }

    pub fn list(&self) -> RepoResult<Vec<Project>> {
        self.repo.list()
    }

    pub fn list_by_client(&self, client_id: i64) -> RepoResult<Vec<Project>> {
        self.repo.list_by_client(client_id)
    }
}

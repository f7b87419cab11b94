//! Task use-case service.
//!
//! # Invariants
//! - Due dates are checked against the injected current-date source and,
//!   when resolvable, the owning project's end date.
//! - A failed project lookup downgrades to "no end-date constraint" with a
//!   warning instead of blocking task creation.

use crate::model::task::{Task, TaskStatus};
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;
use chrono::{Local, NaiveDate};
use log::warn;

/// Use-case wrapper for task validation and persistence.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service using the local calendar date as the current-date
    /// source.
    pub fn new(repo: R) -> Self {
        Self::with_today_source(repo, local_today)
    }

    /// Creates a service with an explicit current-date source. Tests use
    /// this to pin "today".
    pub fn with_today_source(repo: R, today: fn() -> NaiveDate) -> Self {
        Self { repo, today }
    }

    /// Validates, saves and returns a new task with status `in progress`.
    ///
    /// The due date must not precede today and must not exceed the owning
    /// project's end date when that date can be resolved.
    pub fn create(
        &self,
        description: &str,
        project_id: i64,
        due_date: NaiveDate,
        employee_id: Option<i64>,
    ) -> RepoResult<Task> {
        let project_end = self.resolve_project_end(project_id);
        let mut task = Task::new(description, project_id, due_date, (self.today)(), project_end)?;
        if let Some(employee_id) = employee_id {
            task.assign_employee(employee_id);
        }

        let id = self.repo.insert(&task)?;
        task.assign_id(id);
        Ok(task)
    }

    /// Direct status write by id.
    pub fn set_status(&self, id: i64, status: TaskStatus) -> RepoResult<()> {
        self.repo.set_status(id, status)
    }

    pub fn assign(&self, id: i64, employee_id: i64) -> RepoResult<()> {
        self.repo.set_assignee(id, Some(employee_id))
    }

    pub fn unassign(&self, id: i64) -> RepoResult<()> {
        self.repo.set_assignee(id, None)
    }

    /// Deletes one task after caller confirmation; nothing cascades.
    pub fn delete(&self, id: i64) -> RepoResult<()> {
        self.repo.delete(id)
    }

    pub fn get(&self, id: i64) -> RepoResult<Option<Task>> {
        self.repo.get(id)
    }

    pub fn list_by_project(&self, project_id: i64) -> RepoResult<Vec<Task>> {
        self.repo.list_by_project(project_id)
    }

    pub fn list_by_employee(&self, employee_id: i64) -> RepoResult<Vec<Task>> {
        self.repo.list_by_employee(employee_id)
    }

    pub fn search(&self, text: &str) -> RepoResult<Vec<Task>> {
        self.repo.search(text)
    }

    fn resolve_project_end(&self, project_id: i64) -> Option<NaiveDate> {
        match self.repo.project_end_date(project_id) {
            Ok(end_date) => end_date,
            Err(err) => {
                // Lenient fallback: the insert itself will still fail if the
                // project is truly gone.
                warn!(
                    "event=project_end_lookup module=service status=error \
                     project_id={project_id} error={err} fallback=skip_constraint"
                );
                None
            }
        }
    }
}

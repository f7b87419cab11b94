//! Task record and status enumeration.

use crate::validate::{self, ValidationResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closed task lifecycle state, persisted as one of four fixed strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl TaskStatus {
    /// Canonical store representation.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::InProgress => "in progress",
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses the store representation; `None` for anything outside the
    /// closed set.
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A unit of work inside a project, optionally assigned to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: Option<i64>,
    description: String,
    project_id: i64,
    due_date: NaiveDate,
    status: TaskStatus,
    employee_id: Option<i64>,
}

impl Task {
    /// Builds a task from raw input with status `in progress`.
    ///
    /// `today` is the caller's current-date source; `project_end`, when the
    /// caller could resolve it, bounds the due date from above.
    pub fn new(
        description: &str,
        project_id: i64,
        due_date: NaiveDate,
        today: NaiveDate,
        project_end: Option<NaiveDate>,
    ) -> ValidationResult<Self> {
        let description = validate::task_data(description, due_date, today, project_end)?;
        Ok(Self {
            id: None,
            description,
            project_id,
            due_date,
            status: TaskStatus::default(),
            employee_id: None,
        })
    }

    /// Rehydrates a persisted row.
    ///
    /// Re-runs the description shape rules but not the due-date rules: a
    /// stored task may legitimately be overdue.
    pub(crate) fn from_stored(
        id: i64,
        description: &str,
        project_id: i64,
        due_date: NaiveDate,
        status: TaskStatus,
        employee_id: Option<i64>,
    ) -> ValidationResult<Self> {
        let description = validate::task_description(description)?;
        Ok(Self {
            id: Some(id),
            description,
            project_id,
            due_date,
            status,
            employee_id,
        })
    }

    /// Store-assigned identifier; `None` until the record has been saved.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Assigned employee, if any.
    pub fn employee_id(&self) -> Option<i64> {
        self.employee_id
    }

    pub fn set_description(&mut self, description: &str) -> ValidationResult<()> {
        self.description = validate::task_description(description)?;
        Ok(())
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Re-checks the due date the same way creation does.
    pub fn set_due_date(
        &mut self,
        due_date: NaiveDate,
        today: NaiveDate,
        project_end: Option<NaiveDate>,
    ) -> ValidationResult<()> {
        validate::task_due_date(due_date, today, project_end)?;
        self.due_date = due_date;
        Ok(())
    }

    pub fn assign_employee(&mut self, employee_id: i64) {
        self.employee_id = Some(employee_id);
    }

    pub fn unassign_employee(&mut self) {
        self.employee_id = None;
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        debug_assert!(self.id.is_none(), "task id must not be reassigned");
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskStatus};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_db_strings_round_trip() {
        for status in [
            TaskStatus::InProgress,
            TaskStatus::Completed,
            TaskStatus::Pending,
            TaskStatus::Cancelled,
        ] {
            assert_eq!(TaskStatus::from_db(status.as_db_str()), Some(status));
        }
        assert_eq!(TaskStatus::from_db("done"), None);
    }

    #[test]
    fn new_task_defaults_to_in_progress_and_unassigned() {
        let today = date(2024, 5, 1);
        let task = Task::new("Fix login bug", 1, date(2024, 5, 20), today, None).unwrap();
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert_eq!(task.employee_id(), None);
    }

    #[test]
    fn serde_uses_store_status_strings() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in progress\"");
    }
}

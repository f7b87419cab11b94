//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist task rows, enforcing that referenced projects/employees exist.
//! - Answer the project-end-date lookup used by due-date validation.

use crate::model::task::{Task, TaskStatus};
use crate::repo::client_repo::like_escape;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const TASK_SELECT_SQL: &str =
    "SELECT id, description, project_id, due_date, status, employee_id FROM task";

/// Repository interface for task persistence.
pub trait TaskRepository {
    /// Inserts a validated task and returns the store-assigned id.
    ///
    /// Fails with `NotFound` when the referenced project, or the assignee
    /// when set, does not exist.
    fn insert(&self, task: &Task) -> RepoResult<i64>;
    /// Direct status write by id (the observed update flow).
    fn set_status(&self, id: i64, status: TaskStatus) -> RepoResult<()>;
    /// Assigns or clears the task's employee.
    fn set_assignee(&self, id: i64, employee_id: Option<i64>) -> RepoResult<()>;
    fn get(&self, id: i64) -> RepoResult<Option<Task>>;
    fn list_by_project(&self, project_id: i64) -> RepoResult<Vec<Task>>;
    fn list_by_employee(&self, employee_id: i64) -> RepoResult<Vec<Task>>;
    /// Case-insensitive substring search over description and status.
    fn search(&self, text: &str) -> RepoResult<Vec<Task>>;
    /// Deletes one task; no cascading dependents.
    fn delete(&self, id: i64) -> RepoResult<()>;
    /// End date of the referenced project, `None` when the project is
    /// missing.
    fn project_end_date(&self, project_id: i64) -> RepoResult<Option<NaiveDate>>;
}

/// SQLite-backed task repository over an injected connection.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn row_exists(&self, table: &'static str, id: i64) -> RepoResult<bool> {
        // Fixed table set; never interpolates user input.
        let sql = format!("SELECT COUNT(*) FROM {table} WHERE id = ?1;");
        let count: u64 = self.conn.query_row(&sql, [id], |row| row.get(0))?;
        Ok(count > 0)
    }

    fn query_tasks(&self, sql: &str, bind: impl rusqlite::Params) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(bind)?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert(&self, task: &Task) -> RepoResult<i64> {
        if !self.row_exists("project", task.project_id())? {
            return Err(RepoError::NotFound {
                table: "project",
                id: task.project_id(),
            });
        }
        if let Some(employee_id) = task.employee_id() {
            if !self.row_exists("employee", employee_id)? {
                return Err(RepoError::NotFound {
                    table: "employee",
                    id: employee_id,
                });
            }
        }

        self.conn.execute(
            "INSERT INTO task (description, project_id, due_date, status, employee_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                task.description(),
                task.project_id(),
                task.due_date(),
                task.status().as_db_str(),
                task.employee_id(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=task_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn set_status(&self, id: i64, status: TaskStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE task SET status = ?1 WHERE id = ?2;",
            params![status.as_db_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { table: "task", id });
        }

        info!(
            "event=task_status module=repo status=ok id={id} value={}",
            status.as_db_str()
        );
        Ok(())
    }

    fn set_assignee(&self, id: i64, employee_id: Option<i64>) -> RepoResult<()> {
        if let Some(employee_id) = employee_id {
            if !self.row_exists("employee", employee_id)? {
                return Err(RepoError::NotFound {
                    table: "employee",
                    id: employee_id,
                });
            }
        }

        let changed = self.conn.execute(
            "UPDATE task SET employee_id = ?1 WHERE id = ?2;",
            params![employee_id, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { table: "task", id });
        }

        Ok(())
    }

    fn get(&self, id: i64) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_by_project(&self, project_id: i64) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE project_id = ?1 ORDER BY id ASC;"),
            [project_id],
        )
    }

    fn list_by_employee(&self, employee_id: i64) -> RepoResult<Vec<Task>> {
        self.query_tasks(
            &format!("{TASK_SELECT_SQL} WHERE employee_id = ?1 ORDER BY id ASC;"),
            [employee_id],
        )
    }

    fn search(&self, text: &str) -> RepoResult<Vec<Task>> {
        let pattern = format!("%{}%", like_escape(text));
        self.query_tasks(
            &format!(
                "{TASK_SELECT_SQL}
                 WHERE description LIKE ?1 ESCAPE '\\' OR status LIKE ?1 ESCAPE '\\'
                 ORDER BY id ASC;"
            ),
            [pattern],
        )
    }

    fn delete(&self, id: i64) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM task WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { table: "task", id });
        }

        info!("event=task_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn project_end_date(&self, project_id: i64) -> RepoResult<Option<NaiveDate>> {
        let end_date = self
            .conn
            .query_row(
                "SELECT end_date FROM project WHERE id = ?1;",
                [project_id],
                |row| row.get::<_, NaiveDate>(0),
            )
            .optional()?;
        Ok(end_date)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: i64 = row.get("id")?;
    let description: String = row.get("description")?;
    let project_id: i64 = row.get("project_id")?;
    let due_date: NaiveDate = row.get("due_date")?;
    let employee_id: Option<i64> = row.get("employee_id")?;

    let status_text: String = row.get("status")?;
    let status = TaskStatus::from_db(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in task.status"))
    })?;

    Ok(Task::from_stored(
        id,
        &description,
        project_id,
        due_date,
        status,
        employee_id,
    )?)
}

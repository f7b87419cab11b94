//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist project rows, enforcing that the referenced client exists.
//! - Delete projects together with their tasks in one transaction.

use crate::model::project::Project;
use crate::repo::{RepoError, RepoResult};
use crate::validate;
use chrono::NaiveDate;
use log::info;
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str =
    "SELECT id, name, client_id, start_date, end_date FROM project";

/// Repository interface for project persistence.
pub trait ProjectRepository {
    /// Inserts a validated project and returns the store-assigned id.
    ///
    /// Fails with `NotFound` on `clients` when the referenced client does
    /// not exist.
    fn insert(&self, project: &Project) -> RepoResult<i64>;
    /// Rewrites the editable fields of an existing project (edit flow).
    fn update(
        &self,
        id: i64,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<()>;
    fn get(&self, id: i64) -> RepoResult<Option<Project>>;
    fn list(&self) -> RepoResult<Vec<Project>>;
    fn list_by_client(&self, client_id: i64) -> RepoResult<Vec<Project>>;
    /// Counts the tasks a cascaded delete would remove.
    fn cascade_impact(&self, id: i64) -> RepoResult<u64>;
    /// Deletes the project's tasks, then the project, in one transaction.
    /// Returns the number of tasks removed.
    fn delete_cascade(&self, id: i64) -> RepoResult<u64>;
}

/// SQLite-backed project repository over an injected connection.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn client_exists(&self, client_id: i64) -> RepoResult<bool> {
        let count: u64 = self.conn.query_row(
            "SELECT COUNT(*) FROM clients WHERE id = ?1;",
            [client_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert(&self, project: &Project) -> RepoResult<i64> {
        if !self.client_exists(project.client_id())? {
            return Err(RepoError::NotFound {
                table: "clients",
                id: project.client_id(),
            });
        }

        self.conn.execute(
            "INSERT INTO project (name, client_id, start_date, end_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                project.name(),
                project.client_id(),
                project.start_date(),
                project.end_date(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=project_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn update(
        &self,
        id: i64,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<()> {
        let name = validate::project_data(name, start_date, end_date)?;
        let changed = self.conn.execute(
            "UPDATE project SET name = ?1, start_date = ?2, end_date = ?3 WHERE id = ?4;",
            params![name, start_date, end_date, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "project",
                id,
            });
        }

        Ok(())
    }

    fn get(&self, id: i64) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn list_by_client(&self, client_id: i64) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} WHERE client_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([client_id])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn cascade_impact(&self, id: i64) -> RepoResult<u64> {
        let tasks: u64 = self.conn.query_row(
            "SELECT COUNT(*) FROM task WHERE project_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(tasks)
    }

    fn delete_cascade(&self, id: i64) -> RepoResult<u64> {
        let tasks = self.cascade_impact(id)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM task WHERE project_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM project WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "project",
                id,
            });
        }

        tx.commit()?;
        info!("event=project_delete module=repo status=ok id={id} tasks={tasks}");
        Ok(tasks)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id: i64 = row.get("id")?;
    let name: String = row.get("name")?;
    let client_id: i64 = row.get("client_id")?;
    let start_date: NaiveDate = row.get("start_date")?;
    let end_date: NaiveDate = row.get("end_date")?;
    Ok(Project::from_stored(id, &name, client_id, start_date, end_date)?)
}

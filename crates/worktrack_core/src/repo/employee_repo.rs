//! Employee repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist employee rows and answer name-uniqueness lookups.
//! - On delete, unassign the employee from their tasks instead of cascading.

use crate::model::employee::Employee;
use crate::repo::{RepoError, RepoResult};
use crate::validate;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const EMPLOYEE_SELECT_SQL: &str = "SELECT id, name, position FROM employee";

/// Repository interface for employee persistence.
pub trait EmployeeRepository {
    /// Inserts a validated employee and returns the store-assigned id.
    fn insert(&self, employee: &Employee) -> RepoResult<i64>;
    /// Rewrites both fields of an existing employee (edit flow).
    fn update(&self, id: i64, name: &str, position: &str) -> RepoResult<()>;
    fn get(&self, id: i64) -> RepoResult<Option<Employee>>;
    fn list(&self) -> RepoResult<Vec<Employee>>;
    /// Finds an employee with exactly `name`, skipping `exclude_id` when
    /// given. Returns the conflicting `(id, position)` pair.
    fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<(i64, String)>>;
    /// Deletes the employee, leaving their tasks with a null assignee.
    fn delete(&self, id: i64) -> RepoResult<()>;
}

/// SQLite-backed employee repository over an injected connection.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn insert(&self, employee: &Employee) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO employee (name, position) VALUES (?1, ?2);",
            params![employee.name(), employee.position()],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=employee_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn update(&self, id: i64, name: &str, position: &str) -> RepoResult<()> {
        let (name, position) = validate::employee_data(name, position)?;
        let changed = self.conn.execute(
            "UPDATE employee SET name = ?1, position = ?2 WHERE id = ?3;",
            params![name, position, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "employee",
                id,
            });
        }

        Ok(())
    }

    fn get(&self, id: i64) -> RepoResult<Option<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn find_by_name(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<(i64, String)>> {
        let found = self
            .conn
            .query_row(
                "SELECT id, position FROM employee
                 WHERE name = ?1 AND (?2 IS NULL OR id != ?2);",
                params![name, exclude_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(found)
    }

    fn delete(&self, id: i64) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        // Tasks survive their assignee; only the link is cleared.
        tx.execute(
            "UPDATE task SET employee_id = NULL WHERE employee_id = ?1;",
            [id],
        )?;
        let changed = tx.execute("DELETE FROM employee WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "employee",
                id,
            });
        }

        tx.commit()?;
        info!("event=employee_delete module=repo status=ok id={id}");
        Ok(())
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id: i64 = row.get("id")?;
    let name: String = row.get("name")?;
    let position: String = row.get("position")?;
    Ok(Employee::from_stored(id, &name, &position)?)
}

//! Client repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist client rows and answer contact-uniqueness lookups.
//! - Delete clients together with their projects and tasks in one
//!   transaction, tasks first.

use crate::model::client::Client;
use crate::repo::{CascadeImpact, RepoError, RepoResult};
use crate::validate;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLIENT_SELECT_SQL: &str = "SELECT id, name, contact FROM clients";

/// Repository interface for client persistence.
pub trait ClientRepository {
    /// Inserts a validated client and returns the store-assigned id.
    fn insert(&self, client: &Client) -> RepoResult<i64>;
    /// Rewrites both fields of an existing client (edit flow).
    fn update(&self, id: i64, name: &str, contact: &str) -> RepoResult<()>;
    fn get(&self, id: i64) -> RepoResult<Option<Client>>;
    fn list(&self) -> RepoResult<Vec<Client>>;
    /// Finds a client owning `contact`, skipping `exclude_id` when given.
    /// Returns the conflicting `(id, name)` pair.
    fn find_by_contact(
        &self,
        contact: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<(i64, String)>>;
    /// Case-insensitive substring search over name and contact.
    fn search(&self, text: &str) -> RepoResult<Vec<Client>>;
    /// Counts the projects and tasks a cascaded delete would remove.
    fn cascade_impact(&self, id: i64) -> RepoResult<CascadeImpact>;
    /// Deletes the client's tasks, then projects, then the client itself,
    /// in one transaction.
    fn delete_cascade(&self, id: i64) -> RepoResult<CascadeImpact>;
}

/// SQLite-backed client repository over an injected connection.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn insert(&self, client: &Client) -> RepoResult<i64> {
        self.conn.execute(
            "INSERT INTO clients (name, contact) VALUES (?1, ?2);",
            params![client.name(), client.contact()],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=client_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn update(&self, id: i64, name: &str, contact: &str) -> RepoResult<()> {
        let (name, contact) = validate::client_data(name, contact)?;
        let changed = self.conn.execute(
            "UPDATE clients SET name = ?1, contact = ?2 WHERE id = ?3;",
            params![name, contact, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "clients",
                id,
            });
        }

        Ok(())
    }

    fn get(&self, id: i64) -> RepoResult<Option<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_client_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Client>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CLIENT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(parse_client_row(row)?);
        }
        Ok(clients)
    }

    fn find_by_contact(
        &self,
        contact: &str,
        exclude_id: Option<i64>,
    ) -> RepoResult<Option<(i64, String)>> {
        let found = self
            .conn
            .query_row(
                "SELECT id, name FROM clients
                 WHERE contact = ?1 AND (?2 IS NULL OR id != ?2);",
                params![contact, exclude_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(found)
    }

    fn search(&self, text: &str) -> RepoResult<Vec<Client>> {
        let pattern = format!("%{}%", like_escape(text));
        let mut stmt = self.conn.prepare(&format!(
            "{CLIENT_SELECT_SQL}
             WHERE name LIKE ?1 ESCAPE '\\' OR contact LIKE ?1 ESCAPE '\\'
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([pattern])?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next()? {
            clients.push(parse_client_row(row)?);
        }
        Ok(clients)
    }

    fn cascade_impact(&self, id: i64) -> RepoResult<CascadeImpact> {
        let projects: u64 = self.conn.query_row(
            "SELECT COUNT(*) FROM project WHERE client_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        let tasks: u64 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM task t
             INNER JOIN project p ON t.project_id = p.id
             WHERE p.client_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(CascadeImpact { projects, tasks })
    }

    fn delete_cascade(&self, id: i64) -> RepoResult<CascadeImpact> {
        let impact = self.cascade_impact(id)?;

        // Delete order matters: tasks reference projects, projects reference
        // the client.
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM task
             WHERE project_id IN (SELECT id FROM project WHERE client_id = ?1);",
            [id],
        )?;
        tx.execute("DELETE FROM project WHERE client_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM clients WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: "clients",
                id,
            });
        }

        tx.commit()?;
        info!(
            "event=client_delete module=repo status=ok id={id} projects={} tasks={}",
            impact.projects, impact.tasks
        );
        Ok(impact)
    }
}

fn parse_client_row(row: &Row<'_>) -> RepoResult<Client> {
    let id: i64 = row.get("id")?;
    let name: String = row.get("name")?;
    let contact: String = row.get("contact")?;
    Ok(Client::from_stored(id, &name, &contact)?)
}

/// Escapes LIKE wildcards in user-entered search text.
pub(crate) fn like_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

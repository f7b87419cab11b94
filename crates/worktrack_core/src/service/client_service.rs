//! Client use-case service.

use crate::model::client::Client;
use crate::repo::client_repo::ClientRepository;
use crate::repo::{CascadeImpact, RepoError, RepoResult};
use crate::validate::{self, ValidationError};

/// Use-case wrapper combining client validation, contact uniqueness and
/// persistence.
pub struct ClientService<R: ClientRepository> {
    repo: R,
}

impl<R: ClientRepository> ClientService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a freshly built client, capturing the store-assigned id.
    ///
    /// # Contract
    /// - The record must not already carry an id; edits go through `update`.
    /// - The contact email must be unique among clients.
    /// - On failure no row is written and the record keeps `id = None`.
    pub fn save(&self, client: &mut Client) -> RepoResult<()> {
        if let Some(id) = client.id() {
            return Err(RepoError::AlreadyPersisted {
                table: "clients",
                id,
            });
        }
        self.check_contact_unique(client.contact(), None)?;
        let id = self.repo.insert(client)?;
        client.assign_id(id);
        Ok(())
    }

    /// Validates, saves and returns a new client in one step.
    pub fn create(&self, name: &str, contact: &str) -> RepoResult<Client> {
        let mut client = Client::new(name, contact)?;
        self.save(&mut client)?;
        Ok(client)
    }

    /// Edit flow: re-validates both fields and rewrites the row directly.
    ///
    /// Field validation runs before the uniqueness lookup, so malformed
    /// input surfaces as a format error even when the contact also collides.
    pub fn update(&self, id: i64, name: &str, contact: &str) -> RepoResult<()> {
        let (name, contact) = validate::client_data(name, contact)?;
        // A record never conflicts with its own stored contact.
        self.check_contact_unique(&contact, Some(id))?;
        self.repo.update(id, &name, &contact)
    }

    /// Fails with a uniqueness violation naming the conflicting client when
    /// `contact` is already taken.
    pub fn check_contact_unique(&self, contact: &str, exclude_id: Option<i64>) -> RepoResult<()> {
        if let Some((owner_id, owner_name)) = self.repo.find_by_contact(contact, exclude_id)? {
            return Err(ValidationError::Uniqueness {
                field: "contact",
                message: format!(
                    "email `{contact}` is already used by client `{owner_name}` (id {owner_id})"
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Dependent counts the caller must confirm before `delete`.
    pub fn delete_impact(&self, id: i64) -> RepoResult<CascadeImpact> {
        self.repo.cascade_impact(id)
    }

    /// Deletes the client with all dependent projects and tasks.
    ///
    /// Callers obtain `delete_impact` first and only call this after the
    /// user confirmed the reported counts.
    pub fn delete(&self, id: i64) -> RepoResult<CascadeImpact> {
        self.repo.delete_cascade(id)
    }

    pub fn get(&self, id: i64) -> RepoResult<Option<Client>> {
        self.repo.get(id)
    }

    pub fn list(&self) -> RepoResult<Vec<Client>> {
        self.repo.list()
    }

    pub fn search(&self, text: &str) -> RepoResult<Vec<Client>> {
        self.repo.search(text)
    }
}

//! Client record.

use crate::validate::{self, ValidationResult};
use serde::Serialize;

/// A client the projects are delivered for.
///
/// Fields are private so every mutation goes through the validators; the
/// record can never hold a name or contact that would fail validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    id: Option<i64>,
    name: String,
    contact: String,
}

impl Client {
    /// Builds a client from raw input, normalizing and validating both fields.
    pub fn new(name: &str, contact: &str) -> ValidationResult<Self> {
        let (name, contact) = validate::client_data(name, contact)?;
        Ok(Self {
            id: None,
            name,
            contact,
        })
    }

    /// Rehydrates a persisted row, re-running field validation.
    ///
    /// Used by read paths so invalid persisted state is rejected instead of
    /// masked.
    pub(crate) fn from_stored(id: i64, name: &str, contact: &str) -> ValidationResult<Self> {
        let mut client = Self::new(name, contact)?;
        client.id = Some(id);
        Ok(client)
    }

    /// Store-assigned identifier; `None` until the record has been saved.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email, unique among clients.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = validate::client_name(name)?;
        Ok(())
    }

    pub fn set_contact(&mut self, contact: &str) -> ValidationResult<()> {
        self.contact = validate::client_contact(contact)?;
        Ok(())
    }

    /// Captures the store-assigned id after a successful insert.
    pub(crate) fn assign_id(&mut self, id: i64) {
        debug_assert!(self.id.is_none(), "client id must not be reassigned");
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::Client;
    use crate::validate::ValidationError;

    #[test]
    fn new_normalizes_fields() {
        let client = Client::new("  Acme Corp ", " sales@acme.example ").unwrap();
        assert_eq!(client.name(), "Acme Corp");
        assert_eq!(client.contact(), "sales@acme.example");
        assert_eq!(client.id(), None);
    }

    #[test]
    fn setters_revalidate() {
        let mut client = Client::new("Acme Corp", "sales@acme.example").unwrap();
        let err = client.set_contact("not-an-email").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail { .. }));
        // Rejected write leaves the previous value in place.
        assert_eq!(client.contact(), "sales@acme.example");
    }
}

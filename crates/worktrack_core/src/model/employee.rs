//! Employee record.

use crate::validate::{self, ValidationResult};
use serde::Serialize;

/// An employee who can be assigned to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    id: Option<i64>,
    name: String,
    position: String,
}

impl Employee {
    /// Builds an employee from raw input, normalizing and validating both
    /// fields. Name uniqueness is checked separately against the store.
    pub fn new(name: &str, position: &str) -> ValidationResult<Self> {
        let (name, position) = validate::employee_data(name, position)?;
        Ok(Self {
            id: None,
            name,
            position,
        })
    }

    pub(crate) fn from_stored(id: i64, name: &str, position: &str) -> ValidationResult<Self> {
        let mut employee = Self::new(name, position)?;
        employee.id = Some(id);
        Ok(employee)
    }

    /// Store-assigned identifier; `None` until the record has been saved.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Full name, unique among employees.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = validate::employee_name(name)?;
        Ok(())
    }

    pub fn set_position(&mut self, position: &str) -> ValidationResult<()> {
        self.position = validate::employee_position(position)?;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        debug_assert!(self.id.is_none(), "employee id must not be reassigned");
        self.id = Some(id);
    }
}

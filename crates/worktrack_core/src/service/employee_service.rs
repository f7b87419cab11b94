//! Employee use-case service.

use crate::model::employee::Employee;
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::{RepoError, RepoResult};
use crate::validate::{self, ValidationError};

/// Use-case wrapper combining employee validation, name uniqueness and
/// persistence.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a freshly built employee, capturing the store-assigned id.
    ///
    /// # Contract
    /// - The record must not already carry an id; edits go through `update`.
    /// - The name must be unique among employees.
    /// - On failure no row is written and the record keeps `id = None`.
    pub fn save(&self, employee: &mut Employee) -> RepoResult<()> {
        if let Some(id) = employee.id() {
            return Err(RepoError::AlreadyPersisted {
                table: "employee",
                id,
            });
        }
        self.check_name_unique(employee.name(), None)?;
        let id = self.repo.insert(employee)?;
        employee.assign_id(id);
        Ok(())
    }

    /// Validates, saves and returns a new employee in one step.
    pub fn create(&self, name: &str, position: &str) -> RepoResult<Employee> {
        let mut employee = Employee::new(name, position)?;
        self.save(&mut employee)?;
        Ok(employee)
    }

    /// Edit flow: re-validates both fields and rewrites the row directly.
    ///
    /// Field validation runs before the uniqueness lookup, so malformed
    /// input surfaces as a format error even when the name also collides.
    pub fn update(&self, id: i64, name: &str, position: &str) -> RepoResult<()> {
        let (name, position) = validate::employee_data(name, position)?;
        self.check_name_unique(&name, Some(id))?;
        self.repo.update(id, &name, &position)
    }

    /// Fails with a uniqueness violation naming the conflicting employee
    /// when `name` is already taken.
    pub fn check_name_unique(&self, name: &str, exclude_id: Option<i64>) -> RepoResult<()> {
        if let Some((owner_id, owner_position)) = self.repo.find_by_name(name, exclude_id)? {
            return Err(ValidationError::Uniqueness {
                field: "employee name",
                message: format!(
                    "an employee named `{name}` already exists \
                     (position: {owner_position}, id {owner_id})"
                ),
            }
            .into());
        }
        Ok(())
    }

    /// Deletes the employee after caller confirmation; their tasks keep
    /// running with a null assignee.
    pub fn delete(&self, id: i64) -> RepoResult<()> {
        self.repo.delete(id)
    }

    pub fn get(&self, id: i64) -> RepoResult<Option<Employee>> {
        self.repo.get(id)
    }

    pub fn list(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list()
    }
}

//! Project record.

use crate::validate::{self, ValidationResult};
use chrono::NaiveDate;
use serde::Serialize;

/// A client project spanning a start/end date range.
///
/// # Invariants
/// - `end_date` is strictly after `start_date`.
/// - `client_id` references an existing client (enforced on insert).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id: Option<i64>,
    name: String,
    client_id: i64,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Project {
    /// Builds a project from raw input, validating the name and the date
    /// ordering.
    pub fn new(
        name: &str,
        client_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ValidationResult<Self> {
        let name = validate::project_data(name, start_date, end_date)?;
        Ok(Self {
            id: None,
            name,
            client_id,
            start_date,
            end_date,
        })
    }

    pub(crate) fn from_stored(
        id: i64,
        name: &str,
        client_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ValidationResult<Self> {
        let mut project = Self::new(name, client_id, start_date, end_date)?;
        project.id = Some(id);
        Ok(project)
    }

    /// Store-assigned identifier; `None` until the record has been saved.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client_id(&self) -> i64 {
        self.client_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn set_name(&mut self, name: &str) -> ValidationResult<()> {
        self.name = validate::project_name(name)?;
        Ok(())
    }

    /// Replaces both dates at once so the ordering invariant is re-checked
    /// against the pair, never against a half-updated record.
    pub fn set_dates(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> ValidationResult<()> {
        validate::project_dates(start_date, end_date)?;
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        debug_assert!(self.id.is_none(), "project id must not be reassigned");
        self.id = Some(id);
    }
}

#[cfg(test)]
mod tests {
    use super::Project;
    use crate::validate::ValidationError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_rejects_inverted_dates() {
        let err = Project::new("Redesign", 1, date(2024, 6, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { field: "end date", .. }));
    }

    #[test]
    fn set_dates_checks_the_pair() {
        let mut project =
            Project::new("Redesign", 1, date(2024, 1, 1), date(2024, 6, 1)).unwrap();
        assert!(project.set_dates(date(2024, 7, 1), date(2024, 7, 1)).is_err());
        assert_eq!(project.start_date(), date(2024, 1, 1));
        assert_eq!(project.end_date(), date(2024, 6, 1));
    }
}

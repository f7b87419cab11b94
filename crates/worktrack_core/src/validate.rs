//! Field and composite validators for the four entity types.
//!
//! # Responsibility
//! - Normalize raw field input (trim) and enforce shape/length/charset rules.
//! - Enforce cross-field date ordering for projects and tasks.
//!
//! # Invariants
//! - Validators are pure: no store access, no clock access. The caller
//!   supplies `today` and any project end date it wants checked.
//! - A successful validation always returns the trimmed value; running a
//!   validator on its own output is a no-op.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default maximum length for single-line text fields.
pub const MAX_FIELD_LEN: usize = 90;
/// Maximum length for task descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 150;
/// Minimum length for task descriptions.
pub const MIN_DESCRIPTION_LEN: usize = 5;
/// Minimum length for employee name and position.
pub const MIN_EMPLOYEE_FIELD_LEN: usize = 2;

// Letters of either supported script (Latin or Cyrillic).
static LETTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-zА-Яа-яЁё]").expect("valid letter regex"));
// Person/position fields: letters, spaces, hyphens.
static NAME_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zА-Яа-яЁё\s\-]+$").expect("valid name charset regex"));
// Titles and descriptions additionally allow digits.
static TITLE_CHARSET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zА-Яа-яЁё0-9\s\-]+$").expect("valid title charset regex"));
// ASCII-only local and domain parts; the second-stage syntax check runs after.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Input validation failure, naming the offending field and the violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is blank after trimming.
    EmptyField { field: &'static str },
    /// Trimmed value exceeds the field maximum.
    LengthExceeded {
        field: &'static str,
        length: usize,
        max: usize,
    },
    /// Value violates a character-class, letter-presence or min-length rule.
    InvalidFormat {
        field: &'static str,
        message: String,
    },
    /// Contact does not parse as a valid email address.
    InvalidEmail { value: String, details: String },
    /// A date-ordering rule is violated.
    InvalidDate {
        field: &'static str,
        message: String,
    },
    /// Email or employee name collides with an existing record.
    Uniqueness {
        field: &'static str,
        message: String,
    },
}

impl ValidationError {
    /// Returns the label of the field this failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyField { field }
            | Self::LengthExceeded { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::Uniqueness { field, .. } => field,
            Self::InvalidEmail { .. } => "email",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "field `{field}` must not be empty"),
            Self::LengthExceeded { field, length, max } => {
                write!(f, "field `{field}` exceeds maximum length ({length}/{max})")
            }
            Self::InvalidFormat { field, message } => write!(f, "field `{field}`: {message}"),
            Self::InvalidEmail { value, details } => {
                write!(f, "invalid email address `{value}`: {details}")
            }
            Self::InvalidDate { field, message } => write!(f, "field `{field}`: {message}"),
            Self::Uniqueness { field, message } => write!(f, "field `{field}`: {message}"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and checks it is non-blank and within `max_len` characters.
///
/// Returns the trimmed value on success.
pub fn non_empty(value: &str, field: &'static str, max_len: usize) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }

    let length = trimmed.chars().count();
    if length > max_len {
        return Err(ValidationError::LengthExceeded {
            field,
            length,
            max: max_len,
        });
    }

    Ok(trimmed.to_string())
}

/// Validates an email address in two stages.
///
/// Stage one restricts local and domain parts to ASCII letters, digits and
/// `._-`; stage two runs the general syntax check from the `validator` crate.
/// Returns the trimmed address on success.
pub fn email(value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();

    if !EMAIL_RE.is_match(trimmed) {
        return Err(ValidationError::InvalidEmail {
            value: trimmed.to_string(),
            details: "address must use only English letters, digits and ._-@".to_string(),
        });
    }

    if !validator::validate_email(trimmed) {
        return Err(ValidationError::InvalidEmail {
            value: trimmed.to_string(),
            details: "address does not satisfy email syntax rules".to_string(),
        });
    }

    Ok(trimmed.to_string())
}

fn require_letter(value: &str, field: &'static str) -> ValidationResult<()> {
    if !LETTER_RE.is_match(value) {
        return Err(ValidationError::InvalidFormat {
            field,
            message: "must contain at least one letter".to_string(),
        });
    }
    Ok(())
}

fn require_name_charset(value: &str, field: &'static str) -> ValidationResult<()> {
    if !NAME_CHARSET_RE.is_match(value) {
        return Err(ValidationError::InvalidFormat {
            field,
            message: "may contain only letters, spaces and hyphens".to_string(),
        });
    }
    Ok(())
}

fn require_title_charset(value: &str, field: &'static str) -> ValidationResult<()> {
    if !TITLE_CHARSET_RE.is_match(value) {
        return Err(ValidationError::InvalidFormat {
            field,
            message: "may contain only letters, digits, spaces and hyphens".to_string(),
        });
    }
    Ok(())
}

fn require_min_len(value: &str, field: &'static str, min_len: usize) -> ValidationResult<()> {
    if value.chars().count() < min_len {
        return Err(ValidationError::InvalidFormat {
            field,
            message: format!("must be at least {min_len} characters"),
        });
    }
    Ok(())
}

/// Validates a client name: non-empty, ≤90 chars, letters/spaces/hyphens.
pub fn client_name(name: &str) -> ValidationResult<String> {
    let name = non_empty(name, "client name", MAX_FIELD_LEN)?;
    require_letter(&name, "client name")?;
    require_name_charset(&name, "client name")?;
    Ok(name)
}

/// Validates a client contact: non-empty, then the two-stage email check.
pub fn client_contact(contact: &str) -> ValidationResult<String> {
    let contact = non_empty(contact, "contact", MAX_FIELD_LEN)?;
    email(&contact)
}

/// Validates an employee name: letters/spaces/hyphens, at least 2 characters.
pub fn employee_name(name: &str) -> ValidationResult<String> {
    let name = non_empty(name, "employee name", MAX_FIELD_LEN)?;
    require_letter(&name, "employee name")?;
    require_name_charset(&name, "employee name")?;
    require_min_len(&name, "employee name", MIN_EMPLOYEE_FIELD_LEN)?;
    Ok(name)
}

/// Validates an employee position with the same rules as the name.
pub fn employee_position(position: &str) -> ValidationResult<String> {
    let position = non_empty(position, "position", MAX_FIELD_LEN)?;
    require_letter(&position, "position")?;
    require_name_charset(&position, "position")?;
    require_min_len(&position, "position", MIN_EMPLOYEE_FIELD_LEN)?;
    Ok(position)
}

/// Validates a project name: alnum/space/hyphen with at least one letter.
pub fn project_name(name: &str) -> ValidationResult<String> {
    let name = non_empty(name, "project name", MAX_FIELD_LEN)?;
    require_letter(&name, "project name")?;
    require_title_charset(&name, "project name")?;
    Ok(name)
}

/// Validates a task description: 5–150 chars, alnum/space/hyphen, ≥1 letter.
pub fn task_description(description: &str) -> ValidationResult<String> {
    let description = non_empty(description, "task description", MAX_DESCRIPTION_LEN)?;
    require_min_len(&description, "task description", MIN_DESCRIPTION_LEN)?;
    require_letter(&description, "task description")?;
    require_title_charset(&description, "task description")?;
    Ok(description)
}

/// Validates client name and contact email. Returns normalized `(name, email)`.
pub fn client_data(name: &str, contact: &str) -> ValidationResult<(String, String)> {
    Ok((client_name(name)?, client_contact(contact)?))
}

/// Validates employee name and position. Returns normalized `(name, position)`.
pub fn employee_data(name: &str, position: &str) -> ValidationResult<(String, String)> {
    let name = employee_name(name)?;
    let position = employee_position(position)?;
    Ok((name, position))
}

/// Checks that a project's end date is strictly after its start date.
pub fn project_dates(start_date: NaiveDate, end_date: NaiveDate) -> ValidationResult<()> {
    if end_date <= start_date {
        return Err(ValidationError::InvalidDate {
            field: "end date",
            message: format!(
                "end date ({}) must be after start date ({})",
                end_date.format("%d.%m.%Y"),
                start_date.format("%d.%m.%Y")
            ),
        });
    }

    Ok(())
}

/// Validates project name and date ordering. Returns the normalized name.
///
/// The end date must be strictly after the start date.
pub fn project_data(
    name: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> ValidationResult<String> {
    let name = project_name(name)?;
    project_dates(start_date, end_date)?;
    Ok(name)
}

/// Checks a task due date against the current date and, when known, the
/// owning project's end date.
///
/// `today` is the caller-supplied current date; the due date must not precede
/// it. Callers that cannot resolve the project end date pass `None`, which
/// skips that constraint.
pub fn task_due_date(
    due_date: NaiveDate,
    today: NaiveDate,
    project_end: Option<NaiveDate>,
) -> ValidationResult<()> {
    if due_date < today {
        return Err(ValidationError::InvalidDate {
            field: "due date",
            message: format!(
                "due date ({}) must not be before the current date ({})",
                due_date.format("%d.%m.%Y"),
                today.format("%d.%m.%Y")
            ),
        });
    }

    if let Some(end_date) = project_end {
        if due_date > end_date {
            return Err(ValidationError::InvalidDate {
                field: "due date",
                message: format!(
                    "due date ({}) must not be after the project end date ({})",
                    due_date.format("%d.%m.%Y"),
                    end_date.format("%d.%m.%Y")
                ),
            });
        }
    }

    Ok(())
}

/// Validates a task description and due date. Returns the normalized
/// description.
pub fn task_data(
    description: &str,
    due_date: NaiveDate,
    today: NaiveDate,
    project_end: Option<NaiveDate>,
) -> ValidationResult<String> {
    let description = task_description(description)?;
    task_due_date(due_date, today, project_end)?;
    Ok(description)
}

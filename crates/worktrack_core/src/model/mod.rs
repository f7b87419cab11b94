//! Domain records for the four related entity types.
//!
//! # Responsibility
//! - Define the canonical records persisted by the repository layer.
//! - Guarantee that no record ever holds a field that fails validation.
//!
//! # Invariants
//! - Ids are store-assigned and immutable once set.
//! - Construction and every setter run the same validators from `validate`.

pub mod client;
pub mod employee;
pub mod project;
pub mod task;

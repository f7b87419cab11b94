//! Use-case services for the presentation layer.
//!
//! # Responsibility
//! - Combine validation, uniqueness checks and persistence per entity.
//! - Expose delete flows that report dependent counts before destruction.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - A validation failure leaves the store untouched.

pub mod client_service;
pub mod employee_service;
pub mod project_service;
pub mod task_service;

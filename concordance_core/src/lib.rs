//! # Concordances Core
//!
//! Shared types and traits for the concordances read/write service.
//!
//! This crate provides:
//! - The `ConcordanceRecord` entity and its inbound payload shape
//! - The `StorageOutcome` vocabulary shared by the service and HTTP layers
//! - The `ConcordanceStore` and `ConcordanceNotifier` capabilities that
//!   back-end clients implement
//! - Concept UUID validation

pub mod traits;
pub mod types;
pub mod validation;

pub use traits::{ConcordanceNotifier, ConcordanceStore};
pub use types::{ConcordancePayload, ConcordanceRecord, StorageOutcome};
pub use validation::is_valid_concept_uuid;

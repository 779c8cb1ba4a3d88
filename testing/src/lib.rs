//! Shared test fixtures for the concordances workspace.
//!
//! Provides:
//! - In-memory doubles for the storage and notification capabilities, with
//!   call counters and switchable failure modes
//! - A DynamoDB Local container (port 8000), lazily started once per test
//!   process and skipped when Docker is not available

mod doubles;
mod fixtures;

pub use doubles::*;
pub use fixtures::*;

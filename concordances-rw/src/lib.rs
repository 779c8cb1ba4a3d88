//! # Concordances RW
//!
//! HTTP service that reads, writes and deletes concordance records in
//! DynamoDB and announces every successful mutation on an SNS topic.
//!
//! ## Architecture
//!
//! ```text
//! Client ──► Handlers ──► ConcordanceService ──► DynamoDB
//!           (validation)   (orchestrator)    │
//!                                            └─► SNS (after store success)
//! ```
//!
//! ## Endpoints
//!
//! - `GET /concordances/{uuid}` - 200 with the record, 404 when absent
//! - `PUT /concordances/{uuid}` - 201 when created, 200 when updated
//! - `DELETE /concordances/{uuid}` - 204 when deleted, 404 when absent
//! - `GET /__health` - Dependency health report
//! - `GET /__gtg` - Good-to-go probe
//! - `GET /__build-info` - Build metadata
//! - `GET /metrics` - Prometheus metrics
//!
//! Dependency failures surface as 503 with a `{"message": ...}` body.

pub mod cli;
pub mod error;
pub mod handlers;
pub mod health;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod telemetry;

pub use error::{ApiError, ValidationError};
pub use routes::create_router;
pub use server::ConcordancesServer;
pub use service::ConcordanceService;
pub use state::AppState;

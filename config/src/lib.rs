//! # Configuration System
//!
//! Configuration structures for the concordances read/write service.
//!
//! This crate provides:
//! - Settings for the HTTP listener and service identity
//! - Settings for the DynamoDB table and SNS topic back-ends
//! - Validation through the `validator` crate
//!
//! Values are parsed from CLI flags and environment variables by the service
//! binary and converted into [`AppConfig`] before anything is started.

pub mod config;
pub mod error;

pub use config::{AppConfig, DynamoDbConfig, SnsConfig};
pub use error::ConfigError;
pub use validator::Validate;

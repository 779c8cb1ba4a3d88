use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

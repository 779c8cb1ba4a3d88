//! # Concordances Errors
//!
//! Error types raised by the back-end clients of the concordances service.
//!
//! Uses `thiserror` for structured error definitions with named fields so
//! that log lines carry the failing operation and back-end resource.

use thiserror::Error;

/// Storage client errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{operation} failed: {reason}")]
    Backend { operation: String, reason: String },

    #[error("Stored item could not be converted: {reason}")]
    Marshalling { reason: String },

    #[error("Table {table} unavailable: {reason}")]
    TableUnavailable { table: String, reason: String },
}

impl StorageError {
    pub fn backend(operation: impl Into<String>, reason: impl ToString) -> Self {
        Self::Backend {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    pub fn marshalling(reason: impl Into<String>) -> Self {
        Self::Marshalling {
            reason: reason.into(),
        }
    }
}

/// Notification client errors
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Publishing to {topic} failed: {reason}")]
    Publish { topic: String, reason: String },

    #[error("Topic {topic} unavailable: {reason}")]
    TopicUnavailable { topic: String, reason: String },

    #[error("Notification envelope could not be built: {reason}")]
    Envelope { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::backend("UpdateItem", "connection reset");
        assert_eq!(err.to_string(), "UpdateItem failed: connection reset");

        let err = StorageError::marshalling("concordedIds is not a list");
        assert_eq!(
            err.to_string(),
            "Stored item could not be converted: concordedIds is not a list"
        );
    }

    #[test]
    fn test_notification_error_display() {
        let err = NotificationError::Publish {
            topic: "arn:aws:sns:eu-west-1:000000000000:concordances".to_string(),
            reason: "throttled".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Publishing to arn:aws:sns:eu-west-1:000000000000:concordances failed: throttled"
        );
    }
}

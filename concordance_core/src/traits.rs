//! Capabilities the service depends on, implemented by the back-end clients
//! and by in-memory doubles in tests.

use async_trait::async_trait;
use errors::{NotificationError, StorageError};

use crate::types::{ConcordanceRecord, StorageOutcome};

/// Point read, unconditional upsert and delete of a single record by key.
#[async_trait]
pub trait ConcordanceStore: Send + Sync {
    /// Returns the stored record, or the empty sentinel when the key is absent.
    async fn read(&self, concept_id: &str) -> Result<ConcordanceRecord, StorageError>;

    /// Replaces `concordedIds` for the record's key, last write wins.
    ///
    /// Yields `Created` or `Updated` depending on the pre-image.
    async fn upsert(&self, record: &ConcordanceRecord) -> Result<StorageOutcome, StorageError>;

    /// Removes the record. Yields `Deleted` or `NotFound` depending on the
    /// pre-image.
    async fn delete(&self, concept_id: &str) -> Result<StorageOutcome, StorageError>;

    /// Verifies connectivity without mutating data.
    async fn healthcheck(&self) -> Result<(), StorageError>;
}

/// Fire-and-forget change notification for a single concept.
#[async_trait]
pub trait ConcordanceNotifier: Send + Sync {
    async fn send_message(&self, concept_id: &str) -> Result<(), NotificationError>;

    /// `Ok(true)` when the target topic is reachable and describable.
    async fn healthcheck(&self) -> Result<bool, NotificationError>;
}

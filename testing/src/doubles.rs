use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use concordance_core::{ConcordanceNotifier, ConcordanceRecord, ConcordanceStore, StorageOutcome};
use errors::{NotificationError, StorageError};

pub const TEST_TOPIC_ARN: &str = "arn:aws:sns:eu-west-1:000000000000:concordances-test";

/// `ConcordanceStore` backed by a map, counting every call.
#[derive(Debug, Default)]
pub struct InMemoryConcordanceStore {
    records: DashMap<String, Vec<String>>,
    unavailable: AtomicBool,
    reads: AtomicUsize,
    upserts: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryConcordanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a record without going through `upsert` or touching the counters.
    pub fn with_record(self, record: ConcordanceRecord) -> Self {
        self.records.insert(record.concept_id, record.concorded_ids);
        self
    }

    /// Makes every subsequent call fail with a backend error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn get(&self, concept_id: &str) -> Option<ConcordanceRecord> {
        self.records
            .get(concept_id)
            .map(|ids| ConcordanceRecord::new(concept_id, ids.value().clone()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn read_calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn upsert_calls(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.read_calls() + self.upsert_calls() + self.delete_calls()
    }

    fn check_available(&self, operation: &str) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::backend(operation, "store unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ConcordanceStore for InMemoryConcordanceStore {
    async fn read(&self, concept_id: &str) -> Result<ConcordanceRecord, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_available("GetItem")?;
        Ok(self.get(concept_id).unwrap_or_default())
    }

    async fn upsert(&self, record: &ConcordanceRecord) -> Result<StorageOutcome, StorageError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.check_available("UpdateItem")?;
        let previous = self
            .records
            .insert(record.concept_id.clone(), record.concorded_ids.clone())
            .map(|ids| ConcordanceRecord::new(record.concept_id.clone(), ids))
            .unwrap_or_default();
        Ok(StorageOutcome::from_upsert_pre_image(&previous))
    }

    async fn delete(&self, concept_id: &str) -> Result<StorageOutcome, StorageError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_available("DeleteItem")?;
        let previous = self
            .records
            .remove(concept_id)
            .map(|(id, ids)| ConcordanceRecord::new(id, ids))
            .unwrap_or_default();
        Ok(StorageOutcome::from_delete_pre_image(&previous))
    }

    async fn healthcheck(&self) -> Result<(), StorageError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StorageError::TableUnavailable {
                table: "in-memory".to_string(),
                reason: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

/// `ConcordanceNotifier` that records the concept ids it was asked to publish.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<String>>,
    failing: AtomicBool,
    topic_missing: AtomicBool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `send_message` fail without recording anything.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes `healthcheck` report a topic without attributes.
    pub fn set_topic_missing(&self, missing: bool) {
        self.topic_missing.store(missing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl ConcordanceNotifier for RecordingNotifier {
    async fn send_message(&self, concept_id: &str) -> Result<(), NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::Publish {
                topic: TEST_TOPIC_ARN.to_string(),
                reason: "topic unavailable".to_string(),
            });
        }
        self.sent.lock().push(concept_id.to_string());
        Ok(())
    }

    async fn healthcheck(&self) -> Result<bool, NotificationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotificationError::TopicUnavailable {
                topic: TEST_TOPIC_ARN.to_string(),
                reason: "topic unavailable".to_string(),
            });
        }
        Ok(!self.topic_missing.load(Ordering::SeqCst))
    }
}

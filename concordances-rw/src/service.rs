//! Orchestrates storage mutations and their change notifications.
//!
//! A write or delete is only reported as successful when both the store and
//! the notifier succeeded. When the store accepted a mutation but the
//! notification failed, the caller sees `StorageOutcome::Error` while the
//! record stays persisted; that window is logged, never rolled back.

use std::sync::Arc;

use concordance_core::{ConcordanceNotifier, ConcordanceRecord, ConcordanceStore, StorageOutcome};
use errors::StorageError;

use crate::telemetry::{OperationTimer, Telemetry};

const DYNAMODB: &str = "dynamodb";
const SNS: &str = "sns";

pub struct ConcordanceService {
    store: Arc<dyn ConcordanceStore>,
    notifier: Arc<dyn ConcordanceNotifier>,
}

impl ConcordanceService {
    pub fn new(store: Arc<dyn ConcordanceStore>, notifier: Arc<dyn ConcordanceNotifier>) -> Self {
        Self { store, notifier }
    }

    /// Pass-through read. A miss is the empty record, not an error.
    pub async fn read(&self, concept_id: &str) -> Result<ConcordanceRecord, StorageError> {
        let timer = OperationTimer::start("read");
        match self.store.read(concept_id).await {
            Ok(record) => {
                timer.finish(if record.is_empty() { "not_found" } else { "found" });
                Ok(record)
            }
            Err(e) => {
                tracing::error!(
                    %concept_id,
                    subsystem = DYNAMODB,
                    error = %e,
                    "Failed to read concordance"
                );
                Telemetry::record_dependency_failure(DYNAMODB, "read");
                timer.finish(StorageOutcome::Error.as_str());
                Err(e)
            }
        }
    }

    /// Upserts `record`, then notifies. Yields `Created`, `Updated` or `Error`.
    pub async fn write(&self, record: &ConcordanceRecord) -> StorageOutcome {
        let timer = OperationTimer::start("write");
        let outcome = self.write_and_notify(record).await;
        timer.finish(outcome.as_str());
        outcome
    }

    async fn write_and_notify(&self, record: &ConcordanceRecord) -> StorageOutcome {
        let concept_id = record.concept_id.as_str();

        let outcome = match self.store.upsert(record).await {
            Ok(outcome @ (StorageOutcome::Created | StorageOutcome::Updated)) => outcome,
            Ok(unexpected) => {
                tracing::error!(
                    %concept_id,
                    subsystem = DYNAMODB,
                    outcome = %unexpected,
                    "Store returned an outcome that is not valid for an upsert"
                );
                return StorageOutcome::Error;
            }
            Err(e) => {
                tracing::error!(
                    %concept_id,
                    subsystem = DYNAMODB,
                    error = %e,
                    "Failed to store concordance"
                );
                Telemetry::record_dependency_failure(DYNAMODB, "write");
                return StorageOutcome::Error;
            }
        };

        if let Err(e) = self.notifier.send_message(concept_id).await {
            tracing::error!(
                %concept_id,
                subsystem = SNS,
                stored_outcome = %outcome,
                error = %e,
                "Concordance stored but change notification failed; record is persisted without a notification"
            );
            Telemetry::record_dependency_failure(SNS, "write");
            return StorageOutcome::Error;
        }

        tracing::info!(%concept_id, %outcome, "Concordance stored");
        outcome
    }

    /// Deletes `concept_id`, notifying only when something was removed.
    /// Yields `Deleted`, `NotFound` or `Error`.
    pub async fn delete(&self, concept_id: &str) -> StorageOutcome {
        let timer = OperationTimer::start("delete");
        let outcome = self.delete_and_notify(concept_id).await;
        timer.finish(outcome.as_str());
        outcome
    }

    async fn delete_and_notify(&self, concept_id: &str) -> StorageOutcome {
        match self.store.delete(concept_id).await {
            Ok(StorageOutcome::Deleted) => {}
            Ok(StorageOutcome::NotFound) => {
                tracing::info!(%concept_id, "No concordance to delete");
                return StorageOutcome::NotFound;
            }
            Ok(unexpected) => {
                tracing::error!(
                    %concept_id,
                    subsystem = DYNAMODB,
                    outcome = %unexpected,
                    "Store returned an outcome that is not valid for a delete"
                );
                return StorageOutcome::Error;
            }
            Err(e) => {
                tracing::error!(
                    %concept_id,
                    subsystem = DYNAMODB,
                    error = %e,
                    "Failed to delete concordance"
                );
                Telemetry::record_dependency_failure(DYNAMODB, "delete");
                return StorageOutcome::Error;
            }
        }

        if let Err(e) = self.notifier.send_message(concept_id).await {
            tracing::error!(
                %concept_id,
                subsystem = SNS,
                error = %e,
                "Concordance deleted but change notification failed; record is gone without a notification"
            );
            Telemetry::record_dependency_failure(SNS, "delete");
            return StorageOutcome::Error;
        }

        tracing::info!(%concept_id, "Concordance deleted");
        StorageOutcome::Deleted
    }
}

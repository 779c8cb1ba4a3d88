//! DynamoDB storage client.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use std::collections::HashMap;

use concordance_core::{ConcordanceRecord, ConcordanceStore, StorageOutcome};
use config::DynamoDbConfig;
use errors::StorageError;

pub const TABLE_HASH_KEY: &str = "conceptId";
pub const CONCORDED_IDS_ATTRIBUTE: &str = "concordedIds";

const UPDATE_EXPRESSION: &str = "SET concordedIds = :concordedIds";
const CONCORDED_IDS_PLACEHOLDER: &str = ":concordedIds";

type Item = HashMap<String, AttributeValue>;

/// Reads and writes concordance records in a single DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoDbConcordanceStore {
    client: Client,
    table: String,
}

impl DynamoDbConcordanceStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Builds a client from the ambient AWS credential chain, pinned to the
    /// configured region and optional endpoint override.
    pub async fn from_config(config: &DynamoDbConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_dynamodb::config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut client_config = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            client_config = client_config.endpoint_url(endpoint);
        }

        tracing::info!(
            table = %config.table,
            region = %config.region,
            "DynamoDB client configured"
        );

        Self::new(
            Client::from_conf(client_config.build()),
            config.table.clone(),
        )
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl ConcordanceStore for DynamoDbConcordanceStore {
    async fn read(&self, concept_id: &str) -> Result<ConcordanceRecord, StorageError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(TABLE_HASH_KEY, AttributeValue::S(concept_id.to_string()))
            .send()
            .await
            .map_err(|e| StorageError::backend("GetItem", DisplayErrorContext(e)))?;

        record_from_item(output.item())
    }

    async fn upsert(&self, record: &ConcordanceRecord) -> Result<StorageOutcome, StorageError> {
        let concorded_ids = record
            .concorded_ids
            .iter()
            .map(|id| AttributeValue::S(id.clone()))
            .collect();

        let output = self
            .client
            .update_item()
            .table_name(&self.table)
            .key(TABLE_HASH_KEY, AttributeValue::S(record.concept_id.clone()))
            .update_expression(UPDATE_EXPRESSION)
            .expression_attribute_values(
                CONCORDED_IDS_PLACEHOLDER,
                AttributeValue::L(concorded_ids),
            )
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| StorageError::backend("UpdateItem", DisplayErrorContext(e)))?;

        let outcome = StorageOutcome::from_upsert_pre_image(&pre_image(output.attributes()));
        tracing::debug!(concept_id = %record.concept_id, %outcome, "Upserted concordance");
        Ok(outcome)
    }

    async fn delete(&self, concept_id: &str) -> Result<StorageOutcome, StorageError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table)
            .key(TABLE_HASH_KEY, AttributeValue::S(concept_id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| StorageError::backend("DeleteItem", DisplayErrorContext(e)))?;

        let outcome = StorageOutcome::from_delete_pre_image(&pre_image(output.attributes()));
        tracing::debug!(%concept_id, %outcome, "Deleted concordance");
        Ok(outcome)
    }

    async fn healthcheck(&self) -> Result<(), StorageError> {
        self.client
            .describe_table()
            .table_name(&self.table)
            .send()
            .await
            .map_err(|e| StorageError::TableUnavailable {
                table: self.table.clone(),
                reason: DisplayErrorContext(e).to_string(),
            })?;
        Ok(())
    }
}

/// Converts a full item into a record. A missing or empty item is the empty
/// sentinel.
fn record_from_item(item: Option<&Item>) -> Result<ConcordanceRecord, StorageError> {
    let Some(item) = item.filter(|item| !item.is_empty()) else {
        return Ok(ConcordanceRecord::default());
    };

    let concept_id = match item.get(TABLE_HASH_KEY) {
        Some(AttributeValue::S(id)) => id.clone(),
        Some(other) => {
            return Err(StorageError::marshalling(format!(
                "{TABLE_HASH_KEY} is not a string: {other:?}"
            )));
        }
        None => {
            return Err(StorageError::marshalling(format!(
                "item has no {TABLE_HASH_KEY}"
            )));
        }
    };

    let concorded_ids = match item.get(CONCORDED_IDS_ATTRIBUTE) {
        None | Some(AttributeValue::Null(_)) => Vec::new(),
        Some(AttributeValue::Ss(ids)) => ids.clone(),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|value| match value {
                AttributeValue::S(id) => Ok(id.clone()),
                other => Err(StorageError::marshalling(format!(
                    "{CONCORDED_IDS_ATTRIBUTE} contains a non-string value: {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(StorageError::marshalling(format!(
                "{CONCORDED_IDS_ATTRIBUTE} is not a string list: {other:?}"
            )));
        }
    };

    Ok(ConcordanceRecord {
        concept_id,
        concorded_ids,
    })
}

/// Extracts only the key of a previous item image. The write has already
/// happened at this point, so a malformed legacy `concordedIds` must not turn
/// it into a failure.
fn pre_image(attributes: Option<&Item>) -> ConcordanceRecord {
    match attributes.and_then(|item| item.get(TABLE_HASH_KEY)) {
        Some(AttributeValue::S(id)) => ConcordanceRecord::new(id.clone(), Vec::new()),
        _ => ConcordanceRecord::default(),
    }
}

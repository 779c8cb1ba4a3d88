//! Message envelope published for every concordance change.

use errors::NotificationError;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    #[serde(rename = "Records")]
    records: [EventRecord<'a>; 1],
}

#[derive(Debug, Serialize)]
struct EventRecord<'a> {
    s3: S3Entity<'a>,
}

#[derive(Debug, Serialize)]
struct S3Entity<'a> {
    object: S3Object<'a>,
}

#[derive(Debug, Serialize)]
struct S3Object<'a> {
    key: &'a str,
}

/// Object key consumers parse: every `-` of the concept id becomes `/`.
#[must_use]
pub fn notification_key(concept_id: &str) -> String {
    concept_id.replace('-', "/")
}

/// Serializes the envelope for `concept_id`.
pub fn notification_message(concept_id: &str) -> Result<String, NotificationError> {
    let key = notification_key(concept_id);
    let envelope = Envelope {
        records: [EventRecord {
            s3: S3Entity {
                object: S3Object { key: &key },
            },
        }],
    };
    serde_json::to_string(&envelope).map_err(|e| NotificationError::Envelope {
        reason: e.to_string(),
    })
}

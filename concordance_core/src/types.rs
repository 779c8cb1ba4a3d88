use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// A concept and the identifiers concorded to it.
///
/// A read miss is represented by the empty record (`ConcordanceRecord::default()`),
/// never by `Option`. Use [`ConcordanceRecord::is_empty`] to tell the two apart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcordanceRecord {
    pub concept_id: String,
    pub concorded_ids: Vec<String>,
}

impl ConcordanceRecord {
    pub fn new(concept_id: impl Into<String>, concorded_ids: Vec<String>) -> Self {
        Self {
            concept_id: concept_id.into(),
            concorded_ids,
        }
    }

    /// True for the sentinel returned when no record exists for a key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concept_id.is_empty()
    }
}

/// Inbound PUT body before validation.
///
/// Both fields are optional so that a missing `conceptId` or a `null`
/// `concordedIds` can be reported precisely instead of as corrupted JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcordancePayload {
    #[serde(default)]
    pub concept_id: Option<String>,
    #[serde(default)]
    pub concorded_ids: Option<Vec<String>>,
}

/// Result of a mutating operation.
///
/// Back-end clients yield `Created`, `Updated`, `Deleted` or `NotFound`; the
/// service layer collapses any dependency failure into `Error` after logging
/// which sub-system failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StorageOutcome {
    Created,
    Updated,
    Deleted,
    NotFound,
    Error,
}

impl StorageOutcome {
    /// Classifies an upsert from the item image the store held before the write.
    ///
    /// An empty previous key means nothing was there, so the write created the
    /// record; anything else was replaced.
    #[must_use]
    pub fn from_upsert_pre_image(previous: &ConcordanceRecord) -> Self {
        if previous.is_empty() {
            Self::Created
        } else {
            Self::Updated
        }
    }

    /// Classifies a delete from the item image the store held before removal.
    #[must_use]
    pub fn from_delete_pre_image(previous: &ConcordanceRecord) -> Self {
        if previous.is_empty() {
            Self::NotFound
        } else {
            Self::Deleted
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

//! # Concordances Storage
//!
//! DynamoDB-backed implementation of [`ConcordanceStore`].
//!
//! Items are keyed by `conceptId` (string hash key) and carry a single
//! `concordedIds` string list. Mutations ask DynamoDB for the previous item
//! image (`ALL_OLD`) so that created/updated and deleted/not-found can be
//! told apart without a separate read.
//!
//! [`ConcordanceStore`]: concordance_core::ConcordanceStore

pub mod dynamodb;

pub use dynamodb::{CONCORDED_IDS_ATTRIBUTE, DynamoDbConcordanceStore, TABLE_HASH_KEY};

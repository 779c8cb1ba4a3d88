//! # Concordances Notifications
//!
//! SNS-backed implementation of [`ConcordanceNotifier`].
//!
//! Downstream consumers expect an S3-event-shaped envelope whose object key is
//! the concept UUID with every `-` replaced by `/`:
//!
//! ```text
//! {"Records":[{"s3":{"object":{"key":"4f50b156/6c50/4693/b835/02f70d3f3bc0"}}}]}
//! ```
//!
//! [`ConcordanceNotifier`]: concordance_core::ConcordanceNotifier

pub mod message;
pub mod sns;

pub use message::{notification_key, notification_message};
pub use sns::SnsConcordanceNotifier;

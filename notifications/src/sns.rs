//! SNS notification client.

use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::error::DisplayErrorContext;

use concordance_core::ConcordanceNotifier;
use config::SnsConfig;
use errors::NotificationError;

use crate::message::notification_message;

/// Publishes change notifications to a single SNS topic.
#[derive(Debug, Clone)]
pub struct SnsConcordanceNotifier {
    client: Client,
    topic_arn: String,
}

impl SnsConcordanceNotifier {
    pub fn new(client: Client, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }

    /// Builds a client from the ambient AWS credential chain, pinned to the
    /// topic's region and optional endpoint override.
    pub async fn from_config(config: &SnsConfig) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_sns::config::Region::new(config.region.clone()))
            .load()
            .await;

        let mut client_config = aws_sdk_sns::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            client_config = client_config.endpoint_url(endpoint);
        }

        tracing::info!(
            topic_arn = %config.topic_arn,
            region = %config.region,
            "SNS client configured"
        );

        Self::new(
            Client::from_conf(client_config.build()),
            config.topic_arn.clone(),
        )
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

#[async_trait]
impl ConcordanceNotifier for SnsConcordanceNotifier {
    async fn send_message(&self, concept_id: &str) -> Result<(), NotificationError> {
        let message = notification_message(concept_id)?;

        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| NotificationError::Publish {
                topic: self.topic_arn.clone(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        tracing::info!(
            %concept_id,
            topic_arn = %self.topic_arn,
            message_id = output.message_id().unwrap_or_default(),
            "Concordance notification published"
        );
        Ok(())
    }

    async fn healthcheck(&self) -> Result<bool, NotificationError> {
        let output = self
            .client
            .get_topic_attributes()
            .topic_arn(&self.topic_arn)
            .send()
            .await
            .map_err(|e| NotificationError::TopicUnavailable {
                topic: self.topic_arn.clone(),
                reason: DisplayErrorContext(e).to_string(),
            })?;

        Ok(output
            .attributes()
            .is_some_and(|attributes| !attributes.is_empty()))
    }
}

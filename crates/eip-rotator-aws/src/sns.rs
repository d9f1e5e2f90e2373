//! SNS notifier

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::operation::publish::builders::PublishFluentBuilder;
use eip_rotator_core::traits::{MessageStructure, Notification, Notifier};
use eip_rotator_core::{Error, Result};

const PROVIDER: &str = "sns";

/// SNS-backed [`Notifier`]
#[derive(Debug, Clone)]
pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
}

impl SnsNotifier {
    /// Wrap an existing SNS client
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        Self { client }
    }

    fn request(&self, topic: &str, notification: &Notification) -> PublishFluentBuilder {
        let request = self
            .client
            .publish()
            .topic_arn(topic)
            .subject(&notification.subject)
            .message(&notification.message);

        // SNS only knows "json" here; a raw body is sent without the parameter.
        match notification.structure {
            MessageStructure::Raw => request,
        }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, topic: &str, notification: &Notification) -> Result<Option<String>> {
        tracing::debug!("Publish to {}: {}", topic, notification.subject);
        let output = self
            .request(topic, notification)
            .send()
            .await
            .map_err(|e| {
                Error::provider(PROVIDER, format!("Publish failed: {}", DisplayErrorContext(&e)))
            })?;

        Ok(output.message_id().map(str::to_string))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// # Notifier Trait
//
// Defines the interface for publishing a message to an external subscriber
// after a rotation.
//
// ## Implementations
//
// - SNS: `eip-rotator-aws` crate (`SnsNotifier`)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How the message body is interpreted by the notification service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStructure {
    /// The same plain body goes to every subscriber
    #[default]
    Raw,
}

/// A message to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
    /// Body structure
    pub structure: MessageStructure,
}

impl Notification {
    /// Message announcing that `dns_name` now points at `public_dns_name`
    pub fn record_updated(dns_name: &str, public_dns_name: &str) -> Self {
        Self {
            subject: format!("{} has been updated", dns_name),
            message: format!("{} => {}\n", dns_name, public_dns_name),
            structure: MessageStructure::Raw,
        }
    }
}

/// Trait for notification implementations
///
/// Implementations publish exactly one message per call and never retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a message to a topic
    ///
    /// # Returns
    ///
    /// The provider's message id, when it reports one.
    async fn publish(
        &self,
        topic: &str,
        notification: &Notification,
    ) -> Result<Option<String>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

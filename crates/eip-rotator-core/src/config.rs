//! Configuration types for the EIP rotator
//!
//! All configuration comes from the execution environment. The three target
//! identifiers are required; the notification topic is optional.

use serde::{Deserialize, Serialize};

/// Target compute instance identifier
pub const INSTANCE_ID_VAR: &str = "INSTANCE_ID";

/// Target DNS zone identifier
pub const HOSTED_ZONE_ID_VAR: &str = "HOSTED_ZONE_ID";

/// DNS record name to upsert
pub const DNS_NAME_VAR: &str = "DNS_NAME";

/// Optional notification topic identifier
pub const SNS_TOPIC_VAR: &str = "SNS_TOPIC";

/// TTL (seconds) of the CNAME record written after each rotation
pub const RECORD_TTL_SECS: u32 = 60;

/// Rotation target configuration
///
/// Built with [`RotatorConfig::from_env`] in production or
/// [`RotatorConfig::from_lookup`] anywhere the process environment should
/// not be touched. Construction never fails; call [`RotatorConfig::validate`]
/// before using it (the rotator does this itself).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotatorConfig {
    /// Instance whose public address is rotated
    pub instance_id: String,

    /// Hosted zone containing the record
    pub hosted_zone_id: String,

    /// Record name that receives the new hostname
    pub dns_name: String,

    /// Topic notified after the update (skipped when `None`)
    #[serde(default)]
    pub sns_topic: Option<String>,
}

impl RotatorConfig {
    /// Create a configuration without a notification topic
    pub fn new(
        instance_id: impl Into<String>,
        hosted_zone_id: impl Into<String>,
        dns_name: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            hosted_zone_id: hosted_zone_id.into(),
            dns_name: dns_name.into(),
            sns_topic: None,
        }
    }

    /// Set the notification topic
    pub fn with_sns_topic(mut self, topic: impl Into<String>) -> Self {
        self.sns_topic = non_empty(topic.into());
        self
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Values are trimmed. Missing required values become empty strings and
    /// are reported by [`RotatorConfig::validate`]; an empty topic becomes
    /// `None`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            instance_id: read(INSTANCE_ID_VAR),
            hosted_zone_id: read(HOSTED_ZONE_ID_VAR),
            dns_name: read(DNS_NAME_VAR),
            sns_topic: non_empty(read(SNS_TOPIC_VAR)),
        }
    }

    /// Validate the configuration
    ///
    /// Required values are checked in declaration order and the first
    /// missing one is reported.
    pub fn validate(&self) -> Result<(), crate::Error> {
        let required = [
            (INSTANCE_ID_VAR, &self.instance_id),
            (HOSTED_ZONE_ID_VAR, &self.hosted_zone_id),
            (DNS_NAME_VAR, &self.dns_name),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(crate::Error::config(format!(
                    "Cannot get {} from ENV.",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Whether a notification will be published after the DNS update
    pub fn notifications_enabled(&self) -> bool {
        self.sns_topic.is_some()
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// # DNS Provider Trait
//
// Defines the interface for changing DNS records via provider APIs.
//
// ## Implementations
//
// - Route 53: `eip-rotator-aws` crate (`Route53Dns`)
//
// ## Usage
//
// ```rust,ignore
// use eip_rotator_core::traits::{DnsProvider, RecordChange};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let change = RecordChange::cname_upsert(
//         "app.example.com",
//         "ec2-5-6-7-8.compute.amazonaws.com",
//     );
//     provider.upsert_record("Z1", &change).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::RECORD_TTL_SECS;

/// DNS change action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record if absent, overwrite it if present
    Upsert,
}

impl ChangeAction {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Upsert => "UPSERT",
        }
    }
}

/// DNS record type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Canonical name record
    Cname,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Cname => "CNAME",
        }
    }
}

/// A single change to a resource record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordChange {
    /// What to do with the record
    pub action: ChangeAction,
    /// Record name (e.g., "app.example.com")
    pub name: String,
    /// Record type
    pub record_type: RecordType,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// Target values
    pub values: Vec<String>,
}

impl RecordChange {
    /// The change issued after every rotation: UPSERT a CNAME with a 60s TTL
    /// and a single target
    pub fn cname_upsert(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            action: ChangeAction::Upsert,
            name: name.into(),
            record_type: RecordType::Cname,
            ttl: RECORD_TTL_SECS,
            values: vec![target.into()],
        }
    }
}

/// Provider acknowledgement of a submitted change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeInfo {
    /// Change identifier
    pub id: String,
    /// Propagation status as reported by the provider (e.g., "PENDING")
    pub status: String,
}

/// Trait for DNS provider implementations
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Perform API calls to their endpoints only
/// - ✅ Parse provider-specific responses
/// - ✅ Return success or failure
///
/// ## Forbidden Capabilities
/// - ❌ Retry or back off
/// - ❌ Delete records (records are only ever upserted)
/// - ❌ Decide whether an update is needed (owned by `Rotator`)
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Apply one record change in a zone
    ///
    /// # Parameters
    ///
    /// - `zone_id`: The hosted zone identifier
    /// - `change`: The change to apply
    ///
    /// # Returns
    ///
    /// - `Ok(ChangeInfo)`: The provider accepted the change
    /// - `Err(Error)`: If the change was rejected or the request failed
    async fn upsert_record(
        &self,
        zone_id: &str,
        change: &RecordChange,
    ) -> Result<ChangeInfo, crate::Error>;

    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "route53")
    fn provider_name(&self) -> &'static str;
}

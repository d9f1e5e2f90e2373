//! Public address rotation
//!
//! The Rotator is responsible for:
//! - Finding the instance's current address association
//! - Releasing the old address (best effort)
//! - Allocating and associating a new address
//! - Pointing the DNS record at the instance's new public hostname
//! - Notifying a subscriber when a topic is configured
//!
//! ## Architecture
//!
//! ```text
//!                   ┌──────────────┐
//!   RotatorConfig ─►│   Rotator    │─► RotationReport
//!                   └──────────────┘
//!                          │
//!        ┌─────────────────┼─────────────────┐
//!        ▼                 ▼                 ▼
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │ ComputeApi  │   │ DnsProvider │   │  Notifier   │
//! │ (addresses) │   │ (upsert)    │   │ (publish)   │
//! └─────────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! ## Flow
//!
//! 1. Validate configuration (no remote call on failure)
//! 2. Describe the instance, read its single interface's association
//! 3. Disassociate and release the old address; errors are logged and dropped
//! 4. Allocate a VPC address (fatal on error)
//! 5. Associate it with the instance (fatal on error)
//! 6. Describe the instance again for the new public hostname
//! 7. UPSERT the CNAME record when a hostname was found (fatal on error)
//! 8. Publish a notification when a topic is configured
//!
//! There are no retries and no rollback. A failure after step 5 leaves the
//! new address associated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::RotatorConfig;
use crate::error::Result;
use crate::traits::{
    AddressDomain, Association, ChangeInfo, ComputeApi, DnsProvider, Notification, Notifier,
    RecordChange,
};

/// What happened to the previously associated address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    /// Public IP that was associated before the rotation
    pub public_ip: String,
    /// The old association was removed
    pub disassociated: bool,
    /// The old allocation was released
    pub released: bool,
    /// Error that stopped the cleanup early, if any
    pub error: Option<String>,
}

impl CleanupOutcome {
    fn new(public_ip: impl Into<String>) -> Self {
        Self {
            public_ip: public_ip.into(),
            ..Self::default()
        }
    }
}

/// Summary of one rotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationReport {
    /// Rotated instance
    pub instance_id: String,
    /// Public IP before the rotation
    pub previous_ip: Option<String>,
    /// Old address cleanup, when there was an old address
    pub cleanup: Option<CleanupOutcome>,
    /// Allocation id of the new address
    pub allocation_id: String,
    /// Public IP of the new address
    pub new_ip: String,
    /// Association id of the new binding
    pub association_id: Option<String>,
    /// Public hostname observed after the new association
    pub public_dns_name: Option<String>,
    /// DNS change acknowledgement (absent when the upsert was skipped)
    pub dns_change: Option<ChangeInfo>,
    /// Notification message id
    pub notification_id: Option<String>,
    /// A notification was published
    pub notified: bool,
    /// When the rotation started
    pub started_at: DateTime<Utc>,
    /// When the rotation finished
    pub finished_at: DateTime<Utc>,
}

impl RotationReport {
    /// Whether the DNS record was updated
    pub fn dns_updated(&self) -> bool {
        self.dns_change.is_some()
    }
}

/// Rotates an instance's public address and republishes it to DNS
///
/// The provider handles are built once per process and reused for every
/// invocation. The rotator itself holds no state between invocations.
///
/// ## Concurrency
///
/// Each call to [`Rotator::rotate`] assumes sole ownership of the target
/// instance's network interface. Two concurrent rotations of the same
/// instance race; nothing here prevents it.
pub struct Rotator {
    /// Compute API for instances and addresses
    compute: Box<dyn ComputeApi>,

    /// DNS provider for the record upsert
    dns: Box<dyn DnsProvider>,

    /// Notifier for the optional message
    notifier: Box<dyn Notifier>,
}

impl Rotator {
    /// Create a new rotator
    ///
    /// # Parameters
    ///
    /// - `compute`: Compute API implementation
    /// - `dns`: DNS provider implementation
    /// - `notifier`: Notifier implementation (only used when a topic is set)
    pub fn new(
        compute: Box<dyn ComputeApi>,
        dns: Box<dyn DnsProvider>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            compute,
            dns,
            notifier,
        }
    }

    /// Run one rotation
    ///
    /// # Returns
    ///
    /// - `Ok(RotationReport)`: The new address is associated (DNS and
    ///   notification as reported)
    /// - `Err(Error::Config)`: A required value is missing; nothing was called
    /// - `Err(Error)`: Allocation, association, instance lookup, DNS upsert or
    ///   publish failed
    pub async fn rotate(&self, config: &RotatorConfig) -> Result<RotationReport> {
        config.validate()?;

        let started_at = Utc::now();
        let instance_id = config.instance_id.as_str();

        let previous = self.current_association(instance_id).await?;
        let previous_ip = previous.and_then(|association| association.public_ip);

        let cleanup = match previous_ip.as_deref() {
            Some(public_ip) => {
                info!("{} current public IP: {}", instance_id, public_ip);
                Some(self.release_previous(public_ip).await)
            }
            None => None,
        };

        let allocated = self.compute.allocate_address(AddressDomain::Vpc).await?;
        info!("Allocate new EIP: {}", allocated.public_ip);

        info!(
            "Associate EIP {} to instance {}",
            allocated.public_ip, instance_id
        );
        let association_id = self
            .compute
            .associate_address(&allocated.allocation_id, instance_id)
            .await?;

        let public_dns_name = self
            .current_association(instance_id)
            .await?
            .and_then(|association| association.hostname().map(str::to_string));

        let dns_change = match public_dns_name.as_deref() {
            Some(hostname) => Some(self.update_record(config, hostname).await?),
            None => {
                debug!(
                    "No public DNS name on {}, leaving {} untouched",
                    instance_id, config.dns_name
                );
                None
            }
        };

        info!("Rotation done.");

        let notification_id = match config.sns_topic.as_deref() {
            Some(topic) => Some(
                self.notify(config, topic, public_dns_name.as_deref())
                    .await?,
            ),
            None => None,
        };

        Ok(RotationReport {
            instance_id: instance_id.to_string(),
            previous_ip,
            cleanup,
            allocation_id: allocated.allocation_id,
            new_ip: allocated.public_ip,
            association_id,
            public_dns_name,
            dns_change,
            notified: notification_id.is_some(),
            notification_id: notification_id.flatten(),
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Look up the association of the instance's single network interface
    ///
    /// Anything other than exactly one instance with exactly one interface is
    /// logged and reported as "no association". A failing describe call is
    /// returned to the caller.
    async fn current_association(&self, instance_id: &str) -> Result<Option<Association>> {
        let mut instances = self.compute.describe_instance(instance_id).await?;

        if instances.len() != 1 {
            error!(
                "Expected 1 instance for {}, got {}",
                instance_id,
                instances.len()
            );
            return Ok(None);
        }

        let mut interfaces = instances.remove(0).network_interfaces;
        if interfaces.len() != 1 {
            error!("{} ENI with instance {}", interfaces.len(), instance_id);
            return Ok(None);
        }

        let association = interfaces.remove(0).association;
        if association.is_none() {
            info!("No EIP attached with {}", instance_id);
        }

        Ok(association)
    }

    /// Best-effort teardown of the old address
    ///
    /// Never fails: a provider error ends the cleanup, is logged, and is
    /// recorded in the outcome.
    async fn release_previous(&self, public_ip: &str) -> CleanupOutcome {
        let mut outcome = CleanupOutcome::new(public_ip);

        if let Err(e) = self.try_release(public_ip, &mut outcome).await {
            error!("Failed to clean up {}: {}", public_ip, e);
            outcome.error = Some(e.to_string());
        }

        outcome
    }

    async fn try_release(&self, public_ip: &str, outcome: &mut CleanupOutcome) -> Result<()> {
        let addresses = self.compute.describe_addresses(public_ip).await?;

        let [address] = addresses.as_slice() else {
            warn!(
                "Expected 1 address for {}, got {}; skipping cleanup",
                public_ip,
                addresses.len()
            );
            return Ok(());
        };

        if let Some(association_id) = address.association_id.as_deref() {
            info!("Association Id: {}", association_id);
            info!("Disassociate {}", public_ip);
            self.compute.disassociate_address(association_id).await?;
            outcome.disassociated = true;
        }

        if let Some(allocation_id) = address.allocation_id.as_deref() {
            info!("Release {}", public_ip);
            self.compute.release_address(allocation_id).await?;
            outcome.released = true;
        }

        Ok(())
    }

    /// UPSERT the CNAME record to `hostname`
    async fn update_record(&self, config: &RotatorConfig, hostname: &str) -> Result<ChangeInfo> {
        info!("Updating {} => {}", config.dns_name, hostname);

        let change = RecordChange::cname_upsert(&config.dns_name, hostname);
        let info = self
            .dns
            .upsert_record(&config.hosted_zone_id, &change)
            .await?;

        info!("{} has been updated to {}", config.dns_name, hostname);
        debug!(
            "{} change {} is {}",
            self.dns.provider_name(),
            info.id,
            info.status
        );

        Ok(info)
    }

    /// Publish the "record updated" message
    ///
    /// A missing hostname still produces a message, with an empty target.
    async fn notify(
        &self,
        config: &RotatorConfig,
        topic: &str,
        hostname: Option<&str>,
    ) -> Result<Option<String>> {
        if hostname.is_none() {
            warn!(
                "Publishing update for {} without a public DNS name",
                config.dns_name
            );
        }

        let notification = Notification::record_updated(&config.dns_name, hostname.unwrap_or(""));
        let message_id = self.notifier.publish(topic, &notification).await?;

        debug!(
            "Published to {} via {} (message id: {:?})",
            topic,
            self.notifier.provider_name(),
            message_id
        );

        Ok(message_id)
    }
}

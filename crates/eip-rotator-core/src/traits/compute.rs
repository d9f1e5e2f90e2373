// # Compute API Trait
//
// Defines the interface to the provider's compute service: instance
// descriptions and the lifecycle of allocatable public addresses.
//
// ## Implementations
//
// - EC2: `eip-rotator-aws` crate (`Ec2Compute`)
//
// ## Address lifecycle
//
// ```text
// allocate ──► associate ──► (instance serves traffic) ──► disassociate ──► release
// ```
//
// An address must be disassociated before it can be released. The rotator
// drives the whole lifecycle within one invocation; implementations only
// forward single calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Scope an address is allocated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressDomain {
    /// Virtual private cloud
    Vpc,
}

impl AddressDomain {
    /// Wire name of the domain
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressDomain::Vpc => "vpc",
        }
    }
}

/// Binding between a public address and a network interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Public IP of the bound address
    pub public_ip: Option<String>,
    /// Public DNS hostname the instance got for this address
    pub public_dns_name: Option<String>,
    /// Owner of the address ("amazon" for auto-assigned addresses)
    pub ip_owner_id: Option<String>,
}

impl Association {
    /// Public hostname, treating an empty string as absent
    pub fn hostname(&self) -> Option<&str> {
        self.public_dns_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }
}

/// One network interface attached to an instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// Interface identifier
    pub network_interface_id: Option<String>,
    /// Current address association, if any
    pub association: Option<Association>,
}

/// One instance returned by a describe call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Instance identifier
    pub instance_id: String,
    /// Attached network interfaces
    pub network_interfaces: Vec<NetworkInterface>,
}

/// An allocatable public address as the provider describes it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Public IP value
    pub public_ip: String,
    /// Allocation identifier (present for VPC addresses)
    pub allocation_id: Option<String>,
    /// Association identifier while bound
    pub association_id: Option<String>,
    /// Instance the address is bound to, if any
    pub instance_id: Option<String>,
}

/// Result of a successful allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedAddress {
    /// Allocation identifier of the new address
    pub allocation_id: String,
    /// Public IP of the new address
    pub public_ip: String,
}

/// Trait for compute API implementations
///
/// # Trust Level: Untrusted
///
/// Like every provider in this crate, implementations are single-shot:
///
/// - ✅ One remote call per method, result or error returned as-is
/// - ❌ No retries or backoff (the rotator has no retry policy either)
/// - ❌ No caching between calls
/// - ❌ No decisions about which address to release or keep
#[async_trait]
pub trait ComputeApi: Send + Sync {
    /// Describe an instance
    ///
    /// Returns every instance the provider reports for `instance_id`,
    /// flattened across reservations. A well-formed answer holds exactly
    /// one entry; the caller decides what to do otherwise.
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<InstanceRecord>, crate::Error>;

    /// Look up addresses by public IP
    async fn describe_addresses(&self, public_ip: &str) -> Result<Vec<Address>, crate::Error>;

    /// Remove an association
    async fn disassociate_address(&self, association_id: &str) -> Result<(), crate::Error>;

    /// Release an allocation back to the provider
    async fn release_address(&self, allocation_id: &str) -> Result<(), crate::Error>;

    /// Allocate a new public address
    async fn allocate_address(&self, domain: AddressDomain) -> Result<AllocatedAddress, crate::Error>;

    /// Bind an allocation to an instance
    ///
    /// # Returns
    ///
    /// The new association id when the provider reports one.
    async fn associate_address(
        &self,
        allocation_id: &str,
        instance_id: &str,
    ) -> Result<Option<String>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_hostname_is_absent() {
        let association = Association {
            public_ip: Some("5.6.7.8".to_string()),
            public_dns_name: Some(String::new()),
            ip_owner_id: None,
        };
        assert_eq!(association.hostname(), None);
    }

    #[test]
    fn test_hostname_present() {
        let association = Association {
            public_ip: Some("5.6.7.8".to_string()),
            public_dns_name: Some("ec2-5-6-7-8.compute.amazonaws.com".to_string()),
            ip_owner_id: None,
        };
        assert_eq!(
            association.hostname(),
            Some("ec2-5-6-7-8.compute.amazonaws.com")
        );
    }

    #[test]
    fn test_domain_wire_name() {
        assert_eq!(AddressDomain::Vpc.as_str(), "vpc");
    }
}

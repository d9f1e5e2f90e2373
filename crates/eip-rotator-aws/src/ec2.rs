//! EC2 compute provider
//!
//! ## API Reference
//!
//! - DescribeInstances, DescribeAddresses
//! - AllocateAddress (`Domain=vpc`), AssociateAddress
//! - DisassociateAddress, ReleaseAddress

use async_trait::async_trait;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::operation::allocate_address::AllocateAddressOutput;
use aws_sdk_ec2::operation::describe_instances::DescribeInstancesOutput;
use aws_sdk_ec2::types::{DomainType, InstanceNetworkInterface};
use eip_rotator_core::traits::{
    Address, AddressDomain, AllocatedAddress, Association, ComputeApi, InstanceRecord,
    NetworkInterface,
};
use eip_rotator_core::{Error, Result};

const PROVIDER: &str = "ec2";

/// EC2-backed [`ComputeApi`]
///
/// Single-shot: every method is exactly one EC2 API call.
#[derive(Debug, Clone)]
pub struct Ec2Compute {
    client: aws_sdk_ec2::Client,
}

impl Ec2Compute {
    /// Wrap an existing EC2 client
    pub fn new(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ComputeApi for Ec2Compute {
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<InstanceRecord>> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeInstances", e))?;

        let records = instance_records(&output);
        tracing::debug!("DescribeInstances {}: {} instance(s)", instance_id, records.len());
        Ok(records)
    }

    async fn describe_addresses(&self, public_ip: &str) -> Result<Vec<Address>> {
        let output = self
            .client
            .describe_addresses()
            .public_ips(public_ip)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeAddresses", e))?;

        Ok(output.addresses().iter().map(address).collect())
    }

    async fn disassociate_address(&self, association_id: &str) -> Result<()> {
        self.client
            .disassociate_address()
            .association_id(association_id)
            .send()
            .await
            .map_err(|e| sdk_error("DisassociateAddress", e))?;

        Ok(())
    }

    async fn release_address(&self, allocation_id: &str) -> Result<()> {
        self.client
            .release_address()
            .allocation_id(allocation_id)
            .send()
            .await
            .map_err(|e| sdk_error("ReleaseAddress", e))?;

        Ok(())
    }

    async fn allocate_address(&self, domain: AddressDomain) -> Result<AllocatedAddress> {
        let output = self
            .client
            .allocate_address()
            .domain(domain_type(domain))
            .send()
            .await
            .map_err(|e| sdk_error("AllocateAddress", e))?;
        tracing::debug!("AllocateAddress in {} domain succeeded", domain.as_str());

        allocated_address(&output)
    }

    async fn associate_address(
        &self,
        allocation_id: &str,
        instance_id: &str,
    ) -> Result<Option<String>> {
        let output = self
            .client
            .associate_address()
            .allocation_id(allocation_id)
            .instance_id(instance_id)
            .send()
            .await
            .map_err(|e| sdk_error("AssociateAddress", e))?;

        Ok(output.association_id().map(str::to_string))
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

fn sdk_error<E>(operation: &str, err: E) -> Error
where
    E: std::error::Error,
{
    Error::provider(
        PROVIDER,
        format!("{} failed: {}", operation, DisplayErrorContext(&err)),
    )
}

fn domain_type(domain: AddressDomain) -> DomainType {
    match domain {
        AddressDomain::Vpc => DomainType::Vpc,
    }
}

/// Flatten a DescribeInstances answer into one record per instance
pub fn instance_records(output: &DescribeInstancesOutput) -> Vec<InstanceRecord> {
    output
        .reservations()
        .iter()
        .flat_map(|reservation| reservation.instances())
        .map(|instance| InstanceRecord {
            instance_id: instance.instance_id().unwrap_or_default().to_string(),
            network_interfaces: instance
                .network_interfaces()
                .iter()
                .map(network_interface)
                .collect(),
        })
        .collect()
}

fn network_interface(interface: &InstanceNetworkInterface) -> NetworkInterface {
    NetworkInterface {
        network_interface_id: interface.network_interface_id().map(str::to_string),
        association: interface.association().map(|association| Association {
            public_ip: association.public_ip().map(str::to_string),
            public_dns_name: association.public_dns_name().map(str::to_string),
            ip_owner_id: association.ip_owner_id().map(str::to_string),
        }),
    }
}

fn address(address: &aws_sdk_ec2::types::Address) -> Address {
    Address {
        public_ip: address.public_ip().unwrap_or_default().to_string(),
        allocation_id: address.allocation_id().map(str::to_string),
        association_id: address.association_id().map(str::to_string),
        instance_id: address.instance_id().map(str::to_string),
    }
}

/// Read the allocation id and IP out of an AllocateAddress answer
pub fn allocated_address(output: &AllocateAddressOutput) -> Result<AllocatedAddress> {
    let allocation_id = output
        .allocation_id()
        .ok_or_else(|| Error::invalid_response("AllocateAddress returned no AllocationId"))?;
    let public_ip = output
        .public_ip()
        .ok_or_else(|| Error::invalid_response("AllocateAddress returned no PublicIp"))?;

    Ok(AllocatedAddress {
        allocation_id: allocation_id.to_string(),
        public_ip: public_ip.to_string(),
    })
}

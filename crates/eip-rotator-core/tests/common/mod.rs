//! Test doubles and common utilities for rotation contract tests
//!
//! Every double appends to one shared, ordered call log so tests can assert
//! the exact sequence of remote calls a rotation makes.

#![allow(dead_code)]

use eip_rotator_core::error::{Error, Result};
use eip_rotator_core::traits::{
    Address, AddressDomain, AllocatedAddress, Association, ChangeInfo, ComputeApi, DnsProvider,
    InstanceRecord, NetworkInterface, Notification, Notifier, RecordChange,
};
use eip_rotator_core::{Rotator, RotatorConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const INSTANCE_ID: &str = "i-123";
pub const ZONE_ID: &str = "Z1";
pub const DNS_NAME: &str = "app.example.com";
pub const TOPIC: &str = "arn:sns:topic1";
pub const OLD_IP: &str = "1.2.3.4";
pub const NEW_IP: &str = "5.6.7.8";
pub const NEW_HOSTNAME: &str = "ec2-5-6-7-8.compute.amazonaws.com";

/// One recorded remote call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DescribeInstances(String),
    DescribeAddresses(String),
    DisassociateAddress(String),
    ReleaseAddress(String),
    AllocateAddress(AddressDomain),
    AssociateAddress {
        allocation_id: String,
        instance_id: String,
    },
    ChangeResourceRecordSets {
        zone_id: String,
        change: RecordChange,
    },
    Publish {
        topic: String,
        notification: Notification,
    },
}

impl Call {
    /// Operation name, as the provider API calls it
    pub fn name(&self) -> &'static str {
        match self {
            Call::DescribeInstances(_) => "describe_instances",
            Call::DescribeAddresses(_) => "describe_addresses",
            Call::DisassociateAddress(_) => "disassociate_address",
            Call::ReleaseAddress(_) => "release_address",
            Call::AllocateAddress(_) => "allocate_address",
            Call::AssociateAddress { .. } => "associate_address",
            Call::ChangeResourceRecordSets { .. } => "change_resource_record_sets",
            Call::Publish { .. } => "publish",
        }
    }
}

/// Shared, ordered record of remote calls
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    /// All calls so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Operation names of all calls so far
    pub fn names(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(Call::name).collect()
    }

    /// Number of calls with the given operation name
    pub fn count(&self, name: &str) -> usize {
        self.names().iter().filter(|n| **n == name).count()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().unwrap().is_empty()
    }
}

/// Compute operations a test can make fail
#[derive(Debug, Clone, Copy, Default)]
pub struct ComputeFailures {
    pub describe_instances: bool,
    pub describe_addresses: bool,
    pub disassociate: bool,
    pub release: bool,
    pub allocate: bool,
    pub associate: bool,
}

/// A scripted ComputeApi
///
/// `describe_instance` answers are consumed in order; once one answer is
/// left it is repeated.
pub struct MockCompute {
    log: CallLog,
    describe_answers: Mutex<VecDeque<Vec<InstanceRecord>>>,
    addresses: Vec<Address>,
    allocation: AllocatedAddress,
    failures: ComputeFailures,
}

impl MockCompute {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            describe_answers: Mutex::new(VecDeque::new()),
            addresses: Vec::new(),
            allocation: AllocatedAddress {
                allocation_id: "eipalloc-new".to_string(),
                public_ip: NEW_IP.to_string(),
            },
            failures: ComputeFailures::default(),
        }
    }

    /// Queue the next describe_instance answer
    pub fn then_describe(self, instances: Vec<InstanceRecord>) -> Self {
        self.describe_answers.lock().unwrap().push_back(instances);
        self
    }

    /// Addresses returned by describe_addresses
    pub fn with_addresses(mut self, addresses: Vec<Address>) -> Self {
        self.addresses = addresses;
        self
    }

    pub fn with_failures(mut self, failures: ComputeFailures) -> Self {
        self.failures = failures;
        self
    }

    fn fail(&self, operation: &str) -> Error {
        Error::provider("mock-compute", format!("{} failed", operation))
    }
}

#[async_trait::async_trait]
impl ComputeApi for MockCompute {
    async fn describe_instance(&self, instance_id: &str) -> Result<Vec<InstanceRecord>> {
        self.log.push(Call::DescribeInstances(instance_id.to_string()));
        if self.failures.describe_instances {
            return Err(self.fail("DescribeInstances"));
        }

        let mut answers = self.describe_answers.lock().unwrap();
        let answer = if answers.len() > 1 {
            answers.pop_front()
        } else {
            answers.front().cloned()
        };
        Ok(answer.unwrap_or_default())
    }

    async fn describe_addresses(&self, public_ip: &str) -> Result<Vec<Address>> {
        self.log.push(Call::DescribeAddresses(public_ip.to_string()));
        if self.failures.describe_addresses {
            return Err(self.fail("DescribeAddresses"));
        }
        Ok(self.addresses.clone())
    }

    async fn disassociate_address(&self, association_id: &str) -> Result<()> {
        self.log
            .push(Call::DisassociateAddress(association_id.to_string()));
        if self.failures.disassociate {
            return Err(self.fail("DisassociateAddress"));
        }
        Ok(())
    }

    async fn release_address(&self, allocation_id: &str) -> Result<()> {
        self.log.push(Call::ReleaseAddress(allocation_id.to_string()));
        if self.failures.release {
            return Err(self.fail("ReleaseAddress"));
        }
        Ok(())
    }

    async fn allocate_address(&self, domain: AddressDomain) -> Result<AllocatedAddress> {
        self.log.push(Call::AllocateAddress(domain));
        if self.failures.allocate {
            return Err(self.fail("AllocateAddress"));
        }
        Ok(self.allocation.clone())
    }

    async fn associate_address(
        &self,
        allocation_id: &str,
        instance_id: &str,
    ) -> Result<Option<String>> {
        self.log.push(Call::AssociateAddress {
            allocation_id: allocation_id.to_string(),
            instance_id: instance_id.to_string(),
        });
        if self.failures.associate {
            return Err(self.fail("AssociateAddress"));
        }
        Ok(Some("eipassoc-new".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "mock-compute"
    }
}

/// A DnsProvider that records upserts
pub struct MockDns {
    log: CallLog,
    fail: bool,
}

impl MockDns {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDns {
    async fn upsert_record(&self, zone_id: &str, change: &RecordChange) -> Result<ChangeInfo> {
        self.log.push(Call::ChangeResourceRecordSets {
            zone_id: zone_id.to_string(),
            change: change.clone(),
        });
        if self.fail {
            return Err(Error::provider("mock-dns", "ChangeResourceRecordSets failed"));
        }
        Ok(ChangeInfo {
            id: "/change/C1".to_string(),
            status: "PENDING".to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock-dns"
    }
}

/// A Notifier that records publishes
pub struct MockNotifier {
    log: CallLog,
    fail: bool,
}

impl MockNotifier {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(log: &CallLog) -> Self {
        Self {
            log: log.clone(),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn publish(&self, topic: &str, notification: &Notification) -> Result<Option<String>> {
        self.log.push(Call::Publish {
            topic: topic.to_string(),
            notification: notification.clone(),
        });
        if self.fail {
            return Err(Error::provider("mock-notifier", "Publish failed"));
        }
        Ok(Some("msg-1".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "mock-notifier"
    }
}

/// Instance with one interface bound to `public_ip`
pub fn associated_instance(public_ip: &str, hostname: Option<&str>) -> Vec<InstanceRecord> {
    vec![InstanceRecord {
        instance_id: INSTANCE_ID.to_string(),
        network_interfaces: vec![NetworkInterface {
            network_interface_id: Some("eni-1".to_string()),
            association: Some(Association {
                public_ip: Some(public_ip.to_string()),
                public_dns_name: hostname.map(str::to_string),
                ip_owner_id: None,
            }),
        }],
    }]
}

/// Instance with one interface and no association
pub fn unassociated_instance() -> Vec<InstanceRecord> {
    instance_with_interfaces(1)
}

/// Instance with `count` unassociated interfaces
pub fn instance_with_interfaces(count: usize) -> Vec<InstanceRecord> {
    vec![InstanceRecord {
        instance_id: INSTANCE_ID.to_string(),
        network_interfaces: (0..count)
            .map(|i| NetworkInterface {
                network_interface_id: Some(format!("eni-{}", i)),
                association: None,
            })
            .collect(),
    }]
}

/// The old address as describe_addresses reports it while bound
pub fn old_address() -> Address {
    Address {
        public_ip: OLD_IP.to_string(),
        allocation_id: Some("eipalloc-old".to_string()),
        association_id: Some("eipassoc-old".to_string()),
        instance_id: Some(INSTANCE_ID.to_string()),
    }
}

/// Instance currently bound to the old address, then to the new one
pub fn rotating_compute(log: &CallLog) -> MockCompute {
    MockCompute::new(log)
        .then_describe(associated_instance(OLD_IP, Some("ec2-1-2-3-4.compute.amazonaws.com")))
        .then_describe(associated_instance(NEW_IP, Some(NEW_HOSTNAME)))
        .with_addresses(vec![old_address()])
}

/// Configuration of the reference scenario, with a topic
pub fn scenario_config() -> RotatorConfig {
    RotatorConfig::new(INSTANCE_ID, ZONE_ID, DNS_NAME).with_sns_topic(TOPIC)
}

/// Build a rotator from the given doubles
pub fn rotator(compute: MockCompute, dns: MockDns, notifier: MockNotifier) -> Rotator {
    Rotator::new(Box::new(compute), Box::new(dns), Box::new(notifier))
}

//! Core traits for the EIP rotator
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`ComputeApi`]: Describe instances and manage public addresses
//! - [`DnsProvider`]: Upsert DNS records via provider APIs
//! - [`Notifier`]: Publish a message after a rotation

pub mod compute;
pub mod dns_provider;
pub mod notifier;

pub use compute::{
    Address, AddressDomain, AllocatedAddress, Association, ComputeApi, InstanceRecord,
    NetworkInterface,
};
pub use dns_provider::{ChangeAction, ChangeInfo, DnsProvider, RecordChange, RecordType};
pub use notifier::{MessageStructure, Notification, Notifier};

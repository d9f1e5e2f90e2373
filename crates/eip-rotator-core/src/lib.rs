// # eip-rotator-core
//
// Core library for rotating a compute instance's public address and
// republishing the change to DNS.
//
// ## Architecture Overview
//
// - **ComputeApi**: Trait for describing instances and managing public addresses
// - **DnsProvider**: Trait for upserting DNS records via provider APIs
// - **Notifier**: Trait for publishing a message after a rotation
// - **Rotator**: Runs the release → allocate → associate → DNS → notify sequence
// - **handle_invocation**: Maps one rotation to an exit status
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Rotation logic is separate from provider APIs
// 2. **Injected Capabilities**: Provider clients are built once and passed in
// 3. **Single-Shot**: One invocation, no retries, no persistent state
// 4. **Library-First**: The binary only wires environment, logging and clients

pub mod traits;
pub mod rotator;
pub mod handler;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{ComputeApi, DnsProvider, Notifier};
pub use rotator::{CleanupOutcome, RotationReport, Rotator};
pub use handler::{InvocationStatus, handle_invocation};
pub use config::RotatorConfig;
pub use error::{Error, Result};

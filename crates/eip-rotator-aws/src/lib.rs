// # AWS Providers
//
// This crate implements the rotator's provider traits on top of the AWS SDK:
//
// - `Ec2Compute`: instances and Elastic IPs (EC2)
// - `Route53Dns`: record upserts (Route 53)
// - `SnsNotifier`: update notifications (SNS)
//
// ## Architectural Constraints
//
// Providers are **untrusted**, single-shot components:
//
// - ✅ One AWS API call per trait method
// - ✅ SDK errors propagated with their full context
// - ❌ NO retry logic beyond the SDK client's own defaults
// - ❌ NO caching between calls
// - ❌ NO decisions about what to rotate (owned by `Rotator`)
//
// ## Credentials
//
// Credentials and region come from the standard AWS provider chain
// (environment, profile, instance or task role). They are never logged.

pub mod ec2;
pub mod route53;
pub mod sns;

pub use ec2::Ec2Compute;
pub use route53::Route53Dns;
pub use sns::SnsNotifier;

use aws_config::SdkConfig;
use eip_rotator_core::Rotator;

/// Provider handles built once per process
#[derive(Debug, Clone)]
pub struct AwsClients {
    /// EC2 compute provider
    pub compute: Ec2Compute,
    /// Route 53 DNS provider
    pub dns: Route53Dns,
    /// SNS notifier
    pub notifier: SnsNotifier,
}

impl AwsClients {
    /// Build all three clients from one shared SDK configuration
    pub fn from_sdk_config(config: &SdkConfig) -> Self {
        Self {
            compute: Ec2Compute::new(aws_sdk_ec2::Client::new(config)),
            dns: Route53Dns::new(aws_sdk_route53::Client::new(config)),
            notifier: SnsNotifier::new(aws_sdk_sns::Client::new(config)),
        }
    }

    /// Hand the clients to a new rotator
    pub fn into_rotator(self) -> Rotator {
        Rotator::new(
            Box::new(self.compute),
            Box::new(self.dns),
            Box::new(self.notifier),
        )
    }
}

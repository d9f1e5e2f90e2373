//! Invocation entry point
//!
//! Maps one rotation to a status the triggering runtime understands. The
//! trigger's event payload and context carry nothing the rotation needs, so
//! they are not passed in.

use tracing::{debug, error, info};

use crate::config::RotatorConfig;
use crate::rotator::Rotator;

/// Outcome of one invocation
///
/// These codes follow systemd conventions:
/// - 0: Rotation completed
/// - 1: Configuration error, nothing was called
/// - 2: A remote call failed and the rotation was aborted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStatus {
    /// Rotation completed
    Success = 0,
    /// A required value was missing
    ConfigError = 1,
    /// Unhandled remote failure
    RuntimeError = 2,
}

impl InvocationStatus {
    /// Numeric code of the status
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Run one rotation and report how it ended
///
/// Errors are logged here; the caller only needs the status.
pub async fn handle_invocation(rotator: &Rotator, config: &RotatorConfig) -> InvocationStatus {
    match rotator.rotate(config).await {
        Ok(report) => {
            info!(
                "Rotated {}: {} -> {} (dns updated: {}, notified: {})",
                report.instance_id,
                report.previous_ip.as_deref().unwrap_or("none"),
                report.new_ip,
                report.dns_updated(),
                report.notified
            );
            match serde_json::to_string(&report) {
                Ok(json) => debug!("Rotation report: {}", json),
                Err(e) => debug!("Rotation report not serializable: {}", e),
            }
            InvocationStatus::Success
        }
        Err(e) if e.is_config() => {
            error!("{}", e);
            InvocationStatus::ConfigError
        }
        Err(e) => {
            error!("Rotation failed: {}", e);
            InvocationStatus::RuntimeError
        }
    }
}

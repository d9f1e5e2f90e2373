// # eip-rotatord - Elastic IP rotation runner
//
// A THIN integration layer, run once per trigger (scheduler, alarm action):
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the AWS clients once
// 4. Running one rotation and exiting with its status
//
// All rotation logic lives in eip-rotator-core.
//
// ## Configuration
//
// ### Target
// - `INSTANCE_ID`: EC2 instance whose Elastic IP is rotated (required)
// - `HOSTED_ZONE_ID`: Route 53 hosted zone (required)
// - `DNS_NAME`: CNAME record pointed at the instance's public hostname (required)
// - `SNS_TOPIC`: Topic ARN notified after the update (optional)
//
// ### Logging
// - `ROTATOR_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
//
// AWS credentials and region come from the standard AWS environment.
//
// ## Exit codes
//
// - 0: Rotation completed
// - 1: Configuration error (no AWS call was made)
// - 2: Runtime error (a fatal AWS call failed)
//
// ## Example
//
// ```bash
// export INSTANCE_ID=i-0123456789abcdef0
// export HOSTED_ZONE_ID=Z1D633PJN98FT9
// export DNS_NAME=app.example.com
// export SNS_TOPIC=arn:aws:sns:us-east-1:123456789012:eip-rotation
//
// eip-rotatord
// ```

use anyhow::Result;
use aws_config::BehaviorVersion;
use eip_rotator_aws::AwsClients;
use eip_rotator_core::{InvocationStatus, RotatorConfig, handle_invocation};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Log level variable
const LOG_LEVEL_VAR: &str = "ROTATOR_LOG_LEVEL";

/// Parse a log level name
fn parse_log_level(value: &str) -> Result<Level> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "{} '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            LOG_LEVEL_VAR,
            value
        ),
    }
}

/// Read and validate the target configuration
fn load_config<F>(lookup: F) -> std::result::Result<RotatorConfig, eip_rotator_core::Error>
where
    F: Fn(&str) -> Option<String>,
{
    let config = RotatorConfig::from_lookup(lookup);
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let log_level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| "info".to_string());
    let log_level = match parse_log_level(&log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration validation error: {}", e);
            return exit(InvocationStatus::ConfigError);
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return exit(InvocationStatus::ConfigError);
    }

    // Reject a bad configuration before the runtime or any AWS client exists
    let config = match load_config(|name| env::var(name).ok()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return exit(InvocationStatus::ConfigError);
        }
    };
    info!("Starting eip-rotatord for {}", config.instance_id);

    // The rotation is one call after another; no worker threads needed
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return exit(InvocationStatus::RuntimeError);
        }
    };

    let status = rt.block_on(run(config));
    exit(status)
}

/// Build the clients and run one invocation
async fn run(config: RotatorConfig) -> InvocationStatus {
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let rotator = AwsClients::from_sdk_config(&sdk_config).into_rotator();

    handle_invocation(&rotator, &config).await
}

fn exit(status: InvocationStatus) -> ExitCode {
    ExitCode::from(status.code())
}

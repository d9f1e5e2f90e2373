//! Route 53 DNS provider
//!
//! ## API Reference
//!
//! - ChangeResourceRecordSets: POST `/2013-04-01/hostedzone/{Id}/rrset`

use async_trait::async_trait;
use aws_sdk_route53::error::{BuildError, DisplayErrorContext};
use aws_sdk_route53::types::{
    Change, ChangeAction as SdkChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet,
    RrType,
};
use eip_rotator_core::traits::{ChangeAction, ChangeInfo, DnsProvider, RecordChange, RecordType};
use eip_rotator_core::{Error, Result};

const PROVIDER: &str = "route53";

/// Route 53-backed [`DnsProvider`]
#[derive(Debug, Clone)]
pub struct Route53Dns {
    client: aws_sdk_route53::Client,
}

impl Route53Dns {
    /// Wrap an existing Route 53 client
    pub fn new(client: aws_sdk_route53::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DnsProvider for Route53Dns {
    async fn upsert_record(&self, zone_id: &str, change: &RecordChange) -> Result<ChangeInfo> {
        let batch = build_change_batch(change)?;
        tracing::debug!(
            "ChangeResourceRecordSets {} {} {} in zone {}",
            change.action.as_str(),
            change.record_type.as_str(),
            change.name,
            zone_id
        );

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| {
                Error::provider(
                    PROVIDER,
                    format!(
                        "ChangeResourceRecordSets failed: {}",
                        DisplayErrorContext(&e)
                    ),
                )
            })?;

        let info = output.change_info().ok_or_else(|| {
            Error::invalid_response("ChangeResourceRecordSets returned no ChangeInfo")
        })?;

        Ok(ChangeInfo {
            id: info.id().to_string(),
            status: info.status().as_str().to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

/// Translate a record change into the Route 53 request body
pub fn build_change_batch(change: &RecordChange) -> Result<ChangeBatch> {
    let records = change
        .values
        .iter()
        .map(|value| ResourceRecord::builder().value(value).build())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(build_error)?;

    let record_set = ResourceRecordSet::builder()
        .name(&change.name)
        .r#type(rr_type(change.record_type))
        .ttl(i64::from(change.ttl))
        .set_resource_records(Some(records))
        .build()
        .map_err(build_error)?;

    let change = Change::builder()
        .action(change_action(change.action))
        .resource_record_set(record_set)
        .build()
        .map_err(build_error)?;

    ChangeBatch::builder()
        .changes(change)
        .build()
        .map_err(build_error)
}

fn change_action(action: ChangeAction) -> SdkChangeAction {
    match action {
        ChangeAction::Upsert => SdkChangeAction::Upsert,
    }
}

fn rr_type(record_type: RecordType) -> RrType {
    match record_type {
        RecordType::Cname => RrType::Cname,
    }
}

fn build_error(err: BuildError) -> Error {
    Error::dns(format!("Invalid Route 53 change: {}", err))
}

//! Managed resource types

pub mod cfs_snapshot;
pub mod eip;
pub mod mariadb_security_groups;
pub mod tsf_application_config;
pub mod vpn_gateway;

pub use cfs_snapshot::CfsSnapshotResource;
pub use eip::EipResource;
pub use mariadb_security_groups::MariadbSecurityGroupsResource;
pub use tsf_application_config::TsfApplicationConfigResource;
pub use vpn_gateway::VpnGatewayResource;

use crate::context::TencentContext;
use tcform_cloud::resource::value_to_map;
use tcform_cloud::retry::{retry_read, retry_write};
use tcform_cloud::tags::{build_tag_resource_name, diff_tags};
use tcform_cloud::{ResourceData, Result, Tags, retry_error, retry_read_error};

/// Tags currently attached to `id`
pub(crate) async fn read_tags(
    ctx: &TencentContext,
    service_type: &str,
    resource_type: &str,
    id: &str,
) -> Result<Tags> {
    let tag = ctx.tag.as_ref();
    let region = ctx.region.as_str();
    retry_read(&ctx.retry, move || async move {
        tag.describe_resource_tags(service_type, resource_type, region, id)
            .await
            .map_err(|e| retry_read_error(e, &[]))
    })
    .await
}

/// Bring the tags of `id` from `old` to `new`
pub(crate) async fn write_tags(
    ctx: &TencentContext,
    service_type: &str,
    resource_type: &str,
    id: &str,
    old: &Tags,
    new: &Tags,
) -> Result<()> {
    let (replace, delete) = diff_tags(old, new);
    if replace.is_empty() && delete.is_empty() {
        return Ok(());
    }

    let name = build_tag_resource_name(service_type, resource_type, &ctx.region, id);
    tracing::debug!(
        "Tagging {}: {} replaced, {} removed",
        name,
        replace.len(),
        delete.len()
    );

    let tag = ctx.tag.as_ref();
    let (name, replace, delete) = (&name, &replace, &delete);
    retry_write(&ctx.retry, move || async move {
        tag.modify_tags(name, replace, delete)
            .await
            .map_err(|e| retry_error(e, &[]))
    })
    .await
}

/// Apply a pending `tags` change of an existing instance
pub(crate) async fn update_tags(
    ctx: &TencentContext,
    d: &ResourceData,
    service_type: &str,
    resource_type: &str,
) -> Result<()> {
    if !d.has_change("tags") {
        return Ok(());
    }
    let (old, new) = d.get_change("tags");
    write_tags(
        ctx,
        service_type,
        resource_type,
        d.require_id()?,
        &value_to_map(Some(&old)),
        &value_to_map(Some(&new)),
    )
    .await
}

//! `tencentcloud_eip`: elastic public IP address
//!
//! Allocation returns while the address is still `CREATING`; create waits
//! for it to settle before naming it. Tags travel both in the allocate request
//! and through the tag service. Deletion unbinds the address first, then
//! releases it and waits until it is gone.

use super::{read_tags, update_tags, write_tags};
use crate::context::TencentContext;
use crate::services::{AllocateAddressesRequest, Tag};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tcform_cloud::retry::{StateChangeConf, retry_read, retry_write};
use tcform_cloud::{
    AttributeSchema, AttributeType, CloudError, ResourceData, ResourceHandler, ResourceSchema,
    Result, RetryError, Tags, retry_error, retry_read_error,
};

pub const TYPE_NAME: &str = "tencentcloud_eip";

const TAG_SERVICE: &str = "vpc";
const TAG_RESOURCE: &str = "eip";

/// Returned while another task holds the address
const MUTEX_TASK_RUNNING: &str = "DesOperation.MutexTaskRunning";

const STATUS_CREATING: &str = "CREATING";

#[derive(Debug, Deserialize)]
struct EipArgs {
    name: Option<String>,
    #[serde(rename = "type")]
    eip_type: Option<String>,
    anycast_zone: Option<String>,
    internet_service_provider: Option<String>,
    internet_charge_type: Option<String>,
    internet_max_bandwidth_out: Option<i64>,
    bandwidth_package_id: Option<String>,
    #[serde(default)]
    tags: Tags,
}

/// What a read reports back
#[derive(Debug, Serialize)]
struct EipState {
    name: Option<String>,
    #[serde(rename = "type")]
    eip_type: Option<String>,
    public_ip: Option<String>,
    status: Option<String>,
    internet_charge_type: Option<String>,
    internet_max_bandwidth_out: Option<i64>,
    bandwidth_package_id: Option<String>,
    tags: Tags,
}

pub struct EipResource {
    ctx: TencentContext,
}

impl EipResource {
    pub fn new(ctx: TencentContext) -> Self {
        Self { ctx }
    }

    async fn allocate(&self, request: &AllocateAddressesRequest) -> Result<String> {
        let vpc = self.ctx.vpc.as_ref();
        retry_write(&self.ctx.retry, move || async move {
            let ids = vpc
                .allocate_addresses(request)
                .await
                .map_err(|e| retry_error(e, &[]))?;
            ids.into_iter().next().ok_or_else(|| {
                RetryError::retryable(CloudError::Api {
                    action: "AllocateAddresses".to_string(),
                    code: "InvalidResponse".to_string(),
                    message: "eip id is nil".to_string(),
                    request_id: None,
                })
            })
        })
        .await
    }

    /// Poll until the address has left `CREATING`
    async fn wait_created(&self, eip_id: &str) -> Result<()> {
        let vpc = self.ctx.vpc.as_ref();
        retry_read(&self.ctx.retry, move || async move {
            let address = vpc
                .describe_eip(eip_id)
                .await
                .map_err(|e| retry_read_error(e, &[]))?;
            match address.and_then(|a| a.address_status) {
                Some(status) if status == STATUS_CREATING => Err(RetryError::retryable(
                    CloudError::UnexpectedState {
                        state: status,
                        target: "allocated".to_string(),
                    },
                )),
                _ => Ok(()),
            }
        })
        .await
    }

    async fn rename(&self, eip_id: &str, name: &str) -> Result<()> {
        let vpc = self.ctx.vpc.as_ref();
        retry_write(&self.ctx.retry, move || async move {
            vpc.modify_address_name(eip_id, name)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await
    }
}

#[async_trait]
impl ResourceHandler for EipResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_description("Elastic public IP address")
            .attribute(
                AttributeSchema::optional("name", AttributeType::String)
                    .with_computed()
                    .with_description("The name of eip."),
            )
            .attribute(
                AttributeSchema::optional("type", AttributeType::String)
                    .with_default("EIP")
                    .force_new()
                    .with_description("The type of eip. Valid values: `EIP`, `AnycastEIP` and `HighQualityEIP`."),
            )
            .attribute(
                AttributeSchema::optional("anycast_zone", AttributeType::String)
                    .force_new()
                    .with_description("The zone of anycast. Valid values: `ANYCAST_ZONE_GLOBAL` and `ANYCAST_ZONE_OVERSEAS`."),
            )
            .attribute(
                AttributeSchema::optional("applicable_for_clb", AttributeType::Bool)
                    .with_description("Deprecated. Indicates whether the anycast eip can be associated to a CLB."),
            )
            .attribute(
                AttributeSchema::optional("internet_service_provider", AttributeType::String)
                    .force_new()
                    .with_description("Internet service provider of eip, e.g. `BGP`, `CMCC`, `CTCC`, `CUCC`."),
            )
            .attribute(
                AttributeSchema::optional("internet_charge_type", AttributeType::String)
                    .with_computed()
                    .force_new()
                    .with_description("The charge type of eip."),
            )
            .attribute(
                AttributeSchema::optional("internet_max_bandwidth_out", AttributeType::Int)
                    .with_computed()
                    .with_description("The bandwidth limit of EIP, unit is Mbps."),
            )
            .attribute(
                AttributeSchema::optional("tags", AttributeType::Map)
                    .with_description("The tags of eip."),
            )
            .attribute(
                AttributeSchema::optional("bandwidth_package_id", AttributeType::String)
                    .with_computed()
                    .immutable()
                    .with_description("ID of bandwidth package, it will set when `internet_charge_type` is `BANDWIDTH_PACKAGE`."),
            )
            .attribute(
                AttributeSchema::computed("public_ip", AttributeType::String)
                    .with_description("The elastic IP address."),
            )
            .attribute(
                AttributeSchema::computed("status", AttributeType::String)
                    .with_description("The EIP current status."),
            )
    }

    async fn create(&self, d: &mut ResourceData) -> Result<()> {
        let args: EipArgs = d.decode()?;

        let request = AllocateAddressesRequest {
            address_type: args.eip_type.clone(),
            anycast_zone: args.anycast_zone.clone(),
            internet_service_provider: args.internet_service_provider.clone(),
            internet_charge_type: args.internet_charge_type.clone(),
            internet_max_bandwidth_out: args.internet_max_bandwidth_out,
            bandwidth_package_id: args.bandwidth_package_id.clone(),
            tags: args
                .tags
                .iter()
                .map(|(k, v)| Tag {
                    key: k.clone(),
                    value: v.clone(),
                })
                .collect(),
        };

        let eip_id = self.allocate(&request).await?;
        d.set_id(eip_id.clone());

        write_tags(
            &self.ctx,
            TAG_SERVICE,
            TAG_RESOURCE,
            &eip_id,
            &Tags::new(),
            &args.tags,
        )
        .await?;

        self.wait_created(&eip_id).await?;

        if let Some(name) = args.name.as_deref().filter(|n| !n.is_empty()) {
            self.rename(&eip_id, name).await?;
        }
        Ok(())
    }

    async fn read(&self, d: &mut ResourceData) -> Result<()> {
        let eip_id = d.require_id()?.to_string();
        let id = eip_id.as_str();
        let vpc = self.ctx.vpc.as_ref();

        let address = retry_read(&self.ctx.retry, move || async move {
            vpc.describe_eip(id).await.map_err(|e| retry_read_error(e, &[]))
        })
        .await?;
        let Some(address) = address else {
            d.clear_id();
            return Ok(());
        };

        let tags = read_tags(&self.ctx, TAG_SERVICE, TAG_RESOURCE, id).await?;
        let package = retry_read(&self.ctx.retry, move || async move {
            vpc.describe_bandwidth_package_by_eip(id)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await?;

        d.set_state(&EipState {
            name: address.address_name,
            eip_type: address.address_type,
            public_ip: address.address_ip,
            status: address.address_status,
            internet_charge_type: address.internet_charge_type,
            internet_max_bandwidth_out: address.bandwidth,
            bandwidth_package_id: package.map(|p| p.bandwidth_package_id),
            tags,
        })
    }

    async fn update(&self, d: &mut ResourceData) -> Result<()> {
        let eip_id = d.require_id()?.to_string();
        let vpc = self.ctx.vpc.as_ref();

        if d.has_change("name") {
            let name = d.get_str("name").unwrap_or_default().to_string();
            self.rename(&eip_id, &name).await?;
        }

        if d.has_change("internet_max_bandwidth_out") {
            if let Some(bandwidth) = d.get_i64("internet_max_bandwidth_out") {
                let id = eip_id.as_str();
                retry_write(&self.ctx.retry, move || async move {
                    vpc.modify_address_bandwidth(id, bandwidth)
                        .await
                        .map_err(|e| retry_error(e, &[]))
                })
                .await?;
            }
        }

        update_tags(&self.ctx, d, TAG_SERVICE, TAG_RESOURCE).await
    }

    async fn delete(&self, d: &mut ResourceData) -> Result<()> {
        let eip_id = d.require_id()?.to_string();
        let id = eip_id.as_str();
        let vpc = self.ctx.vpc.as_ref();
        let retry = &self.ctx.retry;

        let address = retry_read(retry, move || async move {
            vpc.describe_eip(id).await.map_err(|e| retry_read_error(e, &[]))
        })
        .await?;
        let Some(address) = address else {
            return Ok(());
        };

        if address.instance_id.as_deref().is_some_and(|i| !i.is_empty()) {
            tracing::debug!("Unbinding {} from {:?}", id, address.instance_id);
            retry_write(retry, move || async move {
                vpc.disassociate_address(id)
                    .await
                    .map_err(|e| retry_error(e, &[MUTEX_TASK_RUNNING]))
            })
            .await?;
        }

        retry_write(retry, move || async move {
            vpc.release_address(id)
                .await
                .map_err(|e| retry_error(e, &[MUTEX_TASK_RUNNING]))
        })
        .await?;

        StateChangeConf::new(
            &[],
            &[],
            retry.read_timeout,
            retry.poll_interval,
            move || async move {
                let address = vpc.describe_eip(id).await?;
                Ok::<_, CloudError>(address.map(|a| a.address_status.unwrap_or_default()))
            },
        )
        .wait_for_state()
        .await?;
        Ok(())
    }
}

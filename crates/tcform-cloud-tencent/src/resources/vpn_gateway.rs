//! `tencentcloud_vpn_gateway`: IPSEC/SSL/CCN VPN gateway
//!
//! A new gateway is `PENDING` until it becomes `AVAILABLE`. Deletion is
//! refused while a prepaid gateway has not expired, while a CCN gateway is
//! still attached to a network instance, or while tunnels reference it.

use super::{read_tags, update_tags, write_tags};
use crate::context::TencentContext;
use crate::services::{CreateVpnGatewayRequest, Filter, InstanceChargePrepaid, VpnGateway};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tcform_cloud::retry::{StateChangeConf, retry_read, retry_write};
use tcform_cloud::{
    AttributeSchema, AttributeType, CloudError, ResourceData, ResourceHandler, ResourceSchema,
    Result, Tags, retry_error, retry_read_error,
};

pub const TYPE_NAME: &str = "tencentcloud_vpn_gateway";

const TAG_SERVICE: &str = "vpc";
const TAG_RESOURCE: &str = "vpngw";

const CHARGE_PREPAID: &str = "PREPAID";
const CHARGE_POSTPAID: &str = "POSTPAID_BY_HOUR";
const RENEW_AUTO: &str = "NOTIFY_AND_AUTO_RENEW";
const TYPE_CCN: &str = "CCN";

/// `ExpiredTime` of a gateway that never expires
const NEVER_EXPIRES: &str = "0000-00-00 00:00:00";
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Allowed `prepaid_period` values, in months
const PREPAID_PERIODS: &[i64] = &[1, 2, 3, 4, 6, 7, 8, 9, 12, 24, 36];

#[derive(Debug, Deserialize)]
struct VpnGatewayArgs {
    name: String,
    vpc_id: Option<String>,
    bandwidth: i64,
    #[serde(rename = "type")]
    gateway_type: Option<String>,
    prepaid_renew_flag: String,
    prepaid_period: i64,
    charge_type: String,
    cdc_id: Option<String>,
    max_connection: Option<i64>,
    zone: String,
    #[serde(default)]
    tags: Tags,
}

impl VpnGatewayArgs {
    fn is_ccn(&self) -> bool {
        self.gateway_type.as_deref() == Some(TYPE_CCN)
    }

    fn validate(&self) -> Result<()> {
        let vpc_id = self.vpc_id.as_deref().filter(|v| !v.is_empty());
        match (self.is_ccn(), vpc_id) {
            (true, Some(_)) => {
                return Err(CloudError::InvalidConfig(
                    "vpc_id must not be set when the VPN gateway type is CCN".to_string(),
                ));
            }
            (false, None) => {
                return Err(CloudError::MissingRequired {
                    resource_type: TYPE_NAME.to_string(),
                    attribute: "vpc_id".to_string(),
                });
            }
            _ => {}
        }

        if !PREPAID_PERIODS.contains(&self.prepaid_period) {
            return Err(CloudError::InvalidAttribute {
                resource_type: TYPE_NAME.to_string(),
                attribute: "prepaid_period".to_string(),
                expected: format!("one of {:?}", PREPAID_PERIODS),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct VpnGatewayState {
    name: Option<String>,
    vpc_id: Option<String>,
    bandwidth: Option<i64>,
    public_ip_address: Option<String>,
    #[serde(rename = "type")]
    gateway_type: Option<String>,
    state: Option<String>,
    prepaid_renew_flag: Option<String>,
    charge_type: Option<String>,
    expired_time: Option<String>,
    create_time: Option<String>,
    is_address_blocked: Option<bool>,
    new_purchase_plan: Option<String>,
    restrict_state: Option<String>,
    zone: Option<String>,
    cdc_id: Option<String>,
    max_connection: Option<i64>,
    tags: Tags,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl VpnGatewayState {
    fn new(gateway: VpnGateway, tags: Tags) -> Self {
        Self {
            name: gateway.vpn_gateway_name,
            vpc_id: non_empty(gateway.vpc_id),
            bandwidth: gateway.internet_max_bandwidth_out,
            public_ip_address: gateway.public_ip_address,
            gateway_type: gateway.gateway_type,
            state: gateway.state,
            prepaid_renew_flag: non_empty(gateway.renew_flag),
            charge_type: gateway.instance_charge_type,
            expired_time: gateway.expired_time,
            create_time: gateway.created_time,
            is_address_blocked: gateway.is_address_blocked,
            new_purchase_plan: gateway.new_purchase_plan,
            restrict_state: gateway.restrict_state,
            zone: gateway.zone,
            cdc_id: non_empty(gateway.cdc_id),
            max_connection: gateway.max_connection,
            tags,
        }
    }
}

/// Whether a prepaid gateway is still inside its paid period
fn still_paid(expired_time: &str) -> Result<bool> {
    if expired_time.is_empty() || expired_time == NEVER_EXPIRES {
        return Ok(false);
    }
    let expires = NaiveDateTime::parse_from_str(expired_time, TIME_FORMAT).map_err(|e| {
        CloudError::InvalidConfig(format!("bad expired time `{}`: {}", expired_time, e))
    })?;
    Ok(expires > Utc::now().naive_utc())
}

pub struct VpnGatewayResource {
    ctx: TencentContext,
}

impl VpnGatewayResource {
    pub fn new(ctx: TencentContext) -> Self {
        Self { ctx }
    }

    async fn describe(&self, gateway_id: &str) -> Result<Option<VpnGateway>> {
        let vpc = self.ctx.vpc.as_ref();
        retry_read(&self.ctx.retry, move || async move {
            vpc.describe_vpn_gateway(gateway_id)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await
    }

    /// Refuse deletion of a gateway that is still in use or paid for
    async fn check_deletable(&self, gateway: &VpnGateway) -> Result<()> {
        let id = gateway.vpn_gateway_id.as_str();

        if gateway.instance_charge_type.as_deref() == Some(CHARGE_PREPAID)
            && still_paid(gateway.expired_time.as_deref().unwrap_or_default())?
        {
            return Err(CloudError::InvalidConfig(format!(
                "VPN gateway {} is not expired yet and cannot be deleted",
                id
            )));
        }

        if gateway.gateway_type.as_deref() == Some(TYPE_CCN)
            && gateway
                .network_instance_id
                .as_deref()
                .is_some_and(|n| !n.is_empty())
        {
            return Err(CloudError::InvalidConfig(format!(
                "CCN VPN gateway {} is still attached to a network instance",
                id
            )));
        }

        let mut filters = vec![Filter::new("vpn-gateway-id", id)];
        if let Some(vpc_id) = gateway.vpc_id.as_deref().filter(|v| !v.is_empty()) {
            filters.push(Filter::new("vpc-id", vpc_id));
        }
        let vpc = self.ctx.vpc.as_ref();
        let filters = filters.as_slice();
        let connections = retry_read(&self.ctx.retry, move || async move {
            vpc.describe_vpn_connections(filters)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await?;
        if !connections.is_empty() {
            return Err(CloudError::InvalidConfig(format!(
                "VPN gateway {} has associated tunnel exists, please delete the tunnels first",
                id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceHandler for VpnGatewayResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_description("VPN gateway")
            .attribute(
                AttributeSchema::required("name", AttributeType::String)
                    .with_description("Name of the VPN gateway. The length of character is limited to 1-60."),
            )
            .attribute(
                AttributeSchema::optional("vpc_id", AttributeType::String)
                    .force_new()
                    .with_description("ID of the VPC. Required if vpn gateway is not in `CCN` type, and must not be set for `CCN`."),
            )
            .attribute(
                AttributeSchema::optional("bandwidth", AttributeType::Int)
                    .with_default(5)
                    .with_description("The maximum public network output bandwidth of VPN gateway (unit: Mbps)."),
            )
            .attribute(AttributeSchema::computed("public_ip_address", AttributeType::String))
            .attribute(
                AttributeSchema::optional("type", AttributeType::String)
                    .with_computed()
                    .immutable()
                    .with_description("Type of gateway instance, e.g. `IPSEC`, `SSL`, `CCN`."),
            )
            .attribute(AttributeSchema::computed("state", AttributeType::String))
            .attribute(
                AttributeSchema::optional("prepaid_renew_flag", AttributeType::String)
                    .with_default(RENEW_AUTO)
                    .with_description("Flag indicates whether to renew or not. Only valid for `PREPAID`."),
            )
            .attribute(
                AttributeSchema::optional("prepaid_period", AttributeType::Int)
                    .with_default(1)
                    .immutable()
                    .with_description("Period of instance to be prepaid. Only valid for `PREPAID`."),
            )
            .attribute(
                AttributeSchema::optional("charge_type", AttributeType::String)
                    .with_default(CHARGE_POSTPAID)
                    .with_description("Charge Type of the VPN gateway: `PREPAID` or `POSTPAID_BY_HOUR`."),
            )
            .attribute(
                AttributeSchema::optional("cdc_id", AttributeType::String)
                    .with_computed()
                    .immutable(),
            )
            .attribute(
                AttributeSchema::optional("max_connection", AttributeType::Int)
                    .with_computed()
                    .immutable(),
            )
            .attribute(AttributeSchema::computed("expired_time", AttributeType::String))
            .attribute(AttributeSchema::computed("is_address_blocked", AttributeType::Bool))
            .attribute(AttributeSchema::computed("new_purchase_plan", AttributeType::String))
            .attribute(AttributeSchema::computed("restrict_state", AttributeType::String))
            .attribute(
                AttributeSchema::required("zone", AttributeType::String)
                    .force_new()
                    .with_description("Zone of the VPN gateway."),
            )
            .attribute(AttributeSchema::computed("create_time", AttributeType::String))
            .attribute(AttributeSchema::optional("tags", AttributeType::Map))
    }

    async fn create(&self, d: &mut ResourceData) -> Result<()> {
        let args: VpnGatewayArgs = d.decode()?;
        args.validate()?;

        let instance_charge_prepaid = (args.charge_type == CHARGE_PREPAID).then(|| {
            InstanceChargePrepaid {
                period: args.prepaid_period,
                renew_flag: args.prepaid_renew_flag.clone(),
            }
        });
        let request = CreateVpnGatewayRequest {
            vpc_id: args.vpc_id.clone().unwrap_or_default(),
            vpn_gateway_name: args.name.clone(),
            internet_max_bandwidth_out: args.bandwidth,
            instance_charge_type: args.charge_type.clone(),
            instance_charge_prepaid,
            zone: args.zone.clone(),
            gateway_type: args.gateway_type.clone(),
            cdc_id: args.cdc_id.clone(),
            max_connection: args.max_connection,
        };

        let vpc = self.ctx.vpc.as_ref();
        let request = &request;
        let gateway = retry_read(&self.ctx.retry, move || async move {
            vpc.create_vpn_gateway(request)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await?;
        let gateway_id = gateway.vpn_gateway_id;
        d.set_id(gateway_id.clone());

        let id = gateway_id.as_str();
        StateChangeConf::new(
            &["PENDING"],
            &["AVAILABLE"],
            self.ctx.retry.read_timeout * 2,
            self.ctx.retry.poll_interval,
            move || async move {
                let gateway = vpc.describe_vpn_gateway(id).await?;
                Ok::<_, CloudError>(gateway.map(|g| g.state.unwrap_or_default()))
            },
        )
        .wait_for_state()
        .await?;

        write_tags(
            &self.ctx,
            TAG_SERVICE,
            TAG_RESOURCE,
            id,
            &Tags::new(),
            &args.tags,
        )
        .await
    }

    async fn read(&self, d: &mut ResourceData) -> Result<()> {
        let gateway_id = d.require_id()?.to_string();
        let Some(gateway) = self.describe(&gateway_id).await? else {
            d.clear_id();
            return Ok(());
        };

        let tags = read_tags(&self.ctx, TAG_SERVICE, TAG_RESOURCE, &gateway_id).await?;
        d.set_state(&VpnGatewayState::new(gateway, tags))
    }

    async fn update(&self, d: &mut ResourceData) -> Result<()> {
        let gateway_id = d.require_id()?.to_string();
        let id = gateway_id.as_str();
        let vpc = self.ctx.vpc.as_ref();
        let retry = &self.ctx.retry;

        let (old_charge, new_charge) = d.get_change("charge_type");
        let old_charge = old_charge.as_str().unwrap_or(CHARGE_POSTPAID).to_string();
        let new_charge = new_charge.as_str().unwrap_or(CHARGE_POSTPAID).to_string();

        if d.has_change("prepaid_renew_flag") {
            if new_charge != CHARGE_PREPAID {
                return Err(CloudError::InvalidConfig(
                    "prepaid_renew_flag can only be changed on a PREPAID VPN gateway".to_string(),
                ));
            }
            let auto_renew = d.get_str("prepaid_renew_flag") == Some(RENEW_AUTO);
            retry_write(retry, move || async move {
                vpc.set_vpn_gateway_renew_flag(id, auto_renew)
                    .await
                    .map_err(|e| retry_error(e, &[]))
            })
            .await?;
        }

        let charge_changed = d.has_change("charge_type");
        if d.has_change("name") || charge_changed {
            let charge_type = if charge_changed {
                if old_charge == CHARGE_PREPAID && new_charge == CHARGE_POSTPAID {
                    Some(CHARGE_POSTPAID)
                } else {
                    return Err(CloudError::InvalidConfig(format!(
                        "charge_type cannot change from {} to {}, only PREPAID to POSTPAID_BY_HOUR is supported",
                        old_charge, new_charge
                    )));
                }
            } else {
                None
            };
            let name = d.get_str("name").unwrap_or_default().to_string();
            let name = name.as_str();
            retry_write(retry, move || async move {
                vpc.modify_vpn_gateway_attribute(id, name, charge_type)
                    .await
                    .map_err(|e| retry_error(e, &[]))
            })
            .await?;
        }

        if d.has_change("bandwidth") {
            if let Some(bandwidth) = d.get_i64("bandwidth") {
                retry_write(retry, move || async move {
                    vpc.reset_vpn_gateway_bandwidth(id, bandwidth)
                        .await
                        .map_err(|e| retry_error(e, &[]))
                })
                .await?;
            }
        }

        update_tags(&self.ctx, d, TAG_SERVICE, TAG_RESOURCE).await
    }

    async fn delete(&self, d: &mut ResourceData) -> Result<()> {
        let gateway_id = d.require_id()?.to_string();
        let Some(gateway) = self.describe(&gateway_id).await? else {
            return Ok(());
        };
        self.check_deletable(&gateway).await?;

        let id = gateway_id.as_str();
        let vpc = self.ctx.vpc.as_ref();
        let retry = &self.ctx.retry;
        retry_write(retry, move || async move {
            vpc.delete_vpn_gateway(id)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await?;

        StateChangeConf::new(
            &[],
            &[],
            retry.read_timeout,
            retry.poll_interval,
            move || async move {
                let gateway = match vpc.describe_vpn_gateway(id).await {
                    Err(e) if e.is_not_found() => None,
                    other => other?,
                };
                Ok::<_, CloudError>(gateway.map(|g| g.state.unwrap_or_default()))
            },
        )
        .wait_for_state()
        .await?;
        Ok(())
    }
}

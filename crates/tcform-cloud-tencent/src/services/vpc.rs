//! VPC: elastic IPs, VPN gateways and service templates

use super::{Empty, PAGE_LIMIT, found};
use crate::client::TencentClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tcform_cloud::{CloudError, Result};

const SERVICE: &str = "vpc";
const VERSION: &str = "2017-03-12";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            values: vec![value.into()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// Elastic IP as returned by `DescribeAddresses`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Address {
    pub address_id: String,
    pub address_name: Option<String>,
    pub address_type: Option<String>,
    pub address_ip: Option<String>,
    pub address_status: Option<String>,
    pub internet_charge_type: Option<String>,
    pub bandwidth: Option<i64>,
    /// Instance the address is bound to
    pub instance_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocateAddressesRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anycast_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet_service_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet_charge_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet_max_bandwidth_out: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth_package_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BandwidthPackage {
    pub bandwidth_package_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VpnGateway {
    pub vpn_gateway_id: String,
    pub vpc_id: Option<String>,
    pub vpn_gateway_name: Option<String>,
    #[serde(rename = "Type")]
    pub gateway_type: Option<String>,
    pub state: Option<String>,
    pub public_ip_address: Option<String>,
    pub renew_flag: Option<String>,
    pub instance_charge_type: Option<String>,
    pub internet_max_bandwidth_out: Option<i64>,
    pub created_time: Option<String>,
    pub expired_time: Option<String>,
    pub is_address_blocked: Option<bool>,
    pub new_purchase_plan: Option<String>,
    pub restrict_state: Option<String>,
    pub zone: Option<String>,
    pub cdc_id: Option<String>,
    pub max_connection: Option<i64>,
    pub network_instance_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceChargePrepaid {
    pub period: i64,
    pub renew_flag: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateVpnGatewayRequest {
    pub vpc_id: String,
    pub vpn_gateway_name: String,
    pub internet_max_bandwidth_out: i64,
    pub instance_charge_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_charge_prepaid: Option<InstanceChargePrepaid>,
    pub zone: String,
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub gateway_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cdc_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connection: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VpnConnection {
    pub vpn_connection_id: String,
    pub vpn_connection_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceTemplate {
    pub service_template_id: String,
    pub service_template_name: String,
    pub service_set: Vec<String>,
}

#[async_trait]
pub trait VpcApi: Send + Sync {
    /// Allocate addresses and return their ids
    async fn allocate_addresses(&self, request: &AllocateAddressesRequest) -> Result<Vec<String>>;
    async fn describe_eip(&self, eip_id: &str) -> Result<Option<Address>>;
    async fn modify_address_name(&self, eip_id: &str, name: &str) -> Result<()>;
    async fn modify_address_bandwidth(&self, eip_id: &str, bandwidth_out: i64) -> Result<()>;
    async fn disassociate_address(&self, eip_id: &str) -> Result<()>;
    async fn release_address(&self, eip_id: &str) -> Result<()>;
    async fn describe_bandwidth_package_by_eip(
        &self,
        eip_id: &str,
    ) -> Result<Option<BandwidthPackage>>;

    async fn create_vpn_gateway(&self, request: &CreateVpnGatewayRequest) -> Result<VpnGateway>;
    async fn describe_vpn_gateway(&self, gateway_id: &str) -> Result<Option<VpnGateway>>;
    /// Rename, optionally switching the charge type
    async fn modify_vpn_gateway_attribute(
        &self,
        gateway_id: &str,
        name: &str,
        charge_type: Option<&str>,
    ) -> Result<()>;
    async fn set_vpn_gateway_renew_flag(&self, gateway_id: &str, auto_renew: bool) -> Result<()>;
    async fn reset_vpn_gateway_bandwidth(&self, gateway_id: &str, bandwidth: i64) -> Result<()>;
    async fn delete_vpn_gateway(&self, gateway_id: &str) -> Result<()>;
    async fn describe_vpn_connections(&self, filters: &[Filter]) -> Result<Vec<VpnConnection>>;

    async fn describe_service_templates(&self, filters: &[Filter]) -> Result<Vec<ServiceTemplate>>;
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AllocateAddressesResponse {
    #[serde(default)]
    address_set: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeAddressesResponse {
    #[serde(default)]
    address_set: Vec<Address>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeBandwidthPackagesResponse {
    #[serde(default)]
    bandwidth_package_set: Vec<BandwidthPackage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateVpnGatewayResponse {
    vpn_gateway: Option<VpnGateway>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeVpnGatewaysResponse {
    #[serde(default)]
    vpn_gateway_set: Vec<VpnGateway>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeVpnConnectionsResponse {
    #[serde(default)]
    vpn_connection_set: Vec<VpnConnection>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeServiceTemplatesResponse {
    #[serde(default)]
    service_template_set: Vec<ServiceTemplate>,
    #[serde(default)]
    total_count: u64,
}

#[async_trait]
impl VpcApi for TencentClient {
    async fn allocate_addresses(&self, request: &AllocateAddressesRequest) -> Result<Vec<String>> {
        let response: AllocateAddressesResponse = self
            .call(SERVICE, VERSION, "AllocateAddresses", request)
            .await?;
        Ok(response.address_set)
    }

    async fn describe_eip(&self, eip_id: &str) -> Result<Option<Address>> {
        let response = self
            .call::<_, DescribeAddressesResponse>(
                SERVICE,
                VERSION,
                "DescribeAddresses",
                &json!({ "AddressIds": [eip_id] }),
            )
            .await
            .map_err(CloudError::from);
        found(response.map(|r| r.address_set.into_iter().next()))
    }

    async fn modify_address_name(&self, eip_id: &str, name: &str) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "ModifyAddressAttribute",
                &json!({ "AddressId": eip_id, "AddressName": name }),
            )
            .await?;
        Ok(())
    }

    async fn modify_address_bandwidth(&self, eip_id: &str, bandwidth_out: i64) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "ModifyAddressesBandwidth",
                &json!({ "AddressIds": [eip_id], "InternetMaxBandwidthOut": bandwidth_out }),
            )
            .await?;
        Ok(())
    }

    async fn disassociate_address(&self, eip_id: &str) -> Result<()> {
        let _: Empty = self
            .call(SERVICE, VERSION, "DisassociateAddress", &json!({ "AddressId": eip_id }))
            .await?;
        Ok(())
    }

    async fn release_address(&self, eip_id: &str) -> Result<()> {
        let _: Empty = self
            .call(SERVICE, VERSION, "ReleaseAddresses", &json!({ "AddressIds": [eip_id] }))
            .await?;
        Ok(())
    }

    async fn describe_bandwidth_package_by_eip(
        &self,
        eip_id: &str,
    ) -> Result<Option<BandwidthPackage>> {
        let filters = [Filter::new("resource.resource-id", eip_id)];
        let response = self
            .call::<_, DescribeBandwidthPackagesResponse>(
                SERVICE,
                VERSION,
                "DescribeBandwidthPackages",
                &json!({ "Filters": filters }),
            )
            .await
            .map_err(CloudError::from);
        found(response.map(|r| r.bandwidth_package_set.into_iter().next()))
    }

    async fn create_vpn_gateway(&self, request: &CreateVpnGatewayRequest) -> Result<VpnGateway> {
        let response: CreateVpnGatewayResponse = self
            .call(SERVICE, VERSION, "CreateVpnGateway", request)
            .await?;
        response.vpn_gateway.ok_or_else(|| CloudError::Api {
            action: "CreateVpnGateway".to_string(),
            code: "InvalidResponse".to_string(),
            message: "VPN gateway id is nil".to_string(),
            request_id: None,
        })
    }

    async fn describe_vpn_gateway(&self, gateway_id: &str) -> Result<Option<VpnGateway>> {
        let response = self
            .call::<_, DescribeVpnGatewaysResponse>(
                SERVICE,
                VERSION,
                "DescribeVpnGateways",
                &json!({ "VpnGatewayIds": [gateway_id] }),
            )
            .await
            .map_err(CloudError::from);
        found(response.map(|r| r.vpn_gateway_set.into_iter().next()))
    }

    async fn modify_vpn_gateway_attribute(
        &self,
        gateway_id: &str,
        name: &str,
        charge_type: Option<&str>,
    ) -> Result<()> {
        let mut request = json!({ "VpnGatewayId": gateway_id, "VpnGatewayName": name });
        if let Some(charge_type) = charge_type {
            request["InstanceChargeType"] = json!(charge_type);
        }
        let _: Empty = self
            .call(SERVICE, VERSION, "ModifyVpnGatewayAttribute", &request)
            .await?;
        Ok(())
    }

    async fn set_vpn_gateway_renew_flag(&self, gateway_id: &str, auto_renew: bool) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "SetVpnGatewaysRenewFlag",
                &json!({
                    "VpnGatewayIds": [gateway_id],
                    "AutoRenewFlag": if auto_renew { 1 } else { 0 },
                }),
            )
            .await?;
        Ok(())
    }

    async fn reset_vpn_gateway_bandwidth(&self, gateway_id: &str, bandwidth: i64) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "ResetVpnGatewayInternetMaxBandwidth",
                &json!({ "VpnGatewayId": gateway_id, "InternetMaxBandwidthOut": bandwidth }),
            )
            .await?;
        Ok(())
    }

    async fn delete_vpn_gateway(&self, gateway_id: &str) -> Result<()> {
        let _: Empty = self
            .call(SERVICE, VERSION, "DeleteVpnGateway", &json!({ "VpnGatewayId": gateway_id }))
            .await?;
        Ok(())
    }

    async fn describe_vpn_connections(&self, filters: &[Filter]) -> Result<Vec<VpnConnection>> {
        let response: DescribeVpnConnectionsResponse = self
            .call(
                SERVICE,
                VERSION,
                "DescribeVpnConnections",
                &json!({ "Filters": filters, "Offset": 0, "Limit": PAGE_LIMIT }),
            )
            .await?;
        Ok(response.vpn_connection_set)
    }

    async fn describe_service_templates(&self, filters: &[Filter]) -> Result<Vec<ServiceTemplate>> {
        let mut templates = Vec::new();
        let mut offset = 0u64;
        loop {
            let response: DescribeServiceTemplatesResponse = self
                .call(
                    SERVICE,
                    VERSION,
                    "DescribeServiceTemplates",
                    &json!({
                        "Filters": filters,
                        "Offset": offset.to_string(),
                        "Limit": PAGE_LIMIT.to_string(),
                    }),
                )
                .await?;
            let count = response.service_template_set.len() as u64;
            templates.extend(response.service_template_set);
            offset += count;
            if count < PAGE_LIMIT || offset >= response.total_count {
                break;
            }
        }
        Ok(templates)
    }
}

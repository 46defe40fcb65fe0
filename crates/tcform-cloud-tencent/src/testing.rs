//! In-memory Tencent Cloud used by the resource tests
//!
//! Objects move through the same statuses as the real services: a new EIP
//! reports `CREATING` once, a VPN gateway `PENDING`, a CFS snapshot
//! `creating`. Every call is logged by action name so tests can assert which
//! calls were (or were not) made.

use crate::client::CallerIdentity;
use crate::context::TencentContext;
use crate::services::{
    Address, AllocateAddressesRequest, BandwidthPackage, CfsApi, CfsSnapshot,
    CreateConfigRequest, CreateVpnGatewayRequest, DbbrainApi, Filter, MariadbApi,
    SecLogExportTaskInfo, SecurityGroup, ServiceTemplate, StsApi, TagApi, TsfApi, TsfConfig,
    VpcApi, VpnConnection, VpnGateway,
};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tcform_cloud::tags::build_tag_resource_name;
use tcform_cloud::{CloudError, RetryConfig, Result, Tags};

pub const REGION: &str = "ap-guangzhou";

#[derive(Default)]
struct MockState {
    next_id: u32,
    addresses: HashMap<String, Address>,
    bandwidth_packages: HashMap<String, BandwidthPackage>,
    gateways: HashMap<String, VpnGateway>,
    connections: Vec<(String, VpnConnection)>,
    templates: Vec<ServiceTemplate>,
    snapshots: HashMap<String, CfsSnapshot>,
    sg_bindings: BTreeSet<(String, String, String)>,
    configs: HashMap<String, TsfConfig>,
    tags: HashMap<String, Tags>,
    export_tasks: Vec<(String, String, SecLogExportTaskInfo)>,
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{:08x}", prefix, self.next_id)
    }
}

#[derive(Default)]
pub struct MockCloud {
    state: Mutex<MockState>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, VecDeque<String>>>,
}

fn api_error(action: &str, code: &str) -> CloudError {
    CloudError::Api {
        action: action.to_string(),
        code: code.to_string(),
        message: format!("injected {} failure", code),
        request_id: Some("mock-request".to_string()),
    }
}

fn not_found(what: &str, id: &str) -> CloudError {
    CloudError::ResourceNotFound(format!("{} {} does not exist", what, id))
}

fn filter_value<'a>(filters: &'a [Filter], name: &str) -> Option<&'a str> {
    filters
        .iter()
        .find(|f| f.name == name)
        .and_then(|f| f.values.first())
        .map(String::as_str)
}

impl MockCloud {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Context wired to this mock with millisecond retry timings
    pub fn context(self: &Arc<Self>) -> TencentContext {
        TencentContext {
            region: REGION.to_string(),
            retry: RetryConfig {
                read_timeout: Duration::from_secs(2),
                write_timeout: Duration::from_secs(2),
                initial_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(5),
                backoff_multiplier: 2.0,
                poll_interval: Duration::from_millis(1),
            },
            vpc: self.clone(),
            cfs: self.clone(),
            mariadb: self.clone(),
            tsf: self.clone(),
            tag: self.clone(),
            dbbrain: self.clone(),
            sts: self.clone(),
        }
    }

    /// Make the next call of `action` fail with `code`
    pub fn fail_once(&self, action: &str, code: &str) {
        self.failures
            .lock()
            .unwrap()
            .entry(action.to_string())
            .or_default()
            .push_back(code.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, action: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == action).count()
    }

    /// Calls that change something remotely
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("Describe") && !c.starts_with("Get"))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn address(&self, id: &str) -> Option<Address> {
        self.state.lock().unwrap().addresses.get(id).cloned()
    }

    pub fn gateway(&self, id: &str) -> Option<VpnGateway> {
        self.state.lock().unwrap().gateways.get(id).cloned()
    }

    pub fn snapshot(&self, id: &str) -> Option<CfsSnapshot> {
        self.state.lock().unwrap().snapshots.get(id).cloned()
    }

    pub fn config(&self, id: &str) -> Option<TsfConfig> {
        self.state.lock().unwrap().configs.get(id).cloned()
    }

    pub fn is_bound(&self, product: &str, instance_id: &str, security_group_id: &str) -> bool {
        self.state.lock().unwrap().sg_bindings.contains(&(
            product.to_string(),
            instance_id.to_string(),
            security_group_id.to_string(),
        ))
    }

    pub fn tags_of(&self, service_type: &str, resource_type: &str, id: &str) -> Tags {
        let name = build_tag_resource_name(service_type, resource_type, REGION, id);
        self.state
            .lock()
            .unwrap()
            .tags
            .get(&name)
            .cloned()
            .unwrap_or_default()
    }

    /// Drop an object behind the provider's back
    pub fn remove_remote(&self, id: &str) {
        let mut state = self.state.lock().unwrap();
        state.addresses.remove(id);
        state.gateways.remove(id);
        state.snapshots.remove(id);
        state.configs.remove(id);
    }

    pub fn set_gateway(&self, gateway: VpnGateway) {
        self.state
            .lock()
            .unwrap()
            .gateways
            .insert(gateway.vpn_gateway_id.clone(), gateway);
    }

    pub fn bind_address(&self, eip_id: &str, instance_id: &str) {
        if let Some(address) = self.state.lock().unwrap().addresses.get_mut(eip_id) {
            address.instance_id = Some(instance_id.to_string());
            address.address_status = Some("BIND".to_string());
        }
    }

    pub fn add_vpn_connection(&self, gateway_id: &str, connection_id: &str) {
        self.state.lock().unwrap().connections.push((
            gateway_id.to_string(),
            VpnConnection {
                vpn_connection_id: connection_id.to_string(),
                vpn_connection_name: Some(connection_id.to_string()),
            },
        ));
    }

    pub fn add_service_template(&self, id: &str, name: &str, services: &[&str]) {
        self.state.lock().unwrap().templates.push(ServiceTemplate {
            service_template_id: id.to_string(),
            service_template_name: name.to_string(),
            service_set: services.iter().map(|s| s.to_string()).collect(),
        });
    }

    pub fn add_export_task(&self, sec_audit_group_id: &str, product: &str, task_id: u64) {
        self.state.lock().unwrap().export_tasks.push((
            sec_audit_group_id.to_string(),
            product.to_string(),
            SecLogExportTaskInfo {
                async_request_id: task_id,
                start_time: Some("2026-10-01 10:00:00".to_string()),
                end_time: Some("2026-10-01 10:05:00".to_string()),
                create_time: Some("2026-10-01 10:00:00".to_string()),
                status: Some("FINISHED".to_string()),
                progress: Some(100),
                log_start_time: Some("2026-09-30 00:00:00".to_string()),
                log_end_time: Some("2026-10-01 00:00:00".to_string()),
                total_size: Some(4096),
                danger_levels: Some(vec![0, 1, 2]),
            },
        ));
    }

    fn record(&self, action: &str) -> Result<()> {
        self.calls.lock().unwrap().push(action.to_string());
        let code = self
            .failures
            .lock()
            .unwrap()
            .get_mut(action)
            .and_then(VecDeque::pop_front);
        match code {
            Some(code) => Err(api_error(action, &code)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VpcApi for MockCloud {
    async fn allocate_addresses(&self, request: &AllocateAddressesRequest) -> Result<Vec<String>> {
        self.record("AllocateAddresses")?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("eip");
        let ip = format!("203.0.113.{}", state.next_id);
        state.addresses.insert(
            id.clone(),
            Address {
                address_id: id.clone(),
                address_name: Some(id.clone()),
                address_type: Some(
                    request
                        .address_type
                        .clone()
                        .unwrap_or_else(|| "EIP".to_string()),
                ),
                address_ip: Some(ip),
                address_status: Some("CREATING".to_string()),
                internet_charge_type: Some(
                    request
                        .internet_charge_type
                        .clone()
                        .unwrap_or_else(|| "TRAFFIC_POSTPAID_BY_HOUR".to_string()),
                ),
                bandwidth: Some(request.internet_max_bandwidth_out.unwrap_or(1)),
                instance_id: None,
            },
        );
        if let Some(package_id) = &request.bandwidth_package_id {
            state.bandwidth_packages.insert(
                id.clone(),
                BandwidthPackage {
                    bandwidth_package_id: package_id.clone(),
                },
            );
        }
        if !request.tags.is_empty() {
            let name = build_tag_resource_name("vpc", "eip", REGION, &id);
            let tags = request
                .tags
                .iter()
                .map(|t| (t.key.clone(), t.value.clone()))
                .collect();
            state.tags.insert(name, tags);
        }
        Ok(vec![id])
    }

    async fn describe_eip(&self, eip_id: &str) -> Result<Option<Address>> {
        self.record("DescribeAddresses")?;
        let mut state = self.state.lock().unwrap();
        let Some(address) = state.addresses.get_mut(eip_id) else {
            return Ok(None);
        };
        let observed = address.clone();
        if address.address_status.as_deref() == Some("CREATING") {
            address.address_status = Some("UNBIND".to_string());
        }
        Ok(Some(observed))
    }

    async fn modify_address_name(&self, eip_id: &str, name: &str) -> Result<()> {
        self.record("ModifyAddressAttribute")?;
        let mut state = self.state.lock().unwrap();
        let address = state
            .addresses
            .get_mut(eip_id)
            .ok_or_else(|| not_found("address", eip_id))?;
        address.address_name = Some(name.to_string());
        Ok(())
    }

    async fn modify_address_bandwidth(&self, eip_id: &str, bandwidth_out: i64) -> Result<()> {
        self.record("ModifyAddressesBandwidth")?;
        let mut state = self.state.lock().unwrap();
        let address = state
            .addresses
            .get_mut(eip_id)
            .ok_or_else(|| not_found("address", eip_id))?;
        address.bandwidth = Some(bandwidth_out);
        Ok(())
    }

    async fn disassociate_address(&self, eip_id: &str) -> Result<()> {
        self.record("DisassociateAddress")?;
        let mut state = self.state.lock().unwrap();
        let address = state
            .addresses
            .get_mut(eip_id)
            .ok_or_else(|| not_found("address", eip_id))?;
        address.instance_id = None;
        address.address_status = Some("UNBIND".to_string());
        Ok(())
    }

    async fn release_address(&self, eip_id: &str) -> Result<()> {
        self.record("ReleaseAddresses")?;
        let mut state = self.state.lock().unwrap();
        match state.addresses.get(eip_id) {
            None => Err(not_found("address", eip_id)),
            Some(a) if a.instance_id.is_some() => Err(api_error(
                "ReleaseAddresses",
                "InvalidAddressState",
            )),
            Some(_) => {
                state.addresses.remove(eip_id);
                state.bandwidth_packages.remove(eip_id);
                Ok(())
            }
        }
    }

    async fn describe_bandwidth_package_by_eip(
        &self,
        eip_id: &str,
    ) -> Result<Option<BandwidthPackage>> {
        self.record("DescribeBandwidthPackages")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .bandwidth_packages
            .get(eip_id)
            .cloned())
    }

    async fn create_vpn_gateway(&self, request: &CreateVpnGatewayRequest) -> Result<VpnGateway> {
        self.record("CreateVpnGateway")?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("vpngw");
        let prepaid = request.instance_charge_type == "PREPAID";
        let gateway = VpnGateway {
            vpn_gateway_id: id.clone(),
            vpc_id: Some(request.vpc_id.clone()),
            vpn_gateway_name: Some(request.vpn_gateway_name.clone()),
            gateway_type: Some(
                request
                    .gateway_type
                    .clone()
                    .unwrap_or_else(|| "IPSEC".to_string()),
            ),
            state: Some("PENDING".to_string()),
            public_ip_address: Some(format!("198.51.100.{}", state.next_id)),
            renew_flag: request
                .instance_charge_prepaid
                .as_ref()
                .map(|p| p.renew_flag.clone()),
            instance_charge_type: Some(request.instance_charge_type.clone()),
            internet_max_bandwidth_out: Some(request.internet_max_bandwidth_out),
            created_time: Some("2026-10-19 08:00:00".to_string()),
            expired_time: Some(
                if prepaid {
                    "2099-10-19 08:00:00"
                } else {
                    "0000-00-00 00:00:00"
                }
                .to_string(),
            ),
            is_address_blocked: Some(false),
            new_purchase_plan: Some("PREPAID_TO_POSTPAID".to_string()),
            restrict_state: Some("NORMAL".to_string()),
            zone: Some(request.zone.clone()),
            cdc_id: request.cdc_id.clone(),
            max_connection: Some(request.max_connection.unwrap_or(100)),
            network_instance_id: None,
        };
        state.gateways.insert(id, gateway.clone());
        Ok(gateway)
    }

    async fn describe_vpn_gateway(&self, gateway_id: &str) -> Result<Option<VpnGateway>> {
        self.record("DescribeVpnGateways")?;
        let mut state = self.state.lock().unwrap();
        let Some(gateway) = state.gateways.get_mut(gateway_id) else {
            return Ok(None);
        };
        let observed = gateway.clone();
        if gateway.state.as_deref() == Some("PENDING") {
            gateway.state = Some("AVAILABLE".to_string());
        }
        Ok(Some(observed))
    }

    async fn modify_vpn_gateway_attribute(
        &self,
        gateway_id: &str,
        name: &str,
        charge_type: Option<&str>,
    ) -> Result<()> {
        self.record("ModifyVpnGatewayAttribute")?;
        let mut state = self.state.lock().unwrap();
        let gateway = state
            .gateways
            .get_mut(gateway_id)
            .ok_or_else(|| not_found("vpn gateway", gateway_id))?;
        gateway.vpn_gateway_name = Some(name.to_string());
        if let Some(charge_type) = charge_type {
            gateway.instance_charge_type = Some(charge_type.to_string());
            gateway.renew_flag = None;
            gateway.expired_time = Some("0000-00-00 00:00:00".to_string());
        }
        Ok(())
    }

    async fn set_vpn_gateway_renew_flag(&self, gateway_id: &str, auto_renew: bool) -> Result<()> {
        self.record("SetVpnGatewaysRenewFlag")?;
        let mut state = self.state.lock().unwrap();
        let gateway = state
            .gateways
            .get_mut(gateway_id)
            .ok_or_else(|| not_found("vpn gateway", gateway_id))?;
        gateway.renew_flag = Some(
            if auto_renew {
                "NOTIFY_AND_AUTO_RENEW"
            } else {
                "NOTIFY_AND_MANUAL_RENEW"
            }
            .to_string(),
        );
        Ok(())
    }

    async fn reset_vpn_gateway_bandwidth(&self, gateway_id: &str, bandwidth: i64) -> Result<()> {
        self.record("ResetVpnGatewayInternetMaxBandwidth")?;
        let mut state = self.state.lock().unwrap();
        let gateway = state
            .gateways
            .get_mut(gateway_id)
            .ok_or_else(|| not_found("vpn gateway", gateway_id))?;
        gateway.internet_max_bandwidth_out = Some(bandwidth);
        Ok(())
    }

    async fn delete_vpn_gateway(&self, gateway_id: &str) -> Result<()> {
        self.record("DeleteVpnGateway")?;
        self.state
            .lock()
            .unwrap()
            .gateways
            .remove(gateway_id)
            .map(|_| ())
            .ok_or_else(|| not_found("vpn gateway", gateway_id))
    }

    async fn describe_vpn_connections(&self, filters: &[Filter]) -> Result<Vec<VpnConnection>> {
        self.record("DescribeVpnConnections")?;
        let gateway_id = filter_value(filters, "vpn-gateway-id");
        Ok(self
            .state
            .lock()
            .unwrap()
            .connections
            .iter()
            .filter(|(gw, _)| gateway_id.is_none_or(|id| id == gw))
            .map(|(_, c)| c.clone())
            .collect())
    }

    async fn describe_service_templates(&self, filters: &[Filter]) -> Result<Vec<ServiceTemplate>> {
        self.record("DescribeServiceTemplates")?;
        let name = filter_value(filters, "service-template-name");
        let id = filter_value(filters, "service-template-id");
        Ok(self
            .state
            .lock()
            .unwrap()
            .templates
            .iter()
            .filter(|t| name.is_none_or(|n| n == t.service_template_name))
            .filter(|t| id.is_none_or(|i| i == t.service_template_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CfsApi for MockCloud {
    async fn create_snapshot(&self, file_system_id: &str, name: Option<&str>) -> Result<String> {
        self.record("CreateCfsSnapshot")?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("cfssnap");
        state.snapshots.insert(
            id.clone(),
            CfsSnapshot {
                snapshot_id: id.clone(),
                snapshot_name: Some(name.unwrap_or_default().to_string()),
                file_system_id: Some(file_system_id.to_string()),
                status: Some("creating".to_string()),
                creation_time: Some("2026-10-19 08:00:00".to_string()),
                size: Some(0),
            },
        );
        Ok(id)
    }

    async fn describe_snapshot(&self, snapshot_id: &str) -> Result<Option<CfsSnapshot>> {
        self.record("DescribeCfsSnapshots")?;
        let mut state = self.state.lock().unwrap();
        let Some(snapshot) = state.snapshots.get_mut(snapshot_id) else {
            return Ok(None);
        };
        let observed = snapshot.clone();
        if snapshot.status.as_deref() == Some("creating") {
            snapshot.status = Some("available".to_string());
        }
        Ok(Some(observed))
    }

    async fn update_snapshot_name(&self, snapshot_id: &str, name: &str) -> Result<()> {
        self.record("UpdateCfsSnapshotAttribute")?;
        let mut state = self.state.lock().unwrap();
        let snapshot = state
            .snapshots
            .get_mut(snapshot_id)
            .ok_or_else(|| not_found("snapshot", snapshot_id))?;
        snapshot.snapshot_name = Some(name.to_string());
        Ok(())
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        self.record("DeleteCfsSnapshot")?;
        self.state
            .lock()
            .unwrap()
            .snapshots
            .remove(snapshot_id)
            .map(|_| ())
            .ok_or_else(|| not_found("snapshot", snapshot_id))
    }
}

#[async_trait]
impl MariadbApi for MockCloud {
    async fn associate_security_groups(
        &self,
        product: &str,
        security_group_id: &str,
        instance_ids: &[String],
    ) -> Result<()> {
        self.record("AssociateSecurityGroups")?;
        let mut state = self.state.lock().unwrap();
        for instance_id in instance_ids {
            state.sg_bindings.insert((
                product.to_string(),
                instance_id.clone(),
                security_group_id.to_string(),
            ));
        }
        Ok(())
    }

    async fn describe_instance_security_group(
        &self,
        product: &str,
        instance_id: &str,
        security_group_id: &str,
    ) -> Result<Option<SecurityGroup>> {
        self.record("DescribeDBSecurityGroups")?;
        let bound = self.state.lock().unwrap().sg_bindings.contains(&(
            product.to_string(),
            instance_id.to_string(),
            security_group_id.to_string(),
        ));
        Ok(bound.then(|| SecurityGroup {
            security_group_id: security_group_id.to_string(),
            security_group_name: Some("default".to_string()),
        }))
    }

    async fn modify_instance_security_groups(
        &self,
        product: &str,
        instance_id: &str,
        security_group_ids: &[String],
    ) -> Result<()> {
        self.record("ModifyDBInstanceSecurityGroups")?;
        let mut state = self.state.lock().unwrap();
        state
            .sg_bindings
            .retain(|(p, i, _)| !(p == product && i == instance_id));
        for sg in security_group_ids {
            state
                .sg_bindings
                .insert((product.to_string(), instance_id.to_string(), sg.clone()));
        }
        Ok(())
    }

    async fn disassociate_security_groups(
        &self,
        product: &str,
        security_group_id: &str,
        instance_ids: &[String],
    ) -> Result<()> {
        self.record("DisassociateSecurityGroups")?;
        let mut state = self.state.lock().unwrap();
        for instance_id in instance_ids {
            state.sg_bindings.remove(&(
                product.to_string(),
                instance_id.clone(),
                security_group_id.to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TsfApi for MockCloud {
    async fn create_config(&self, request: &CreateConfigRequest) -> Result<bool> {
        self.record("CreateConfig")?;
        let mut state = self.state.lock().unwrap();
        let duplicate = state.configs.values().any(|c| {
            c.config_name.as_deref() == Some(request.config_name.as_str())
                && c.config_version.as_deref() == Some(request.config_version.as_str())
        });
        if duplicate {
            return Ok(false);
        }

        let id = state.next_id("dcfg");
        state.configs.insert(
            id.clone(),
            TsfConfig {
                config_id: id,
                config_name: Some(request.config_name.clone()),
                config_version: Some(request.config_version.clone()),
                config_value: Some(request.config_value.clone()),
                application_id: Some(request.application_id.clone()),
                config_version_desc: request.config_version_desc.clone(),
                config_type: Some(
                    request
                        .config_type
                        .clone()
                        .unwrap_or_else(|| "P".to_string()),
                ),
            },
        );
        Ok(true)
    }

    async fn describe_config(
        &self,
        config_id: &str,
        config_name: &str,
    ) -> Result<Option<TsfConfig>> {
        self.record("DescribeConfigs")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .configs
            .values()
            .filter(|c| config_id.is_empty() || c.config_id == config_id)
            .find(|c| config_name.is_empty() || c.config_name.as_deref() == Some(config_name))
            .cloned())
    }

    async fn delete_config(&self, config_id: &str) -> Result<()> {
        self.record("DeleteConfig")?;
        self.state
            .lock()
            .unwrap()
            .configs
            .remove(config_id)
            .map(|_| ())
            .ok_or_else(|| not_found("config", config_id))
    }
}

#[async_trait]
impl TagApi for MockCloud {
    async fn modify_tags(
        &self,
        resource_name: &str,
        replace: &Tags,
        delete: &[String],
    ) -> Result<()> {
        self.record("ModifyResourceTags")?;
        let mut state = self.state.lock().unwrap();
        let tags = state.tags.entry(resource_name.to_string()).or_default();
        tags.extend(replace.iter().map(|(k, v)| (k.clone(), v.clone())));
        for key in delete {
            tags.remove(key);
        }
        Ok(())
    }

    async fn describe_resource_tags(
        &self,
        service_type: &str,
        resource_type: &str,
        region: &str,
        id: &str,
    ) -> Result<Tags> {
        self.record("DescribeResourceTagsByResourceIds")?;
        let name = build_tag_resource_name(service_type, resource_type, region, id);
        Ok(self
            .state
            .lock()
            .unwrap()
            .tags
            .get(&name)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl DbbrainApi for MockCloud {
    async fn describe_security_audit_log_export_tasks(
        &self,
        sec_audit_group_id: &str,
        product: &str,
        async_request_ids: &[u64],
    ) -> Result<Vec<SecLogExportTaskInfo>> {
        self.record("DescribeSecurityAuditLogExportTasks")?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .export_tasks
            .iter()
            .filter(|(sag, p, _)| sag == sec_audit_group_id && p == product)
            .filter(|(_, _, t)| {
                async_request_ids.is_empty() || async_request_ids.contains(&t.async_request_id)
            })
            .map(|(_, _, t)| t.clone())
            .collect())
    }
}

#[async_trait]
impl StsApi for MockCloud {
    async fn get_caller_identity(&self) -> Result<CallerIdentity> {
        self.record("GetCallerIdentity")?;
        Ok(CallerIdentity {
            account_id: "100000000001".to_string(),
            arn: "qcs::cam::uin/100000000001:uin/100000000001".to_string(),
            user_id: "100000000001".to_string(),
        })
    }
}

//! Tencent Cloud provider implementation

use crate::client::TencentClient;
use crate::context::TencentContext;
use crate::data_sources::{self, DbbrainSecurityAuditLogExportTasks, ServiceTemplates};
use crate::resources::{
    self, CfsSnapshotResource, EipResource, MariadbSecurityGroupsResource,
    TsfApplicationConfigResource, VpnGatewayResource,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tcform_cloud::{AuthStatus, CloudProvider, DataSourceHandler, ResourceHandler, Result};

pub const PROVIDER_NAME: &str = "tencentcloud";

/// Tencent Cloud provider
pub struct TencentCloudProvider {
    ctx: TencentContext,
    resources: BTreeMap<&'static str, Arc<dyn ResourceHandler>>,
    data_sources: BTreeMap<&'static str, Arc<dyn DataSourceHandler>>,
}

impl TencentCloudProvider {
    pub fn new(client: TencentClient) -> Self {
        Self::from_context(TencentContext::from_client(client))
    }

    pub fn from_context(ctx: TencentContext) -> Self {
        let mut resources: BTreeMap<&'static str, Arc<dyn ResourceHandler>> = BTreeMap::new();
        resources.insert(resources::eip::TYPE_NAME, Arc::new(EipResource::new(ctx.clone())));
        resources.insert(
            resources::vpn_gateway::TYPE_NAME,
            Arc::new(VpnGatewayResource::new(ctx.clone())),
        );
        resources.insert(
            resources::cfs_snapshot::TYPE_NAME,
            Arc::new(CfsSnapshotResource::new(ctx.clone())),
        );
        resources.insert(
            resources::mariadb_security_groups::TYPE_NAME,
            Arc::new(MariadbSecurityGroupsResource::new(ctx.clone())),
        );
        resources.insert(
            resources::tsf_application_config::TYPE_NAME,
            Arc::new(TsfApplicationConfigResource::new(ctx.clone())),
        );

        let mut data_sources: BTreeMap<&'static str, Arc<dyn DataSourceHandler>> =
            BTreeMap::new();
        data_sources.insert(
            data_sources::service_templates::TYPE_NAME,
            Arc::new(ServiceTemplates::new(ctx.clone())),
        );
        data_sources.insert(
            data_sources::dbbrain_security_audit_log_export_tasks::TYPE_NAME,
            Arc::new(DbbrainSecurityAuditLogExportTasks::new(ctx.clone())),
        );

        Self {
            ctx,
            resources,
            data_sources,
        }
    }

    pub fn region(&self) -> &str {
        &self.ctx.region
    }

    pub fn context(&self) -> &TencentContext {
        &self.ctx
    }
}

#[async_trait]
impl CloudProvider for TencentCloudProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn display_name(&self) -> &str {
        "Tencent Cloud"
    }

    async fn check_auth(&self) -> Result<AuthStatus> {
        match self.ctx.sts.get_caller_identity().await {
            Ok(identity) => Ok(AuthStatus::ok(format!(
                "{} (uin {}, region {})",
                identity.arn, identity.user_id, self.ctx.region
            ))),
            Err(e) => {
                tracing::debug!("Caller identity lookup failed: {}", e);
                Ok(AuthStatus::failed(e.to_string()))
            }
        }
    }

    fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    fn resource(&self, resource_type: &str) -> Option<Arc<dyn ResourceHandler>> {
        self.resources.get(resource_type).cloned()
    }

    fn data_source_types(&self) -> Vec<&'static str> {
        self.data_sources.keys().copied().collect()
    }

    fn data_source(&self, name: &str) -> Option<Arc<dyn DataSourceHandler>> {
        self.data_sources.get(name).cloned()
    }
}

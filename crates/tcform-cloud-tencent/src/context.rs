//! Explicit provider context handed to every resource

use crate::client::TencentClient;
use crate::services::{CfsApi, DbbrainApi, MariadbApi, StsApi, TagApi, TsfApi, VpcApi};
use std::sync::Arc;
use tcform_cloud::RetryConfig;

/// Region, retry policy and one client per vendor sub-service
///
/// Cloning is cheap; every resource and data source owns a copy.
#[derive(Clone)]
pub struct TencentContext {
    pub region: String,
    pub retry: RetryConfig,
    pub vpc: Arc<dyn VpcApi>,
    pub cfs: Arc<dyn CfsApi>,
    pub mariadb: Arc<dyn MariadbApi>,
    pub tsf: Arc<dyn TsfApi>,
    pub tag: Arc<dyn TagApi>,
    pub dbbrain: Arc<dyn DbbrainApi>,
    pub sts: Arc<dyn StsApi>,
}

impl TencentContext {
    /// Route every sub-service through one signed client
    pub fn from_client(client: TencentClient) -> Self {
        let region = client.region().to_string();
        let client = Arc::new(client);
        Self {
            region,
            retry: RetryConfig::default(),
            vpc: client.clone(),
            cfs: client.clone(),
            mariadb: client.clone(),
            tsf: client.clone(),
            tag: client.clone(),
            dbbrain: client.clone(),
            sts: client,
        }
    }
}

impl std::fmt::Debug for TencentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TencentContext")
            .field("region", &self.region)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

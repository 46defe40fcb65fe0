//! STS: who the credentials belong to

use crate::client::{CallerIdentity, TencentClient};
use async_trait::async_trait;
use tcform_cloud::Result;

#[async_trait]
pub trait StsApi: Send + Sync {
    async fn get_caller_identity(&self) -> Result<CallerIdentity>;
}

#[async_trait]
impl StsApi for TencentClient {
    async fn get_caller_identity(&self) -> Result<CallerIdentity> {
        Ok(self.caller_identity().await?)
    }
}

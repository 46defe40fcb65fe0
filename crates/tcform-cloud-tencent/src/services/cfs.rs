//! CFS file system snapshots

use super::{Empty, found};
use crate::client::TencentClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tcform_cloud::{CloudError, Result};

const SERVICE: &str = "cfs";
const VERSION: &str = "2019-07-19";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CfsSnapshot {
    pub snapshot_id: String,
    pub snapshot_name: Option<String>,
    pub file_system_id: Option<String>,
    /// `creating`, `available`, `deleting` ...
    pub status: Option<String>,
    pub creation_time: Option<String>,
    pub size: Option<i64>,
}

#[async_trait]
pub trait CfsApi: Send + Sync {
    /// Returns the id of the new snapshot
    async fn create_snapshot(&self, file_system_id: &str, name: Option<&str>) -> Result<String>;
    async fn describe_snapshot(&self, snapshot_id: &str) -> Result<Option<CfsSnapshot>>;
    async fn update_snapshot_name(&self, snapshot_id: &str, name: &str) -> Result<()>;
    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()>;
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CreateCfsSnapshotResponse {
    snapshot_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeCfsSnapshotsResponse {
    #[serde(default)]
    snapshots: Vec<CfsSnapshot>,
}

#[async_trait]
impl CfsApi for TencentClient {
    async fn create_snapshot(&self, file_system_id: &str, name: Option<&str>) -> Result<String> {
        let mut request = json!({ "FileSystemId": file_system_id });
        if let Some(name) = name {
            request["SnapshotName"] = json!(name);
        }
        let response: CreateCfsSnapshotResponse = self
            .call(SERVICE, VERSION, "CreateCfsSnapshot", &request)
            .await?;
        Ok(response.snapshot_id)
    }

    async fn describe_snapshot(&self, snapshot_id: &str) -> Result<Option<CfsSnapshot>> {
        let response = self
            .call::<_, DescribeCfsSnapshotsResponse>(
                SERVICE,
                VERSION,
                "DescribeCfsSnapshots",
                &json!({ "SnapshotId": snapshot_id }),
            )
            .await
            .map_err(CloudError::from);
        found(response.map(|r| r.snapshots.into_iter().next()))
    }

    async fn update_snapshot_name(&self, snapshot_id: &str, name: &str) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "UpdateCfsSnapshotAttribute",
                &json!({ "SnapshotId": snapshot_id, "SnapshotName": name }),
            )
            .await?;
        Ok(())
    }

    async fn delete_snapshot(&self, snapshot_id: &str) -> Result<()> {
        let _: Empty = self
            .call(SERVICE, VERSION, "DeleteCfsSnapshot", &json!({ "SnapshotId": snapshot_id }))
            .await?;
        Ok(())
    }
}

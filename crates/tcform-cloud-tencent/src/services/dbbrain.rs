//! DBbrain security audit log exports

use super::PAGE_LIMIT;
use crate::client::TencentClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tcform_cloud::Result;

const SERVICE: &str = "dbbrain";
const VERSION: &str = "2021-05-27";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecLogExportTaskInfo {
    pub async_request_id: u64,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub create_time: Option<String>,
    pub status: Option<String>,
    pub progress: Option<i64>,
    pub log_start_time: Option<String>,
    pub log_end_time: Option<String>,
    pub total_size: Option<i64>,
    pub danger_levels: Option<Vec<i64>>,
}

#[async_trait]
pub trait DbbrainApi: Send + Sync {
    async fn describe_security_audit_log_export_tasks(
        &self,
        sec_audit_group_id: &str,
        product: &str,
        async_request_ids: &[u64],
    ) -> Result<Vec<SecLogExportTaskInfo>>;
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeTasksResponse {
    #[serde(default)]
    tasks: Vec<SecLogExportTaskInfo>,
    #[serde(default)]
    total_count: u64,
}

#[async_trait]
impl DbbrainApi for TencentClient {
    async fn describe_security_audit_log_export_tasks(
        &self,
        sec_audit_group_id: &str,
        product: &str,
        async_request_ids: &[u64],
    ) -> Result<Vec<SecLogExportTaskInfo>> {
        let mut tasks = Vec::new();
        let mut offset = 0u64;
        loop {
            let mut request = json!({
                "SecAuditGroupId": sec_audit_group_id,
                "Product": product,
                "Offset": offset,
                "Limit": PAGE_LIMIT,
            });
            if !async_request_ids.is_empty() {
                request["AsyncRequestIds"] = json!(async_request_ids);
            }

            let response: DescribeTasksResponse = self
                .call(SERVICE, VERSION, "DescribeSecurityAuditLogExportTasks", &request)
                .await?;
            let count = response.tasks.len() as u64;
            tasks.extend(response.tasks);
            offset += count;
            if count < PAGE_LIMIT || offset >= response.total_count {
                break;
            }
        }
        Ok(tasks)
    }
}

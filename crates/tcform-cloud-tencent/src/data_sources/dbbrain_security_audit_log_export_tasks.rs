//! `tencentcloud_dbbrain_security_audit_log_export_tasks`: audit log export jobs

use crate::context::TencentContext;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tcform_cloud::data_source::RESULT_OUTPUT_FILE;
use tcform_cloud::retry::retry_read;
use tcform_cloud::{
    AttributeSchema, AttributeType, Attributes, CloudError, DataResult, DataSourceHandler,
    ResourceSchema, Result, join_id, retry_read_error,
};

pub const TYPE_NAME: &str = "tencentcloud_dbbrain_security_audit_log_export_tasks";

const LIST_KEY: &str = "list";

#[derive(Debug, Serialize)]
struct TaskItem {
    async_request_id: u64,
    start_time: Option<String>,
    end_time: Option<String>,
    create_time: Option<String>,
    status: Option<String>,
    progress: Option<i64>,
    log_start_time: Option<String>,
    log_end_time: Option<String>,
    total_size: Option<i64>,
    danger_levels: Vec<i64>,
}

pub struct DbbrainSecurityAuditLogExportTasks {
    ctx: TencentContext,
}

impl DbbrainSecurityAuditLogExportTasks {
    pub fn new(ctx: TencentContext) -> Self {
        Self { ctx }
    }
}

fn required_str<'a>(args: &'a Attributes, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| CloudError::MissingRequired {
            resource_type: TYPE_NAME.to_string(),
            attribute: key.to_string(),
        })
}

#[async_trait]
impl DataSourceHandler for DbbrainSecurityAuditLogExportTasks {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_description("Query security audit log export tasks")
            .attribute(
                AttributeSchema::required("sec_audit_group_id", AttributeType::String)
                    .with_description("security audit group id."),
            )
            .attribute(
                AttributeSchema::required("product", AttributeType::String)
                    .with_description("product, optional value is mysql."),
            )
            .attribute(
                AttributeSchema::optional("async_request_ids", AttributeType::Set)
                    .with_description("async request id list."),
            )
            .attribute(
                AttributeSchema::optional(RESULT_OUTPUT_FILE, AttributeType::String)
                    .with_description("Used to save results."),
            )
            .attribute(
                AttributeSchema::computed(LIST_KEY, AttributeType::List)
                    .with_description("security audit log export task list."),
            )
    }

    async fn read(&self, args: &Attributes) -> Result<DataResult> {
        let group_id = required_str(args, "sec_audit_group_id")?;
        let product = required_str(args, "product")?;
        let request_ids: Vec<u64> = args
            .get("async_request_ids")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_u64).collect())
            .unwrap_or_default();

        let dbbrain = self.ctx.dbbrain.as_ref();
        let request_ids = request_ids.as_slice();
        let tasks = retry_read(&self.ctx.retry, move || async move {
            dbbrain
                .describe_security_audit_log_export_tasks(group_id, product, request_ids)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await?;

        let ids = tasks
            .iter()
            .map(|t| {
                let request_id = t.async_request_id.to_string();
                join_id(&[group_id, request_id.as_str()])
            })
            .collect();
        let items: Vec<TaskItem> = tasks
            .into_iter()
            .map(|t| TaskItem {
                async_request_id: t.async_request_id,
                start_time: t.start_time,
                end_time: t.end_time,
                create_time: t.create_time,
                status: t.status,
                progress: t.progress,
                log_start_time: t.log_start_time,
                log_end_time: t.log_end_time,
                total_size: t.total_size,
                danger_levels: t.danger_levels.unwrap_or_default(),
            })
            .collect();

        Ok(DataResult::new(ids, LIST_KEY, serde_json::to_value(&items)?))
    }
}

//! `tencentcloud_service_templates`: protocol/port templates of the VPC

use crate::context::TencentContext;
use crate::services::Filter;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tcform_cloud::data_source::RESULT_OUTPUT_FILE;
use tcform_cloud::retry::retry_read;
use tcform_cloud::{
    AttributeSchema, AttributeType, Attributes, DataResult, DataSourceHandler, ResourceSchema,
    Result, retry_read_error,
};

pub const TYPE_NAME: &str = "tencentcloud_service_templates";

const LIST_KEY: &str = "template_list";

#[derive(Debug, Serialize)]
struct TemplateItem {
    id: String,
    name: String,
    services: Vec<String>,
}

pub struct ServiceTemplates {
    ctx: TencentContext,
}

impl ServiceTemplates {
    pub fn new(ctx: TencentContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl DataSourceHandler for ServiceTemplates {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_description("Query service templates")
            .attribute(
                AttributeSchema::optional("name", AttributeType::String)
                    .with_description("Name of the service template to query."),
            )
            .attribute(
                AttributeSchema::optional("id", AttributeType::String)
                    .with_description("ID of the service template to query."),
            )
            .attribute(
                AttributeSchema::optional(RESULT_OUTPUT_FILE, AttributeType::String)
                    .with_description("Used to save results."),
            )
            .attribute(
                AttributeSchema::computed(LIST_KEY, AttributeType::List)
                    .with_description("Information list of the dedicated service templates: `id`, `name`, `services`."),
            )
    }

    async fn read(&self, args: &Attributes) -> Result<DataResult> {
        let mut filters = Vec::new();
        if let Some(name) = args.get("name").and_then(Value::as_str) {
            filters.push(Filter::new("service-template-name", name));
        }
        if let Some(id) = args.get("id").and_then(Value::as_str) {
            filters.push(Filter::new("service-template-id", id));
        }

        let vpc = self.ctx.vpc.as_ref();
        let filters = filters.as_slice();
        let templates = retry_read(&self.ctx.retry, move || async move {
            vpc.describe_service_templates(filters)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await?;

        let items: Vec<TemplateItem> = templates
            .into_iter()
            .map(|t| TemplateItem {
                id: t.service_template_id,
                name: t.service_template_name,
                services: t.service_set,
            })
            .collect();
        let ids = items.iter().map(|i| i.id.clone()).collect();
        tracing::debug!("Found {} service templates", items.len());

        Ok(DataResult::new(ids, LIST_KEY, serde_json::to_value(&items)?))
    }
}

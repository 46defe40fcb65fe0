//! `tencentcloud_tsf_application_config`: versioned configuration item of a TSF application
//!
//! A config version cannot be edited; every field is fixed once created.

use crate::context::TencentContext;
use crate::services::CreateConfigRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tcform_cloud::retry::{retry_read, retry_write};
use tcform_cloud::{
    AttributeSchema, AttributeType, CloudError, ResourceData, ResourceHandler, ResourceSchema,
    Result, retry_error, retry_read_error,
};

pub const TYPE_NAME: &str = "tencentcloud_tsf_application_config";

#[derive(Debug, Deserialize)]
struct TsfConfigArgs {
    config_name: String,
    config_version: String,
    config_value: String,
    application_id: String,
    config_version_desc: Option<String>,
    config_type: Option<String>,
    encode_with_base64: Option<bool>,
    #[serde(default)]
    program_id_list: Vec<String>,
}

/// `encode_with_base64` and `program_id_list` are never reported back
#[derive(Debug, Serialize)]
struct TsfConfigState {
    config_name: Option<String>,
    config_version: Option<String>,
    config_value: Option<String>,
    application_id: Option<String>,
    config_version_desc: Option<String>,
    config_type: Option<String>,
}

pub struct TsfApplicationConfigResource {
    ctx: TencentContext,
}

impl TsfApplicationConfigResource {
    pub fn new(ctx: TencentContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ResourceHandler for TsfApplicationConfigResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_description("TSF application configuration item")
            .attribute(
                AttributeSchema::required("config_name", AttributeType::String)
                    .immutable()
                    .with_description("configuration project name."),
            )
            .attribute(
                AttributeSchema::required("config_version", AttributeType::String)
                    .immutable()
                    .with_description("configuration item version."),
            )
            .attribute(
                AttributeSchema::required("config_value", AttributeType::String)
                    .immutable()
                    .with_description("configuration item value."),
            )
            .attribute(
                AttributeSchema::required("application_id", AttributeType::String)
                    .immutable()
                    .with_description("Application ID."),
            )
            .attribute(
                AttributeSchema::optional("config_version_desc", AttributeType::String)
                    .with_computed()
                    .immutable(),
            )
            .attribute(
                AttributeSchema::optional("config_type", AttributeType::String)
                    .with_computed()
                    .immutable(),
            )
            .attribute(
                AttributeSchema::optional("encode_with_base64", AttributeType::Bool)
                    .immutable()
                    .with_description("Base64 encode the configuration value."),
            )
            .attribute(
                AttributeSchema::optional("program_id_list", AttributeType::Set)
                    .immutable()
                    .with_description("Program id list."),
            )
    }

    async fn create(&self, d: &mut ResourceData) -> Result<()> {
        let args: TsfConfigArgs = d.decode()?;
        let tsf = self.ctx.tsf.as_ref();

        let request = CreateConfigRequest {
            config_name: args.config_name.clone(),
            config_version: args.config_version.clone(),
            config_value: args.config_value.clone(),
            application_id: args.application_id.clone(),
            config_version_desc: args.config_version_desc.clone(),
            config_type: args.config_type.clone(),
            encode_with_base64: args.encode_with_base64,
            program_id_list: args.program_id_list.clone(),
        };
        let request = &request;
        let created = retry_write(&self.ctx.retry, move || async move {
            tsf.create_config(request)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await?;
        if !created {
            return Err(CloudError::Api {
                action: "CreateConfig".to_string(),
                code: "FailedOperation".to_string(),
                message: format!("config {} was not created", args.config_name),
                request_id: None,
            });
        }

        // CreateConfig does not return the id; look it up by name
        let name = args.config_name.as_str();
        let config = retry_read(&self.ctx.retry, move || async move {
            tsf.describe_config("", name)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await?
        .ok_or_else(|| {
            CloudError::ResourceNotFound(format!("config {} missing after create", name))
        })?;

        d.set_id(config.config_id);
        Ok(())
    }

    async fn read(&self, d: &mut ResourceData) -> Result<()> {
        let config_id = d.require_id()?.to_string();
        let id = config_id.as_str();
        let tsf = self.ctx.tsf.as_ref();

        let config = retry_read(&self.ctx.retry, move || async move {
            tsf.describe_config(id, "")
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await?;
        let Some(config) = config else {
            d.clear_id();
            return Ok(());
        };

        d.set_state(&TsfConfigState {
            config_name: config.config_name,
            config_version: config.config_version,
            config_value: config.config_value,
            application_id: config.application_id,
            config_version_desc: config.config_version_desc,
            config_type: config.config_type,
        })
    }

    async fn update(&self, d: &mut ResourceData) -> Result<()> {
        // Only reachable for a failed instance with unchanged arguments
        let changed = d.changed_keys();
        match changed.first() {
            Some(attribute) => Err(CloudError::ImmutableAttribute {
                resource_type: TYPE_NAME.to_string(),
                attribute: attribute.clone(),
            }),
            None => Ok(()),
        }
    }

    async fn delete(&self, d: &mut ResourceData) -> Result<()> {
        let config_id = d.require_id()?.to_string();
        let id = config_id.as_str();
        let tsf = self.ctx.tsf.as_ref();
        retry_write(&self.ctx.retry, move || async move {
            tsf.delete_config(id)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await
    }
}

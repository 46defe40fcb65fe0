//! TSF application configuration items

use crate::client::TencentClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tcform_cloud::{CloudError, Result};

const SERVICE: &str = "tsf";
const VERSION: &str = "2018-03-26";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TsfConfig {
    pub config_id: String,
    pub config_name: Option<String>,
    pub config_version: Option<String>,
    pub config_value: Option<String>,
    pub application_id: Option<String>,
    pub config_version_desc: Option<String>,
    pub config_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateConfigRequest {
    pub config_name: String,
    pub config_version: String,
    pub config_value: String,
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_version_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode_with_base64: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub program_id_list: Vec<String>,
}

#[async_trait]
pub trait TsfApi: Send + Sync {
    /// The API only reports whether the item was created
    async fn create_config(&self, request: &CreateConfigRequest) -> Result<bool>;

    /// Look a config up by id, or by name when `config_id` is empty
    async fn describe_config(&self, config_id: &str, config_name: &str)
    -> Result<Option<TsfConfig>>;

    async fn delete_config(&self, config_id: &str) -> Result<()>;
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct BoolResult {
    result: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct ConfigPage {
    content: Vec<TsfConfig>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeConfigsResponse {
    #[serde(default)]
    result: Option<ConfigPage>,
}

#[async_trait]
impl TsfApi for TencentClient {
    async fn create_config(&self, request: &CreateConfigRequest) -> Result<bool> {
        let response: BoolResult = self.call(SERVICE, VERSION, "CreateConfig", request).await?;
        Ok(response.result)
    }

    async fn describe_config(
        &self,
        config_id: &str,
        config_name: &str,
    ) -> Result<Option<TsfConfig>> {
        let mut request = json!({ "Offset": 0, "Limit": 20 });
        if !config_id.is_empty() {
            request["ConfigId"] = json!(config_id);
        }
        if !config_name.is_empty() {
            request["ConfigName"] = json!(config_name);
        }

        let response = self
            .call::<_, DescribeConfigsResponse>(SERVICE, VERSION, "DescribeConfigs", &request)
            .await
            .map_err(CloudError::from);
        super::found(response.map(|r| {
            r.result
                .unwrap_or_default()
                .content
                .into_iter()
                .next()
        }))
    }

    async fn delete_config(&self, config_id: &str) -> Result<()> {
        let response: BoolResult = self
            .call(SERVICE, VERSION, "DeleteConfig", &json!({ "ConfigId": config_id }))
            .await?;
        if !response.result {
            return Err(CloudError::Api {
                action: "DeleteConfig".to_string(),
                code: "FailedOperation".to_string(),
                message: format!("config {} was not deleted", config_id),
                request_id: None,
            });
        }
        Ok(())
    }
}

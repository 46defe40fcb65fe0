//! Tag service: the side channel every taggable resource goes through

use super::{Empty, PAGE_LIMIT};
use crate::client::TencentClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tcform_cloud::{Result, Tags};

const SERVICE: &str = "tag";
const VERSION: &str = "2018-08-13";

#[async_trait]
pub trait TagApi: Send + Sync {
    /// Write `replace` and remove `delete` on a six-segment resource name
    async fn modify_tags(&self, resource_name: &str, replace: &Tags, delete: &[String])
    -> Result<()>;

    async fn describe_resource_tags(
        &self,
        service_type: &str,
        resource_type: &str,
        region: &str,
        id: &str,
    ) -> Result<Tags>;
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TagResource {
    tag_key: String,
    tag_value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeResourceTagsResponse {
    #[serde(default)]
    tags: Vec<TagResource>,
    #[serde(default)]
    total_count: u64,
}

#[async_trait]
impl TagApi for TencentClient {
    async fn modify_tags(
        &self,
        resource_name: &str,
        replace: &Tags,
        delete: &[String],
    ) -> Result<()> {
        if replace.is_empty() && delete.is_empty() {
            return Ok(());
        }

        let replace_tags: Vec<_> = replace
            .iter()
            .map(|(k, v)| json!({ "TagKey": k, "TagValue": v }))
            .collect();
        let delete_tags: Vec<_> = delete.iter().map(|k| json!({ "TagKey": k })).collect();

        let mut request = json!({ "Resource": resource_name });
        if !replace_tags.is_empty() {
            request["ReplaceTags"] = json!(replace_tags);
        }
        if !delete_tags.is_empty() {
            request["DeleteTags"] = json!(delete_tags);
        }

        let _: Empty = self
            .call(SERVICE, VERSION, "ModifyResourceTags", &request)
            .await?;
        Ok(())
    }

    async fn describe_resource_tags(
        &self,
        service_type: &str,
        resource_type: &str,
        region: &str,
        id: &str,
    ) -> Result<Tags> {
        let mut tags = Tags::new();
        let mut offset = 0u64;
        loop {
            let response: DescribeResourceTagsResponse = self
                .call(
                    SERVICE,
                    VERSION,
                    "DescribeResourceTagsByResourceIds",
                    &json!({
                        "ServiceType": service_type,
                        "ResourcePrefix": resource_type,
                        "ResourceRegion": region,
                        "ResourceIds": [id],
                        "Offset": offset,
                        "Limit": PAGE_LIMIT,
                    }),
                )
                .await?;
            let count = response.tags.len() as u64;
            tags.extend(response.tags.into_iter().map(|t| (t.tag_key, t.tag_value)));
            offset += count;
            if count < PAGE_LIMIT || offset >= response.total_count {
                break;
            }
        }
        Ok(tags)
    }
}

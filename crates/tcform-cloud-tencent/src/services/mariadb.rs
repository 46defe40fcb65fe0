//! MariaDB security group bindings

use super::{Empty, found};
use crate::client::TencentClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tcform_cloud::{CloudError, Result};

const SERVICE: &str = "mariadb";
const VERSION: &str = "2017-03-12";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecurityGroup {
    pub security_group_id: String,
    pub security_group_name: Option<String>,
}

#[async_trait]
pub trait MariadbApi: Send + Sync {
    async fn associate_security_groups(
        &self,
        product: &str,
        security_group_id: &str,
        instance_ids: &[String],
    ) -> Result<()>;

    /// The group when it is bound to the instance
    async fn describe_instance_security_group(
        &self,
        product: &str,
        instance_id: &str,
        security_group_id: &str,
    ) -> Result<Option<SecurityGroup>>;

    async fn modify_instance_security_groups(
        &self,
        product: &str,
        instance_id: &str,
        security_group_ids: &[String],
    ) -> Result<()>;

    async fn disassociate_security_groups(
        &self,
        product: &str,
        security_group_id: &str,
        instance_ids: &[String],
    ) -> Result<()>;
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDbSecurityGroupsResponse {
    #[serde(default)]
    groups: Vec<SecurityGroup>,
}

#[async_trait]
impl MariadbApi for TencentClient {
    async fn associate_security_groups(
        &self,
        product: &str,
        security_group_id: &str,
        instance_ids: &[String],
    ) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "AssociateSecurityGroups",
                &json!({
                    "Product": product,
                    "SecurityGroupId": security_group_id,
                    "InstanceIds": instance_ids,
                }),
            )
            .await?;
        Ok(())
    }

    async fn describe_instance_security_group(
        &self,
        product: &str,
        instance_id: &str,
        security_group_id: &str,
    ) -> Result<Option<SecurityGroup>> {
        let response = self
            .call::<_, DescribeDbSecurityGroupsResponse>(
                SERVICE,
                VERSION,
                "DescribeDBSecurityGroups",
                &json!({ "Product": product, "InstanceId": instance_id }),
            )
            .await
            .map_err(CloudError::from);
        found(response.map(|r| {
            r.groups
                .into_iter()
                .find(|g| g.security_group_id == security_group_id)
        }))
    }

    async fn modify_instance_security_groups(
        &self,
        product: &str,
        instance_id: &str,
        security_group_ids: &[String],
    ) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "ModifyDBInstanceSecurityGroups",
                &json!({
                    "Product": product,
                    "InstanceId": instance_id,
                    "SecurityGroupIds": security_group_ids,
                }),
            )
            .await?;
        Ok(())
    }

    async fn disassociate_security_groups(
        &self,
        product: &str,
        security_group_id: &str,
        instance_ids: &[String],
    ) -> Result<()> {
        let _: Empty = self
            .call(
                SERVICE,
                VERSION,
                "DisassociateSecurityGroups",
                &json!({
                    "Product": product,
                    "SecurityGroupId": security_group_id,
                    "InstanceIds": instance_ids,
                }),
            )
            .await?;
        Ok(())
    }
}

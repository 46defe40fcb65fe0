//! `tencentcloud_mariadb_security_groups`: binds a security group to a MariaDB instance
//!
//! Id is `instance_id#security_group_id#product`.

use crate::context::TencentContext;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tcform_cloud::retry::{retry_read, retry_write};
use tcform_cloud::{
    AttributeSchema, AttributeType, ResourceData, ResourceHandler, ResourceSchema, Result,
    join_id, retry_error, retry_read_error, split_id,
};

pub const TYPE_NAME: &str = "tencentcloud_mariadb_security_groups";

const ID_PARTS: usize = 3;

#[derive(Debug, Serialize, Deserialize)]
struct Binding {
    instance_id: String,
    security_group_id: String,
    product: String,
}

impl Binding {
    fn from_id(id: &str) -> Result<Self> {
        let mut parts = split_id(id, ID_PARTS)?.into_iter();
        let mut next = || parts.next().unwrap_or_default();
        Ok(Self {
            instance_id: next(),
            security_group_id: next(),
            product: next(),
        })
    }

    fn id(&self) -> String {
        join_id(&[
            self.instance_id.as_str(),
            self.security_group_id.as_str(),
            self.product.as_str(),
        ])
    }
}

pub struct MariadbSecurityGroupsResource {
    ctx: TencentContext,
}

impl MariadbSecurityGroupsResource {
    pub fn new(ctx: TencentContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl ResourceHandler for MariadbSecurityGroupsResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(TYPE_NAME)
            .with_description("Security group binding of a MariaDB instance")
            .with_id_parts(ID_PARTS)
            .attribute(
                AttributeSchema::required("instance_id", AttributeType::String)
                    .immutable()
                    .with_description("instance id."),
            )
            .attribute(
                AttributeSchema::required("security_group_id", AttributeType::String)
                    .immutable()
                    .with_description("security group id."),
            )
            .attribute(
                AttributeSchema::required("product", AttributeType::String)
                    .immutable()
                    .with_description("product, mariadb."),
            )
    }

    async fn create(&self, d: &mut ResourceData) -> Result<()> {
        let binding: Binding = d.decode()?;
        let mariadb = self.ctx.mariadb.as_ref();
        let instance_ids = [binding.instance_id.clone()];
        let (binding_ref, instance_ids) = (&binding, &instance_ids);

        retry_write(&self.ctx.retry, move || async move {
            mariadb
                .associate_security_groups(
                    &binding_ref.product,
                    &binding_ref.security_group_id,
                    instance_ids,
                )
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await?;

        d.set_id(binding.id());
        Ok(())
    }

    async fn read(&self, d: &mut ResourceData) -> Result<()> {
        let binding = Binding::from_id(d.require_id()?)?;
        let mariadb = self.ctx.mariadb.as_ref();
        let b = &binding;

        let group = retry_read(&self.ctx.retry, move || async move {
            mariadb
                .describe_instance_security_group(&b.product, &b.instance_id, &b.security_group_id)
                .await
                .map_err(|e| retry_read_error(e, &[]))
        })
        .await?;

        if group.is_none() {
            d.clear_id();
            return Ok(());
        }
        d.set_state(&binding)
    }

    async fn update(&self, d: &mut ResourceData) -> Result<()> {
        let binding = Binding::from_id(d.require_id()?)?;
        let mariadb = self.ctx.mariadb.as_ref();
        let group_ids = [binding.security_group_id.clone()];
        let (b, group_ids) = (&binding, &group_ids);

        retry_write(&self.ctx.retry, move || async move {
            mariadb
                .modify_instance_security_groups(&b.product, &b.instance_id, group_ids)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await
    }

    async fn delete(&self, d: &mut ResourceData) -> Result<()> {
        let binding = Binding::from_id(d.require_id()?)?;
        let mariadb = self.ctx.mariadb.as_ref();
        let instance_ids = [binding.instance_id.clone()];
        let (b, instance_ids) = (&binding, &instance_ids);

        retry_write(&self.ctx.retry, move || async move {
            mariadb
                .disassociate_security_groups(&b.product, &b.security_group_id, instance_ids)
                .await
                .map_err(|e| retry_error(e, &[]))
        })
        .await
    }

    async fn import(&self, d: &mut ResourceData) -> Result<()> {
        let binding = Binding::from_id(d.require_id()?)?;
        d.set_state(&binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockCloud;
    use serde_json::{Value, json};
    use tcform_cloud::{Attributes, CloudError, Instance, Reconciler};

    fn attrs(value: Value) -> Attributes {
        serde_json::from_value(value).unwrap()
    }

    fn config() -> Value {
        json!({
            "instance_id": "tdsql-4pzs5b67",
            "security_group_id": "sg-7kpsbxdb",
            "product": "mariadb"
        })
    }

    #[tokio::test]
    async fn test_create_uses_composite_id() {
        let cloud = MockCloud::new();
        let resource = MariadbSecurityGroupsResource::new(cloud.context());
        let mut instance = Instance::new(
            "tencentcloud_mariadb_security_groups.sg",
            ResourceData::new(TYPE_NAME).with_config(attrs(config())),
        );
        Reconciler::new(&resource).create(&mut instance).await.unwrap();

        assert_eq!(instance.data.id(), Some("tdsql-4pzs5b67#sg-7kpsbxdb#mariadb"));
        assert_eq!(instance.data.state()["product"], json!("mariadb"));
        assert!(cloud.is_bound("mariadb", "tdsql-4pzs5b67", "sg-7kpsbxdb"));
    }

    #[tokio::test]
    async fn test_update_any_field_rejected() {
        let cloud = MockCloud::new();
        let resource = MariadbSecurityGroupsResource::new(cloud.context());
        let reconciler = Reconciler::new(&resource);
        let mut instance = Instance::new(
            "tencentcloud_mariadb_security_groups.sg",
            ResourceData::new(TYPE_NAME).with_config(attrs(config())),
        );
        reconciler.create(&mut instance).await.unwrap();
        cloud.clear_calls();

        let mut changed = config();
        changed["security_group_id"] = json!("sg-other");
        instance.data.set_config(attrs(changed));
        let result = reconciler.update(&mut instance).await;

        assert!(matches!(result, Err(CloudError::ImmutableAttribute { .. })));
        assert!(cloud.calls().is_empty());
    }

    #[tokio::test]
    async fn test_import_and_delete() {
        let cloud = MockCloud::new();
        let resource = MariadbSecurityGroupsResource::new(cloud.context());
        let reconciler = Reconciler::new(&resource);

        let missing = reconciler
            .import("tencentcloud_mariadb_security_groups.sg", "tdsql-1#sg-1#mariadb")
            .await;
        assert!(matches!(missing, Err(CloudError::ResourceNotFound(_))));

        let bad = reconciler
            .import("tencentcloud_mariadb_security_groups.sg", "tdsql-1#sg-1")
            .await;
        assert!(matches!(bad, Err(CloudError::InvalidId { .. })));

        let mut instance = Instance::new(
            "tencentcloud_mariadb_security_groups.sg",
            ResourceData::new(TYPE_NAME).with_config(attrs(config())),
        );
        reconciler.create(&mut instance).await.unwrap();
        let mut imported = reconciler
            .import(
                "tencentcloud_mariadb_security_groups.sg",
                "tdsql-4pzs5b67#sg-7kpsbxdb#mariadb",
            )
            .await
            .unwrap();
        assert_eq!(imported.data.state()["instance_id"], json!("tdsql-4pzs5b67"));

        reconciler.delete(&mut imported).await.unwrap();
        assert!(!cloud.is_bound("mariadb", "tdsql-4pzs5b67", "sg-7kpsbxdb"));

        reconciler.delete(&mut imported).await.unwrap();
        assert_eq!(cloud.count("DisassociateSecurityGroups"), 1);
    }
}

//! Generic create/read/update/delete driver
//!
//! A resource type implements [`ResourceHandler`] with the vendor calls it
//! needs. [`Reconciler`] wraps a handler and owns everything that is the same
//! for every type: validation and defaults, the lifecycle status, rejection of
//! immutable changes before any call is made, the read after each mutation and
//! idempotent deletion.

use crate::attribute::is_empty_value;
use crate::error::{CloudError, Result};
use crate::id::split_id;
use crate::resource::ResourceData;
use crate::schema::ResourceSchema;
use crate::state::ResourceStatus;
use async_trait::async_trait;
use std::time::Instant;

/// Vendor-side operations of one resource type
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    fn schema(&self) -> ResourceSchema;

    /// Issue the create call and record the assigned id with [`ResourceData::set_id`]
    async fn create(&self, d: &mut ResourceData) -> Result<()>;

    /// Refresh state from the remote object, clearing the id when it is gone
    async fn read(&self, d: &mut ResourceData) -> Result<()>;

    async fn update(&self, d: &mut ResourceData) -> Result<()>;

    async fn delete(&self, d: &mut ResourceData) -> Result<()>;

    /// Seed state from an import id before the first read
    async fn import(&self, _d: &mut ResourceData) -> Result<()> {
        Ok(())
    }
}

/// One managed instance as seen by the reconciler
#[derive(Debug, Clone)]
pub struct Instance {
    /// `type.name` address used in logs and errors
    pub address: String,
    pub data: ResourceData,
    pub status: ResourceStatus,
}

impl Instance {
    pub fn new(address: impl Into<String>, data: ResourceData) -> Self {
        let status = if data.id().is_some() {
            ResourceStatus::Available
        } else {
            ResourceStatus::Absent
        };
        Self {
            address: address.into(),
            data,
            status,
        }
    }

    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = status;
        self
    }

    fn transition(&mut self, next: ResourceStatus) -> Result<()> {
        self.status.transition(next, &self.address)
    }

    fn mark_failed(&mut self) {
        if self.status.can_transition_to(ResourceStatus::Failed) {
            self.status = ResourceStatus::Failed;
        }
    }

    fn mark_absent(&mut self) {
        self.data.clear_id();
        self.status = ResourceStatus::Absent;
    }
}

pub struct Reconciler<'a> {
    handler: &'a dyn ResourceHandler,
    schema: ResourceSchema,
}

impl<'a> Reconciler<'a> {
    pub fn new(handler: &'a dyn ResourceHandler) -> Self {
        Self {
            schema: handler.schema(),
            handler,
        }
    }

    pub fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    fn prepare_config(&self, instance: &mut Instance) -> Result<()> {
        self.schema.validate(instance.data.config())?;
        let normalized = self.schema.normalize(instance.data.config());
        instance.data.set_config(normalized);
        Ok(())
    }

    /// Create the instance, then read it back
    ///
    /// When the vendor assigned an id before a later step failed the
    /// instance keeps that id and ends up `failed`.
    pub async fn create(&self, instance: &mut Instance) -> Result<()> {
        self.prepare_config(instance)?;
        let start = Instant::now();
        instance.transition(ResourceStatus::Creating)?;
        tracing::info!("Creating {}", instance.address);

        if let Err(e) = self.handler.create(&mut instance.data).await {
            if instance.data.id().is_some() {
                instance.mark_failed();
            } else {
                instance.status = ResourceStatus::Absent;
            }
            return Err(e);
        }

        instance.data.commit_config();
        if let Err(e) = self.read_after_mutation(instance).await {
            instance.mark_failed();
            return Err(e);
        }

        instance.transition(ResourceStatus::Available)?;
        tracing::info!(
            "Created {} [id={}] in {:.1}s",
            instance.address,
            instance.data.id().unwrap_or_default(),
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Refresh from the remote side; a vanished object is not an error
    pub async fn read(&self, instance: &mut Instance) -> Result<()> {
        if instance.data.id().is_none() {
            return Ok(());
        }

        self.handler.read(&mut instance.data).await?;
        if instance.data.id().is_none() {
            tracing::warn!(
                "{} no longer exists remotely, removing it from state",
                instance.address
            );
            instance.mark_absent();
        }
        Ok(())
    }

    /// Apply configuration changes in place
    ///
    /// A change to an immutable or force-new attribute fails before any call.
    pub async fn update(&self, instance: &mut Instance) -> Result<()> {
        self.prepare_config(instance)?;

        let changed = instance.data.changed_keys();
        for key in &changed {
            if self.schema.get(key).is_some_and(|a| a.rejects_update()) {
                return Err(CloudError::ImmutableAttribute {
                    resource_type: self.schema.type_name.clone(),
                    attribute: key.clone(),
                });
            }
        }

        if changed.is_empty() && instance.status == ResourceStatus::Available {
            tracing::debug!("{} has no changes", instance.address);
            return Ok(());
        }

        let start = Instant::now();
        instance.transition(ResourceStatus::Updating)?;
        tracing::info!("Updating {} ({})", instance.address, changed.join(", "));

        let result = match self.handler.update(&mut instance.data).await {
            Ok(()) => {
                instance.data.commit_config();
                self.read_after_mutation(instance).await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            instance.mark_failed();
            return Err(e);
        }

        instance.transition(ResourceStatus::Available)?;
        tracing::info!(
            "Updated {} in {:.1}s",
            instance.address,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Delete the instance; already gone counts as success
    pub async fn delete(&self, instance: &mut Instance) -> Result<()> {
        if instance.data.id().is_none() {
            instance.status = ResourceStatus::Absent;
            return Ok(());
        }

        self.read(instance).await?;
        if instance.data.id().is_none() {
            return Ok(());
        }

        let start = Instant::now();
        instance.transition(ResourceStatus::Deleting)?;
        tracing::info!("Deleting {}", instance.address);

        match self.handler.delete(&mut instance.data).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                tracing::debug!("{} was already deleted", instance.address);
            }
            Err(e) => {
                instance.mark_failed();
                return Err(e);
            }
        }

        instance.mark_absent();
        tracing::info!(
            "Deleted {} in {:.1}s",
            instance.address,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Adopt an existing remote object
    pub async fn import(&self, address: &str, id: &str) -> Result<Instance> {
        split_id(id, self.schema.id_parts)?;

        let mut data = ResourceData::new(self.schema.type_name.clone());
        data.set_id(id);
        self.handler.import(&mut data).await?;
        self.handler.read(&mut data).await?;

        if data.id().is_none() {
            return Err(CloudError::ResourceNotFound(format!(
                "{} `{}` does not exist",
                self.schema.type_name, id
            )));
        }

        self.seed_defaults(&mut data);
        tracing::info!("Imported {} [id={}]", address, id);
        Ok(Instance::new(address, data))
    }

    /// Record the default of every attribute the remote side did not report
    fn seed_defaults(&self, data: &mut ResourceData) {
        for attribute in &self.schema.attributes {
            let Some(default) = &attribute.default else {
                continue;
            };
            if data.state().get(&attribute.name).is_none_or(is_empty_value) {
                data.set(attribute.name.clone(), default.clone());
            }
        }
    }

    async fn read_after_mutation(&self, instance: &mut Instance) -> Result<()> {
        let id = instance.data.require_id()?.to_string();
        self.handler.read(&mut instance.data).await?;
        if instance.data.id().is_none() {
            instance.data.set_id(id.clone());
            return Err(CloudError::ResourceNotFound(format!(
                "{} [id={}] disappeared right after being written",
                instance.address, id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeGateway, GATEWAY, attrs};
    use serde_json::json;

    fn new_instance(config: serde_json::Value) -> Instance {
        Instance::new(
            "test_gateway.main",
            ResourceData::new(GATEWAY).with_config(attrs(config)),
        )
    }

    async fn created(handler: &FakeGateway) -> Instance {
        let reconciler = Reconciler::new(handler);
        let mut instance = new_instance(json!({"zone": "ap-guangzhou-3", "max_connection": 10}));
        reconciler.create(&mut instance).await.unwrap();
        instance
    }

    #[tokio::test]
    async fn test_create_populates_state() {
        let handler = FakeGateway::default();
        let instance = created(&handler).await;

        assert_eq!(instance.status, ResourceStatus::Available);
        let state = instance.data.state();
        assert_eq!(state["zone"], json!("ap-guangzhou-3"));
        assert_eq!(state["bandwidth"], json!(5));
        assert_eq!(state["state"], json!("AVAILABLE"));
        assert_eq!(state["name"], json!(instance.data.id().unwrap()));
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let handler = FakeGateway::default();
        let reconciler = Reconciler::new(&handler);
        let mut instance = new_instance(json!({"name": "gw"}));

        let err = reconciler.create(&mut instance).await.unwrap_err();
        assert!(matches!(err, CloudError::MissingRequired { .. }));
        assert_eq!(handler.calls(), 0);
        assert_eq!(instance.status, ResourceStatus::Absent);
    }

    #[tokio::test]
    async fn test_partial_create_is_failed() {
        let handler = FakeGateway::default();
        *handler.fail_after_create.lock().unwrap() = true;
        let reconciler = Reconciler::new(&handler);
        let mut instance = new_instance(json!({"zone": "ap-guangzhou-3"}));

        assert!(reconciler.create(&mut instance).await.is_err());
        assert_eq!(instance.status, ResourceStatus::Failed);
        assert!(instance.data.id().is_some());
    }

    #[tokio::test]
    async fn test_read_missing_clears_id() {
        let handler = FakeGateway::default();
        let mut instance = created(&handler).await;
        handler.remove_remote(instance.data.id().unwrap());

        Reconciler::new(&handler).read(&mut instance).await.unwrap();
        assert!(instance.data.id().is_none());
        assert_eq!(instance.status, ResourceStatus::Absent);
    }

    #[tokio::test]
    async fn test_update_immutable_makes_no_call() {
        let handler = FakeGateway::default();
        let mut instance = created(&handler).await;
        let calls = handler.calls();

        instance
            .data
            .set_config(attrs(json!({"zone": "ap-guangzhou-3", "max_connection": 20})));
        let err = Reconciler::new(&handler).update(&mut instance).await.unwrap_err();

        assert!(matches!(err, CloudError::ImmutableAttribute { attribute, .. } if attribute == "max_connection"));
        assert_eq!(handler.calls(), calls);
        assert_eq!(instance.status, ResourceStatus::Available);
    }

    #[tokio::test]
    async fn test_update_applies_change() {
        let handler = FakeGateway::default();
        let mut instance = created(&handler).await;

        instance.data.set_config(attrs(json!({
            "zone": "ap-guangzhou-3",
            "max_connection": 10,
            "name": "edge",
            "tags": {"env": "prod"}
        })));
        Reconciler::new(&handler).update(&mut instance).await.unwrap();

        assert_eq!(instance.status, ResourceStatus::Available);
        assert_eq!(instance.data.state()["name"], json!("edge"));
        assert_eq!(instance.data.state()["tags"], json!({"env": "prod"}));
    }

    #[tokio::test]
    async fn test_noop_update_round_trip() {
        let handler = FakeGateway::default();
        let mut instance = created(&handler).await;
        let reconciler = Reconciler::new(&handler);

        reconciler.read(&mut instance).await.unwrap();
        let before = instance.data.state().clone();

        let calls = handler.calls();
        reconciler.update(&mut instance).await.unwrap();
        assert_eq!(handler.calls(), calls);

        reconciler.read(&mut instance).await.unwrap();
        assert_eq!(instance.data.state(), &before);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let handler = FakeGateway::default();
        let mut instance = created(&handler).await;
        let reconciler = Reconciler::new(&handler);

        reconciler.delete(&mut instance).await.unwrap();
        assert_eq!(instance.status, ResourceStatus::Absent);
        assert!(instance.data.id().is_none());

        reconciler.delete(&mut instance).await.unwrap();

        let mut stale = created(&handler).await;
        handler.remove_remote(stale.data.id().unwrap());
        reconciler.delete(&mut stale).await.unwrap();
        assert_eq!(stale.status, ResourceStatus::Absent);
    }

    #[tokio::test]
    async fn test_import_existing_and_missing() {
        let handler = FakeGateway::default();
        let instance = created(&handler).await;
        let reconciler = Reconciler::new(&handler);

        let id = instance.data.id().unwrap();
        let imported = reconciler.import("test_gateway.adopted", id).await.unwrap();
        assert_eq!(imported.status, ResourceStatus::Available);
        assert_eq!(imported.data.state()["zone"], json!("ap-guangzhou-3"));

        let err = reconciler.import("test_gateway.ghost", "gw-404").await.unwrap_err();
        assert!(err.is_not_found());

        let err = reconciler.import("test_gateway.bad", "gw-1#extra").await.unwrap_err();
        assert!(matches!(err, CloudError::InvalidId { .. }));
    }

    #[tokio::test]
    async fn test_import_seeds_unreported_defaults() {
        let handler = FakeGateway::default();
        handler.objects.lock().unwrap().insert(
            "gw-legacy".to_string(),
            attrs(json!({"zone": "ap-guangzhou-3", "name": "legacy", "state": "AVAILABLE"})),
        );
        let reconciler = Reconciler::new(&handler);

        let mut imported = reconciler.import("test_gateway.legacy", "gw-legacy").await.unwrap();
        assert_eq!(imported.data.state()["bandwidth"], json!(5));
        assert_eq!(imported.data.state()["name"], json!("legacy"));

        let calls = handler.calls();
        imported
            .data
            .set_config(attrs(json!({"zone": "ap-guangzhou-3"})));
        reconciler.update(&mut imported).await.unwrap();
        assert_eq!(handler.calls(), calls);
    }
}

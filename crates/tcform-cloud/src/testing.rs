//! In-memory provider used by the core's own tests

use crate::attribute::{AttributeType, Attributes};
use crate::data_source::{DataResult, DataSourceHandler};
use crate::error::{CloudError, Result};
use crate::provider::{AuthStatus, CloudProvider};
use crate::reconciler::ResourceHandler;
use crate::resource::ResourceData;
use crate::schema::{AttributeSchema, ResourceSchema};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

pub const GATEWAY: &str = "test_gateway";

/// Gateway-like resource backed by a map
#[derive(Default)]
pub struct FakeGateway {
    pub objects: Mutex<HashMap<String, Attributes>>,
    pub api_calls: AtomicU32,
    next_id: AtomicU32,
    /// Create the object but fail afterwards, like a failed tag call
    pub fail_after_create: Mutex<bool>,
}

impl FakeGateway {
    pub fn calls(&self) -> u32 {
        self.api_calls.load(Ordering::SeqCst)
    }

    pub fn remove_remote(&self, id: &str) {
        self.objects.lock().unwrap().remove(id);
    }

    fn call(&self) {
        self.api_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceHandler for FakeGateway {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new(GATEWAY)
            .attribute(AttributeSchema::required("zone", AttributeType::String).force_new())
            .attribute(AttributeSchema::optional("name", AttributeType::String).with_computed())
            .attribute(AttributeSchema::optional("bandwidth", AttributeType::Int).with_default(5))
            .attribute(AttributeSchema::optional("max_connection", AttributeType::Int).immutable())
            .attribute(AttributeSchema::optional("tags", AttributeType::Map))
            .attribute(AttributeSchema::computed("state", AttributeType::String))
    }

    async fn create(&self, d: &mut ResourceData) -> Result<()> {
        self.call();
        let id = format!("gw-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut object = d.config().clone();
        object.entry("name".to_string()).or_insert_with(|| json!(id.clone()));
        object.insert("state".to_string(), json!("AVAILABLE"));
        self.objects.lock().unwrap().insert(id.clone(), object);
        d.set_id(id);

        if *self.fail_after_create.lock().unwrap() {
            return Err(CloudError::Api {
                action: "ModifyResourceTags".to_string(),
                code: "InvalidParameter".to_string(),
                message: "bad tag".to_string(),
                request_id: None,
            });
        }
        Ok(())
    }

    async fn read(&self, d: &mut ResourceData) -> Result<()> {
        self.call();
        let id = d.require_id()?.to_string();
        let object = self.objects.lock().unwrap().get(&id).cloned();
        match object {
            Some(object) => {
                for (key, value) in object {
                    d.set(key, value);
                }
            }
            None => d.clear_id(),
        }
        Ok(())
    }

    async fn update(&self, d: &mut ResourceData) -> Result<()> {
        self.call();
        let id = d.require_id()?.to_string();
        let changed = d.changed_keys();
        let mut objects = self.objects.lock().unwrap();
        let object = objects
            .get_mut(&id)
            .ok_or_else(|| CloudError::ResourceNotFound(id.clone()))?;
        for key in changed {
            object.insert(key.clone(), d.config()[&key].clone());
        }
        Ok(())
    }

    async fn delete(&self, d: &mut ResourceData) -> Result<()> {
        self.call();
        let id = d.require_id()?.to_string();
        match self.objects.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(CloudError::ResourceNotFound(id)),
        }
    }
}

/// Data source echoing its filter
pub struct FakeLookup;

#[async_trait]
impl DataSourceHandler for FakeLookup {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema::new("test_lookup")
            .attribute(AttributeSchema::optional("name", AttributeType::String))
            .attribute(AttributeSchema::optional("result_output_file", AttributeType::String))
            .attribute(AttributeSchema::computed("items", AttributeType::List))
    }

    async fn read(&self, args: &Attributes) -> Result<DataResult> {
        let name = args.get("name").and_then(Value::as_str).unwrap_or("all");
        let items = json!([{ "id": "x-1", "name": name }]);
        Ok(DataResult::new(vec!["x-1".to_string()], "items", items))
    }
}

pub struct FakeProvider {
    pub gateway: Arc<FakeGateway>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            gateway: Arc::new(FakeGateway::default()),
        }
    }
}

#[async_trait]
impl CloudProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn display_name(&self) -> &str {
        "Fake Cloud"
    }

    async fn check_auth(&self) -> Result<AuthStatus> {
        Ok(AuthStatus::ok("tester"))
    }

    fn resource_types(&self) -> Vec<&'static str> {
        vec![GATEWAY]
    }

    fn resource(&self, resource_type: &str) -> Option<Arc<dyn ResourceHandler>> {
        (resource_type == GATEWAY).then(|| self.gateway.clone() as Arc<dyn ResourceHandler>)
    }

    fn data_source_types(&self) -> Vec<&'static str> {
        vec!["test_lookup"]
    }

    fn data_source(&self, name: &str) -> Option<Arc<dyn DataSourceHandler>> {
        (name == "test_lookup").then(|| Arc::new(FakeLookup) as Arc<dyn DataSourceHandler>)
    }
}

pub fn attrs(value: Value) -> Attributes {
    serde_json::from_value(value).unwrap()
}

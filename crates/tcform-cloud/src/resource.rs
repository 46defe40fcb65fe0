//! Per-instance resource data
//!
//! [`ResourceData`] holds the desired configuration of one resource instance
//! next to the last state observed from the remote side. Resource
//! implementations decode the configuration into their own typed structs and
//! write what they read back through [`ResourceData::set`] or
//! [`ResourceData::set_state`].

use crate::attribute::{Attributes, is_empty_value, values_equivalent};
use crate::error::{CloudError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    resource_type: String,
    id: Option<String>,
    config: Attributes,
    state: Attributes,
}

impl ResourceData {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            ..Default::default()
        }
    }

    /// Seed from a previously stored instance
    pub fn from_state(
        resource_type: impl Into<String>,
        id: impl Into<String>,
        state: Attributes,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: Some(id.into()),
            config: Attributes::new(),
            state,
        }
    }

    pub fn with_config(mut self, config: Attributes) -> Self {
        self.config = config;
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Identifier, failing when the instance has none
    pub fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .ok_or_else(|| CloudError::ResourceNotFound(format!("{} has no id", self.resource_type)))
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Forget the identifier; tells the engine the instance is gone
    pub fn clear_id(&mut self) {
        self.id = None;
    }

    pub fn config(&self) -> &Attributes {
        &self.config
    }

    pub fn state(&self) -> &Attributes {
        &self.state
    }

    pub fn set_config(&mut self, config: Attributes) {
        self.config = config;
    }

    /// Desired value when configured, otherwise the last known value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config
            .get(key)
            .filter(|v| !v.is_null())
            .or_else(|| self.state.get(key))
            .filter(|v| !v.is_null())
    }

    /// Non-empty string value
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Whether the desired value differs from the last known one
    ///
    /// Attributes left out of the configuration never count as changed.
    pub fn has_change(&self, key: &str) -> bool {
        match self.config.get(key) {
            Some(desired) => !values_equivalent(Some(desired), self.state.get(key)),
            None => false,
        }
    }

    /// `(old, new)` pair for an attribute
    pub fn get_change(&self, key: &str) -> (Value, Value) {
        let old = self.state.get(key).cloned().unwrap_or(Value::Null);
        let new = self.config.get(key).cloned().unwrap_or_else(|| old.clone());
        (old, new)
    }

    /// Names of all configured attributes that differ from the known state
    pub fn changed_keys(&self) -> Vec<String> {
        self.config
            .keys()
            .filter(|k| self.has_change(k))
            .cloned()
            .collect()
    }

    /// Record a value observed on the remote side
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.state.insert(key.into(), value.into());
    }

    /// Record every non-null field of a serialisable struct
    pub fn set_state<T: Serialize>(&mut self, value: &T) -> Result<()> {
        match serde_json::to_value(value)? {
            Value::Object(map) => {
                for (key, value) in map.into_iter().filter(|(_, v)| !v.is_null()) {
                    self.state.insert(key, value);
                }
                Ok(())
            }
            other => Err(CloudError::InvalidConfig(format!(
                "expected an object for {} state, got {}",
                self.resource_type, other
            ))),
        }
    }

    /// Typed view of the instance: known state overlaid with desired configuration
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        let mut merged = serde_json::Map::new();
        for (key, value) in self.state.iter().chain(self.config.iter()) {
            if !value.is_null() {
                merged.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(Value::Object(merged)).map_err(|e| {
            CloudError::InvalidConfig(format!("{}: {}", self.resource_type, e))
        })
    }

    /// Take the configuration over into state after a successful mutation
    ///
    /// Attributes the remote side never reports keep their configured value.
    pub fn commit_config(&mut self) {
        for (key, value) in &self.config {
            if is_empty_value(value) {
                self.state.remove(key);
            } else {
                self.state.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Convert a JSON object into a string map, dropping non-string values
pub fn value_to_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

//! Resource and data source schemas

use crate::attribute::{AttributeType, Attributes};
use crate::error::{CloudError, Result};
use serde::Serialize;
use serde_json::Value;

/// One attribute of a resource schema
#[derive(Debug, Clone, Serialize)]
pub struct AttributeSchema {
    pub name: String,
    pub attr_type: AttributeType,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    /// A change is planned as delete + create
    pub force_new: bool,
    /// A change is rejected by update
    pub immutable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub description: String,
}

impl AttributeSchema {
    fn new(name: &str, attr_type: AttributeType) -> Self {
        Self {
            name: name.to_string(),
            attr_type,
            required: false,
            optional: false,
            computed: false,
            force_new: false,
            immutable: false,
            default: None,
            description: String::new(),
        }
    }

    pub fn required(name: &str, attr_type: AttributeType) -> Self {
        Self {
            required: true,
            ..Self::new(name, attr_type)
        }
    }

    pub fn optional(name: &str, attr_type: AttributeType) -> Self {
        Self {
            optional: true,
            ..Self::new(name, attr_type)
        }
    }

    pub fn computed(name: &str, attr_type: AttributeType) -> Self {
        Self {
            computed: true,
            ..Self::new(name, attr_type)
        }
    }

    /// Optional, filled from remote state when left out
    pub fn with_computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn immutable(mut self) -> Self {
        self.immutable = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Can only be reported by the remote side
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    /// A change to this attribute cannot go through update
    pub fn rejects_update(&self) -> bool {
        self.force_new || self.immutable
    }
}

/// Schema of a resource type or data source
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    pub type_name: String,
    pub description: String,
    pub attributes: Vec<AttributeSchema>,
    /// Number of `#`-separated parts in the import id
    pub id_parts: usize,
}

impl ResourceSchema {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            description: String::new(),
            attributes: Vec::new(),
            id_parts: 1,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn attribute(mut self, attribute: AttributeSchema) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_id_parts(mut self, parts: usize) -> Self {
        self.id_parts = parts;
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check a desired configuration against the schema
    ///
    /// Unknown attributes, read-only attributes set by the user, missing
    /// required attributes and type mismatches are all rejected.
    pub fn validate(&self, config: &Attributes) -> Result<()> {
        for (name, value) in config {
            let attribute = self.get(name).ok_or_else(|| {
                CloudError::InvalidConfig(format!(
                    "{} has no attribute `{}`",
                    self.type_name, name
                ))
            })?;

            if attribute.is_read_only() && !value.is_null() {
                return Err(CloudError::InvalidConfig(format!(
                    "attribute `{}` of {} is computed and cannot be set",
                    name, self.type_name
                )));
            }

            if !attribute.attr_type.accepts(value) {
                return Err(CloudError::InvalidAttribute {
                    resource_type: self.type_name.clone(),
                    attribute: name.clone(),
                    expected: attribute.attr_type.to_string(),
                });
            }
        }

        for attribute in self.attributes.iter().filter(|a| a.required) {
            match config.get(&attribute.name) {
                Some(value) if !value.is_null() => {}
                _ => {
                    return Err(CloudError::MissingRequired {
                        resource_type: self.type_name.clone(),
                        attribute: attribute.name.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Fill defaults and clear optional attributes left out of the configuration
    ///
    /// Optional+computed attributes stay absent so the remote value is kept.
    pub fn normalize(&self, config: &Attributes) -> Attributes {
        let mut normalized = config.clone();
        for attribute in &self.attributes {
            if normalized.contains_key(&attribute.name) || attribute.is_read_only() {
                continue;
            }
            if let Some(default) = &attribute.default {
                normalized.insert(attribute.name.clone(), default.clone());
            } else if attribute.optional && !attribute.computed {
                normalized.insert(attribute.name.clone(), attribute.attr_type.zero_value());
            }
        }
        normalized
    }
}

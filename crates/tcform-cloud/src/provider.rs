//! Cloud provider trait definition

use crate::attribute::Attributes;
use crate::data_source::DataSourceHandler;
use crate::error::{CloudError, Result};
use crate::reconciler::ResourceHandler;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cloud provider abstraction trait
///
/// A provider exposes one [`ResourceHandler`] per resource type and one
/// [`DataSourceHandler`] per data source; the engine drives them.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Returns the provider name (e.g., "tencentcloud")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// Check if the provider is properly configured and authenticated
    async fn check_auth(&self) -> Result<AuthStatus>;

    fn resource_types(&self) -> Vec<&'static str>;

    fn resource(&self, resource_type: &str) -> Option<Arc<dyn ResourceHandler>>;

    fn data_source_types(&self) -> Vec<&'static str>;

    fn data_source(&self, name: &str) -> Option<Arc<dyn DataSourceHandler>>;

    fn require_resource(&self, resource_type: &str) -> Result<Arc<dyn ResourceHandler>> {
        self.resource(resource_type)
            .ok_or_else(|| CloudError::UnsupportedResourceType(resource_type.to_string()))
    }

    fn require_data_source(&self, name: &str) -> Result<Arc<dyn DataSourceHandler>> {
        self.data_source(name)
            .ok_or_else(|| CloudError::UnsupportedResourceType(name.to_string()))
    }
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Account/user information if available
    pub account_info: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

/// Desired set of resources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceSet {
    /// Resources indexed by `type.name`
    pub resources: BTreeMap<String, ResourceConfig>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, resource: ResourceConfig) {
        self.resources.insert(resource.address(), resource);
    }

    pub fn get(&self, resource_type: &str, name: &str) -> Option<&ResourceConfig> {
        self.resources.get(&format!("{}.{}", resource_type, name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceConfig> {
        self.resources.values()
    }

    pub fn by_type(&self, resource_type: &str) -> Vec<&ResourceConfig> {
        self.resources
            .values()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Desired configuration of one resource instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource type (e.g., "tencentcloud_eip")
    pub resource_type: String,

    /// Local name of the instance
    pub name: String,

    /// Provider name
    pub provider: String,

    /// Configured attributes
    pub attributes: Attributes,
}

impl ResourceConfig {
    pub fn new(
        resource_type: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
        attributes: Attributes,
    ) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            provider: provider.into(),
            attributes,
        }
    }

    /// Get the address (type.name)
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }
}

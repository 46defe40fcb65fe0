//! Read-only data sources

use crate::attribute::Attributes;
use crate::error::Result;
use crate::id::data_resource_ids_hash;
use crate::schema::ResourceSchema;
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Argument naming the file a data source result is written to
pub const RESULT_OUTPUT_FILE: &str = "result_output_file";

#[async_trait]
pub trait DataSourceHandler: Send + Sync {
    fn schema(&self) -> ResourceSchema;

    async fn read(&self, args: &Attributes) -> Result<DataResult>;
}

/// Outcome of a data source read
#[derive(Debug, Clone)]
pub struct DataResult {
    /// Hash of the ids found
    pub id: String,
    /// Arguments echoed back plus the computed list
    pub attributes: Attributes,
    /// Name of the computed list attribute
    pub list_key: String,
}

impl DataResult {
    pub fn new(ids: Vec<String>, list_key: &str, list: Value) -> Self {
        let mut attributes = Attributes::new();
        attributes.insert(list_key.to_string(), list);
        Self {
            id: data_resource_ids_hash(&ids),
            attributes,
            list_key: list_key.to_string(),
        }
    }

    pub fn list(&self) -> &Value {
        self.attributes.get(&self.list_key).unwrap_or(&Value::Null)
    }
}

/// Validate arguments, read, and write the list to `result_output_file` if set
pub async fn read_data_source(
    handler: &dyn DataSourceHandler,
    args: &Attributes,
) -> Result<DataResult> {
    let schema = handler.schema();
    schema.validate(args)?;

    let mut result = handler.read(args).await?;
    for (key, value) in args {
        result.attributes.entry(key.clone()).or_insert_with(|| value.clone());
    }

    if let Some(path) = args
        .get(RESULT_OUTPUT_FILE)
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
    {
        write_to_file(Path::new(path), result.list()).await?;
        tracing::debug!("Wrote {} result to {}", schema.type_name, path);
    }

    Ok(result)
}

/// Pretty-printed JSON dump of a data source result
pub async fn write_to_file(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

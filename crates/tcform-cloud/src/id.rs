//! Composite resource identifiers

use crate::error::{CloudError, Result};
use sha2::{Digest, Sha256};

/// Separator between the parts of a composite id
pub const ID_SEPARATOR: &str = "#";

pub fn join_id(parts: &[&str]) -> String {
    parts.join(ID_SEPARATOR)
}

/// Split a composite id, requiring exactly `expected` non-empty parts
pub fn split_id(id: &str, expected: usize) -> Result<Vec<String>> {
    let parts: Vec<String> = id.split(ID_SEPARATOR).map(str::to_string).collect();
    if parts.len() != expected || parts.iter().any(|p| p.is_empty()) {
        return Err(CloudError::InvalidId {
            id: id.to_string(),
            expected,
        });
    }
    Ok(parts)
}

/// Stable id for a data source result derived from the ids it returned
pub fn data_resource_ids_hash(ids: &[String]) -> String {
    let digest = Sha256::digest(ids.join("-").as_bytes());
    hex::encode(&digest[..8])
}

//! Tag side-channel helpers

use std::collections::BTreeMap;

pub type Tags = BTreeMap<String, String>;

/// Split a tag change into tags to write and keys to remove
pub fn diff_tags(old: &Tags, new: &Tags) -> (Tags, Vec<String>) {
    let replace = new
        .iter()
        .filter(|(k, v)| old.get(*k) != Some(*v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let delete = old
        .keys()
        .filter(|k| !new.contains_key(*k))
        .cloned()
        .collect();
    (replace, delete)
}

/// Six-segment resource name used by the tag service
///
/// e.g. `qcs::vpc:ap-guangzhou:uin/:eip/eip-nyvf60va`
pub fn build_tag_resource_name(
    service_type: &str,
    resource_type: &str,
    region: &str,
    id: &str,
) -> String {
    format!("qcs::{service_type}:{region}:uin/:{resource_type}/{id}")
}

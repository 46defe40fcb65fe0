//! `tcform.yaml` のリソース定義
//!
//! ```yaml
//! provider:
//!   region: ap-guangzhou
//! resources:
//!   tencentcloud_eip:
//!     web:
//!       name: web-eip
//!       tags:
//!         env: dev
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tcform_cloud::{Attributes, ResourceConfig, ResourceSet};
use tcform_cloud_tencent::PROVIDER_NAME;
use tcform_config::PROJECT_FILE;

/// プロジェクトルートを直接指定する環境変数
pub const PROJECT_ROOT_ENV: &str = "TCFORM_PROJECT_ROOT";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    resources: BTreeMap<String, BTreeMap<String, Option<Attributes>>>,
}

/// tcform.yaml のあるディレクトリをカレントディレクトリから上に向かって探す
pub fn find_project_root() -> anyhow::Result<PathBuf> {
    if let Ok(root) = std::env::var(PROJECT_ROOT_ENV) {
        let path = PathBuf::from(&root);
        if path.join(PROJECT_FILE).exists() {
            tracing::debug!(project_root = %path.display(), "Found project root from environment variable");
            return Ok(path);
        }
    }

    let start_dir = std::env::current_dir()?;
    let mut current = start_dir.as_path();
    loop {
        if current.join(PROJECT_FILE).exists() {
            tracing::debug!(project_root = %current.display(), "Found project root");
            return Ok(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => anyhow::bail!(
                "{} が見つかりません ({} から上位ディレクトリを検索しました)",
                PROJECT_FILE,
                start_dir.display()
            ),
        }
    }
}

/// YAML 文字列から desired state を組み立てる
pub fn parse_manifest(content: &str) -> anyhow::Result<ResourceSet> {
    let manifest: Manifest = if content.trim().is_empty() {
        Manifest::default()
    } else {
        serde_yaml::from_str(content)?
    };

    let mut set = ResourceSet::new();
    for (resource_type, instances) in manifest.resources {
        for (name, attributes) in instances {
            if name.is_empty() || name.contains(':') || name.contains('.') {
                anyhow::bail!("リソース名が不正です: {}.{}", resource_type, name);
            }
            set.add(ResourceConfig::new(
                resource_type.as_str(),
                name,
                PROVIDER_NAME,
                attributes.unwrap_or_default(),
            ));
        }
    }
    Ok(set)
}

/// プロジェクトルートの tcform.yaml を読み込む
pub fn load_manifest(project_root: &Path) -> anyhow::Result<ResourceSet> {
    let path = project_root.join(PROJECT_FILE);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("{} を読み込めません", path.display()))?;
    parse_manifest(&content).with_context(|| format!("{} の解析に失敗しました", path.display()))
}

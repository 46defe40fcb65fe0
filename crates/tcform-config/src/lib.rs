pub mod error;

pub use error::*;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 設定ファイルを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "TCFORM_CONFIG_PATH";

pub const SECRET_ID_ENV: &str = "TENCENTCLOUD_SECRET_ID";
pub const SECRET_KEY_ENV: &str = "TENCENTCLOUD_SECRET_KEY";
pub const SECURITY_TOKEN_ENV: &str = "TENCENTCLOUD_SECURITY_TOKEN";
pub const REGION_ENV: &str = "TENCENTCLOUD_REGION";

pub const DEFAULT_REGION: &str = "ap-guangzhou";

/// プロジェクトファイル名 (リソース定義と provider セクション)
pub const PROJECT_FILE: &str = "tcform.yaml";

const LOCAL_FILE: &str = "tcform.local.yaml";
const PROJECT_DIR: &str = ".tcform";
const CONFIG_FILE: &str = "config.yaml";

/// Tencent Cloud プロバイダー設定
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub secret_id: Option<String>,
    pub secret_key: Option<String>,
    pub security_token: Option<String>,
    pub region: Option<String>,
    /// API エンドポイントの上書き (プライベートネットワーク・テスト用)
    pub endpoint: Option<String>,
    /// アクションごとの 1 秒あたりの最大リクエスト数
    pub rate_limit: Option<u32>,
    /// apply 時に同時に処理するリソース数
    pub parallelism: Option<usize>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("secret_id", &self.secret_id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "***"))
            .field("security_token", &self.security_token.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("rate_limit", &self.rate_limit)
            .field("parallelism", &self.parallelism)
            .finish()
    }
}

impl ProviderConfig {
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// 認証情報 (secret_id, secret_key) を取得
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.secret_id.as_deref(), self.secret_key.as_deref()) {
            (Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => Ok((id, key)),
            _ => Err(ConfigError::MissingCredentials),
        }
    }

    /// 環境変数で値を上書き (空文字列は未設定扱い)
    pub fn with_env_overrides(mut self) -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let Some(v) = var(SECRET_ID_ENV) {
            self.secret_id = Some(v);
        }
        if let Some(v) = var(SECRET_KEY_ENV) {
            self.secret_key = Some(v);
        }
        if let Some(v) = var(SECURITY_TOKEN_ENV) {
            self.security_token = Some(v);
        }
        if let Some(v) = var(REGION_ENV) {
            self.region = Some(v);
        }
        self
    }
}

/// `tcform.yaml` のうち provider セクションだけを読む
#[derive(Debug, Default, Deserialize)]
struct ProjectFile {
    provider: Option<ProviderConfig>,
}

/// 見つかった設定ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// 設定ファイル全体がプロバイダー設定
    File(PathBuf),
    /// `tcform.yaml` の provider セクション
    ProjectSection(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::File(path) | ConfigSource::ProjectSection(path) => path,
        }
    }

    pub fn read(&self) -> Result<ProviderConfig> {
        let content = std::fs::read_to_string(self.path())?;
        let parse_error = |source| ConfigError::Parse {
            path: self.path().to_path_buf(),
            source,
        };

        match self {
            ConfigSource::File(_) => {
                if content.trim().is_empty() {
                    return Ok(ProviderConfig::default());
                }
                serde_yaml::from_str(&content).map_err(parse_error)
            }
            ConfigSource::ProjectSection(_) => {
                let project: ProjectFile = serde_yaml::from_str(&content).map_err(parse_error)?;
                Ok(project.provider.unwrap_or_default())
            }
        }
    }
}

/// グローバル設定ファイルのパス (~/.config/tcform/config.yaml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tcform").join(CONFIG_FILE))
}

fn has_provider_section(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|content| serde_yaml::from_str::<ProjectFile>(&content).ok())
        .is_some_and(|project| project.provider.is_some())
}

/// `dir` を起点にプロバイダー設定ファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 TCFORM_CONFIG_PATH (直接パス指定)
/// 2. tcform.local.yaml
/// 3. tcform.yaml の provider セクション
/// 4. ./.tcform/config.yaml
/// 5. ~/.config/tcform/config.yaml (グローバル設定)
pub fn find_config_file_in(dir: &Path) -> Option<ConfigSource> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Some(ConfigSource::File(path));
        }
        tracing::warn!("{} が存在しません: {}", CONFIG_PATH_ENV, path.display());
    }

    // 2. ローカル設定
    let local = dir.join(LOCAL_FILE);
    if local.exists() {
        return Some(ConfigSource::File(local));
    }

    // 3. プロジェクトファイルの provider セクション
    let project = dir.join(PROJECT_FILE);
    if project.exists() && has_provider_section(&project) {
        return Some(ConfigSource::ProjectSection(project));
    }

    // 4. ./.tcform/ ディレクトリ
    let project_config = dir.join(PROJECT_DIR).join(CONFIG_FILE);
    if project_config.exists() {
        return Some(ConfigSource::File(project_config));
    }

    // 5. グローバル設定ファイル
    global_config_path()
        .filter(|path| path.exists())
        .map(ConfigSource::File)
}

/// カレントディレクトリを起点にプロバイダー設定ファイルを探す
pub fn find_config_file() -> Result<Option<ConfigSource>> {
    let current_dir = std::env::current_dir()?;
    Ok(find_config_file_in(&current_dir))
}

/// 設定ファイルと環境変数からプロバイダー設定を組み立てる
pub fn load_provider_config_in(dir: &Path) -> Result<ProviderConfig> {
    let config = match find_config_file_in(dir) {
        Some(source) => {
            tracing::debug!("Loading provider config from {}", source.path().display());
            source.read()?
        }
        None => ProviderConfig::default(),
    };
    Ok(config.with_env_overrides())
}

pub fn load_provider_config() -> Result<ProviderConfig> {
    let current_dir = std::env::current_dir()?;
    load_provider_config_in(&current_dir)
}

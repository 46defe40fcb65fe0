pub mod apply;
pub mod auth;
pub mod data;
pub mod destroy;
pub mod import;
pub mod plan;
pub mod refresh;
pub mod schema;

use crate::manifest;
use colored::Colorize;
use std::path::PathBuf;
use tcform_cloud::{Engine, StateManager};
use tcform_cloud_tencent::{Credentials, TencentClient, TencentCloudProvider};
use tcform_config::ProviderConfig;

/// プロジェクトルート・プロバイダー・状態ファイル
pub struct Workspace {
    pub root: PathBuf,
    pub config: ProviderConfig,
    pub provider: TencentCloudProvider,
    pub state: StateManager,
}

impl Workspace {
    pub fn open() -> anyhow::Result<Self> {
        let root = manifest::find_project_root()?;
        let config = tcform_config::load_provider_config_in(&root)?;
        let provider = connect(&config)?;
        let state = StateManager::new(&root);

        tracing::debug!(
            project_root = %root.display(),
            region = config.region(),
            "Opened workspace"
        );
        Ok(Self {
            root,
            config,
            provider,
            state,
        })
    }

    pub fn engine(&self) -> Engine<'_> {
        engine(&self.provider, &self.config)
    }
}

/// 設定ファイルと環境変数からプロバイダーを構築
pub fn connect(config: &ProviderConfig) -> anyhow::Result<TencentCloudProvider> {
    let (secret_id, secret_key) = config.credentials()?;
    let credentials =
        Credentials::new(secret_id, secret_key).with_token(config.security_token.clone());

    let mut client = TencentClient::new(credentials, config.region())?;
    if let Some(endpoint) = &config.endpoint {
        tracing::debug!("Using API endpoint {}", endpoint);
        client = client.with_endpoint(endpoint);
    }
    if let Some(rate_limit) = config.rate_limit {
        client = client.with_rate_limit(rate_limit);
    }

    Ok(TencentCloudProvider::new(client))
}

/// API を呼ばないコマンド (schema) 用のプロバイダー
pub fn offline() -> anyhow::Result<TencentCloudProvider> {
    let credentials = Credentials::new("offline", "offline");
    let client = TencentClient::new(credentials, tcform_config::DEFAULT_REGION)?;
    Ok(TencentCloudProvider::new(client))
}

pub fn engine<'a>(provider: &'a TencentCloudProvider, config: &ProviderConfig) -> Engine<'a> {
    let engine = Engine::new(provider);
    match config.parallelism {
        Some(parallelism) => engine.with_parallelism(parallelism),
        None => engine,
    }
}

/// 実行結果を表示し、失敗があればエラーにする
pub fn report(result: &tcform_cloud::ApplyResult) -> anyhow::Result<()> {
    println!();
    for ok in &result.succeeded {
        println!("  {} {}", "✓".green(), ok.message);
    }
    for failed in &result.failed {
        println!(
            "  {} {}: {}",
            "✗".red(),
            failed.action_id.cyan(),
            failed.error.as_deref().unwrap_or("unknown error")
        );
    }
    println!();
    println!(
        "完了: 成功 {}件, 失敗 {}件 ({}ms)",
        result.succeeded.len(),
        result.failed.len(),
        result.duration_ms
    );

    if !result.is_success() {
        anyhow::bail!("{}件のリソースの処理に失敗しました", result.failed.len());
    }
    Ok(())
}

use super::connect;
use colored::Colorize;
use tcform_cloud::CloudProvider;

pub async fn handle() -> anyhow::Result<()> {
    let config = tcform_config::load_provider_config()?;
    if let Some(source) = tcform_config::find_config_file()? {
        println!("📄 設定ファイル: {}", source.path().display().to_string().cyan());
    }
    println!("リージョン: {}", config.region().cyan());

    let provider = connect(&config)?;
    let status = provider.check_auth().await?;

    if status.authenticated {
        println!("{}", "✓ 認証に成功しました".green().bold());
        if let Some(info) = status.account_info {
            println!("  {}", info);
        }
        Ok(())
    } else {
        eprintln!("{}", "✗ 認証に失敗しました".red().bold());
        if let Some(error) = &status.error {
            eprintln!("  {}", error);
        }
        anyhow::bail!("{} の認証に失敗しました", provider.display_name());
    }
}

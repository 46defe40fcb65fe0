use super::{Workspace, report};
use colored::Colorize;

pub async fn handle(target: Option<&str>, yes: bool) -> anyhow::Result<()> {
    let workspace = Workspace::open()?;
    let lock = workspace.state.acquire_lock().await?;
    let mut state = workspace.state.load().await?;

    let managed: Vec<String> = state
        .resources
        .keys()
        .filter_map(|key| key.split_once(':').map(|(_, rest)| rest.replacen(':', ".", 1)))
        .filter(|address| target.is_none_or(|t| t == address.as_str()))
        .collect();

    if managed.is_empty() {
        lock.release().await?;
        if let Some(target) = target {
            anyhow::bail!("{} は状態ファイルにありません", target);
        }
        println!("{}", "管理対象のリソースがありません".yellow());
        return Ok(());
    }

    for address in &managed {
        println!("{}", format!("  - {}", address).red());
    }

    // 確認（--yesが指定されていない場合）
    if !yes {
        println!();
        println!(
            "{}",
            format!("⚠ {}件のリソースを削除します", managed.len())
                .red()
                .bold()
        );
        println!("実行するには --yes オプションを指定してください");
        lock.release().await?;
        return Ok(());
    }

    println!();
    println!("{}", "削除中...".blue().bold());
    let result = workspace.engine().destroy(&mut state, target).await;

    workspace.state.save(&state).await?;
    lock.release().await?;

    report(&result?)
}

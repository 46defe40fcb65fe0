use super::Workspace;
use colored::Colorize;

pub async fn handle() -> anyhow::Result<()> {
    let workspace = Workspace::open()?;
    let lock = workspace.state.acquire_lock().await?;
    let mut state = workspace.state.load().await?;

    println!("{}", "リモートの状態を読み込み中...".blue());
    let result = workspace.engine().refresh(&mut state).await;

    // 読み込めた分は保存する
    workspace.state.save(&state).await?;
    lock.release().await?;
    let removed = result?;

    for key in &removed {
        println!("  {} {} (リモートで削除されています)", "-".red(), key.cyan());
    }
    let message = format!("✓ {}件のリソースを更新しました", state.resources.len());
    println!("{}", message.green());
    Ok(())
}

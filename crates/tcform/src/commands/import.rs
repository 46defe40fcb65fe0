use super::Workspace;
use colored::Colorize;

pub async fn handle(resource_type: &str, name: &str, id: &str) -> anyhow::Result<()> {
    let workspace = Workspace::open()?;
    let lock = workspace.state.acquire_lock().await?;
    let mut state = workspace.state.load().await?;

    println!(
        "{} {}.{} ({})",
        "インポート中:".blue(),
        resource_type,
        name,
        id.cyan()
    );

    let imported = workspace
        .engine()
        .import(resource_type, name, id, &mut state)
        .await?;

    workspace.state.save(&state).await?;
    lock.release().await?;

    println!("{}", "✓ インポートしました".green().bold());
    for (key, value) in &imported.attributes {
        println!("  {} = {}", key, value);
    }
    println!();
    println!(
        "tcform.yaml の resources.{}.{} に設定を追加してください",
        resource_type, name
    );
    Ok(())
}

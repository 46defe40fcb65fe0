use super::{Workspace, plan::print_plan, report};
use crate::manifest;
use colored::Colorize;

pub async fn handle(yes: bool) -> anyhow::Result<()> {
    let workspace = Workspace::open()?;
    let desired = manifest::load_manifest(&workspace.root)?;

    let lock = workspace.state.acquire_lock().await?;
    let mut state = workspace.state.load().await?;
    let engine = workspace.engine();

    let plan = engine.plan(&desired, &state)?;
    if !plan.has_changes {
        println!("{}", "✓ 変更はありません".green());
        lock.release().await?;
        return Ok(());
    }

    print_plan(&plan);

    // 確認（--yesが指定されていない場合）
    if !yes {
        println!();
        println!("{}", "⚠ 上記の変更をクラウドに適用します".yellow().bold());
        println!("実行するには --yes オプションを指定してください");
        lock.release().await?;
        return Ok(());
    }

    println!();
    println!("{}", "適用中...".blue().bold());
    let result = engine.apply(&plan, &desired, &mut state).await;

    // 失敗したアクションも状態に残す
    workspace.state.save(&state).await?;
    lock.release().await?;

    report(&result)
}

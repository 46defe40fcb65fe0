use super::Workspace;
use crate::manifest;
use colored::Colorize;
use tcform_cloud::{ActionType, Plan};

/// 実行計画を表示
pub fn print_plan(plan: &Plan) {
    for action in &plan.actions {
        let line = match action.action_type {
            ActionType::Create => format!("  + {}", action.id).green(),
            ActionType::Update => format!("  ~ {}", action.id).yellow(),
            ActionType::Replace => format!("-/+ {}", action.id).magenta(),
            ActionType::Delete => format!("  - {}", action.id).red(),
            ActionType::NoOp => continue,
        };
        if action.changed.is_empty() {
            println!("{}", line);
        } else {
            println!("{} ({})", line, action.changed.join(", ").dimmed());
        }
    }

    let summary = plan.summary();
    println!();
    println!(
        "計画: 作成 {}, 更新 {}, 再作成 {}, 削除 {}, 変更なし {}",
        summary.create.to_string().green(),
        summary.update.to_string().yellow(),
        summary.replace.to_string().magenta(),
        summary.delete.to_string().red(),
        summary.no_change
    );
}

pub async fn handle() -> anyhow::Result<()> {
    let workspace = Workspace::open()?;
    let desired = manifest::load_manifest(&workspace.root)?;
    let state = workspace.state.load().await?;

    println!("{}", "実行計画を作成中...".blue());
    println!(
        "プロジェクトルート: {}",
        workspace.root.display().to_string().cyan()
    );
    println!("リージョン: {}", workspace.config.region().cyan());
    println!();

    let plan = workspace.engine().plan(&desired, &state)?;
    if !plan.has_changes {
        println!("{}", "✓ 変更はありません".green());
        return Ok(());
    }

    print_plan(&plan);
    Ok(())
}

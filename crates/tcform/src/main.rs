mod commands;
mod manifest;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tcform")]
#[command(about = "Tencent Cloud のリソースを宣言どおりに揃える", long_about = None)]
struct Cli {
    /// 詳細ログを表示 (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// tcform.yaml と状態ファイルを比較して実行計画を表示
    Plan,
    /// 実行計画をクラウドに適用
    Apply {
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
    },
    /// 管理中のリソースをリモートから読み直す
    Refresh,
    /// 既存のリソースを管理対象に取り込む
    Import {
        /// リソースタイプ (例: tencentcloud_eip)
        resource_type: String,
        /// tcform.yaml でのリソース名
        name: String,
        /// リモートの ID (複合 ID は `a#b#c`)
        id: String,
    },
    /// 管理中のリソースを削除
    Destroy {
        /// 削除対象 (type.name)。省略時はすべて
        #[arg(short, long)]
        target: Option<String>,
        /// 確認なしで実行
        #[arg(short, long)]
        yes: bool,
    },
    /// リソース・データソースのスキーマを表示
    Schema {
        /// タイプ名（省略時は一覧）
        type_name: Option<String>,
        /// JSON で出力
        #[arg(long)]
        json: bool,
    },
    /// データソースを読み込む
    Data {
        /// データソース名 (例: tencentcloud_service_templates)
        type_name: String,
        /// 引数 (key=value、複数指定可)
        #[arg(short = 'a', long = "arg")]
        args: Vec<String>,
    },
    /// 認証情報を確認
    Auth,
    /// バージョン情報を表示
    Version,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Plan => commands::plan::handle().await,
        Commands::Apply { yes } => commands::apply::handle(yes).await,
        Commands::Refresh => commands::refresh::handle().await,
        Commands::Import {
            resource_type,
            name,
            id,
        } => commands::import::handle(&resource_type, &name, &id).await,
        Commands::Destroy { target, yes } => {
            commands::destroy::handle(target.as_deref(), yes).await
        }
        Commands::Schema { type_name, json } => commands::schema::handle(type_name.as_deref(), json),
        Commands::Data { type_name, args } => commands::data::handle(&type_name, &args).await,
        Commands::Auth => commands::auth::handle().await,
        Commands::Version => {
            println!("tcform {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

use anyhow::Result;
use clap::Parser;
use colored::control as color_control;
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;
use trackdb::cli::commands::check::{CheckCommand, CheckCommandHandler};
use trackdb::cli::commands::plan::{PlanCommand, PlanCommandHandler};
use trackdb::cli::{Cli, Commands};
use trackdb::core::naming::{DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run_command(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// トレーシングを初期化する
///
/// RUST_LOG が設定されている場合はそちらを優先する。
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// コマンドを実行する
fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    match cli.command {
        Commands::Check {
            filename,
            fencoding,
        } => {
            let handler = CheckCommandHandler::new();
            let command = CheckCommand {
                project_path,
                config_path: cli.config,
                filename,
                fencoding,
                format: cli.format,
            };
            handler.execute(&command)
        }

        Commands::Plan(args) => {
            let handler = PlanCommandHandler::new();
            let command = PlanCommand {
                project_path,
                config_path: cli.config,
                overrides: args.into(),
                format: cli.format,
            };
            handler.execute(&command)
        }
    }
}

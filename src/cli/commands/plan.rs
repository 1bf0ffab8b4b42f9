// planコマンドハンドラー
//
// 接続パラメータを検証し、マイグレーションファイルの実行単位を
// 実行エンジンへ引き渡す計画を作成します。
// - 設定ファイルとCLIフラグのマージ
// - 未指定の必須パラメータの一括報告
// - 実行単位のハッシュ計算と実行エンジンへの引き渡し

use crate::adapters::connection_string;
use crate::adapters::sql_executor::{execute_all, PlanExecutor, PlannedExecution};
use crate::cli::command_context::CommandContext;
use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::config::ConnectionOverrides;
use crate::services::migration_loader;
use crate::services::sql_hash::SqlHashService;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// planコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct PlanOutput {
    /// 接続先（パスワードは伏せ字）
    pub target: String,
    /// 実行予定
    pub executions: Vec<PlannedExecution>,
    /// 実行エンジンが失敗を報告した単位の数
    pub failures: usize,
}

impl CommandOutput for PlanOutput {
    fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Execution Plan: {} ===\n\n", self.target));

        for (i, execution) in self.executions.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} {} [{}] {}\n",
                i + 1,
                execution.operation,
                execution.id,
                execution.kind,
                execution.filename
            ));
            if execution.kind == "track" {
                output.push_str(&format!(
                    "   failOnError: {}, multiThread: {}\n",
                    execution.fail_on_error, execution.multi_thread
                ));
            }
            output.push_str(&format!("   sqlhash: {}\n", execution.sqlhash));
        }

        output.push('\n');
        if self.failures == 0 {
            output.push_str(&format!(
                "{} {} unit(s) planned.",
                "✓".green(),
                self.executions.len()
            ));
        } else {
            output.push_str(&format!(
                "{} {} of {} unit(s) failed.",
                "✗".red(),
                self.failures,
                self.executions.len()
            ));
        }

        output
    }
}

/// planコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct PlanCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// CLIフラグによる上書き値
    pub overrides: ConnectionOverrides,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// planコマンドハンドラー
#[derive(Debug, Default)]
pub struct PlanCommandHandler {}

impl PlanCommandHandler {
    /// 新しいPlanCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// planコマンドを実行
    ///
    /// # Returns
    ///
    /// 成功時は実行計画、パラメータ不足やファイル拒否の場合はエラー
    pub fn execute(&self, command: &PlanCommand) -> Result<String> {
        let context = CommandContext::load(
            command.project_path.clone(),
            command.config_path.clone(),
            command.overrides.clone(),
        )?;

        context
            .config
            .validate()
            .with_context(|| "Invalid connection parameters. Run `trackdb plan --help` for usage")?;

        let db_type = context.config.db_type()?;
        let encoding = context.config.encoding()?;
        let path = context.migration_file()?;

        let units = migration_loader::open_sql_file(&path, encoding)
            .with_context(|| format!("Migration file rejected: {}", path.display()))?;
        let units = SqlHashService::new().apply(units);
        debug!(count = units.len(), "Hashed executable units");

        let target = connection_string::build_target(db_type, &context.config);
        let mut executor = PlanExecutor::new(target.clone());
        let failures = execute_all(&mut executor, &units);

        let output = PlanOutput {
            target,
            executions: executor.into_planned(),
            failures,
        };

        self.finish(&output, &command.format)
    }

    /// 実行計画を出力し、失敗した単位があればエラーを返す
    ///
    /// 失敗時の計画はJSONなら標準出力、テキストなら標準エラー出力へ書き出す。
    fn finish(&self, output: &PlanOutput, format: &OutputFormat) -> Result<String> {
        let rendered = render_output(output, format)?;
        if output.failures == 0 {
            return Ok(rendered);
        }

        match format {
            OutputFormat::Json => println!("{}", rendered),
            OutputFormat::Text => eprintln!("{}", rendered),
        }
        Err(anyhow!(
            "{} of {} unit(s) failed",
            output.failures,
            output.executions.len()
        ))
    }
}

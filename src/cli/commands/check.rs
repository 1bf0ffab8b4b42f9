// checkコマンドハンドラー
//
// マイグレーションファイルの解析と検証を行います。
// - ファイルの読み込みとデコード
// - ファイル名またはトラックヘッダーの検証
// - 実行単位の一覧表示（ハッシュ付き）

use crate::cli::command_context::CommandContext;
use crate::cli::commands::{render_output, CommandOutput};
use crate::cli::OutputFormat;
use crate::core::config::ConnectionOverrides;
use crate::core::executable_sql::{ExecutableSql, TrackAttribute};
use crate::services::migration_loader;
use crate::services::sql_hash::SqlHashService;
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// checkコマンドの出力構造体
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// 検証したファイル
    pub filename: String,
    /// ファイルエンコーディング
    pub encoding: String,
    /// 実行単位
    pub units: Vec<ExecutableSql>,
}

impl CommandOutput for CheckOutput {
    fn to_text(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "=== {} ({}) ===\n\n",
            self.filename, self.encoding
        ));

        for (i, unit) in self.units.iter().enumerate() {
            output.push_str(&format!(
                "{}. [{}] id: {}, operation: {}\n",
                i + 1,
                unit.kind(),
                unit.id(),
                unit.operation()
            ));
            if unit.is_track() {
                let properties: Vec<String> = TrackAttribute::ALL
                    .iter()
                    .map(|attribute| format!("{}: {}", attribute, unit.property_of(*attribute)))
                    .collect();
                output.push_str(&format!("   {}\n", properties.join(", ")));
            }
            output.push_str(&format!("   sqlhash: {}\n", unit.sql_hash()));
        }

        output.push_str(&format!(
            "\n{} {} executable unit(s) found.",
            "✓".green(),
            self.units.len()
        ));

        output
    }
}

/// checkコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct CheckCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// マイグレーションファイル（指定されない場合は設定ファイルから取得）
    pub filename: Option<String>,
    /// ファイルエンコーディング
    pub fencoding: Option<String>,
    /// 出力フォーマット
    pub format: OutputFormat,
}

/// checkコマンドハンドラー
#[derive(Debug, Default)]
pub struct CheckCommandHandler {}

impl CheckCommandHandler {
    /// 新しいCheckCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// checkコマンドを実行
    ///
    /// # Returns
    ///
    /// 成功時は実行単位の一覧、ファイルが拒否された場合はその理由を含むエラー
    pub fn execute(&self, command: &CheckCommand) -> Result<String> {
        let context = CommandContext::load(
            command.project_path.clone(),
            command.config_path.clone(),
            ConnectionOverrides {
                filename: command.filename.clone(),
                fencoding: command.fencoding.clone(),
                ..Default::default()
            },
        )?;

        let path = context.migration_file()?;
        let encoding = context.config.encoding()?;

        let units = migration_loader::open_sql_file(&path, encoding)
            .with_context(|| format!("Migration file rejected: {}", path.display()))?;

        let output = CheckOutput {
            filename: context.config.filename.clone(),
            encoding: encoding.to_string(),
            units: SqlHashService::new().apply(units),
        };

        render_output(&output, &command.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn command(project_path: PathBuf, filename: &str, format: OutputFormat) -> CheckCommand {
        CheckCommand {
            project_path,
            config_path: None,
            filename: Some(filename.to_string()),
            fencoding: None,
            format,
        }
    }

    #[test]
    fn test_check_track_file_text() {
        colored::control::set_override(false);
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("tracks.sql"),
            "--track:01 failOnError:true (v)\nCREATE TABLE a;\n--track:02 (r)\nCREATE VIEW b;\n",
        )
        .unwrap();

        let output = CheckCommandHandler::new()
            .execute(&command(
                temp_dir.path().to_path_buf(),
                "tracks.sql",
                OutputFormat::Text,
            ))
            .unwrap();

        assert!(output.contains("1. [track] id: 01, operation: V"));
        assert!(output.contains("failOnError: true"));
        assert!(output.contains("2. [track] id: 02, operation: R"));
        assert!(output.contains("2 executable unit(s) found."));
    }

    #[test]
    fn test_check_whole_file_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("R03__refresh.sql"),
            "CREATE OR REPLACE VIEW v AS SELECT 1;\n",
        )
        .unwrap();

        let output = CheckCommandHandler::new()
            .execute(&command(
                temp_dir.path().to_path_buf(),
                "R03__refresh.sql",
                OutputFormat::Json,
            ))
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["units"][0]["kind"], "file");
        assert_eq!(json["units"][0]["id"], "03");
        assert_eq!(json["units"][0]["operation"], "R");
        assert_eq!(json["units"][0]["sqlhash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_check_rejected_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("tracks.sql"),
            "--track:01 (v)\nSELECT 1;\n--track:02 multiThread:test (v)\n",
        )
        .unwrap();

        let error = CheckCommandHandler::new()
            .execute(&command(
                temp_dir.path().to_path_buf(),
                "tracks.sql",
                OutputFormat::Text,
            ))
            .unwrap_err();

        let message = format!("{:#}", error);
        assert!(message.contains("Migration file rejected"));
        assert!(message.contains("Invalid track parameter value: 'test'"));
    }
}

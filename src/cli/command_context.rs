// コマンド共通コンテキスト
//
// 設定ファイル読み込みやパス解決の重複をCLI層で集約する。

use crate::core::config::{ConnectionConfig, ConnectionOverrides};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_path: PathBuf,
    pub config: ConnectionConfig,
}

impl CommandContext {
    /// 設定ファイルを読み込み、CLIフラグで上書きしてコンテキストを作成
    ///
    /// 明示的に指定された設定ファイルは存在しなければエラー、
    /// 既定の設定ファイルは存在しなければ読み飛ばす。
    pub fn load(
        project_path: PathBuf,
        config_path: Option<PathBuf>,
        overrides: ConnectionOverrides,
    ) -> Result<Self> {
        let base = match config_path {
            Some(path) => {
                let path = Self::resolve(&project_path, &path);
                if !path.exists() {
                    return Err(anyhow!("Config file not found: {:?}", path));
                }
                ConnectionConfig::from_file(&path)
                    .with_context(|| "Failed to read config file")?
            }
            None => {
                let path = project_path.join(ConnectionConfig::DEFAULT_CONFIG_PATH);
                if path.exists() {
                    debug!(path = %path.display(), "Loading default config file");
                    ConnectionConfig::from_file(&path)
                        .with_context(|| "Failed to read config file")?
                } else {
                    ConnectionConfig::default()
                }
            }
        };

        Ok(Self {
            project_path,
            config: base.merge(overrides),
        })
    }

    /// マイグレーションファイルの絶対パス
    pub fn migration_file(&self) -> Result<PathBuf> {
        if self.config.filename.trim().is_empty() {
            return Err(anyhow!("Missing required parameter(s): filename"));
        }
        Ok(Self::resolve(
            &self.project_path,
            Path::new(&self.config.filename),
        ))
    }

    fn resolve(project_path: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            project_path.join(path)
        }
    }
}

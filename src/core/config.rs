// 設定管理
//
// 接続設定（YAML形式の設定ファイルとCLIフラグ）の読み込み、マージ、
// 必須パラメータの検証を行います。コアの解析処理はこの設定のうち
// ファイル名とエンコーディングのみを文字列として受け取ります。

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// データベース種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbType {
    MySQL,
    Postgres,
    Db2,
    SqlServer,
    Oracle,
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbType::MySQL => write!(f, "mysql"),
            DbType::Postgres => write!(f, "postgres"),
            DbType::Db2 => write!(f, "db2"),
            DbType::SqlServer => write!(f, "sqlserver"),
            DbType::Oracle => write!(f, "oracle"),
        }
    }
}

impl FromStr for DbType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(DbType::MySQL),
            "postgres" | "postgresql" => Ok(DbType::Postgres),
            "db2" => Ok(DbType::Db2),
            "sqlserver" => Ok(DbType::SqlServer),
            "oracle" => Ok(DbType::Oracle),
            other => Err(anyhow!(
                "Unsupported database type: {}. Please specify one of: mysql, postgres, db2, sqlserver, oracle.",
                other
            )),
        }
    }
}

/// ファイルエンコーディング
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FileEncoding {
    #[default]
    Utf8,
    Iso8859_1,
}

impl FileEncoding {
    /// 正規の名前
    pub fn name(&self) -> &'static str {
        match self {
            FileEncoding::Utf8 => "UTF-8",
            FileEncoding::Iso8859_1 => "ISO8859-1",
        }
    }

    /// バイト列をデコード
    ///
    /// UTF-8として不正なバイト列の場合は None を返します。
    /// ISO8859-1は全バイトが1文字に対応するため常に成功します。
    pub fn decode(&self, bytes: Vec<u8>) -> Option<String> {
        match self {
            FileEncoding::Utf8 => String::from_utf8(bytes).ok(),
            FileEncoding::Iso8859_1 => Some(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl fmt::Display for FileEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileEncoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(FileEncoding::Utf8),
            "ISO8859-1" | "ISO-8859-1" | "LATIN1" => Ok(FileEncoding::Iso8859_1),
            other => Err(anyhow!(
                "Unsupported file encoding: {}. Please specify one of: UTF-8, ISO8859-1.",
                other
            )),
        }
    }
}

/// 接続設定
///
/// 設定ファイルの各項目は省略可能で、CLIフラグで上書きされます。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// データベースサーバーのホスト名またはIPアドレス
    pub host: String,
    /// ポート番号（YAMLでは数値でも文字列でもよい）
    #[serde(deserialize_with = "port_serde::deserialize")]
    pub port: String,
    /// データベース名
    pub dbname: String,
    /// データベース種別
    pub dbtype: String,
    /// ユーザー名
    pub user: String,
    /// パスワード
    pub password: String,
    /// マイグレーションファイル
    pub filename: String,
    /// ファイルエンコーディング
    pub fencoding: String,
    /// Windowsユーザーで SQL Server に接続するかどうか
    pub domain: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: String::new(),
            dbname: String::new(),
            dbtype: String::new(),
            user: String::new(),
            password: String::new(),
            filename: String::new(),
            fencoding: FileEncoding::default().name().to_string(),
            domain: false,
        }
    }
}

// ポート番号を数値・文字列のどちらからでも読み込むためのヘルパー
mod port_serde {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Number(u64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Port::deserialize(deserializer)? {
            Port::Number(port) => port.to_string(),
            Port::Text(port) => port,
        })
    }
}

/// CLIフラグによる上書き値
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<String>,
    pub dbname: Option<String>,
    pub dbtype: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub filename: Option<String>,
    pub fencoding: Option<String>,
    pub domain: bool,
}

impl ConnectionConfig {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// 必須パラメータ（フラグ名）
    pub const REQUIRED_PARAMETERS: [&'static str; 8] =
        ["host", "port", "dbname", "dbtype", "u", "p", "filename", "fencoding"];

    /// 設定ファイルから読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        content.parse()
    }

    /// CLIフラグの値で上書きした設定を返す
    pub fn merge(self, overrides: ConnectionOverrides) -> Self {
        Self {
            host: overrides.host.unwrap_or(self.host),
            port: overrides.port.unwrap_or(self.port),
            dbname: overrides.dbname.unwrap_or(self.dbname),
            dbtype: overrides.dbtype.unwrap_or(self.dbtype),
            user: overrides.user.unwrap_or(self.user),
            password: overrides.password.unwrap_or(self.password),
            filename: overrides.filename.unwrap_or(self.filename),
            fencoding: overrides.fencoding.unwrap_or(self.fencoding),
            domain: overrides.domain || self.domain,
        }
    }

    /// 未指定の必須パラメータをフラグ名で列挙
    pub fn missing_parameters(&self) -> Vec<&'static str> {
        let values = [
            &self.host,
            &self.port,
            &self.dbname,
            &self.dbtype,
            &self.user,
            &self.password,
            &self.filename,
            &self.fencoding,
        ];

        Self::REQUIRED_PARAMETERS
            .into_iter()
            .zip(values)
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_parameters();
        if !missing.is_empty() {
            return Err(anyhow!(
                "Missing required parameter(s): {}",
                missing.join(", ")
            ));
        }

        self.db_type()?;
        self.encoding()?;

        Ok(())
    }

    /// データベース種別を取得
    pub fn db_type(&self) -> Result<DbType> {
        self.dbtype.parse()
    }

    /// ファイルエンコーディングを取得
    pub fn encoding(&self) -> Result<FileEncoding> {
        self.fencoding.parse()
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for ConnectionConfig {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

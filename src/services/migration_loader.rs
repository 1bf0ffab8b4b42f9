// マイグレーションファイル読み込みの共通ユーティリティ
//
// ファイルを読み込んで指定エンコーディングでデコードし、
// ファクトリーで実行単位に変換します。

use crate::core::config::FileEncoding;
use crate::core::error::IoError;
use crate::core::executable_sql::ExecutableSql;
use crate::services::migration_file_factory;
use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// ファイルを読み込み、デコード済みの内容を返す
///
/// 先頭のBOMは取り除きます。
pub fn read_sql_file(path: &Path, encoding: FileEncoding) -> Result<String, IoError> {
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(IoError::FileNotFound { path: path_str });
    }

    let bytes = fs::read(path).map_err(|e| IoError::FileRead {
        path: path_str.clone(),
        cause: e.to_string(),
    })?;

    let content = encoding.decode(bytes).ok_or_else(|| IoError::Decode {
        path: path_str,
        encoding: encoding.name().to_string(),
    })?;

    Ok(match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// マイグレーションファイルを開いて実行単位の列に変換する
///
/// 命名規約の検証にはパスの最後の要素（ファイル名）を使用します。
pub fn open_sql_file(path: &Path, encoding: FileEncoding) -> Result<Vec<ExecutableSql>> {
    let content = read_sql_file(path, encoding)?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {:?}", path))?;

    debug!(filename, encoding = %encoding, bytes = content.len(), "Loaded migration file");

    Ok(migration_file_factory::build(filename, &content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MigrationFileError;
    use tempfile::TempDir;

    #[test]
    fn test_open_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("V01__create_users.sql");
        fs::write(&path, "CREATE TABLE users (id INT);\n").unwrap();

        let units = open_sql_file(&path, FileEncoding::Utf8).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].filename(), "V01__create_users.sql");
        assert_eq!(units[0].id(), "01");
    }

    #[test]
    fn test_open_strips_bom_before_scanning() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tracks.sql");
        fs::write(&path, "\u{feff}--track:01 (r)\nSELECT 1;\n").unwrap();

        let units = open_sql_file(&path, FileEncoding::Utf8).unwrap();
        assert_eq!(units.len(), 1);
        assert!(units[0].is_track());
        assert_eq!(units[0].sql(), "SELECT 1;\n");
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("V01__missing.sql");

        let error = read_sql_file(&path, FileEncoding::Utf8).unwrap_err();
        assert!(error.is_file_not_found());
    }

    #[test]
    fn test_open_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("V01__latin.sql");
        fs::write(&path, [b'c', 0xe9, b'\n']).unwrap();

        let error = read_sql_file(&path, FileEncoding::Utf8).unwrap_err();
        assert!(error.is_decode());

        let content = read_sql_file(&path, FileEncoding::Iso8859_1).unwrap();
        assert_eq!(content, "cé\n");
    }

    #[test]
    fn test_open_propagates_factory_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("create_users.sql");
        fs::write(&path, "CREATE TABLE users (id INT);\n").unwrap();

        let error = open_sql_file(&path, FileEncoding::Utf8).unwrap_err();
        let error = error.downcast_ref::<MigrationFileError>().unwrap();
        assert!(error.is_format());
    }
}

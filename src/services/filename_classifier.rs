// ファイル名分類サービス
//
// トラックヘッダーを持たないマイグレーションファイルの名前から
// 操作種別とIDを導出します。
//
// 命名規約: `V01__create_table.sql`
// - 先頭1文字: V（バージョン付き）または R（繰り返し可能）
// - 1〜10桁の数字（ID、先頭ゼロを保持）
// - アンダースコア2つ、直後はアンダースコア以外の1文字
// - 拡張子 .sql

use crate::core::error::FormatError;
use crate::core::executable_sql::Operation;
use regex::Regex;
use std::sync::LazyLock;

static FILENAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([vr])([0-9]{1,10})__[^_].*\.sql$").expect("filename pattern is valid")
});

/// ファイル名の分類結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileClassification {
    /// マイグレーション操作（大文字化済み）
    pub operation: Operation,
    /// ID（数字列をそのまま保持）
    pub id: String,
}

/// ファイル名を分類する
///
/// # Arguments
///
/// * `filename` - パス区切りを含まないファイル名
///
/// # Returns
///
/// 命名規約に一致する場合は操作種別とID、一致しない場合は FormatError
pub fn classify(filename: &str) -> Result<FileClassification, FormatError> {
    let captures = FILENAME_PATTERN
        .captures(filename)
        .ok_or_else(|| FormatError::new(filename))?;

    let operation = captures[1]
        .parse::<Operation>()
        .map_err(|_| FormatError::new(filename))?;

    Ok(FileClassification {
        operation,
        id: captures[2].to_string(),
    })
}

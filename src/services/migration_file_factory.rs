// マイグレーションファイルファクトリー
//
// ファイル名と内容から ExecutableSql の列を組み立てます。
// - `--track` ヘッダーが無い場合: ファイル名を分類し、内容全体を1単位とする
// - ヘッダーがある場合: 各ヘッダーを検証し、直後の本文を1単位とする
// いずれかの検証に失敗した場合はファイル全体を拒否します（部分的な結果は返さない）。

use crate::core::error::MigrationFileError;
use crate::core::executable_sql::{ExecutableSql, SqlProperty};
use crate::services::{filename_classifier, track_header_parser, track_scanner};
use tracing::{debug, warn};

/// ファイル名と内容から実行単位の列を構築する
///
/// # Arguments
///
/// * `filename` - マイグレーションファイル名（トラック単位にも共有される）
/// * `content` - デコード済みのファイル内容
///
/// # Returns
///
/// ヘッダーの文書順に並んだ実行単位、またはファイルを拒否した理由
pub fn build(filename: &str, content: &str) -> Result<Vec<ExecutableSql>, MigrationFileError> {
    let scan = track_scanner::scan(content);

    if !scan.is_track_file() {
        let classification = filename_classifier::classify(filename)?;
        debug!(
            filename,
            id = %classification.id,
            operation = %classification.operation,
            "Built whole-file unit"
        );

        return Ok(vec![ExecutableSql::sql_file(SqlProperty::new(
            classification.id,
            filename,
            content,
            classification.operation,
        ))]);
    }

    if !scan.preamble().trim().is_empty() {
        warn!(
            filename,
            "Content before the first track header is not part of any track and will not be executed"
        );
    }

    let units = scan
        .tracks()
        .map(|(header_line, body)| {
            let header = track_header_parser::parse(header_line.text).map_err(|reason| {
                MigrationFileError::Grammar {
                    filename: filename.to_string(),
                    line: header_line.line,
                    reason,
                }
            })?;

            let properties = header.properties();
            Ok(ExecutableSql::track(
                SqlProperty::new(header.id, filename, body, header.operation),
                properties,
            ))
        })
        .collect::<Result<Vec<_>, MigrationFileError>>()?;

    debug!(filename, tracks = units.len(), "Built track units");

    Ok(units)
}

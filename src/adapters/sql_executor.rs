// SQL実行アダプター
//
// 実行単位を外部の実行エンジンへ引き渡す境界。ベンダー固有の実行エンジンは
// SqlExecutor を実装する。PlanExecutor はデータベースに接続せず、
// 実行予定を記録するだけの実装。

use crate::core::executable_sql::{ExecutableSql, Operation, TrackAttribute};
use serde::Serialize;
use tracing::debug;

/// SQL実行エンジン
pub trait SqlExecutor {
    /// 実行単位を実行し、成功したかどうかを返す
    fn execute(&mut self, unit: &ExecutableSql) -> bool;
}

/// 実行単位を文書順にすべて引き渡し、失敗した単位の数を返す
///
/// failOnError / multiThread は実行エンジン側のメタデータであり、ここでは解釈しない。
pub fn execute_all<E: SqlExecutor + ?Sized>(executor: &mut E, units: &[ExecutableSql]) -> usize {
    let mut failures = 0;
    for unit in units {
        let succeeded = executor.execute(unit);
        debug!(id = unit.id(), filename = unit.filename(), succeeded, "Executed unit");
        if !succeeded {
            failures += 1;
        }
    }
    failures
}

/// 実行予定の1エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExecution {
    pub target: String,
    pub kind: &'static str,
    pub id: String,
    pub operation: Operation,
    pub filename: String,
    pub sqlhash: String,
    pub fail_on_error: bool,
    pub multi_thread: bool,
}

/// 実行予定を記録する実行エンジン
#[derive(Debug, Clone, Default)]
pub struct PlanExecutor {
    target: String,
    planned: Vec<PlannedExecution>,
}

impl PlanExecutor {
    /// 接続先を指定して作成
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            planned: Vec::new(),
        }
    }

    /// 実行予定を取り出す
    pub fn into_planned(self) -> Vec<PlannedExecution> {
        self.planned
    }
}

impl SqlExecutor for PlanExecutor {
    fn execute(&mut self, unit: &ExecutableSql) -> bool {
        self.planned.push(PlannedExecution {
            target: self.target.clone(),
            kind: unit.kind(),
            id: unit.id().to_string(),
            operation: unit.operation(),
            filename: unit.filename().to_string(),
            sqlhash: unit.sql_hash().to_string(),
            fail_on_error: unit.property_of(TrackAttribute::FailOnError),
            multi_thread: unit.property_of(TrackAttribute::MultiThread),
        });
        true
    }
}

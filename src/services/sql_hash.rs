// SQLハッシュ計算サービス
//
// 実行単位のSQL本文のSHA-256ハッシュを計算し、sqlhash に設定します。
// ファクトリーは常に空のハッシュで実行単位を構築するため、このステップで補います。

use crate::core::executable_sql::ExecutableSql;
use sha2::{Digest, Sha256};

/// SQLハッシュサービス
#[derive(Debug, Clone, Default)]
pub struct SqlHashService {}

impl SqlHashService {
    /// 新しいSqlHashServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// SQL本文のハッシュを計算
    ///
    /// # Returns
    ///
    /// SHA-256ハッシュ（64文字の16進数文字列）
    pub fn hash(&self, sql: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(sql.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 各実行単位にハッシュを設定した新しい列を返す
    pub fn apply(&self, units: Vec<ExecutableSql>) -> Vec<ExecutableSql> {
        units
            .into_iter()
            .map(|unit| {
                let hash = self.hash(unit.sql());
                unit.with_sql_hash(hash)
            })
            .collect()
    }
}

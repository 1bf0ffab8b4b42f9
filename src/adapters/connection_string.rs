// 接続先記述ビルダー
//
// ConnectionConfig と DbType から表示用の接続先文字列を生成する。
// パスワードは常に伏せ字にする。

use crate::core::config::{ConnectionConfig, DbType};

const MASKED_PASSWORD: &str = "***";

/// 表示用の接続先文字列を生成
pub fn build_target(db_type: DbType, config: &ConnectionConfig) -> String {
    let auth = if config.password.is_empty() {
        config.user.clone()
    } else {
        format!("{}:{}", config.user, MASKED_PASSWORD)
    };

    match db_type {
        DbType::SqlServer if config.domain => format!(
            "sqlserver://{}:{}/{};integratedSecurity=true",
            config.host, config.port, config.dbname
        ),
        _ => format!(
            "{}://{}@{}:{}/{}",
            db_type, auth, config.host, config.port, config.dbname
        ),
    }
}

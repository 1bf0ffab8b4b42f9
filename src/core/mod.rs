// Core Domain
// 実行単位モデル、エラー型、設定、命名の純粋なドメイン定義

pub mod config;
pub mod error;
pub mod executable_sql;
pub mod naming;

// Adapters
// 外部の実行エンジンと接続先の表現を抽象化

pub mod connection_string;
pub mod sql_executor;

// TrackDBライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメイン（実行単位モデル、エラー型、設定）
// - services: マイグレーションファイルの分類、スキャン、文法検証、組み立て
// - adapters: 外部の実行エンジンと接続先の表現

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;

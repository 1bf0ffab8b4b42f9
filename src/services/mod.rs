// Services Layer
// マイグレーションファイルの解析と検証を行うサービス層

pub mod filename_classifier;
pub mod migration_file_factory;
pub mod migration_loader;
pub mod sql_hash;
pub mod track_header_parser;
pub mod track_scanner;

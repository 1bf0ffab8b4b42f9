// 命名
//
// 設定ファイル名とログフィルターなど、固定の名前の単一ソースを提供します。

/// 既定の設定ファイル名
pub const CONFIG_FILE: &str = ".trackdb.yaml";

/// 既定のログフィルター
pub const DEFAULT_LOG_FILTER: &str = "trackdb=warn";

/// verboseモードのログフィルター
pub const VERBOSE_LOG_FILTER: &str = "trackdb=debug";

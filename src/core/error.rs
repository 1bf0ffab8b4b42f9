// エラー型定義
//
// マイグレーションファイルの解析で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、FormatError, GrammarError, MigrationFileError, IoError を定義します。

use thiserror::Error;

/// ファイル名フォーマットエラー
///
/// トラックヘッダーを持たないファイルの名前が命名規約
/// (`V01__description.sql` 形式) に一致しない場合に発生します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid filename of a file without tracks: '{filename}'")]
pub struct FormatError {
    /// 検証対象のファイル名
    pub filename: String,
}

impl FormatError {
    /// 新しいフォーマットエラーを作成
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// トラックヘッダー文法エラー
///
/// `--track:<id> [<name>:<true|false>]* (<v|r>)` の文法に違反したヘッダー行を表現します。
/// 最初に違反したルールのみが報告されます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// 操作トークンまで揃っていないヘッダー
    #[error("Invalid track header (incomplete): '{header}'")]
    IncompleteHeader {
        /// トリム済みのヘッダー行
        header: String,
    },

    /// 先頭トークンが `--track:<digits>` に一致しない
    #[error("Invalid track header: '{token}'")]
    Init {
        /// 不正なトークン
        token: String,
    },

    /// 属性トークンが `<name>:<value>` 形式ではない
    #[error("Invalid track parameter format: '{token}'")]
    AttributeFormat {
        /// 不正なトークン
        token: String,
    },

    /// 未知の属性名
    #[error("Invalid track parameter: '{name}'")]
    UnknownAttribute {
        /// 属性名
        name: String,
    },

    /// 属性値が `true` / `false` ではない
    #[error("Invalid track parameter value: '{value}' (parameter: {name})")]
    AttributeValue {
        /// 属性名
        name: String,
        /// 不正な値
        value: String,
    },

    /// 同一ヘッダー内で属性が重複している
    #[error("Duplicate track parameter: '{name}'")]
    DuplicateAttribute {
        /// 属性名
        name: String,
    },

    /// 末尾トークンが `(v)` / `(r)` に一致しない
    #[error("Invalid track operation: '{token}'")]
    Operation {
        /// 不正なトークン
        token: String,
    },
}

impl GrammarError {
    /// ヘッダー不完全エラーかどうか
    pub fn is_incomplete(&self) -> bool {
        matches!(self, GrammarError::IncompleteHeader { .. })
    }

    /// 先頭トークンのエラーかどうか
    pub fn is_init(&self) -> bool {
        matches!(self, GrammarError::Init { .. })
    }

    /// 属性トークンのエラーかどうか
    pub fn is_attribute(&self) -> bool {
        matches!(
            self,
            GrammarError::AttributeFormat { .. }
                | GrammarError::UnknownAttribute { .. }
                | GrammarError::AttributeValue { .. }
                | GrammarError::DuplicateAttribute { .. }
        )
    }

    /// 操作トークンのエラーかどうか
    pub fn is_operation(&self) -> bool {
        matches!(self, GrammarError::Operation { .. })
    }
}

/// マイグレーションファイルエラー
///
/// ファイル単位の解析失敗を表現します。いずれのエラーでもファイル全体が拒否されます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MigrationFileError {
    /// ファイル名が命名規約に一致しない
    #[error(transparent)]
    Format(#[from] FormatError),

    /// トラックヘッダーが文法に違反している
    #[error("Invalid track header in '{filename}' (line: {line}): {reason}")]
    Grammar {
        /// ファイル名
        filename: String,
        /// ヘッダー行の行番号（1始まり）
        line: usize,
        /// 文法エラー
        reason: GrammarError,
    },
}

impl MigrationFileError {
    /// ファイル名フォーマットエラーかどうか
    pub fn is_format(&self) -> bool {
        matches!(self, MigrationFileError::Format(_))
    }

    /// 文法エラーかどうか
    pub fn is_grammar(&self) -> bool {
        matches!(self, MigrationFileError::Grammar { .. })
    }

    /// 文法エラーを取得
    pub fn grammar_error(&self) -> Option<&GrammarError> {
        match self {
            MigrationFileError::Grammar { reason, .. } => Some(reason),
            MigrationFileError::Format(_) => None,
        }
    }
}

/// I/Oエラー
///
/// マイグレーションファイルの読み込み時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// File read error
    #[error("Failed to read file: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },

    /// Decode error
    #[error("Failed to decode file: {path} (encoding: {encoding})")]
    Decode {
        /// ファイルパス
        path: String,
        /// ファイルエンコーディング
        encoding: String,
    },
}

impl IoError {
    /// ファイルが見つからないエラーかどうか
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, IoError::FileNotFound { .. })
    }

    /// ファイル読み込みエラーかどうか
    pub fn is_file_read(&self) -> bool {
        matches!(self, IoError::FileRead { .. })
    }

    /// デコードエラーかどうか
    pub fn is_decode(&self) -> bool {
        matches!(self, IoError::Decode { .. })
    }
}

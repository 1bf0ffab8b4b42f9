// 実行可能SQLドメインモデル
//
// マイグレーションファイルから得られる実行単位を表現する型システム。
// ファイル全体を1単位とする SqlFile と、`--track` ヘッダーで区切られた Track の
// 2種類を ExecutableSql として統一的に扱います。

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// マイグレーション操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operation {
    /// バージョン付きマイグレーション（順序通りに一度だけ適用）
    #[serde(rename = "V")]
    Versioned,
    /// 繰り返し可能マイグレーション（変更時に再適用）
    #[serde(rename = "R")]
    Repeatable,
}

impl Operation {
    /// 大文字1文字の表現を取得
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Versioned => "V",
            Operation::Repeatable => "R",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1文字の操作表現（大文字小文字を区別しない）からの変換
impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V" | "v" => Ok(Operation::Versioned),
            "R" | "r" => Ok(Operation::Repeatable),
            other => Err(format!("Invalid operation: '{}'", other)),
        }
    }
}

/// トラック属性
///
/// トラックヘッダーで設定できる実行プロパティ。属性名は大文字小文字を区別します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackAttribute {
    /// 下流の実行エンジンに対する並列実行の希望
    MultiThread,
    /// エラー時に失敗とするかどうか
    FailOnError,
}

impl TrackAttribute {
    /// すべての属性
    pub const ALL: [TrackAttribute; 2] = [TrackAttribute::MultiThread, TrackAttribute::FailOnError];

    /// ヘッダー上の属性名
    pub fn name(&self) -> &'static str {
        match self {
            TrackAttribute::MultiThread => "multiThread",
            TrackAttribute::FailOnError => "failOnError",
        }
    }
}

impl fmt::Display for TrackAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackAttribute::ALL
            .into_iter()
            .find(|attribute| attribute.name() == s)
            .ok_or_else(|| format!("Unknown track attribute: '{}'", s))
    }
}

/// すべての実行単位が持つ共通プロパティ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlProperty {
    /// 順序付け用のID（数字のみの文字列、先頭ゼロを保持）
    id: String,
    /// 元のファイル名
    filename: String,
    /// SQL本文
    sql: String,
    /// SQLのハッシュ（外部ステップで計算、未計算の場合は空）
    sqlhash: String,
    /// マイグレーション操作
    operation: Operation,
}

impl SqlProperty {
    /// 新しい共通プロパティを作成（ハッシュは空）
    pub fn new(
        id: impl Into<String>,
        filename: impl Into<String>,
        sql: impl Into<String>,
        operation: Operation,
    ) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            sql: sql.into(),
            sqlhash: String::new(),
            operation,
        }
    }

    /// ハッシュを指定した共通プロパティを作成
    pub fn with_sql_hash(self, sqlhash: impl Into<String>) -> Self {
        Self {
            sqlhash: sqlhash.into(),
            ..self
        }
    }
}

/// トラック固有の実行プロパティ
///
/// ヘッダーで指定されなかった属性は false のままです。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackProperty {
    pub fail_on_error: bool,
    pub multi_thread: bool,
}

impl TrackProperty {
    /// 属性値を取得
    pub fn get(&self, attribute: TrackAttribute) -> bool {
        match attribute {
            TrackAttribute::MultiThread => self.multi_thread,
            TrackAttribute::FailOnError => self.fail_on_error,
        }
    }

    /// 属性値を設定
    pub fn set(&mut self, attribute: TrackAttribute, value: bool) {
        match attribute {
            TrackAttribute::MultiThread => self.multi_thread = value,
            TrackAttribute::FailOnError => self.fail_on_error = value,
        }
    }
}

/// 実行可能SQL
///
/// 外部の実行エンジンに渡される実行単位です。構築後は変更されません。
/// 等価性は同じバリアントかつ全フィールドが一致する場合のみ成立します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutableSql {
    /// ファイル全体を1単位とするSQL
    #[serde(rename = "file")]
    SqlFile {
        #[serde(flatten)]
        common: SqlProperty,
    },
    /// `--track` ヘッダーで区切られたSQL
    Track {
        #[serde(flatten)]
        common: SqlProperty,
        #[serde(flatten)]
        properties: TrackProperty,
    },
}

impl ExecutableSql {
    /// ファイル全体の実行単位を作成
    pub fn sql_file(common: SqlProperty) -> Self {
        ExecutableSql::SqlFile { common }
    }

    /// トラックの実行単位を作成
    pub fn track(common: SqlProperty, properties: TrackProperty) -> Self {
        ExecutableSql::Track { common, properties }
    }

    fn common(&self) -> &SqlProperty {
        match self {
            ExecutableSql::SqlFile { common } | ExecutableSql::Track { common, .. } => common,
        }
    }

    pub fn id(&self) -> &str {
        &self.common().id
    }

    pub fn filename(&self) -> &str {
        &self.common().filename
    }

    pub fn sql(&self) -> &str {
        &self.common().sql
    }

    pub fn sql_hash(&self) -> &str {
        &self.common().sqlhash
    }

    pub fn operation(&self) -> Operation {
        self.common().operation
    }

    /// トラック単位かどうか
    pub fn is_track(&self) -> bool {
        matches!(self, ExecutableSql::Track { .. })
    }

    /// 表示用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            ExecutableSql::SqlFile { .. } => "file",
            ExecutableSql::Track { .. } => "track",
        }
    }

    /// 名前で実行プロパティを取得
    ///
    /// 未知の名前、およびファイル全体の単位では常に false を返します。
    pub fn property(&self, name: &str) -> bool {
        name.parse::<TrackAttribute>()
            .map(|attribute| self.property_of(attribute))
            .unwrap_or(false)
    }

    /// 属性で実行プロパティを取得
    pub fn property_of(&self, attribute: TrackAttribute) -> bool {
        match self {
            ExecutableSql::SqlFile { .. } => false,
            ExecutableSql::Track { properties, .. } => properties.get(attribute),
        }
    }

    /// 同じバリアントかつ全フィールドが一致するかどうか
    pub fn is_equal(&self, other: &ExecutableSql) -> bool {
        self == other
    }

    /// ハッシュを設定した新しい実行単位を返す
    pub fn with_sql_hash(self, sqlhash: impl Into<String>) -> Self {
        match self {
            ExecutableSql::SqlFile { common } => ExecutableSql::SqlFile {
                common: common.with_sql_hash(sqlhash),
            },
            ExecutableSql::Track { common, properties } => ExecutableSql::Track {
                common: common.with_sql_hash(sqlhash),
                properties,
            },
        }
    }
}

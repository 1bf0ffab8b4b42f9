// トラックヘッダー文法検証サービス
//
// 1行のトラックヘッダーをトークン列として厳密に検証します。
//
// 文法: `--track:<1〜10桁の数字> [<属性名>:<true|false>]* (<v|r>)`
// - トークンは1個以上の空白で区切る（末尾の空白は無視）
// - 属性名は multiThread / failOnError のみ（大文字小文字を区別）
// - 最初に違反したルールでヘッダー全体を拒否する

use crate::core::error::GrammarError;
use crate::core::executable_sql::{Operation, TrackAttribute, TrackProperty};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static INIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--track:([0-9]{1,10})$").expect("init pattern is valid"));

static OPERATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((v|r)\)$").expect("operation pattern is valid"));

static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("token separator is valid"));

/// 検証済みのトラックヘッダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackHeader {
    /// トラックID（数字列をそのまま保持）
    pub id: String,
    /// マイグレーション操作（大文字化済み）
    pub operation: Operation,
    /// ヘッダーに実際に記述された属性
    pub attributes: BTreeMap<TrackAttribute, bool>,
}

impl TrackHeader {
    /// 記述されなかった属性を既定値（false）で補った実行プロパティ
    pub fn properties(&self) -> TrackProperty {
        let mut properties = TrackProperty::default();
        for (&attribute, &value) in &self.attributes {
            properties.set(attribute, value);
        }
        properties
    }
}

/// ヘッダー行を検証して解析する
///
/// 検証順序: トークン数、先頭トークン、属性トークン（左から順）、末尾トークン
pub fn parse(header: &str) -> Result<TrackHeader, GrammarError> {
    let header = header.trim_end_matches(' ');
    let tokens: Vec<&str> = TOKEN_SEPARATOR.split(header).collect();

    let [first, middle @ .., last] = tokens.as_slice() else {
        return Err(incomplete(header));
    };

    let id = check_init(first)?;

    let mut attributes = BTreeMap::new();
    for token in middle {
        let (attribute, value) = check_attribute(token)?;
        if attributes.insert(attribute, value).is_some() {
            return Err(GrammarError::DuplicateAttribute {
                name: attribute.name().to_string(),
            });
        }
    }

    let operation = check_operation(last)?;

    Ok(TrackHeader {
        id,
        operation,
        attributes,
    })
}

fn incomplete(header: &str) -> GrammarError {
    GrammarError::IncompleteHeader {
        header: header.to_string(),
    }
}

/// 先頭トークンを検証してIDを取り出す
pub fn check_init(token: &str) -> Result<String, GrammarError> {
    INIT_PATTERN
        .captures(token)
        .map(|captures| captures[1].to_string())
        .ok_or_else(|| GrammarError::Init {
            token: token.to_string(),
        })
}

/// 属性トークンを検証する
pub fn check_attribute(token: &str) -> Result<(TrackAttribute, bool), GrammarError> {
    let parts: Vec<&str> = token.split(':').collect();
    let [name, value] = parts.as_slice() else {
        return Err(GrammarError::AttributeFormat {
            token: token.to_string(),
        });
    };

    let attribute = name
        .parse::<TrackAttribute>()
        .map_err(|_| GrammarError::UnknownAttribute {
            name: name.to_string(),
        })?;

    let value = match *value {
        "true" => true,
        "false" => false,
        other => {
            return Err(GrammarError::AttributeValue {
                name: name.to_string(),
                value: other.to_string(),
            })
        }
    };

    Ok((attribute, value))
}

/// 末尾トークンを検証して操作を取り出す
pub fn check_operation(token: &str) -> Result<Operation, GrammarError> {
    let error = || GrammarError::Operation {
        token: token.to_string(),
    };

    let captures = OPERATION_PATTERN.captures(token).ok_or_else(error)?;
    captures[1].parse::<Operation>().map_err(|_| error())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_attributes() {
        let header = parse("--track:02 multiThread:false failOnError:true (v)").unwrap();
        assert_eq!(header.id, "02");
        assert_eq!(header.operation, Operation::Versioned);
        assert_eq!(header.attributes.len(), 2);

        let properties = header.properties();
        assert!(!properties.multi_thread);
        assert!(properties.fail_on_error);
    }

    #[test]
    fn test_parse_without_attributes_uses_defaults() {
        let header = parse("--track:0123456789 (r)   ").unwrap();
        assert_eq!(header.id, "0123456789");
        assert_eq!(header.operation, Operation::Repeatable);
        assert!(header.attributes.is_empty());
        assert_eq!(header.properties(), TrackProperty::default());
    }

    #[test]
    fn test_parse_tolerates_extra_separating_spaces() {
        let header = parse("--track:7    multiThread:true   (v)").unwrap();
        assert!(header.properties().multi_thread);
    }

    #[test]
    fn test_parse_incomplete() {
        assert!(parse("--track:02").unwrap_err().is_incomplete());
        assert!(parse("--track").unwrap_err().is_incomplete());
        assert!(parse("").unwrap_err().is_incomplete());
    }

    #[test]
    fn test_parse_leading_space_fails_init() {
        assert!(parse(" --track:02 (v)").unwrap_err().is_init());
        assert!(parse(" --track :02").unwrap_err().is_init());
    }

    #[test]
    fn test_parse_space_before_colon_fails() {
        let error = parse("--track:02 multiThread :false (v)").unwrap_err();
        assert!(error.is_attribute());
    }

    #[test]
    fn test_parse_rejects_duplicate_attribute() {
        let error = parse("--track:02 multiThread:true multiThread:false (v)").unwrap_err();
        assert_eq!(
            error,
            GrammarError::DuplicateAttribute {
                name: "multiThread".to_string()
            }
        );
    }

    #[test]
    fn test_attributes_checked_before_operation() {
        let error = parse("--track:02 unknown:true (x)").unwrap_err();
        assert_eq!(
            error,
            GrammarError::UnknownAttribute {
                name: "unknown".to_string()
            }
        );
    }

    #[test]
    fn test_check_init() {
        assert_eq!(check_init("--track:01").unwrap(), "01");
        assert_eq!(check_init("--track:0").unwrap(), "0");
        assert!(check_init("--track:").is_err());
        assert!(check_init("--track:01x").is_err());
        assert!(check_init("--track:01234567890").is_err());
        assert!(check_init(" --track:01").is_err());
    }

    #[test]
    fn test_check_attribute() {
        for token in [
            "multiThread:true",
            "failOnError:true",
            "multiThread:false",
            "failOnError:false",
        ] {
            assert!(check_attribute(token).is_ok(), "{}", token);
        }

        assert!(matches!(
            check_attribute("anotherParameter:true"),
            Err(GrammarError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            check_attribute("multiThread:test2"),
            Err(GrammarError::AttributeValue { .. })
        ));
        assert!(matches!(
            check_attribute("multiThread"),
            Err(GrammarError::AttributeFormat { .. })
        ));
        assert!(matches!(
            check_attribute("multiThread:true:false"),
            Err(GrammarError::AttributeFormat { .. })
        ));
    }

    #[test]
    fn test_check_operation() {
        assert_eq!(check_operation("(v)").unwrap(), Operation::Versioned);
        assert_eq!(check_operation("(r)").unwrap(), Operation::Repeatable);

        for token in [
            "v", "r", "((v))", "((r))", r"\(v\)", "(vvv)", "(a)", "(vr)", " (v) ", "(V)",
        ] {
            assert!(check_operation(token).is_err(), "{}", token);
        }
    }
}

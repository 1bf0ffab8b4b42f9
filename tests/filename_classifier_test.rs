/// ファイル名分類のテスト
///
/// トラックヘッダーを持たないファイルの命名規約
/// (`^[VRvr][0-9]{1,10}__[^_].*\.sql$`) が正しく検証されることを確認します。

#[cfg(test)]
mod filename_classifier_tests {
    use trackdb::core::executable_sql::Operation;
    use trackdb::services::filename_classifier::classify;

    /// 命名規約に一致するファイル名
    #[test]
    fn test_valid_filenames() {
        let filenames = [
            "V01__create_table.sql",
            "v01__create_table.sql",
            "R01__alter__table.sql",
            "r01__alter__table.sql",
            "R0000000000__alter__table.sql",
            "R0123456789__alter__table.sql",
            "r01__a_alter__table.sql",
            "V01__CREATE_TABLE.SQL",
            "R01__ALTER__TABLE.SQL",
            "R0123456789__ALTER__TABLE.SQL",
            "R01__A_ALTER__TABLE.SQL",
            "V01__x.sql",
        ];

        for filename in filenames {
            assert!(
                classify(filename).is_ok(),
                "expected {} to be accepted",
                filename
            );
        }
    }

    /// 命名規約に一致しないファイル名
    #[test]
    fn test_invalid_filenames() {
        let filenames = [
            "V__xxxxx.sql",
            " v01__create_table.sql",
            "    R01__alter__table.sql",
            "a01__alter__table.sql",
            "a01_alter__table.sql",
            "a_alter__table.sql",
            "r01234567890__alter__table.sql",
            "CCY.Autorizador.Serv.exe",
            "r01___alter__table.sql",
            "v01__alter__table.sql2",
            "V01_alter.sql",
            "V01__.sql",
            "V01__x.sql ",
            "migrations/V01__x.sql",
            "A01__ALTER__TABLE.SQL",
            "R01___ALTER__TABLE.SQL",
            "V01__ALTER__TABLE.SQL2",
        ];

        for filename in filenames {
            assert!(
                classify(filename).is_err(),
                "expected {} to be rejected",
                filename
            );
        }
    }

    /// 操作は大文字化され、IDは先頭ゼロを含めてそのまま保持される
    #[test]
    fn test_classification_values() {
        let result = classify("R0123456789__x.sql").unwrap();
        assert_eq!(result.operation, Operation::Repeatable);
        assert_eq!(result.operation.to_string(), "R");
        assert_eq!(result.id, "0123456789");

        let result = classify("v0000000000__Create_Users.sql").unwrap();
        assert_eq!(result.operation, Operation::Versioned);
        assert_eq!(result.id, "0000000000");
    }
}

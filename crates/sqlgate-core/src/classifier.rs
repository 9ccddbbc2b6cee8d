//! Read/write classification from the leading statement keyword.

use sqlgate_commons::OperationKind;

/// Leading keywords that classify a statement as a write.
const WRITE_KEYWORDS: &[&str] = &[
    "insert", "update", "delete", "create", "drop", "alter", "truncate", "grant", "revoke",
];

/// Classifies a statement as read or write from its leading token.
///
/// Deterministic and pure: trims, lowercases, and inspects the first
/// token only. Known limitation: a write wrapped in a leading
/// common-table-expression clause (`WITH ... INSERT ...`) classifies as
/// Read; the least-privileged read role at the database is the backstop
/// for that shape.
pub fn classify(sql: &str) -> OperationKind {
    let lowered = sql.trim().to_lowercase();
    let leading = lowered.split_whitespace().next().unwrap_or("");

    if WRITE_KEYWORDS.contains(&leading) {
        OperationKind::Write
    } else {
        OperationKind::Read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_keywords_classify_as_write() {
        for sql in [
            "INSERT INTO t VALUES (1)",
            "update t set a = 1",
            "DELETE FROM t",
            "CREATE TABLE t (id INT)",
            "DROP TABLE t",
            "ALTER TABLE t ADD COLUMN b INT",
            "TRUNCATE t",
            "GRANT SELECT ON t TO alice",
            "REVOKE SELECT ON t FROM alice",
        ] {
            assert_eq!(classify(sql), OperationKind::Write, "sql: {}", sql);
        }
    }

    #[test]
    fn everything_else_classifies_as_read() {
        assert_eq!(classify("SELECT 1"), OperationKind::Read);
        assert_eq!(classify("  select * from t  "), OperationKind::Read);
        assert_eq!(classify("EXPLAIN SELECT 1"), OperationKind::Read);
        assert_eq!(classify("SHOW server_version"), OperationKind::Read);
        assert_eq!(classify(""), OperationKind::Read);
    }

    #[test]
    fn leading_whitespace_and_case_are_ignored() {
        assert_eq!(classify("\n\t  DeLeTe FROM t"), OperationKind::Write);
    }

    #[test]
    fn cte_wrapped_write_classifies_as_read() {
        // Accepted limitation of the leading-keyword rule.
        assert_eq!(
            classify("WITH x AS (SELECT 1) INSERT INTO t SELECT * FROM x"),
            OperationKind::Read
        );
    }
}

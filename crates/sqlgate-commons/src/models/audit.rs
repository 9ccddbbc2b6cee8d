//! Audit record emitted at the terminal state of every pipeline traversal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AuthorizationDecision, ErrorKind, Identity, OperationKind, ValidationOutcome};

/// Maximum number of characters of SQL text persisted in an audit record.
pub const SQL_EXCERPT_LEN: usize = 200;

/// Terminal pipeline state recorded for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuditOutcome {
    /// Deny-list match; never reached the execution engine.
    Rejected,
    /// Write attempted without privilege; never reached the execution engine.
    Denied,
    /// Statement ran to completion.
    Executed { row_count: usize, duration_ms: u64 },
    /// Statement was forwarded but the engine reported an error.
    /// `raw_error` is the unsanitized driver text, kept for operators only.
    Failed {
        error_kind: ErrorKind,
        raw_error: String,
        duration_ms: u64,
    },
}

/// One append-only record per statement request, regardless of where in
/// the pipeline the request was stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub identity: Identity,
    pub sql_excerpt: String,
    pub operation: OperationKind,
    pub validation: ValidationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<AuthorizationDecision>,
    pub outcome: AuditOutcome,
    pub timestamp: DateTime<Utc>,
}

impl AuditRecord {
    /// Truncates statement text to the bounded excerpt stored in audit.
    pub fn excerpt(sql: &str) -> String {
        if sql.len() <= SQL_EXCERPT_LEN {
            sql.to_string()
        } else {
            let mut cut = SQL_EXCERPT_LEN;
            while !sql.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...", &sql[..cut])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sql_kept_verbatim() {
        assert_eq!(AuditRecord::excerpt("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn long_sql_truncated_with_marker() {
        let long = "x".repeat(500);
        let excerpt = AuditRecord::excerpt(&long);
        assert_eq!(excerpt.len(), SQL_EXCERPT_LEN + 3);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(300);
        let excerpt = AuditRecord::excerpt(&long);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn failed_outcome_serializes_raw_error() {
        let outcome = AuditOutcome::Failed {
            error_kind: ErrorKind::Timeout,
            raw_error: "pool timed out while waiting for an open connection".to_string(),
            duration_ms: 5000,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("TIMEOUT"));
        assert!(json.contains("pool timed out"));
    }
}

//! Statement request and per-stage pipeline decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Identity;

/// A single SQL statement submitted for execution.
///
/// Created at gateway entry and discarded after its audit record is
/// emitted; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    pub sql: String,
    pub identity: Identity,
    pub received_at: DateTime<Utc>,
}

impl StatementRequest {
    pub fn new(sql: impl Into<String>, identity: impl Into<Identity>) -> Self {
        Self {
            sql: sql.into(),
            identity: identity.into(),
            received_at: Utc::now(),
        }
    }
}

/// Result of screening a statement against the deny-list.
///
/// Produced once per request; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationOutcome {
    pub fn pass() -> Self {
        Self { valid: true, reason: None }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Result of the write-authorization check.
///
/// Only computed for write-classified statements; reads are implicitly
/// allowed for any authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationDecision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuthorizationDecision {
    pub fn allow() -> Self {
        Self { allowed: true, reason: None }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_carries_reason() {
        let outcome = ValidationOutcome::reject("statement chaining detected");
        assert!(!outcome.valid);
        assert_eq!(outcome.reason.as_deref(), Some("statement chaining detected"));
    }

    #[test]
    fn pass_has_no_reason() {
        let outcome = ValidationOutcome::pass();
        assert!(outcome.valid);
        assert!(outcome.reason.is_none());
    }

    #[test]
    fn denial_serializes_reason() {
        let decision = AuthorizationDecision::deny("write privilege required");
        let json = serde_json::to_string(&decision).unwrap();
        assert!(json.contains("write privilege required"));
    }
}

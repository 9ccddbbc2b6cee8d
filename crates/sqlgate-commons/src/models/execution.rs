//! Execution outcomes produced by the statement forwarder.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Public taxonomy of execution failures.
///
/// Driver error text is mapped onto this enum before anything is returned
/// to a caller; raw error text is retained only in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Credential or permission problem at the database
    AuthFailure,
    /// Statement or connection-acquire timeout
    Timeout,
    /// Missing table or column
    SchemaError,
    /// Anything else; message is truncated before exposure
    Generic,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AuthFailure => "AUTH_FAILURE",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::SchemaError => "SCHEMA_ERROR",
            ErrorKind::Generic => "GENERIC",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Successful execution: rows, count, and wall-clock duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSuccess {
    pub rows: Vec<serde_json::Value>,
    pub row_count: usize,
    pub duration_ms: u64,
}

/// Failed execution, keeping the raw driver text for the audit trail only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionFailure {
    pub error_kind: ErrorKind,
    /// Sanitized message safe to return to the caller.
    pub public_message: String,
    /// Unsanitized driver text; never leaves the process except into audit.
    pub raw_error: String,
    pub duration_ms: u64,
}

/// Outcome of forwarding one statement to the execution engine.
pub type ExecutionOutcome = std::result::Result<ExecutionSuccess, ExecutionFailure>;

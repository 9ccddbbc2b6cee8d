use std::fmt;

use serde::{Deserialize, Serialize};

/// Enum representing the read/write classification of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Read,
    Write,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Read => "read",
            OperationKind::Write => "write",
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, OperationKind::Write)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for OperationKind {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "write" => OperationKind::Write,
            _ => OperationKind::Read,
        }
    }
}

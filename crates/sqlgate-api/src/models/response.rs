//! Response envelopes for the REST API.
//!
//! Every failure uses the same `{success: false, error, timestamp}`
//! envelope with a sanitized message; successes carry the executed
//! statement's rows, count, duration, and effective identity.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlgate_core::catalog::TableDescription;
use sqlgate_core::StatementOutput;

/// Successful statement execution response.
///
/// # Example
/// ```json
/// {
///   "success": true,
///   "data": [{"id": 1, "name": "Alice"}],
///   "rowCount": 1,
///   "duration": 15,
///   "operation": "read",
///   "executedBy": "alice",
///   "timestamp": "2026-08-30T12:00:00+00:00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementResponse {
    pub success: bool,
    pub data: Vec<serde_json::Value>,
    #[serde(rename = "rowCount")]
    pub row_count: usize,
    /// Execution wall-clock duration in milliseconds.
    pub duration: u64,
    pub operation: String,
    #[serde(rename = "executedBy")]
    pub executed_by: String,
    pub timestamp: String,
}

impl StatementResponse {
    pub fn from_output(output: StatementOutput) -> Self {
        Self {
            success: true,
            data: output.rows,
            row_count: output.row_count,
            duration: output.duration_ms,
            operation: output.operation.as_str().to_string(),
            executed_by: output.executed_by.into_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error envelope used for every failure status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    /// Allowed-identity set, included only on write-authorization
    /// denials from the execute endpoint for diagnostics.
    #[serde(rename = "allowedIdentities", skip_serializing_if = "Option::is_none")]
    pub allowed_identities: Option<Vec<String>>,
    pub timestamp: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            allowed_identities: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_allowed_identities(mut self, identities: Vec<String>) -> Self {
        self.allowed_identities = Some(identities);
        self
    }
}

/// Response for the tables listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesResponse {
    pub success: bool,
    pub data: Vec<TableDescription>,
    pub count: usize,
    pub timestamp: String,
}

impl TablesResponse {
    pub fn new(tables: Vec<TableDescription>) -> Self {
        Self {
            success: true,
            count: tables.len(),
            data: tables,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Unknown-route response listing the known endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub success: bool,
    pub error: String,
    pub routes: Vec<String>,
    pub timestamp: String,
}

impl NotFoundResponse {
    pub fn new() -> Self {
        Self {
            success: false,
            error: "unknown route".to_string(),
            routes: vec![
                "GET /health".to_string(),
                "GET /tables".to_string(),
                "POST /query".to_string(),
                "POST /execute".to_string(),
            ],
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl Default for NotFoundResponse {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlgate_commons::{Identity, OperationKind};

    #[test]
    fn statement_response_uses_camel_case_fields() {
        let output = StatementOutput {
            operation: OperationKind::Read,
            rows: vec![serde_json::json!({"id": 1})],
            row_count: 1,
            duration_ms: 15,
            executed_by: Identity::from("alice"),
        };
        let json = serde_json::to_string(&StatementResponse::from_output(output)).unwrap();
        assert!(json.contains("\"rowCount\":1"));
        assert!(json.contains("\"executedBy\":\"alice\""));
        assert!(json.contains("\"operation\":\"read\""));
        assert!(json.contains("\"success\":true"));
    }

    #[test]
    fn error_response_omits_identities_by_default() {
        let json = serde_json::to_string(&ErrorResponse::new("boom")).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("boom"));
        assert!(!json.contains("allowedIdentities"));
    }

    #[test]
    fn error_response_lists_identities_when_requested() {
        let resp = ErrorResponse::new("denied")
            .with_allowed_identities(vec!["bob".to_string(), "carol".to_string()]);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"allowedIdentities\":[\"bob\",\"carol\"]"));
    }

    #[test]
    fn not_found_lists_all_routes() {
        let resp = NotFoundResponse::new();
        assert_eq!(resp.routes.len(), 4);
        assert!(resp.routes.iter().any(|r| r.contains("/execute")));
    }
}

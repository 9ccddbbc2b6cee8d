//! Gateway error taxonomy.
//!
//! Validation and authorization failures carry their specific reason;
//! execution failures carry only the sanitized message. Raw driver text
//! never appears in these variants.

use thiserror::Error;

use crate::models::ErrorKind;

/// Main error type for gateway operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Statement rejected: {0}")]
    ValidationRejected(String),

    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Execution timed out: {0}")]
    ExecutionTimeout(String),

    #[error("Execution authentication failure: {0}")]
    ExecutionAuthFailure(String),

    #[error("Schema error: {0}")]
    ExecutionSchemaError(String),

    #[error("Execution failed: {0}")]
    ExecutionGenericFailure(String),
}

impl GatewayError {
    /// Builds the execution-failure variant matching a sanitized kind.
    pub fn from_execution(kind: ErrorKind, public_message: impl Into<String>) -> Self {
        let msg = public_message.into();
        match kind {
            ErrorKind::AuthFailure => GatewayError::ExecutionAuthFailure(msg),
            ErrorKind::Timeout => GatewayError::ExecutionTimeout(msg),
            ErrorKind::SchemaError => GatewayError::ExecutionSchemaError(msg),
            ErrorKind::Generic => GatewayError::ExecutionGenericFailure(msg),
        }
    }

    /// True when the request was stopped before reaching the execution engine.
    pub fn stopped_before_execution(&self) -> bool {
        matches!(
            self,
            GatewayError::ValidationRejected(_) | GatewayError::AuthorizationDenied(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_kinds_map_to_variants() {
        assert!(matches!(
            GatewayError::from_execution(ErrorKind::Timeout, "t"),
            GatewayError::ExecutionTimeout(_)
        ));
        assert!(matches!(
            GatewayError::from_execution(ErrorKind::AuthFailure, "a"),
            GatewayError::ExecutionAuthFailure(_)
        ));
        assert!(matches!(
            GatewayError::from_execution(ErrorKind::SchemaError, "s"),
            GatewayError::ExecutionSchemaError(_)
        ));
        assert!(matches!(
            GatewayError::from_execution(ErrorKind::Generic, "g"),
            GatewayError::ExecutionGenericFailure(_)
        ));
    }

    #[test]
    fn pre_execution_errors_are_flagged() {
        assert!(GatewayError::ValidationRejected("x".into()).stopped_before_execution());
        assert!(GatewayError::AuthorizationDenied("x".into()).stopped_before_execution());
        assert!(!GatewayError::ExecutionTimeout("x".into()).stopped_before_execution());
    }
}

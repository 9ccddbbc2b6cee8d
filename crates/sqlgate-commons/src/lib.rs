// SQLGate Commons
//
// Shared models and error types used across the gateway crates.

pub mod errors;
pub mod models;

pub use errors::{GatewayError, Result};
pub use models::{
    AuditOutcome, AuditRecord, AuthorizationDecision, Capabilities, ErrorKind, ExecutionFailure,
    ExecutionOutcome, ExecutionSuccess, Identity, OperationKind, StatementRequest,
    ValidationOutcome,
};

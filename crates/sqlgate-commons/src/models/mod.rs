//! Core data model for the gateway pipeline.

mod audit;
mod capabilities;
mod execution;
mod identity;
mod operation_kind;
mod statement;

pub use audit::{AuditOutcome, AuditRecord};
pub use capabilities::Capabilities;
pub use execution::{ErrorKind, ExecutionFailure, ExecutionOutcome, ExecutionSuccess};
pub use identity::Identity;
pub use operation_kind::OperationKind;
pub use statement::{AuthorizationDecision, StatementRequest, ValidationOutcome};

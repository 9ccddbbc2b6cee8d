//! Pipeline orchestration.
//!
//! Per-request state machine:
//! Received -> Validated | Rejected(terminal)
//! Validated -> Classified
//! Classified(Read) -> Executed | Failed(terminal)
//! Classified(Write) -> Authorized | Denied(terminal)
//! Authorized -> Executed | Failed(terminal)
//!
//! Every terminal state emits exactly one audit record and produces
//! exactly one result for the caller.

use std::sync::Arc;

use chrono::Utc;
use log::debug;

use sqlgate_commons::{
    AuditOutcome, AuditRecord, AuthorizationDecision, GatewayError, Identity, OperationKind,
    StatementRequest, ValidationOutcome,
};

use crate::audit::{self, AuditSink};
use crate::authz::AuthorizationGate;
use crate::executor::StatementExecutor;
use crate::{classifier, validator};

/// Whether the entry point accepts write-classified statements at all.
///
/// The query endpoint is read-only regardless of identity; the execute
/// endpoint defers to the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite,
}

/// Successful traversal result handed back to the HTTP layer.
#[derive(Debug, Clone)]
pub struct StatementOutput {
    pub operation: OperationKind,
    pub rows: Vec<serde_json::Value>,
    pub row_count: usize,
    pub duration_ms: u64,
    pub executed_by: Identity,
}

/// The gateway pipeline: validation, classification, authorization,
/// execution forwarding, sanitization, and audit emission.
pub struct Gateway {
    gate: AuthorizationGate,
    executor: Arc<dyn StatementExecutor>,
    audit: Arc<dyn AuditSink>,
}

impl Gateway {
    pub fn new(
        gate: AuthorizationGate,
        executor: Arc<dyn StatementExecutor>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self { gate, executor, audit }
    }

    /// The gate, exposed for diagnostic responses (allowed-identity set).
    pub fn authorization(&self) -> &AuthorizationGate {
        &self.gate
    }

    /// Runs one statement request through the pipeline.
    ///
    /// The request reaches the execution engine only if validation passed
    /// and the statement is a read or its identity holds write privilege.
    pub async fn submit(
        &self,
        request: StatementRequest,
        mode: AccessMode,
    ) -> Result<StatementOutput, GatewayError> {
        let validation = validator::validate(&request.sql);
        let operation = classifier::classify(&request.sql);

        if !validation.valid {
            let reason = validation
                .reason
                .clone()
                .unwrap_or_else(|| "statement matched the deny-list".to_string());
            self.finish(&request, operation, validation, None, AuditOutcome::Rejected);
            return Err(GatewayError::ValidationRejected(reason));
        }

        let authorization = if operation.is_write() {
            let decision = match mode {
                AccessMode::ReadOnly => AuthorizationDecision::deny(
                    "write statements are not accepted on the read-only endpoint",
                ),
                AccessMode::ReadWrite => self.gate.authorize(&request.identity, operation),
            };
            if !decision.allowed {
                let reason = decision
                    .reason
                    .clone()
                    .unwrap_or_else(|| "write privilege required".to_string());
                self.finish(&request, operation, validation, Some(decision), AuditOutcome::Denied);
                return Err(GatewayError::AuthorizationDenied(reason));
            }
            Some(decision)
        } else {
            None
        };

        match self.executor.execute(&request.sql, operation).await {
            Ok(success) => {
                debug!(
                    target: "sql::exec",
                    "statement executed | identity='{}' | operation={} | rows={} | took={}ms",
                    request.identity,
                    operation,
                    success.row_count,
                    success.duration_ms
                );
                let outcome = AuditOutcome::Executed {
                    row_count: success.row_count,
                    duration_ms: success.duration_ms,
                };
                let executed_by = request.identity.clone();
                self.finish(&request, operation, validation, authorization, outcome);
                Ok(StatementOutput {
                    operation,
                    rows: success.rows,
                    row_count: success.row_count,
                    duration_ms: success.duration_ms,
                    executed_by,
                })
            }
            Err(failure) => {
                let outcome = AuditOutcome::Failed {
                    error_kind: failure.error_kind,
                    raw_error: failure.raw_error,
                    duration_ms: failure.duration_ms,
                };
                self.finish(&request, operation, validation, authorization, outcome);
                Err(GatewayError::from_execution(failure.error_kind, failure.public_message))
            }
        }
    }

    /// Terminal point of the traversal: emits the single audit record.
    fn finish(
        &self,
        request: &StatementRequest,
        operation: OperationKind,
        validation: ValidationOutcome,
        authorization: Option<AuthorizationDecision>,
        outcome: AuditOutcome,
    ) {
        let record = AuditRecord {
            identity: request.identity.clone(),
            sql_excerpt: AuditRecord::excerpt(&request.sql),
            operation,
            validation,
            authorization,
            outcome,
            timestamp: Utc::now(),
        };
        audit::emit(self.audit.as_ref(), &record);
    }
}

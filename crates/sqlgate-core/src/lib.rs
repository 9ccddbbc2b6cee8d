// SQLGate Core
//
// The gateway request pipeline: deny-list validation, read/write
// classification, write authorization, execution forwarding, error
// sanitization, and audit emission.

pub mod audit;
pub mod authz;
pub mod catalog;
pub mod classifier;
pub mod executor;
pub mod gateway;
pub mod sanitizer;
pub mod validator;

pub use audit::{AuditSink, LogAuditSink, MemoryAuditSink};
pub use authz::AuthorizationGate;
pub use executor::{PgStatementExecutor, StatementExecutor};
pub use gateway::{AccessMode, Gateway, StatementOutput};

//! Audit sinks.
//!
//! Every pipeline traversal emits exactly one record through an
//! `AuditSink`. A sink failure is surfaced as an operational warning and
//! never changes the response already prepared for the caller.

use std::fmt;
use std::sync::Mutex;

use log::{info, warn};
use sqlgate_commons::AuditRecord;

/// Error raised by a sink that could not persist a record.
#[derive(Debug, Clone)]
pub struct AuditWriteError(pub String);

impl fmt::Display for AuditWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audit write failed: {}", self.0)
    }
}

impl std::error::Error for AuditWriteError {}

/// Append-only destination for audit records.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditWriteError>;
}

/// Default sink: one structured JSON line per record on the `audit` log
/// target, picked up by whatever log transport the process is wired to.
#[derive(Debug, Default)]
pub struct LogAuditSink;

impl AuditSink for LogAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditWriteError> {
        let line = serde_json::to_string(record).map_err(|e| AuditWriteError(e.to_string()))?;
        info!(target: "audit", "{}", line);
        Ok(())
    }
}

/// In-memory sink for tests; records can be inspected after the fact.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("audit sink lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("audit sink lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditWriteError> {
        self.records
            .lock()
            .map_err(|e| AuditWriteError(e.to_string()))?
            .push(record.clone());
        Ok(())
    }
}

/// Emits a record through the sink, downgrading failures to a warning.
pub(crate) fn emit(sink: &dyn AuditSink, record: &AuditRecord) {
    if let Err(e) = sink.record(record) {
        warn!(
            "failed to write audit record for identity '{}': {}",
            record.identity, e
        );
    }
}

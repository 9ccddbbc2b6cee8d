//! Statement forwarding to the pooled SQL client.
//!
//! One statement executes per request: no batching, no transactions, no
//! retry, and no cancellation once the statement has been dispatched.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row, TypeInfo};

use sqlgate_commons::{ExecutionFailure, ExecutionOutcome, ExecutionSuccess, OperationKind};

use crate::sanitizer;

/// Capability consumed by the pipeline: `execute(sql) -> rows | error`.
///
/// The gateway holds this behind a trait object so tests can substitute
/// a scripted engine.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, sql: &str, kind: OperationKind) -> ExecutionOutcome;
}

/// Production executor over a bounded Postgres connection pool.
///
/// Pool capacity and connection-acquire timeout are configured on the
/// pool itself; exhaustion surfaces as a timeout outcome. A separate
/// statement timeout bounds total execution wall time.
pub struct PgStatementExecutor {
    pool: PgPool,
    statement_timeout: Duration,
}

impl PgStatementExecutor {
    pub fn new(pool: PgPool, statement_timeout: Duration) -> Self {
        Self { pool, statement_timeout }
    }

    async fn run(&self, sql: &str, kind: OperationKind) -> Result<(Vec<PgRow>, usize), sqlx::Error> {
        match kind {
            OperationKind::Read => {
                let rows = sqlx::query(sql).persistent(false).fetch_all(&self.pool).await?;
                let count = rows.len();
                Ok((rows, count))
            }
            OperationKind::Write => {
                let done = sqlx::query(sql).persistent(false).execute(&self.pool).await?;
                Ok((Vec::new(), done.rows_affected() as usize))
            }
        }
    }
}

#[async_trait]
impl StatementExecutor for PgStatementExecutor {
    async fn execute(&self, sql: &str, kind: OperationKind) -> ExecutionOutcome {
        let start = Instant::now();

        let result = tokio::time::timeout(self.statement_timeout, self.run(sql, kind)).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok((rows, row_count))) => Ok(ExecutionSuccess {
                rows: rows.iter().map(row_to_json).collect(),
                row_count,
                duration_ms,
            }),
            Ok(Err(e)) => {
                let raw = describe_driver_error(&e);
                let (error_kind, public_message) = sanitizer::sanitize(&raw);
                Err(ExecutionFailure { error_kind, public_message, raw_error: raw, duration_ms })
            }
            Err(_) => {
                let raw = format!(
                    "statement timed out after {}s",
                    self.statement_timeout.as_secs()
                );
                let (error_kind, public_message) = sanitizer::sanitize(&raw);
                Err(ExecutionFailure { error_kind, public_message, raw_error: raw, duration_ms })
            }
        }
    }
}

/// Expands a driver error into the detailed text kept in the audit trail.
fn describe_driver_error(e: &sqlx::Error) -> String {
    if let Some(db_err) = e.as_database_error() {
        let mut msg = db_err.message().to_string();
        if let Some(code) = db_err.code() {
            msg.push_str(&format!(" (code: {})", code));
        }
        if let Some(constraint) = db_err.constraint() {
            msg.push_str(&format!(" (constraint: {})", constraint));
        }
        if let Some(table) = db_err.table() {
            msg.push_str(&format!(" (table: {})", table));
        }
        msg
    } else {
        e.to_string()
    }
}

/// Converts a row to a JSON object keyed by column name.
fn row_to_json(row: &PgRow) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = column_to_json(row, i, column.type_info().name());
        object.insert(column.name().to_string(), value);
    }
    serde_json::Value::Object(object)
}

fn column_to_json(row: &PgRow, i: usize, type_name: &str) -> serde_json::Value {
    use serde_json::Value;

    match type_name {
        "INT2" => row
            .try_get::<i16, _>(i)
            .map(|v| Value::Number((v as i64).into()))
            .unwrap_or(Value::Null),
        "INT4" => row
            .try_get::<i32, _>(i)
            .map(|v| Value::Number((v as i64).into()))
            .unwrap_or(Value::Null),
        "INT8" => row
            .try_get::<i64, _>(i)
            .map(|v| Value::Number(v.into()))
            .unwrap_or(Value::Null),
        "FLOAT4" => row
            .try_get::<f32, _>(i)
            .ok()
            .and_then(|v| serde_json::Number::from_f64(v as f64).map(Value::Number))
            .unwrap_or(Value::Null),
        "FLOAT8" | "NUMERIC" => row
            .try_get::<f64, _>(i)
            .ok()
            .and_then(|v| serde_json::Number::from_f64(v).map(Value::Number))
            .unwrap_or(Value::Null),
        "BOOL" => row.try_get::<bool, _>(i).map(Value::Bool).unwrap_or(Value::Null),
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => row
            .try_get::<String, _>(i)
            .map(Value::String)
            .unwrap_or(Value::Null),
        "TIMESTAMPTZ" => row
            .try_get::<DateTime<Utc>, _>(i)
            .map(|v| Value::String(v.to_rfc3339()))
            .unwrap_or(Value::Null),
        "TIMESTAMP" => row
            .try_get::<NaiveDateTime, _>(i)
            .map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()))
            .unwrap_or(Value::Null),
        "DATE" => row
            .try_get::<chrono::NaiveDate, _>(i)
            .map(|v| Value::String(v.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null),
        "TIME" => row
            .try_get::<chrono::NaiveTime, _>(i)
            .map(|v| Value::String(v.format("%H:%M:%S%.f").to_string()))
            .unwrap_or(Value::Null),
        "JSON" | "JSONB" => row.try_get::<serde_json::Value, _>(i).unwrap_or(Value::Null),
        "BYTEA" => row
            .try_get::<Vec<u8>, _>(i)
            .map(|v| Value::String(base64_engine.encode(&v)))
            .unwrap_or(Value::Null),
        _ => {
            // Last-resort decodes for types without a dedicated arm.
            if let Ok(v) = row.try_get::<bool, _>(i) {
                Value::Bool(v)
            } else if let Ok(v) = row.try_get::<i64, _>(i) {
                Value::Number(v.into())
            } else if let Ok(v) = row.try_get::<f64, _>(i) {
                serde_json::Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
            } else if let Ok(v) = row.try_get::<String, _>(i) {
                Value::String(v)
            } else if let Ok(v) = row.try_get::<serde_json::Value, _>(i) {
                v
            } else {
                warn!("unhandled column type '{}', returning null", type_name);
                Value::Null
            }
        }
    }
}

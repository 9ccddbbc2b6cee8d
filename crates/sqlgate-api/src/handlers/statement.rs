//! Statement submission handlers.
//!
//! `/query` accepts read-classified statements only; `/execute` accepts
//! both kinds and defers write authorization to the gateway. Both map
//! pipeline errors onto the shared error envelope: 400 for deny-list
//! rejections, 403 for authorization denials, 500 for execution
//! failures (sanitized message only).

use std::sync::Arc;

use actix_web::{post, web, HttpResponse, Responder};

use sqlgate_commons::{GatewayError, Identity, StatementRequest};
use sqlgate_core::{AccessMode, Gateway};

use crate::models::{ErrorResponse, StatementBody, StatementResponse};

/// POST /query - submit a read statement.
#[post("/query")]
pub async fn query(
    body: web::Json<StatementBody>,
    gateway: web::Data<Arc<Gateway>>,
) -> impl Responder {
    run_statement(body.into_inner(), gateway.get_ref(), AccessMode::ReadOnly).await
}

/// POST /execute - submit a read or write statement.
#[post("/execute")]
pub async fn execute(
    body: web::Json<StatementBody>,
    gateway: web::Data<Arc<Gateway>>,
) -> impl Responder {
    run_statement(body.into_inner(), gateway.get_ref(), AccessMode::ReadWrite).await
}

async fn run_statement(body: StatementBody, gateway: &Gateway, mode: AccessMode) -> HttpResponse {
    let identity = match body.identity.as_deref() {
        Some(s) if !s.trim().is_empty() => Identity::from(s),
        _ => {
            return HttpResponse::BadRequest()
                .json(ErrorResponse::new("request requires a non-empty identity"));
        }
    };

    if body.sql.trim().is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse::new("sql must not be empty"));
    }

    let request = StatementRequest::new(body.sql, identity);
    match gateway.submit(request, mode).await {
        Ok(output) => HttpResponse::Ok().json(StatementResponse::from_output(output)),
        Err(err) => error_response(err, gateway, mode),
    }
}

fn error_response(err: GatewayError, gateway: &Gateway, mode: AccessMode) -> HttpResponse {
    match &err {
        GatewayError::ValidationRejected(_) => {
            HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string()))
        }
        GatewayError::AuthorizationDenied(_) => {
            let mut response = ErrorResponse::new(err.to_string());
            if mode == AccessMode::ReadWrite {
                response = response.with_allowed_identities(
                    gateway
                        .authorization()
                        .privileged_identities()
                        .iter()
                        .map(|i| i.as_str().to_string())
                        .collect(),
                );
            }
            HttpResponse::Forbidden().json(response)
        }
        _ => HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string())),
    }
}

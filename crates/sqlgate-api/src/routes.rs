//! HTTP route registration.

use actix_web::{web, HttpResponse};

use crate::handlers;
use crate::models::NotFoundResponse;

/// Register all gateway routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health)
        .service(handlers::tables)
        .service(handlers::query)
        .service(handlers::execute)
        .default_service(web::route().to(not_found));
}

/// Fallback for unknown routes; lists the known endpoints.
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(NotFoundResponse::new())
}

use actix_web::{get, web, HttpResponse, Responder};
use log::error;
use sqlx::PgPool;

use sqlgate_core::{catalog, sanitizer};

use crate::models::{ErrorResponse, TablesResponse};

/// GET /tables - list user tables with column metadata.
///
/// Metadata queries are issued by the gateway itself, parameterized at
/// the driver boundary; caller statements never reach this path.
#[get("/tables")]
pub async fn tables(pool: web::Data<PgPool>) -> impl Responder {
    match catalog::list_tables(pool.get_ref()).await {
        Ok(tables) => HttpResponse::Ok().json(TablesResponse::new(tables)),
        Err(e) => {
            let raw = e.to_string();
            error!("table listing failed: {}", raw);
            let (_, public_message) = sanitizer::sanitize(&raw);
            HttpResponse::InternalServerError().json(ErrorResponse::new(public_message))
        }
    }
}

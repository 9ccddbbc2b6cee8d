// SQLGate Server
//
// HTTP gateway forwarding validated, authorized SQL statements to a
// single Postgres database.

mod config;
mod logging;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use log::info;
use sqlx::postgres::PgPoolOptions;

use sqlgate_commons::Identity;
use sqlgate_core::{AuthorizationGate, Gateway, LogAuditSink, PgStatementExecutor};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match config::ServerConfig::from_file("config.toml") {
        Ok(cfg) => cfg,
        Err(_) => {
            eprintln!("Warning: config.toml not found, using defaults");
            config::ServerConfig::default()
        }
    };

    // Initialize logging
    logging::init_logging(&config.logging.level)?;

    info!("Starting SQLGate Server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded: host={}, port={}, pool={} connections",
        config.server.host, config.server.port, config.database.max_connections
    );

    // Connection pool bounds the number of in-flight statements; requests
    // beyond capacity wait up to the acquire timeout and then fail with a
    // timeout outcome.
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
        .connect_lazy(&config.database.url)?;
    info!("Postgres pool configured");

    // Privileged set is fixed for the lifetime of the process.
    let gate = AuthorizationGate::new(
        config
            .auth
            .privileged_identities
            .iter()
            .map(|s| Identity::from(s.as_str())),
    );
    info!(
        "Authorization gate initialized with {} privileged identit{}",
        config.auth.privileged_identities.len(),
        if config.auth.privileged_identities.len() == 1 { "y" } else { "ies" }
    );

    let executor = PgStatementExecutor::new(
        pool.clone(),
        Duration::from_secs(config.database.statement_timeout_seconds),
    );
    let gateway = Arc::new(Gateway::new(gate, Arc::new(executor), Arc::new(LogAuditSink)));
    info!("Gateway pipeline initialized");

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting HTTP server on {}", bind_addr);
    info!("Endpoints: GET /health, GET /tables, POST /query, POST /execute");

    let workers = config.server.workers;

    // Start HTTP server
    HttpServer::new(move || {
        // Configure CORS for web browser clients
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(pool.clone()))
            .configure(sqlgate_api::routes::configure_routes)
    })
    .bind(&bind_addr)?
    .workers(if workers == 0 { num_cpus::get() } else { workers })
    .run()
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

//! Logging initialization for the server binary.

use std::io::Write;

/// Initialize env_logger honoring the configured level.
///
/// `RUST_LOG` still takes precedence when set, so operators can raise
/// verbosity per module without touching the config file. Audit records
/// flow through the `audit` target and stay visible at the configured
/// level.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

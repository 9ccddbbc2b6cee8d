// Configuration module
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Postgres connection URL for the gateway's database role
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Bounded wait for a pooled connection before the request fails
    /// with a timeout outcome
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    /// Wall-clock bound for a single statement's execution
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_seconds: u64,
}

/// Authorization settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthSettings {
    /// Identities allowed to run write-classified statements.
    /// Loaded once at startup and never mutated afterwards.
    #[serde(default)]
    pub privileged_identities: Vec<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

// Default value functions
fn default_workers() -> usize {
    0
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_statement_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.apply_env_overrides()?;

        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides for sensitive configuration
    ///
    /// Supported environment variables:
    /// - SQLGATE_DATABASE_URL: Override database.url
    /// - SQLGATE_HOST: Override server.host
    /// - SQLGATE_PORT: Override server.port
    /// - SQLGATE_PRIVILEGED_IDENTITIES: comma-separated override of
    ///   auth.privileged_identities
    /// - SQLGATE_LOG_LEVEL: Override logging.level
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        // Connection URL is sensitive - it carries credentials
        if let Ok(url) = env::var("SQLGATE_DATABASE_URL") {
            self.database.url = url;
        }

        if let Ok(host) = env::var("SQLGATE_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("SQLGATE_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid SQLGATE_PORT value: {}", port_str))?;
        }

        if let Ok(identities) = env::var("SQLGATE_PRIVILEGED_IDENTITIES") {
            self.auth.privileged_identities = identities
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(level) = env::var("SQLGATE_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if self.database.url.is_empty() {
            return Err(anyhow::anyhow!("database.url cannot be empty"));
        }

        if self.database.max_connections == 0 {
            return Err(anyhow::anyhow!("database.max_connections cannot be 0"));
        }

        if self.database.acquire_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("database.acquire_timeout_seconds cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        Ok(())
    }
}

/// Default configuration (useful for testing)
impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: 0,
            },
            database: DatabaseSettings {
                url: "postgres://sqlgate@localhost:5432/postgres".to_string(),
                max_connections: default_max_connections(),
                acquire_timeout_seconds: default_acquire_timeout(),
                statement_timeout_seconds: default_statement_timeout(),
            },
            auth: AuthSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ServerConfig::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_database_url() {
        let mut config = ServerConfig::default();
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_privileged_set_is_valid() {
        // Legal: the gateway degrades to read-only.
        let config = ServerConfig::default();
        assert!(config.auth.privileged_identities.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_override_privileged_identities() {
        std::env::set_var("SQLGATE_PRIVILEGED_IDENTITIES", "bob, carol, ,dave");

        let mut config = ServerConfig::default();
        config.apply_env_overrides().unwrap();
        std::env::remove_var("SQLGATE_PRIVILEGED_IDENTITIES");

        // Whitespace trimmed, empty entries dropped.
        assert_eq!(config.auth.privileged_identities, vec!["bob", "carol", "dave"]);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
            [server]
            host = "0.0.0.0"
            port = 9090

            [database]
            url = "postgres://gate@db:5432/app"
            max_connections = 4

            [auth]
            privileged_identities = ["bob", "carol"]

            [logging]
            level = "debug"
        "#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.auth.privileged_identities, vec!["bob", "carol"]);
        assert!(config.validate().is_ok());
    }
}

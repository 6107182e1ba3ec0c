//! Process configuration read from the environment.
//!
//! # Responsibility
//! - Collect every environment knob at one bootstrap-time call site.
//!
//! Core stays configuration-free; only this crate reads the environment.

use contacts_core::default_log_level;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_DB_PATH: &str = "contacts.db";
const DEFAULT_PORT: u16 = 3000;

/// Server bootstrap configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database path. `:memory:` yields an ephemeral store.
    pub db_path: String,
    /// TCP listen port.
    pub port: u16,
    /// File-log directory; stderr logging when unset.
    pub log_dir: Option<String>,
    /// Log level name, validated by the logging bootstrap.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            port: DEFAULT_PORT,
            log_dir: None,
            log_level: default_log_level().to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// Recognized variables: `CONTACTS_DB`, `PORT`, `CONTACTS_LOG_DIR`,
    /// `CONTACTS_LOG_LEVEL`. Unset variables fall back to defaults.
    ///
    /// # Errors
    /// Returns a human-readable message when `PORT` is not a valid port
    /// number.
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(db_path) = non_empty_var("CONTACTS_DB") {
            config.db_path = db_path;
        }
        if let Some(port) = non_empty_var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| format!("PORT must be a number in 1-65535, got `{port}`"))?;
        }
        config.log_dir = non_empty_var("CONTACTS_LOG_DIR");
        if let Some(level) = non_empty_var("CONTACTS_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Returns the socket address to bind.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;

    #[test]
    fn defaults_match_documented_values() {
        let config = ServerConfig::default();
        assert_eq!(config.db_path, "contacts.db");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_dir, None);
        assert_eq!(config.addr().port(), 3000);
    }
}

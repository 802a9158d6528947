//! Service settings read from the environment.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{EngineError, EngineResult};

/// Settings for the HTTP service binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Fallback log filter when `RUST_LOG` is not set.
    pub log_level: String,
    /// Directory holding `tax.yaml` and `pay.yaml`.
    pub config_dir: PathBuf,
    /// Optional JSON file of recovery records to preload.
    pub seed_records: Option<PathBuf>,
}

impl ServiceConfig {
    /// Reads settings from the process environment, loading `.env` first if present.
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| EngineError::ConfigParseError {
                    path: "APP_PORT".to_string(),
                    message: format!("'{}' is not a valid port", raw),
                })?,
            None => 3000,
        };
        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let config_dir = lookup("TRADEPAY_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./config/uk"));
        let seed_records = lookup("TRADEPAY_SEED_RECORDS")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            log_level,
            config_dir,
            seed_records,
        })
    }

    /// Resolves the bind address.
    pub fn socket_addr(&self) -> EngineResult<SocketAddr> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| EngineError::ConfigParseError {
                path: "APP_HOST".to_string(),
                message: format!("'{}' is not a valid IP address", self.host),
            })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

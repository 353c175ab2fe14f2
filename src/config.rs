use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub addr: SocketAddr,
    /// The single origin allowed to make cross-origin requests.
    pub cors_origin: HeaderValue,
    /// Create missing tables on startup.
    pub bootstrap_schema: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not in the correct format: {value:?}")]
    Invalid { name: &'static str, value: String },
}

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let host: IpAddr = match lookup("HOST") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "HOST", value })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port: u16 = match lookup("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&origin)
            .ok()
            .filter(|_| origin != "*")
            .ok_or(ConfigError::Invalid { name: "CORS_ORIGIN", value: origin.clone() })?;

        let bootstrap_schema = match lookup("BOOTSTRAP_SCHEMA").as_deref() {
            None | Some("") | Some("0") | Some("false") => false,
            Some("1") | Some("true") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "BOOTSTRAP_SCHEMA",
                    value: other.to_string(),
                });
            }
        };

        Ok(Config {
            database_url,
            addr: SocketAddr::new(host, port),
            cors_origin,
            bootstrap_schema,
        })
    }
}

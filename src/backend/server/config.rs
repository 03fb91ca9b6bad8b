/**
 * Server Configuration
 *
 * This module loads server configuration from environment variables.
 * The binary reads a `.env` file first (via `dotenv`), so either source
 * works in development.
 *
 * # Variables
 *
 * - `JWT_SECRET` (required) - HMAC secret used to sign identity tokens
 * - `HOST` / `PORT` - listen address, default `0.0.0.0:5000`
 * - `TOKEN_TTL_SECS` - token lifetime, default two hours
 * - `BCRYPT_COST` - password hashing cost, default `bcrypt::DEFAULT_COST`
 * - `HISTORY_FILE` - JSON history file, default `history.json`
 * - `HISTORY_DATABASE_URL` - when set, history lives in SQLite instead
 * - `MAX_DOCUMENT_BYTES` - largest accepted document update
 * - `BROADCAST_CAPACITY` - per-connection fan-out buffer
 */

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(2 * 60 * 60);
pub const DEFAULT_HISTORY_FILE: &str = "history.json";
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;
pub const DEFAULT_BROADCAST_CAPACITY: usize = 1024;

/// Where snapshot history is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryBackendConfig {
    /// Whole sequence rewritten atomically to a JSON file
    JsonFile(PathBuf),
    /// SQLite database URL, e.g. `sqlite://history.db`
    Sqlite(String),
    /// Not durable; tests only
    Memory,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub history: HistoryBackendConfig,
    pub max_document_bytes: usize,
    pub broadcast_capacity: usize,
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder(jwt_secret: impl Into<String>) -> ServerConfigBuilder {
        ServerConfigBuilder::new(jwt_secret)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let host: IpAddr = parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port: u16 = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let ttl_secs: u64 = parse_or(&lookup, "TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL.as_secs())?;
        let bcrypt_cost: u32 = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let history = match lookup("HISTORY_DATABASE_URL").filter(|s| !s.is_empty()) {
            Some(url) => HistoryBackendConfig::Sqlite(url),
            None => HistoryBackendConfig::JsonFile(PathBuf::from(
                lookup("HISTORY_FILE").unwrap_or_else(|| DEFAULT_HISTORY_FILE.to_string()),
            )),
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_secs),
            bcrypt_cost,
            history,
            max_document_bytes: parse_or(&lookup, "MAX_DOCUMENT_BYTES", DEFAULT_MAX_DOCUMENT_BYTES)?,
            broadcast_capacity: parse_or(&lookup, "BROADCAST_CAPACITY", DEFAULT_BROADCAST_CAPACITY)?
                .max(1),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

/// Builder for ServerConfig
#[derive(Debug)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            config: ServerConfig {
                bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
                jwt_secret: jwt_secret.into(),
                token_ttl: DEFAULT_TOKEN_TTL,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                history: HistoryBackendConfig::JsonFile(PathBuf::from(DEFAULT_HISTORY_FILE)),
                max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
                broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
            },
        }
    }

    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.config.bind_addr = addr;
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.config.token_ttl = ttl;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn history(mut self, history: HistoryBackendConfig) -> Self {
        self.config.history = history;
        self
    }

    pub fn max_document_bytes(mut self, max: usize) -> Self {
        self.config.max_document_bytes = max;
        self
    }

    pub fn broadcast_capacity(mut self, capacity: usize) -> Self {
        self.config.broadcast_capacity = capacity.max(1);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServerConfig {
        self.config
    }
}

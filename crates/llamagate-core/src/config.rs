//! Gateway configuration resolved from the environment.
//!
//! Every knob has a default that works for a single-host deployment next to
//! a local model daemon, so `llamagate serve` runs with no configuration at
//! all. Values come from environment variables (a `.env` file is loaded by
//! the binary before this runs).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use thiserror::Error;

/// Default HTTP port for the gateway itself.
pub const DEFAULT_PORT: u16 = 8000;

/// Default base URL of the upstream model daemon.
pub const DEFAULT_UPSTREAM_URL: &str = "http://localhost:11434";

/// Default SQLite database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "llamagate.db";

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable is set but does not parse.
    #[error("{var}={value:?} is not a valid {expected}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// The offending value.
        value: String,
        /// What was expected, for the error message.
        expected: &'static str,
    },
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the upstream daemon, no trailing slash.
    pub upstream_base_url: String,
    /// Interface the gateway listens on.
    pub host: String,
    /// Preferred listening port. The listener may walk forward from here if
    /// the port is taken.
    pub port: u16,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// JWT signing secret. `None` means the process generates an ephemeral
    /// one at startup and previously issued tokens will not survive.
    pub secret_key: Option<String>,
    /// Lifetime of operator and key-scoped bearer tokens.
    pub access_token_ttl: Duration,
    /// Lifetime of browser sessions.
    pub session_ttl: Duration,
    /// Per-request timeout when talking to the upstream daemon.
    pub upstream_timeout: StdDuration,
    /// Debug mode: verbose log filtering and louder startup warnings.
    pub debug: bool,
}

impl GatewayConfig {
    /// Read configuration from the environment, applying defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let upstream_base_url = env_string("OLLAMA_BASE_URL")
            .map_or_else(|| DEFAULT_UPSTREAM_URL.to_string(), |url| {
                url.trim_end_matches('/').to_string()
            });
        let host = env_string("LLAMAGATE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = env_parse::<u16>("LLAMAGATE_PORT", "port number")?.unwrap_or(DEFAULT_PORT);
        let database_path = env_string("DATABASE_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH), PathBuf::from);
        let secret_key = env_string("SECRET_KEY");
        let token_ttl_min =
            env_parse::<i64>("ACCESS_TOKEN_TTL_MIN", "number of minutes")?.unwrap_or(30);
        let session_ttl_secs =
            env_parse::<i64>("SESSION_TTL_SECS", "number of seconds")?.unwrap_or(3600);
        let upstream_timeout_secs =
            env_parse::<u64>("UPSTREAM_TIMEOUT_SECS", "number of seconds")?.unwrap_or(120);
        let debug = env_string("DEBUG").is_some_and(|v| parse_bool(&v));

        Ok(Self {
            upstream_base_url,
            host,
            port,
            database_path,
            secret_key,
            access_token_ttl: Duration::minutes(token_ttl_min),
            session_ttl: Duration::seconds(session_ttl_secs),
            upstream_timeout: StdDuration::from_secs(upstream_timeout_secs),
            debug,
        })
    }

    /// `host:port` string for the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read a variable, treating unset and empty as absent.
fn env_string(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse a variable, or `None` when absent.
fn env_parse<T: FromStr>(
    var: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError> {
    match env_string(var) {
        None => Ok(None),
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::Invalid {
                var,
                value,
                expected,
            }
        }),
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

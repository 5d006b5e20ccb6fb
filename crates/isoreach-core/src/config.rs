use std::net::SocketAddr;

use thiserror::Error;

/// Application configuration, read once at startup.
///
/// The two provider credentials are independently optional: a missing key
/// only fails requests that need that provider, never startup. This keeps a
/// walking/driving-only deployment (no transit key) fully usable.
#[derive(Clone)]
pub struct AppConfig {
    pub mapbox_token: Option<String>,
    pub ors_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "mapbox_token",
                &self.mapbox_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "ors_api_key",
                &self.ors_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let mapbox_token = lookup("MAPBOX_ACCESS_TOKEN").ok().filter(|s| !s.is_empty());
    let ors_api_key = lookup("OPENROUTE_SERVICE_KEY")
        .ok()
        .filter(|s| !s.is_empty());

    let bind_addr = parse_addr("ISOREACH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ISOREACH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("ISOREACH_REQUEST_TIMEOUT_SECS", "30")?;

    Ok(AppConfig {
        mapbox_token,
        ors_api_key,
        bind_addr,
        log_level,
        request_timeout_secs,
    })
}

use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::profiles::expiry::ExpiryPolicy;
use crate::profiles::render::AgencyDetails;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub store: StoreConfig,
    pub expiry_policy: ExpiryPolicy,
    pub agency: AgencyDetails,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let expiry_policy = match env::var("APP_EXPIRY_POLICY") {
            Ok(raw) => ExpiryPolicy::parse(&raw)
                .ok_or_else(|| ConfigError::InvalidExpiryPolicy { value: raw })?,
            Err(_) => ExpiryPolicy::default(),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            store: StoreConfig::load()?,
            expiry_policy,
            agency: load_agency(),
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Credentials and collection scope for the external document store.
///
/// Both the credential and the collection id are required; the service cannot
/// do anything useful without them, so their absence is a startup failure.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_key: String,
    pub database_id: String,
    pub cache_ttl: Duration,
}

impl StoreConfig {
    fn load() -> Result<Self, ConfigError> {
        let api_key = require_var("NOTION_API_KEY")?;
        let database_id = require_var("NOTION_KANDIDATEN_DB")?;

        let cache_ttl_secs = env::var("APP_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidCacheTtl)?;

        Ok(Self {
            api_key,
            database_id,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar { name }),
    }
}

fn load_agency() -> AgencyDetails {
    let defaults = AgencyDetails::default();
    let var = |name: &str, fallback: String| env::var(name).unwrap_or(fallback);

    AgencyDetails {
        name: var("AGENCY_NAME", defaults.name),
        contact: var("AGENCY_CONTACT", defaults.contact),
        email: var("AGENCY_EMAIL", defaults.email),
        phone: var("AGENCY_PHONE", defaults.phone),
        address: var("AGENCY_ADDRESS", defaults.address),
        website: var("AGENCY_WEBSITE", defaults.website),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCacheTtl,
    InvalidExpiryPolicy { value: String },
    MissingVar { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCacheTtl => {
                write!(f, "APP_CACHE_TTL_SECS must be a number of seconds")
            }
            ConfigError::InvalidExpiryPolicy { value } => {
                write!(
                    f,
                    "APP_EXPIRY_POLICY '{value}' is not one of: absolute, relative"
                )
            }
            ConfigError::MissingVar { name } => {
                write!(f, "required environment variable {name} is not set")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_CACHE_TTL_SECS",
            "APP_EXPIRY_POLICY",
            "NOTION_API_KEY",
            "NOTION_KANDIDATEN_DB",
        ] {
            env::remove_var(name);
        }
    }

    fn set_store_credentials() {
        env::set_var("NOTION_API_KEY", "secret-key");
        env::set_var("NOTION_KANDIDATEN_DB", "db-123");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        set_store_credentials();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.store.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.expiry_policy, ExpiryPolicy::Absolute);
    }

    #[test]
    fn missing_store_credential_is_fatal() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("NOTION_KANDIDATEN_DB", "db-123");
        match AppConfig::load() {
            Err(ConfigError::MissingVar { name }) => assert_eq!(name, "NOTION_API_KEY"),
            other => panic!("expected missing credential error, got {other:?}"),
        }
    }

    #[test]
    fn expiry_policy_can_be_selected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        set_store_credentials();
        env::set_var("APP_EXPIRY_POLICY", "relative");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.expiry_policy, ExpiryPolicy::RelativeToCreation);
    }

    #[test]
    fn unknown_expiry_policy_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        set_store_credentials();
        env::set_var("APP_EXPIRY_POLICY", "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidExpiryPolicy { .. })
        ));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        set_store_credentials();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }
}

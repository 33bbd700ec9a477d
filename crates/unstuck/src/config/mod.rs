use crate::diagnosis::DiagnosisPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub diagnosis: DiagnosisPolicy,
    pub sessions: SessionConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            diagnosis: load_policy()?,
            sessions: load_sessions()?,
        })
    }
}

fn load_policy() -> Result<DiagnosisPolicy, ConfigError> {
    let defaults = DiagnosisPolicy::default();

    let confidence_threshold = match env::var("APP_CONFIDENCE_THRESHOLD") {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| (0.0..=1.0).contains(value))
            .ok_or(ConfigError::InvalidConfidenceThreshold(raw))?,
        Err(_) => defaults.confidence_threshold,
    };

    let supplementary_limit = match env::var("APP_SUPPLEMENTARY_LIMIT") {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(ConfigError::InvalidSupplementaryLimit(raw))?,
        Err(_) => defaults.supplementary_limit,
    };

    Ok(DiagnosisPolicy {
        confidence_threshold,
        supplementary_limit,
    })
}

fn load_sessions() -> Result<SessionConfig, ConfigError> {
    let idle_ttl_secs = match env::var("APP_SESSION_IDLE_TTL_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(ConfigError::InvalidSessionTtl(raw))?,
        Err(_) => SessionConfig::DEFAULT_IDLE_TTL_SECS,
    };

    Ok(SessionConfig { idle_ttl_secs })
}

/// Lifetime of server-side sessions nobody is answering anymore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub idle_ttl_secs: u32,
}

impl SessionConfig {
    pub const DEFAULT_IDLE_TTL_SECS: u32 = 30 * 60;

    pub fn idle_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::from(self.idle_ttl_secs))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: Self::DEFAULT_IDLE_TTL_SECS,
        }
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidConfidenceThreshold(String),
    InvalidSupplementaryLimit(String),
    InvalidSessionTtl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidConfidenceThreshold(raw) => write!(
                f,
                "APP_CONFIDENCE_THRESHOLD must be a number between 0 and 1 (got '{raw}')"
            ),
            ConfigError::InvalidSupplementaryLimit(raw) => write!(
                f,
                "APP_SUPPLEMENTARY_LIMIT must be a positive integer (got '{raw}')"
            ),
            ConfigError::InvalidSessionTtl(raw) => write!(
                f,
                "APP_SESSION_IDLE_TTL_SECS must be a positive number of seconds (got '{raw}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidConfidenceThreshold(_)
            | ConfigError::InvalidSupplementaryLimit(_)
            | ConfigError::InvalidSessionTtl(_) => None,
        }
    }
}

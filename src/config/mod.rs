//! Configuration management for the travel desk service
//!
//! Values come from environment variables (a `.env` file is loaded first if
//! present), with different requirements per environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::models::Principal;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingEnvVar(String),

    #[error("{0}")]
    InvalidValue(String),

    #[error("PORT '{0}' is not a valid port")]
    InvalidPort(String),
}

/// Deployment environment, from `ENVIRONMENT`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            other => Err(ConfigError::InvalidValue(format!(
                "ENVIRONMENT '{}' is not one of dev, staging, prod",
                other
            ))),
        }
    }
}

impl Environment {
    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Secret used outside production when `IDENTITY_SECRET` is unset
/// Inquiry submissions per client per minute unless configured otherwise
pub const DEFAULT_SUBMISSIONS_PER_MINUTE: u32 = 10;

const DEVELOPMENT_IDENTITY_SECRET: &str = "development-identity-secret-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,

    pub port: u16,

    /// JSON-RPC endpoint of the gateway actor; `None` selects the in-memory gateway
    pub gateway_url: Option<String>,

    /// Per-call timeout for gateway requests
    pub gateway_timeout_secs: u64,

    /// Connection attempts before the gateway slot is left unresolved
    pub gateway_connect_attempts: u32,

    /// HS256 secret shared with the identity provider
    pub identity_secret: String,

    /// Principal granted the admin role by the in-memory gateway
    pub bootstrap_admin: Option<Principal>,

    /// Inquiry submissions allowed per client per minute
    pub submissions_per_minute: u32,

    /// CORS allowed origins, comma separated
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,
}

impl Config {
    /// Read the process environment, after loading `.env` if one exists
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = match lookup("ENVIRONMENT") {
            Some(text) => text.parse::<Environment>()?,
            None => Environment::default(),
        };

        let port = match lookup("PORT") {
            Some(text) => text
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(text))?,
            None => 3001,
        };

        let gateway_url = lookup("GATEWAY_URL").filter(|url| !url.trim().is_empty());
        if gateway_url.is_none() && environment.is_production() {
            return Err(ConfigError::InvalidValue(
                "GATEWAY_URL is required in production; the in-memory gateway is for development only"
                    .to_string(),
            ));
        }

        let gateway_timeout_secs = number_or(&lookup, "GATEWAY_TIMEOUT_SECS", 30u64);
        let gateway_connect_attempts =
            number_or(&lookup, "GATEWAY_CONNECT_ATTEMPTS", 5u32).max(1);

        let identity_secret = match lookup("IDENTITY_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ if environment.is_production() => {
                return Err(ConfigError::MissingEnvVar("IDENTITY_SECRET".to_string()))
            }
            _ => DEVELOPMENT_IDENTITY_SECRET.to_string(),
        };

        let bootstrap_admin = lookup("BOOTSTRAP_ADMIN")
            .filter(|text| !text.trim().is_empty())
            .map(|text| Principal::new(text.trim()));

        let submissions_per_minute = number_or(
            &lookup,
            "SUBMISSIONS_PER_MINUTE",
            DEFAULT_SUBMISSIONS_PER_MINUTE,
        )
        .max(1);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS");

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        Ok(Config {
            environment,
            port,
            gateway_url,
            gateway_timeout_secs,
            gateway_connect_attempts,
            identity_secret,
            bootstrap_admin,
            submissions_per_minute,
            cors_allowed_origins,
            log_level,
        })
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }
}

/// Optional tuning knob; unparsable values fall back to `default` with a warning
fn number_or<T: FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        Some(text) => text.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %text, default = %default, "Ignoring unparsable setting");
            default
        }),
        None => default,
    }
}

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::models::Language;

/// Development default values - NEVER use in production.
pub mod defaults {
    pub const DEV_HOST: &str = "127.0.0.1";
    pub const DEV_PORT: u16 = 8080;
    pub const DEV_SESSION_FILE: &str = "./data/session.json";
    pub const DEV_LANGUAGE: &str = "en";
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory for the built dashboard front-end
    pub static_dir: Option<PathBuf>,
    /// JSON file backing the session flags (in-memory when unset)
    pub session_file: Option<PathBuf>,
    /// Language used until the user picks one
    pub default_language: Language,
    /// Seed a couple of demo projects at startup
    pub seed_demo: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production) - REQUIRED
    /// - `QAD_HOST`: Server host (default: 127.0.0.1)
    /// - `QAD_PORT`: Server port (default: 8080)
    /// - `QAD_STATIC_DIR`: Built front-end directory
    /// - `QAD_SESSION_FILE`: Session flag file (development default: ./data/session.json)
    /// - `QAD_DEFAULT_LANGUAGE`: `en` or `vi` (default: en)
    /// - `QAD_SEED_DEMO`: Seed demo projects (default: true in development)
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_str = env::var("RUST_ENV").map_err(|_| ConfigError::MissingEnvVar("RUST_ENV"))?;

        let environment = Environment::parse(&env_str).ok_or(ConfigError::InvalidValue(
            "RUST_ENV must be 'development' or 'production'",
        ))?;

        let host = env::var("QAD_HOST").unwrap_or_else(|_| defaults::DEV_HOST.to_string());

        let port = env::var("QAD_PORT")
            .unwrap_or_else(|_| defaults::DEV_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("QAD_PORT must be a valid port number"))?;

        let static_dir = env::var("QAD_STATIC_DIR").ok().map(PathBuf::from);

        let session_file = match env::var("QAD_SESSION_FILE") {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) if environment.is_development() => {
                Some(PathBuf::from(defaults::DEV_SESSION_FILE))
            }
            Err(_) => None,
        };

        let default_language = Language::parse(
            &env::var("QAD_DEFAULT_LANGUAGE").unwrap_or_else(|_| defaults::DEV_LANGUAGE.into()),
        )
        .ok_or(ConfigError::InvalidValue(
            "QAD_DEFAULT_LANGUAGE must be 'en' or 'vi'",
        ))?;

        let seed_demo = match env::var("QAD_SEED_DEMO") {
            Ok(v) => parse_bool(&v)
                .ok_or(ConfigError::InvalidValue("QAD_SEED_DEMO must be true or false"))?,
            Err(_) => environment.is_development(),
        };

        let config = Config {
            environment,
            host,
            port,
            static_dir,
            session_file,
            default_language,
            seed_demo,
        };

        if environment.is_production() {
            config.validate_production()?;
        }

        Ok(config)
    }

    /// Validate production settings.
    fn validate_production(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.session_file.is_none() {
            errors.push(
                "QAD_SESSION_FILE is not set. Session flags would be lost on restart.".to_string(),
            );
        }

        if !errors.is_empty() {
            return Err(ConfigError::ProductionValidation(errors));
        }

        Ok(())
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),

    #[error("Production configuration validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    ProductionValidation(Vec<String>),
}

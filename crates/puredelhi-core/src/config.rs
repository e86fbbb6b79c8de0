use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),

    #[error("Failed to parse config: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main configuration for the PureDelhi backend.
///
/// Loaded from an optional `puredelhi.toml` in the working directory (or
/// the path in `PUREDELHI_CONFIG`), then overridden by `PUREDELHI_*`
/// environment variables. Every section has serde defaults so an empty
/// file and no file at all both yield a runnable config.
///
/// Secrets live behind [`SecretString`], so neither `Debug` output nor a
/// config dump can reproduce them.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub wards: WardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Overridden by PUREDELHI_JWT_SECRET; the
    /// baked-in default exists for local development only.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: SecretString,

    #[serde(default = "default_jwt_expiry_hours")]
    pub jwt_expiry_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_expiry_hours: default_jwt_expiry_hours(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key. Overridden by PUREDELHI_AI_API_KEY. Absent means
    /// the advice endpoint answers 500.
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_ai_base_url")]
    pub base_url: String,

    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    #[serde(default = "default_ai_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ai_base_url(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            timeout_secs: default_ai_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WardConfig {
    /// Seed for the synthetic ward dataset generated at startup.
    #[serde(default = "default_ward_seed")]
    pub seed: u64,
}

impl Default for WardConfig {
    fn default() -> Self {
        Self {
            seed: default_ward_seed(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    5000
}

fn default_jwt_secret() -> SecretString {
    SecretString::from("puredelhi-development-secret-do-not-ship-0001")
}

fn default_jwt_expiry_hours() -> u64 {
    24
}

fn default_ai_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}

fn default_primary_model() -> String {
    "gemini-2.0-flash".into()
}

fn default_fallback_model() -> String {
    "gemini-1.5-flash".into()
}

fn default_ai_timeout_secs() -> u64 {
    30
}

fn default_ward_seed() -> u64 {
    0x5EED_DE11
}

impl DashboardConfig {
    /// Load configuration: file (if present) then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PUREDELHI_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("puredelhi.toml"));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            info!("No config file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        let config: Self =
            toml::from_str(&raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("PUREDELHI_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PUREDELHI_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring unparseable PUREDELHI_PORT={}", port),
            }
        }
        if let Ok(secret) = std::env::var("PUREDELHI_JWT_SECRET") {
            self.auth.jwt_secret = SecretString::from(secret);
        }
        if let Ok(key) = std::env::var("PUREDELHI_AI_API_KEY") {
            if !key.is_empty() {
                self.ai.api_key = Some(SecretString::from(key));
            }
        }
        if let Ok(seed) = std::env::var("PUREDELHI_WARD_SEED") {
            match seed.parse() {
                Ok(seed) => self.wards.seed = seed,
                Err(_) => warn!("Ignoring unparseable PUREDELHI_WARD_SEED={}", seed),
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.expose_secret().len() < 32 {
            return Err(ConfigError::ValidationError(
                "jwt_secret must be at least 32 characters".into(),
            ));
        }
        if self.auth.jwt_expiry_hours == 0 {
            return Err(ConfigError::ValidationError(
                "jwt_expiry_hours must be positive".into(),
            ));
        }
        Ok(())
    }
}

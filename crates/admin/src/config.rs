//! Admin configuration loaded from environment variables.
//!
//! Every variable may also be given with the `VITE_` prefix used by the
//! browser build, so an existing dashboard `.env` works unchanged. The
//! unprefixed name wins when both are set. Empty values count as unset.
//!
//! # Environment Variables
//!
//! ## Required
//! - `API_BASE_URL` - REST base URL; absolute, or a path such as `/api/v1`
//! - `API_TARGET` - Origin a relative `API_BASE_URL` is resolved against
//!
//! ## Optional
//! - `APP_NAME` - Display name (default: Exhiibot Admin)
//! - `APP_VERSION` - Display version (default: 1.0.0)
//! - `APP_ENV` - Environment name (default: development)
//! - `SESSION_FILE` - Where the logged-in session is persisted
//!   (default: `$HOME/.exhiibot_user.json`)
//! - `API_TIMEOUT_SECS` - Per-request timeout; unset means no timeout
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment (default: `APP_ENV`)
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Variables that must be present for the tool to start.
pub const REQUIRED_VARS: &[&str] = &["API_BASE_URL", "API_TARGET"];

const DEFAULT_APP_NAME: &str = "Exhiibot Admin";
const DEFAULT_APP_VERSION: &str = "1.0.0";
const DEFAULT_APP_ENV: &str = "development";
const SESSION_FILE_NAME: &str = ".exhiibot_user.json";

/// Prefix accepted for compatibility with the browser build's `.env` files.
const LEGACY_PREFIX: &str = "VITE_";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingEnvVars(Vec<String>),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin tool configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Application identity
    pub app: AppConfig,
    /// Remote API configuration
    pub api: ApiConfig,
    /// Path of the persisted session file
    pub session_file: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

/// Application identity shown in the CLI banner and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub environment: String,
}

impl AppConfig {
    /// Whether the tool runs against production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// Remote REST API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Fully resolved base URL, without a trailing slash
    /// (e.g. `https://tap.example.com/api/v1`).
    pub base_url: String,
    /// Origin the base URL was resolved against.
    pub target: Url,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Build an API configuration from a raw base URL and target origin.
    ///
    /// An absolute `base_url` is used as-is; a relative one (`/api/v1`) is
    /// joined onto `target`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `target` is not an absolute
    /// URL or the base URL cannot be resolved.
    pub fn resolve(base_url: &str, target: &str) -> Result<Self, ConfigError> {
        let target = Url::parse(target)
            .map_err(|e| ConfigError::InvalidEnvVar("API_TARGET".to_string(), e.to_string()))?;

        let resolved = match Url::parse(base_url) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => target.join(base_url).map_err(|e| {
                ConfigError::InvalidEnvVar("API_BASE_URL".to_string(), e.to_string())
            })?,
            Err(e) => {
                return Err(ConfigError::InvalidEnvVar(
                    "API_BASE_URL".to_string(),
                    e.to_string(),
                ));
            }
        };

        if !matches!(resolved.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "API_BASE_URL".to_string(),
                format!("unsupported scheme '{}'", resolved.scheme()),
            ));
        }

        Ok(Self {
            base_url: resolved.as_str().trim_end_matches('/').to_string(),
            target,
            timeout: None,
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVars` naming every absent required
    /// variable, or `ConfigError::InvalidEnvVar` for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get_var(&lookup, key);

        let missing: Vec<String> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(key).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnvVars(missing));
        }

        let base_url = get("API_BASE_URL").unwrap_or_default();
        let target = get("API_TARGET").unwrap_or_default();
        let mut api = ApiConfig::resolve(&base_url, &target)?;
        api.timeout = get("API_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar("API_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let app = AppConfig {
            name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            version: get("APP_VERSION").unwrap_or_else(|| DEFAULT_APP_VERSION.to_string()),
            environment: get("APP_ENV").unwrap_or_else(|| DEFAULT_APP_ENV.to_string()),
        };

        let session_file = get("SESSION_FILE").map_or_else(
            || default_session_file(get("HOME")),
            PathBuf::from,
        );

        let sentry_dsn = get("SENTRY_DSN");
        let sentry_environment = get("SENTRY_ENVIRONMENT").or_else(|| Some(app.environment.clone()));
        let sentry_sample_rate = get("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            app,
            api,
            session_file,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        })
    }
}

/// Look up `key`, falling back to its `VITE_`-prefixed form.
fn get_var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .or_else(|| lookup(&format!("{LEGACY_PREFIX}{key}")).filter(|v| !v.trim().is_empty()))
        .map(|v| v.trim().to_string())
}

fn default_session_file(home: Option<String>) -> PathBuf {
    home.map_or_else(
        || PathBuf::from(SESSION_FILE_NAME),
        |home| PathBuf::from(home).join(SESSION_FILE_NAME),
    )
}

//! Service configuration read once at startup.
//!
//! ```rust
//! use parley::ServiceConfig;
//!
//! let config = ServiceConfig::from_lookup(|key| match key {
//!     "PORT" => Some("9000".to_string()),
//!     _ => None,
//! })
//! .expect("config should parse");
//!
//! assert_eq!(config.bind_address(), "0.0.0.0:9000");
//! assert_eq!(config.default_model, "gpt-3.5-turbo");
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

use pgateway::{DEFAULT_MODEL, GatewayDefaults, SummarizeStyle};
use pprovider::SecretString;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8082;
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// `None` still starts the service; provider calls then fail with an
    /// authentication error.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub host: String,
    pub port: u16,
    pub default_model: String,
    pub summarize_style: SummarizeStyle,
    pub provider_timeout: Duration,
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_model: DEFAULT_MODEL.to_string(),
            summarize_style: SummarizeStyle::default(),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        config.api_key = read("OPENAI_API_KEY").and_then(SecretString::non_empty);

        if let Some(base_url) = read("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(host) = read("HOST") {
            config.host = host;
        }

        if let Some(port) = read("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::new("PORT", format!("'{port}' is not a valid port")))?;
        }

        if let Some(model) = read("PARLEY_DEFAULT_MODEL") {
            config.default_model = model;
        }

        if let Some(style) = read("PARLEY_SUMMARIZE_STYLE") {
            config.summarize_style = style
                .parse()
                .map_err(|err| ConfigError::new("PARLEY_SUMMARIZE_STYLE", format!("{err}")))?;
        }

        if let Some(timeout) = read("PARLEY_PROVIDER_TIMEOUT_SECS") {
            let seconds: u64 = timeout.parse().map_err(|_| {
                ConfigError::new(
                    "PARLEY_PROVIDER_TIMEOUT_SECS",
                    format!("'{timeout}' is not a whole number of seconds"),
                )
            })?;
            if seconds == 0 {
                return Err(ConfigError::new(
                    "PARLEY_PROVIDER_TIMEOUT_SECS",
                    "timeout must be greater than zero",
                ));
            }
            config.provider_timeout = Duration::from_secs(seconds);
        }

        if let Some(filter) = read("RUST_LOG") {
            config.log_filter = filter;
        }

        if let Some(format) = read("LOG_FORMAT") {
            config.log_format = match format.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::new(
                        "LOG_FORMAT",
                        format!("unknown log format '{format}', expected 'text' or 'json'"),
                    ));
                }
            };
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn gateway_defaults(&self) -> GatewayDefaults {
        GatewayDefaults::default().with_model(self.default_model.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub variable: &'static str,
    pub message: String,
}

impl ConfigError {
    pub fn new(variable: &'static str, message: impl Into<String>) -> Self {
        Self {
            variable,
            message: message.into(),
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.variable, self.message)
    }
}

impl Error for ConfigError {}

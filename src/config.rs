// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "https://api.timeweb.cloud";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must use http or https, got `{scheme}`")]
    UnsupportedScheme { key: &'static str, scheme: String },

    #[error("{key} must be a number, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime settings, read from the process environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct Settings {
    pub app_env: String,
    pub app_port: u16,
    pub timeweb_api_base: String,
    pub timeweb_api_token: String,
    pub timeweb_agent_id: String,
    pub timeweb_temperature: f64,
    pub timeweb_top_p: f64,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Endpoint baked into the widget markup served by `/widget`.
    pub widget_api_endpoint: String,
    pub public_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_env: "development".to_string(),
            app_port: 8000,
            timeweb_api_base: DEFAULT_API_BASE.to_string(),
            timeweb_api_token: "dummy-token".to_string(),
            timeweb_agent_id: "agent".to_string(),
            timeweb_temperature: 0.2,
            timeweb_top_p: 0.9,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            widget_api_endpoint: "/chat".to_string(),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(env) = lookup("APP_ENV") {
            settings.app_env = env;
        }
        if let Some(port) = lookup("APP_PORT") {
            settings.app_port = parse_number("APP_PORT", &port)?;
        }
        if let Some(base) = lookup("TIMEWEB_API_BASE") {
            settings.timeweb_api_base = validate_base_url("TIMEWEB_API_BASE", &base)?;
        }
        if let Some(token) = lookup("TIMEWEB_API_TOKEN") {
            settings.timeweb_api_token = token;
        }
        if let Some(agent_id) = lookup("TIMEWEB_AGENT_ID") {
            settings.timeweb_agent_id = agent_id;
        }
        if let Some(temperature) = lookup("TIMEWEB_TEMPERATURE") {
            settings.timeweb_temperature = parse_number("TIMEWEB_TEMPERATURE", &temperature)?;
        }
        if let Some(top_p) = lookup("TIMEWEB_TOP_P") {
            settings.timeweb_top_p = parse_number("TIMEWEB_TOP_P", &top_p)?;
        }
        if let Some(endpoint) = lookup("WIDGET_API_ENDPOINT") {
            settings.widget_api_endpoint = endpoint;
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            settings.public_dir = PathBuf::from(dir);
        }

        Ok(settings)
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

// Internal hostnames such as `http://timeweb-api:8080` are accepted.
fn validate_base_url(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|_| ConfigError::InvalidUrl {
        key,
        value: value.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(value.trim().trim_end_matches('/').to_string()),
        other => Err(ConfigError::UnsupportedScheme {
            key,
            scheme: other.to_string(),
        }),
    }
}

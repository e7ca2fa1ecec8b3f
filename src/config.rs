// Client configuration

use thiserror::Error;

pub const HOST_VAR: &str = "PRESTASHOP_HOST";
pub const API_KEY_VAR: &str = "PRESTASHOP_API_KEY";
pub const TIMEOUT_VAR: &str = "PRESTASHOP_TIMEOUT_MS";
pub const LANGUAGE_VAR: &str = "PRESTASHOP_LANGUAGE_ID";

const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("HTTP client initialization failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct ClientConfig {
    /// Shop host, e.g. `myshop.example.com`. A leading scheme is kept as given.
    pub shop_host: String,
    pub api_key: String,
    pub timeout_ms: u64,
    /// Language id used to pick display texts. `None` takes the first one.
    pub language_id: Option<String>,
}

// Manual impl so the API key never ends up in logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("shop_host", &self.shop_host)
            .field("api_key", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("language_id", &self.language_id)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(shop_host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            shop_host: shop_host.into(),
            api_key: api_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            language_id: None,
        }
    }

    pub fn with_language(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = Some(language_id.into());
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let shop_host = lookup(HOST_VAR).ok_or(ConfigError::MissingVar(HOST_VAR))?;
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        let mut config = Self::new(shop_host, api_key);
        if let Some(value) = lookup(TIMEOUT_VAR) {
            config.timeout_ms = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: TIMEOUT_VAR,
                value,
            })?;
        }
        config.language_id = lookup(LANGUAGE_VAR).filter(|id| !id.trim().is_empty());
        Ok(config)
    }

    /// Root of the webservice, `https://{shop_host}/api` unless the host has a scheme.
    pub fn api_url(&self) -> String {
        let host = self.shop_host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/api", host)
        } else {
            format!("https://{}/api", host)
        }
    }
}

//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `VERACITY_*` environment variables;
//! the provider keys keep their conventional names (`GOOGLE_API_KEY`, `SERPAPI_KEY`).

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_GEMINI_MODEL, DEFAULT_HEADLINE_CACHE_CAPACITY, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_SERPAPI_URL, DEFAULT_TRANSLATE_URL,
};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `0.0.0.0`.
    pub bind_addr: IpAddr,

    /// Serialized linear classifier. Default: `model/classifier.json`.
    pub classifier_path: PathBuf,

    /// Serialized TF-IDF vectorizer. Default: `model/vectorizer.json`.
    pub vectorizer_path: PathBuf,

    /// Key for the Gemini commentary call.
    pub google_api_key: Option<String>,

    /// Key for the SerpAPI news search.
    pub serpapi_key: Option<String>,

    /// Gemini model name. Default: `gemini-1.5-flash`.
    pub gemini_model: String,

    /// News search endpoint.
    pub serpapi_url: String,

    /// Translation endpoint.
    pub translate_url: String,

    /// Whether inputs are translated before vectorization. Default: `true`.
    pub translation_enabled: bool,

    /// Whether `url` inputs are fetched and scraped. Default: `true`.
    pub url_extraction_enabled: bool,

    /// Timeout applied to every outbound call. Default: 10s.
    pub http_timeout: Duration,

    /// Max entries in the headline cache. Default: `256`.
    pub headline_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
            classifier_path: PathBuf::from("model/classifier.json"),
            vectorizer_path: PathBuf::from("model/vectorizer.json"),
            google_api_key: None,
            serpapi_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            serpapi_url: DEFAULT_SERPAPI_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            translation_enabled: true,
            url_extraction_enabled: true,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            headline_cache_capacity: DEFAULT_HEADLINE_CACHE_CAPACITY,
        }
    }
}

// Keys are redacted so the config can be logged.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("classifier_path", &self.classifier_path)
            .field("vectorizer_path", &self.vectorizer_path)
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "<set>"))
            .field("serpapi_key", &self.serpapi_key.as_ref().map(|_| "<set>"))
            .field("gemini_model", &self.gemini_model)
            .field("serpapi_url", &self.serpapi_url)
            .field("translate_url", &self.translate_url)
            .field("translation_enabled", &self.translation_enabled)
            .field("url_extraction_enabled", &self.url_extraction_enabled)
            .field("http_timeout", &self.http_timeout)
            .field("headline_cache_capacity", &self.headline_cache_capacity)
            .finish()
    }
}

impl Config {
    const ENV_PORT: &'static str = "VERACITY_PORT";
    const ENV_PORT_FALLBACK: &'static str = "PORT";
    const ENV_BIND_ADDR: &'static str = "VERACITY_BIND_ADDR";
    const ENV_CLASSIFIER_PATH: &'static str = "VERACITY_CLASSIFIER_PATH";
    const ENV_VECTORIZER_PATH: &'static str = "VERACITY_VECTORIZER_PATH";
    const ENV_GOOGLE_API_KEY: &'static str = "GOOGLE_API_KEY";
    const ENV_SERPAPI_KEY: &'static str = "SERPAPI_KEY";
    const ENV_GEMINI_MODEL: &'static str = "VERACITY_GEMINI_MODEL";
    const ENV_SERPAPI_URL: &'static str = "VERACITY_SERPAPI_URL";
    const ENV_TRANSLATE_URL: &'static str = "VERACITY_TRANSLATE_URL";
    const ENV_TRANSLATION: &'static str = "VERACITY_TRANSLATION";
    const ENV_URL_EXTRACTION: &'static str = "VERACITY_URL_EXTRACTION";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "VERACITY_HTTP_TIMEOUT_SECS";
    const ENV_HEADLINE_CACHE_CAPACITY: &'static str = "VERACITY_HEADLINE_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let classifier_path =
            Self::parse_path_from_env(Self::ENV_CLASSIFIER_PATH, defaults.classifier_path);
        let vectorizer_path =
            Self::parse_path_from_env(Self::ENV_VECTORIZER_PATH, defaults.vectorizer_path);
        let google_api_key = Self::parse_optional_string_from_env(Self::ENV_GOOGLE_API_KEY);
        let serpapi_key = Self::parse_optional_string_from_env(Self::ENV_SERPAPI_KEY);
        let gemini_model = Self::parse_string_from_env(Self::ENV_GEMINI_MODEL, defaults.gemini_model);
        let serpapi_url = Self::parse_string_from_env(Self::ENV_SERPAPI_URL, defaults.serpapi_url);
        let translate_url =
            Self::parse_string_from_env(Self::ENV_TRANSLATE_URL, defaults.translate_url);
        let translation_enabled =
            Self::parse_bool_from_env(Self::ENV_TRANSLATION, defaults.translation_enabled)?;
        let url_extraction_enabled =
            Self::parse_bool_from_env(Self::ENV_URL_EXTRACTION, defaults.url_extraction_enabled)?;
        let http_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_HTTP_TIMEOUT_SECS,
            defaults.http_timeout.as_secs(),
        ));
        let headline_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_HEADLINE_CACHE_CAPACITY,
            defaults.headline_cache_capacity,
        );

        Ok(Self {
            port,
            bind_addr,
            classifier_path,
            vectorizer_path,
            google_api_key,
            serpapi_key,
            gemini_model,
            serpapi_url,
            translate_url,
            translation_enabled,
            url_extraction_enabled,
            http_timeout,
            headline_cache_capacity,
        })
    }

    /// Validates basic invariants. Model paths are not checked: missing
    /// artifacts degrade the service instead of aborting startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_HTTP_TIMEOUT_SECS,
                reason: "timeout must be at least one second".to_string(),
            });
        }

        if self.headline_cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_HEADLINE_CACHE_CAPACITY,
                reason: "capacity must be greater than zero".to_string(),
            });
        }

        if self.gemini_model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_GEMINI_MODEL,
                reason: "model name cannot be empty".to_string(),
            });
        }

        Self::validate_endpoint(Self::ENV_SERPAPI_URL, &self.serpapi_url)?;
        Self::validate_endpoint(Self::ENV_TRANSLATE_URL, &self.translate_url)?;

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// `true` when a Gemini key is configured.
    pub fn gemini_configured(&self) -> bool {
        self.google_api_key.is_some()
    }

    /// `true` when a SerpAPI key is configured.
    pub fn headlines_configured(&self) -> bool {
        self.serpapi_key.is_some()
    }

    fn validate_endpoint(name: &'static str, value: &str) -> Result<(), ConfigError> {
        let parsed = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            source: e,
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::InvalidValue {
                name,
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(())
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        let value = env::var(Self::ENV_PORT).or_else(|_| env::var(Self::ENV_PORT_FALLBACK));
        match value {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                "" => Ok(default),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_string_from_env(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

use crate::error::{Result, ZaimError};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::redirect::Policy;
use std::time::Duration;

/// Create the default HTTP client for Zaim API requests
/// with connection pooling and the configured timeouts.
///
/// Redirects are not followed: a 3xx is reported as-is, and the signature
/// only covers the original URL anyway.
pub fn create_rest_client(config: &Config) -> Result<Client> {
    ClientBuilder::new()
        .pool_max_idle_per_host(10)
        .redirect(Policy::none())
        .timeout(config.timeout)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| ZaimError::RequestBuild(format!("failed to create HTTP client: {}", e)))
}

/// Configuration for the Zaim API client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host
    pub host: String,
    /// Path prefix shared by every endpoint
    pub base_path: String,
    /// Service name used in API error messages
    pub service_name: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: "api.zaim.net".to_string(),
            base_path: "/v2".to_string(),
            service_name: "Zaim".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: String, host: String) -> Self {
        Config {
            scheme,
            host,
            ..Config::default()
        }
    }

    /// Build a configuration from `ZAIM_API_*` environment variables.
    ///
    /// Unset variables keep their default value.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(scheme) = std::env::var("ZAIM_API_SCHEME") {
            config.scheme = scheme;
        }
        if let Ok(host) = std::env::var("ZAIM_API_HOST") {
            config.host = host;
        }
        if let Ok(base_path) = std::env::var("ZAIM_API_BASE_PATH") {
            config.base_path = base_path;
        }
        if let Ok(secs) = std::env::var("ZAIM_API_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ZaimError::RequestBuild(format!("invalid ZAIM_API_TIMEOUT_SECS: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the path prefix
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the service name reported in API errors
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL for API requests, without a trailing slash
    pub fn base_url(&self) -> String {
        format!(
            "{}://{}{}",
            self.scheme,
            self.host,
            self.base_path.trim_end_matches('/')
        )
    }
}

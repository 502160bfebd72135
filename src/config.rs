//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Price service URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Transport timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_API_URL: &str = "PRICEWATCH_API_URL";
/// Environment variable overriding [`ClientConfig::storage_path`].
pub const ENV_STORAGE_PATH: &str = "PRICEWATCH_STORAGE_PATH";
/// Environment variable overriding [`ClientConfig::request_timeout`], in seconds.
pub const ENV_TIMEOUT_SECS: &str = "PRICEWATCH_TIMEOUT_SECS";

/// Where the client talks to and where it keeps the API key.
///
/// # Example
///
/// ```ignore
/// use pricewatch::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_base_url("https://prices.example.com");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the price service, without the `/products` suffix
    pub base_url: String,
    /// JSON file holding persisted keys. `None` means `~/.pricewatch/storage.json`.
    pub storage_path: Option<PathBuf>,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            storage_path: None,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the price service base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the storage file location.
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Defaults overridden by `PRICEWATCH_*` environment variables.
    ///
    /// Blank values are ignored. An unparsable timeout is logged and the
    /// default kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_blank_var(ENV_API_URL) {
            config = config.with_base_url(url);
        }

        if let Some(path) = non_blank_var(ENV_STORAGE_PATH) {
            config = config.with_storage_path(path);
        }

        if let Some(raw) = non_blank_var(ENV_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    config = config.with_request_timeout(Duration::from_secs(secs));
                }
                _ => tracing::warn!(
                    target: "pricewatch::config",
                    value = %raw,
                    "Ignoring invalid {}",
                    ENV_TIMEOUT_SECS
                ),
            }
        }

        config
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

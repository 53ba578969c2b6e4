use std::time::Duration;

use nsv_core::{Error, Result};
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parsed base URL with any trailing slash removed, so paths can be appended.
    pub fn api_root(&self) -> Result<String> {
        let parsed = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed.as_str().trim_end_matches('/').to_string()),
            other => Err(Error::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                other, self.base_url
            ))),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_root().unwrap(), "http://127.0.0.1:5000");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_api_root_strips_trailing_slash() {
        let config = ClientConfig::default().with_url("https://nsv.example.org/api/");
        assert_eq!(config.api_root().unwrap(), "https://nsv.example.org/api");
    }

    #[test]
    fn test_api_root_rejects_garbage() {
        assert!(matches!(
            ClientConfig::new("not a url").api_root(),
            Err(Error::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://example.org").api_root(),
            Err(Error::InvalidUrl(_))
        ));
    }
}

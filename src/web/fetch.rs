//! HTTP [`ConfigSource`] for bundles served next to the page.

use gloo_net::http::Request;

use crate::core::ConfigSource;
use crate::core::error::ConfigError;

/// Fetches locations relative to `base_url`. Absolute URLs and
/// root-relative paths are used as they are.
#[derive(Clone, Debug)]
pub struct HttpSource {
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, location: &str) -> String {
        if self.base_url.is_empty() || location.starts_with('/') || location.contains("://") {
            return location.to_string();
        }
        format!("{}/{}", self.base_url.trim_end_matches('/'), location)
    }
}

impl ConfigSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<String, ConfigError> {
        let url = self.url(location);
        let failed = |reason: String| ConfigError::Fetch {
            location: url.clone(),
            reason,
        };

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;
        if !response.ok() {
            return Err(failed(format!("HTTP {}", response.status())));
        }
        response.text().await.map_err(|e| failed(e.to_string()))
    }
}

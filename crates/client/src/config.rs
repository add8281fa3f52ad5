//! Client configuration
//!
//! Env-driven configuration for the lifecycle API and the event stream.
//! The stream URL is derived from the API URL by scheme swap, so a single
//! variable configures both.

use std::time::Duration;

/// Default lifecycle API base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Interval between keepalive signals on an open stream.
pub const DEFAULT_KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

/// Timeout for a single lifecycle REST round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the exploration client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the lifecycle API (http or https)
    pub api_url: String,
    /// Keepalive cadence on the event stream
    pub keepalive_interval: Duration,
    /// Timeout for lifecycle REST calls
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            keepalive_interval: DEFAULT_KEEPALIVE_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Uses `WONDERLAND_API_URL`, falling back to the default if not set.
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("WONDERLAND_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&api_url)
    }

    /// Override the keepalive cadence (tests use short intervals).
    pub fn with_keepalive_interval(mut self, interval: Duration) -> Self {
        self.keepalive_interval = interval;
        self
    }

    /// Override the lifecycle request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Derive the WebSocket base URL from the API URL.
    pub fn ws_url(&self) -> String {
        http_to_ws(&self.api_url)
    }

    /// Stream endpoint for one session.
    pub fn stream_url(&self, session_id: impl std::fmt::Display) -> String {
        format!("{}/sessions/{}/stream", self.ws_url(), session_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Convert an http(s) URL to its ws(s) counterpart.
pub fn http_to_ws(url: &str) -> String {
    url.replace("https://", "wss://")
        .replace("http://", "ws://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.api_url, "http://localhost:8000");
    }

    #[test]
    fn test_http_to_ws() {
        assert_eq!(http_to_ws("http://host:8000"), "ws://host:8000");
        assert_eq!(http_to_ws("https://host"), "wss://host");
    }

    #[test]
    fn test_stream_url() {
        let config = ClientConfig::new("https://wonderland.example");
        assert_eq!(
            config.stream_url("abc"),
            "wss://wonderland.example/sessions/abc/stream"
        );
    }
}

//! Client configuration.
//!
//! This module defines the settings a [`FixClient`](crate::session::FixClient)
//! needs to reach the fix service.

use std::time::Duration;

/// Default fix service endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/debug";

/// Environment variable overriding the endpoint.
pub const ENV_ENDPOINT: &str = "FIXSTREAM_ENDPOINT";
/// Environment variable selecting the legacy response mode when set to `1`/`true`.
pub const ENV_LEGACY: &str = "FIXSTREAM_LEGACY";
/// Environment variable setting the connect timeout in whole seconds.
pub const ENV_CONNECT_TIMEOUT: &str = "FIXSTREAM_CONNECT_TIMEOUT_SECS";

/// How the service delivers its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Line-oriented `data:` event stream
    #[default]
    Streaming,
    /// One JSON document with the final result
    Legacy,
}

/// Configuration for the fix client.
///
/// Use the builder pattern to customize it.
///
/// # Example
///
/// ```ignore
/// use fixstream::config::{ClientConfig, ResponseMode};
///
/// let config = ClientConfig::default()
///     .with_endpoint("http://fixer.internal:8000/debug")
///     .with_mode(ResponseMode::Legacy);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Full URL the submission is POSTed to
    pub endpoint: String,
    /// Response protocol variant
    pub mode: ResponseMode,
    /// Upper bound on establishing the connection (no bound when `None`)
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            mode: ResponseMode::Streaming,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the response mode.
    pub fn with_mode(mut self, mode: ResponseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Create config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            config = config.with_endpoint(endpoint.trim());
        }

        if let Some(legacy) = lookup(ENV_LEGACY) {
            if matches!(legacy.trim(), "1" | "true" | "yes") {
                config = config.with_mode(ResponseMode::Legacy);
            }
        }

        if let Some(secs) = lookup(ENV_CONNECT_TIMEOUT).and_then(|v| v.trim().parse::<u64>().ok())
        {
            config = config.with_connect_timeout(Duration::from_secs(secs));
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.mode, ResponseMode::Streaming);
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new()
            .with_endpoint("http://localhost:9000/debug")
            .with_mode(ResponseMode::Legacy)
            .with_connect_timeout(Duration::from_secs(5));
        assert_eq!(config.endpoint, "http://localhost:9000/debug");
        assert_eq!(config.mode, ResponseMode::Legacy);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, " http://fixer:8000/debug "),
            (ENV_LEGACY, "true"),
            (ENV_CONNECT_TIMEOUT, "7"),
        ]));
        assert_eq!(config.endpoint, "http://fixer:8000/debug");
        assert_eq!(config.mode, ResponseMode::Legacy);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_ENDPOINT, "   "),
            (ENV_LEGACY, "0"),
            (ENV_CONNECT_TIMEOUT, "soon"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }
}

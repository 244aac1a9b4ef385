//! Configuration helpers for tests.

use crate::config::EnvoyConfig;

/// Envoy configuration pointing at `host` with the default 10 second timeout.
pub fn test_envoy_config(host: &str) -> EnvoyConfig {
    EnvoyConfig {
        host: host.to_string(),
        timeout_sec: 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envoy_config_urls() {
        let config = test_envoy_config("127.0.0.1:8080");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.timeout_sec, 10);
    }
}

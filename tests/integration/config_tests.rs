//! Configuration integration tests
//!
//! Loading from YAML and rejecting configurations the client cannot run with.

#[cfg(test)]
mod tests {
    use crate::common::{TestEnv, mount_json};
    use hyperforge_rs::sdk::{ApiClient, ClientConfig, ConfigBuilder, ErrorKind};
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// A YAML file drives the limiter, cache, and endpoints of a live client
    #[tokio::test]
    async fn test_file_config_drives_client() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "GET", "/tools/ip", json!({ "ip": "203.0.113.7" })).await;

        let file = write_yaml(&format!(
            "base_url: {}\nfallback_base_url: {}\napi_key: from-file\nrate_limit:\n  max_requests: 2\ncache:\n  default_ttl_ms: 1000\n  sweep_interval_secs: 60\n",
            env.primary.uri(),
            env.fallback.uri()
        ));
        let config = ClientConfig::from_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.rate_limit.max_requests, 2);
        assert_eq!(config.rate_limit.window_ms, 60_000);
        assert_eq!(config.cache.default_ttl(), Duration::from_secs(1));
        assert_eq!(config.timeout_secs, 30);

        let client = env.client(config);
        assert_eq!(client.api_key(), "from-file");
        assert_eq!(client.rate_limit_status().limit, 2);

        let sweeper = client.start_configured_sweeper();
        assert!(sweeper.is_some());
        if let Some(handle) = sweeper {
            handle.abort();
        }

        client.ip_info().await.unwrap();
        assert_eq!(client.rate_limit_status().remaining, 1);
    }

    /// Invalid values in a file are configuration errors
    #[test]
    fn test_file_with_invalid_values_is_rejected() {
        let file = write_yaml("base_url: ftp://example.com\n");
        let err = ClientConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let file = write_yaml("rate_limit:\n  max_requests: 0\n");
        let err = ClientConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    /// Malformed YAML is a configuration error, not a panic
    #[test]
    fn test_malformed_file_is_rejected() {
        let file = write_yaml("rate_limit: [not, a, map\n");
        let err = ClientConfig::from_file(file.path().to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    /// Client construction validates before doing anything else
    #[test]
    fn test_client_rejects_invalid_config() {
        let config = ConfigBuilder::new().timeout(0).build();
        let err = ApiClient::new(config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.http_status(), 0);
    }

    /// Without an API key each client generates its own session key
    #[test]
    fn test_session_key_generated_per_client() {
        let first = ApiClient::new(ClientConfig::default()).unwrap();
        let second = ApiClient::new(ClientConfig::default()).unwrap();

        assert!(first.api_key().starts_with("session_"));
        assert_ne!(first.api_key(), second.api_key());
    }
}

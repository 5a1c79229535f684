//! Common test utilities for hyperforge-rs

use hyperforge_rs::sdk::{ApiClient, ClientConfig, ConfigBuilder};
use hyperforge_rs::utils::ManualClock;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed start time for the manual clock
pub const START_MS: u64 = 1_700_000_000_000;

/// Primary and fallback services plus a clock under test control
pub struct TestEnv {
    pub primary: MockServer,
    pub fallback: MockServer,
    pub clock: ManualClock,
}

impl TestEnv {
    pub async fn start() -> Self {
        Self {
            primary: MockServer::start().await,
            fallback: MockServer::start().await,
            clock: ManualClock::new(START_MS),
        }
    }

    /// Builder pointed at the mock services
    pub fn builder(&self) -> ConfigBuilder {
        ConfigBuilder::new()
            .base_url(&self.primary.uri())
            .fallback_base_url(&self.fallback.uri())
            .api_key("integration-key")
            .timeout(5)
            .rate_window(Duration::from_secs(60))
    }

    pub fn client(&self, config: ClientConfig) -> ApiClient {
        ApiClient::with_clock(config, Arc::new(self.clock.clone()))
            .expect("client should build from a valid config")
    }

    pub async fn primary_calls(&self) -> usize {
        self.primary
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    pub async fn fallback_calls(&self) -> usize {
        self.fallback
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

/// Mount a 200 JSON response for `route`
pub async fn mount_json(server: &MockServer, http_method: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(http_method))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Address nothing is listening on
pub fn dead_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

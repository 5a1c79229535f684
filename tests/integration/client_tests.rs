//! Client integration tests
//!
//! Cache, admission control, and fallback routing exercised together through
//! the public API.

#[cfg(test)]
mod tests {
    use crate::common::{START_MS, TestEnv, dead_url, mount_json};
    use hyperforge_rs::sdk::{ApiError, Endpoint, ErrorKind, RequestOptions};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    // ==================== Caching ====================

    /// Identical requests inside the TTL hit the network once
    #[tokio::test]
    async fn test_identical_requests_hit_network_once() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "POST", "/tools/hash", json!({ "hash": "abc123", "algorithm": "sha256" })).await;
        let client = env.client(env.builder().build());

        let first = client.hash_text("hello", None).await.unwrap();
        let second = client.hash_text("hello", None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.hash, "abc123");
        assert_eq!(env.primary_calls().await, 1);

        let stats = client.stats();
        assert_eq!(stats.requests, 2);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.network_calls, 1);
    }

    /// Body field order does not change the cache key
    #[tokio::test]
    async fn test_body_field_order_shares_cache_entry() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "POST", "/tools/hash", json!({ "hash": "abc123" })).await;
        let client = env.client(env.builder().build());

        let a: serde_json::Value = serde_json::from_str(r#"{"text":"x","algorithm":"md5"}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"algorithm":"md5","text":"x"}"#).unwrap();

        client
            .request(Endpoint::HashText, RequestOptions::new().body(a))
            .await
            .unwrap();
        client
            .request(Endpoint::HashText, RequestOptions::new().body(b))
            .await
            .unwrap();

        assert_eq!(env.primary_calls().await, 1);
    }

    /// Disabled caching never reads or populates the cache
    #[tokio::test]
    async fn test_cache_bypass_across_repeated_calls() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "GET", "/tools/user-agent", json!({ "user-agent": "curl/8.0" })).await;
        let client = env.client(env.builder().build());

        for _ in 0..3 {
            let value = client
                .request(Endpoint::UserAgent, RequestOptions::new().no_cache())
                .await
                .unwrap();
            assert_eq!(value["user-agent"], "curl/8.0");
        }

        assert_eq!(env.primary_calls().await, 3);
        assert_eq!(client.cache_stats().entries, 0);
        assert_eq!(client.stats().cache_hits, 0);
    }

    /// A cached entry disappears once its endpoint TTL elapses
    #[tokio::test]
    async fn test_endpoint_ttl_expiry_refetches() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "GET", "/tools/ip", json!({ "ip": "203.0.113.7" })).await;
        let client = env.client(env.builder().build());

        client.ip_info().await.unwrap();
        env.clock.advance(Duration::from_secs(59));
        client.ip_info().await.unwrap();
        assert_eq!(env.primary_calls().await, 1);

        // IP lookups live for one minute
        env.clock.advance(Duration::from_secs(2));
        let info = client.ip_info().await.unwrap();
        assert_eq!(info.ip, "203.0.113.7");
        assert_eq!(env.primary_calls().await, 2);
    }

    // ==================== Admission Control ====================

    /// Exhausting the window short-circuits before any network I/O
    #[tokio::test]
    async fn test_rate_limit_short_circuits_network() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "POST", "/tools/validate-email", json!({ "valid": true })).await;
        let client = env.client(env.builder().max_requests(3).build());

        for i in 0..3 {
            let email = format!("user{}@example.com", i);
            assert!(client.validate_email(&email).await.unwrap().valid);
        }
        let calls_before = client.stats().network_calls;

        let err = client
            .validate_email("user3@example.com")
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::RateLimited { reset_at_ms: START_MS + 60_000 });
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(err.http_status(), 429);
        assert_eq!(client.stats().network_calls, calls_before);
        assert_eq!(env.primary_calls().await, 3);
    }

    /// Cached answers are still served once the window is exhausted
    #[tokio::test]
    async fn test_cache_hits_survive_exhausted_window() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "POST", "/tools/validate-email", json!({ "valid": true })).await;
        let client = env.client(env.builder().max_requests(1).build());

        client.validate_email("a@example.com").await.unwrap();
        assert!(client.validate_email("b@example.com").await.is_err());
        assert!(client.validate_email("a@example.com").await.unwrap().valid);
    }

    /// Capacity recovers by exactly the number of admissions that left the
    /// window
    #[tokio::test]
    async fn test_capacity_recovers_as_admissions_expire() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "GET", "/health", json!({ "status": "ok" })).await;
        let client = env.client(env.builder().max_requests(5).build());

        assert!(client.health_check().await);
        assert!(client.health_check().await);
        env.clock.advance(Duration::from_secs(30));
        assert!(client.health_check().await);

        let status = client.rate_limit_status();
        assert_eq!(status.limit, 5);
        assert_eq!(status.remaining, 2);
        assert_eq!(status.reset_at_ms, START_MS + 60_000);

        // The first two admissions age out; the third stays
        env.clock.advance(Duration::from_secs(30));
        let status = client.rate_limit_status();
        assert_eq!(status.remaining, 4);
        assert_eq!(status.reset_at_ms, START_MS + 90_000);
    }

    /// Separately constructed clients keep separate windows and caches
    #[tokio::test]
    async fn test_clients_are_isolated() {
        let env = TestEnv::start().await;
        mount_json(&env.primary, "GET", "/tools/headers", json!({ "headers": { "Accept": "*/*" } })).await;

        let first = env.client(env.builder().max_requests(1).build());
        let second = env.client(env.builder().max_requests(1).build());

        first.headers().await.unwrap();
        second.headers().await.unwrap();

        assert_eq!(env.primary_calls().await, 2);
        assert_eq!(first.rate_limit_status().remaining, 0);
        assert_eq!(second.rate_limit_status().remaining, 0);
    }

    // ==================== Fallback Routing ====================

    /// Unreachable primary with an alternate returns the alternate's answer
    #[tokio::test]
    async fn test_fallback_substitution_on_network_failure() {
        let env = TestEnv::start().await;
        mount_json(&env.fallback, "GET", "/ip", json!({ "origin": "198.51.100.4" })).await;
        let client = env.client(env.builder().base_url(&dead_url()).build());

        let info = client.ip_info().await.unwrap();

        assert_eq!(info.ip, "198.51.100.4");
        assert_eq!(env.fallback_calls().await, 1);
        assert_eq!(client.stats().fallbacks, 1);
    }

    /// Unreachable primary without an alternate is ServiceUnavailable
    #[tokio::test]
    async fn test_no_fallback_is_service_unavailable() {
        let env = TestEnv::start().await;
        let client = env.client(env.builder().base_url(&dead_url()).build());

        let err = client.validate_email("a@example.com").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.http_status(), 503);
        assert_eq!(err.to_string(), "Service temporarily unavailable");
        assert_eq!(env.fallback_calls().await, 0);
    }

    /// Upstream errors surface as-is unless server-error fallback is enabled
    #[tokio::test]
    async fn test_server_error_fallback_is_opt_in() {
        let env = TestEnv::start().await;
        Mock::given(method("GET"))
            .and(path("/tools/user-agent"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&env.primary)
            .await;
        mount_json(&env.fallback, "GET", "/user-agent", json!({ "user-agent": "fallback-agent" })).await;

        let strict = env.client(env.builder().build());
        let err = strict.user_agent().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamError);
        assert_eq!(err.http_status(), 502);
        assert_eq!(env.fallback_calls().await, 0);

        let lenient = env.client(env.builder().fallback_on_server_error(true).build());
        let agent = lenient.user_agent().await.unwrap();
        assert_eq!(agent.user_agent, "fallback-agent");
        assert_eq!(env.fallback_calls().await, 1);
    }

    /// A non-JSON primary body is answered by the alternate, or is
    /// ServiceUnavailable when there is none
    #[tokio::test]
    async fn test_unparseable_primary_body_goes_to_fallback() {
        let env = TestEnv::start().await;
        Mock::given(method("GET"))
            .and(path("/tools/headers"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>captive portal</html>"))
            .mount(&env.primary)
            .await;
        Mock::given(method("POST"))
            .and(path("/tools/validate-email"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&env.primary)
            .await;
        mount_json(&env.fallback, "GET", "/headers", json!({ "headers": { "Host": "httpbin.org" } })).await;
        let client = env.client(env.builder().build());

        let headers = client.headers().await.unwrap();
        assert_eq!(headers.headers["Host"], "httpbin.org");
        assert_eq!(env.fallback_calls().await, 1);

        let err = client.validate_email("a@example.com").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.http_status(), 503);
        assert_eq!(env.fallback_calls().await, 1);
    }

    // ==================== Error Reports ====================

    /// Failures serialize to a kind/message/status report
    #[tokio::test]
    async fn test_error_report_shape() {
        let env = TestEnv::start().await;
        let client = env.client(env.builder().max_requests(1).build());
        mount_json(&env.primary, "GET", "/tools/ip", json!({ "ip": "203.0.113.7" })).await;

        client.ip_info().await.unwrap();
        let err = client
            .request(Endpoint::Headers, RequestOptions::new())
            .await
            .unwrap_err();

        let report = serde_json::to_value(err.report()).unwrap();
        assert_eq!(report["kind"], "RateLimited");
        assert_eq!(report["httpStatus"], 429);
        assert_eq!(
            report["message"],
            "Rate limit exceeded. Please wait before making more requests."
        );
    }
}

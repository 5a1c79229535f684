//! Typed wrappers, one per tools endpoint
//!
//! Each wrapper fixes the endpoint (and with it method, TTL, and
//! cacheability) and forwards to the orchestrator.

use super::client::ApiClient;
use crate::sdk::{errors::*, types::*};
use crate::utils::security::SecurityUtils;
use serde::Serialize;

fn json_body<T: Serialize>(payload: &T) -> RequestOutcome<serde_json::Value> {
    Ok(serde_json::to_value(payload)?)
}

impl ApiClient {
    /// Validate an email address
    pub async fn validate_email(&self, email: &str) -> RequestOutcome<EmailValidation> {
        let body = json_body(&EmailValidationRequest {
            email: email.to_string(),
        })?;
        self.request_typed(Endpoint::ValidateEmail, RequestOptions::new().body(body))
            .await
    }

    /// Shorten a URL; never cached
    pub async fn shorten_url(&self, url: &str) -> RequestOutcome<ShortenedUrl> {
        if !SecurityUtils::validate_url(url) {
            return Err(ApiError::InvalidRequest(format!(
                "'{}' is not an http(s) URL",
                url
            )));
        }

        let body = json_body(&ShortenUrlRequest {
            url: url.to_string(),
        })?;
        self.request_typed(
            Endpoint::ShortenUrl,
            RequestOptions::new().body(body).no_cache(),
        )
        .await
    }

    /// Caller's public IP
    pub async fn ip_info(&self) -> RequestOutcome<IpInfo> {
        self.request_typed(Endpoint::IpLookup, RequestOptions::new())
            .await
    }

    /// Caller's user agent as seen by the server
    pub async fn user_agent(&self) -> RequestOutcome<UserAgentInfo> {
        self.request_typed(Endpoint::UserAgent, RequestOptions::new())
            .await
    }

    /// Request headers as seen by the server
    pub async fn headers(&self) -> RequestOutcome<HeadersInfo> {
        self.request_typed(Endpoint::Headers, RequestOptions::new())
            .await
    }

    /// Hash `text` server-side with `algorithm` (`sha256` when `None`)
    pub async fn hash_text(&self, text: &str, algorithm: Option<&str>) -> RequestOutcome<HashResult> {
        let body = json_body(&HashTextRequest {
            text: text.to_string(),
            algorithm: algorithm.unwrap_or("sha256").to_string(),
        })?;
        self.request_typed(Endpoint::HashText, RequestOptions::new().body(body))
            .await
    }

    /// Look up a password hash in the breach corpus
    pub async fn check_password_breach(&self, hash: &str) -> RequestOutcome<BreachCheck> {
        let body = json_body(&PasswordBreachRequest {
            hash: hash.to_string(),
        })?;
        self.request_typed(Endpoint::PasswordBreach, RequestOptions::new().body(body))
            .await
    }

    /// Whether the service answers its health endpoint
    pub async fn health_check(&self) -> bool {
        self.request(Endpoint::Health, RequestOptions::new())
            .await
            .is_ok()
    }
}

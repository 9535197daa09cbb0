//! HTTP client for the Brevo transactional email API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication and maps
//! provider failures onto `ProviderError`.

mod async_wrapper;
pub use async_wrapper::{AsyncBrevoClient, EmailProvider};

use crate::config::Config;
use crate::error::{ProviderError, ProviderResult};
use crate::metrics::{CallTimer, Metrics};
use crate::models::EmailRequest;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// What the provider said about an accepted email.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// HTTP status, always 2xx
    pub status: u16,

    /// Response body; JSON when the provider sent JSON, a string otherwise
    pub body: Value,
}

/// HTTP client for the Brevo email API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct BrevoClient {
    /// Full URL of the send endpoint
    api_url: String,

    /// API key sent in the `api-key` header
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl BrevoClient {
    /// Create a new BrevoClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.brevo_api_url.clone(),
            config.brevo_api_key.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a BrevoClient with a custom endpoint (useful for testing).
    #[doc(hidden)]
    pub fn with_api_url(api_url: String, api_key: String) -> Self {
        Self::build(api_url, api_key, Duration::from_secs(10))
    }

    fn build(api_url: String, api_key: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            api_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Send one transactional email. Never retries.
    pub fn send_email(&self, request: &EmailRequest) -> ProviderResult<ProviderResponse> {
        let timer = CallTimer::start(self.metrics.clone());

        tracing::debug!("POST {}", self.api_url);
        tracing::debug!(
            "Request body: {}",
            serde_json::to_string_pretty(request).unwrap_or_else(|_| "<invalid json>".to_string())
        );

        let result = self
            .agent
            .post(&self.api_url)
            .set("accept", "application/json")
            .set("api-key", &self.api_key)
            .set("content-type", "application/json")
            .send_json(request);

        let (status, text) = match result {
            Ok(response) => {
                let status = response.status();
                match response.into_string() {
                    Ok(text) => (status, text),
                    Err(e) => {
                        timer.failed();
                        tracing::error!("POST {} - Error reading response: {}", self.api_url, e);
                        return Err(ProviderError::HttpError(e.to_string()));
                    }
                }
            }
            Err(ureq::Error::Status(status, response)) => {
                (status, response.into_string().unwrap_or_default())
            }
            Err(ureq::Error::Transport(transport)) => {
                timer.failed();
                let error = map_transport_error(transport);
                tracing::error!("POST {} - Error: {}", self.api_url, error);
                return Err(error);
            }
        };

        // ureq hands back 1xx and unfollowed 3xx as Ok; only 2xx means sent
        if !(200..300).contains(&status) {
            tracing::warn!(status, body = %text, "Brevo API response");
            timer.rejected(status);
            return Err(api_error(status, &text));
        }

        tracing::info!(status, body = %text, "Brevo API response");
        timer.sent();

        Ok(ProviderResponse {
            status,
            body: parse_body(&text),
        })
    }
}

/// Rejection from a non-2xx answer: JSON `message`, else the raw text,
/// else a generic message naming the status.
fn api_error(status: u16, text: &str) -> ProviderError {
    let body = parse_body(text);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| format!("Brevo API error: {}", status));
    let code = body.get("code").and_then(Value::as_str).map(str::to_string);

    ProviderError::ApiError {
        status,
        message,
        code,
    }
}

fn map_transport_error(transport: ureq::Transport) -> ProviderError {
    match transport.kind() {
        ureq::ErrorKind::ConnectionFailed => {
            ProviderError::HttpError("Connection failed".to_string())
        }
        ureq::ErrorKind::Io if transport.to_string().contains("timed out") => {
            ProviderError::Timeout
        }
        _ => ProviderError::HttpError(transport.to_string()),
    }
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body(r#"{"messageId":"<1@x>"}"#), json!({"messageId": "<1@x>"}));
        assert_eq!(parse_body("Server error"), json!("Server error"));
    }

    #[test]
    fn test_new_uses_config() {
        let config = Config {
            brevo_api_url: "https://mail.example.com/send".to_string(),
            brevo_api_key: "key".to_string(),
            ..Default::default()
        };
        let client = BrevoClient::new(&config);
        assert_eq!(client.api_url, "https://mail.example.com/send");
        assert_eq!(client.metrics().provider_calls_total(), 0);
    }

    #[test]
    fn test_api_error_message_sources() {
        let error = api_error(
            400,
            r#"{"code":"invalid_parameter","message":"sender is invalid"}"#,
        );
        match error {
            ProviderError::ApiError {
                status,
                message,
                code,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "sender is invalid");
                assert_eq!(code.as_deref(), Some("invalid_parameter"));
            }
            other => panic!("Expected ApiError, got: {:?}", other),
        }
        match api_error(304, "") {
            ProviderError::ApiError {
                status,
                message,
                code,
            } => {
                assert_eq!(status, 304);
                assert_eq!(message, "Brevo API error: 304");
                assert_eq!(code, None);
            }
            other => panic!("Expected ApiError, got: {:?}", other),
        }
    }
}

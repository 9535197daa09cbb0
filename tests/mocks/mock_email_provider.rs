use async_trait::async_trait;
use contact_mailer::client::{EmailProvider, ProviderResponse};
use contact_mailer::error::{ProviderError, ProviderResult};
use contact_mailer::models::EmailRequest;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
enum MockBehavior {
    Accept(Value),
    Reject { status: u16, message: String },
    Timeout,
}

/// Mock email provider for testing.
///
/// Records every request it receives and answers with a configurable
/// outcome, so tests can verify how many outbound calls were made.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockEmailProvider {
    behavior: Arc<Mutex<MockBehavior>>,
    sent: Arc<Mutex<Vec<EmailRequest>>>,
}

#[allow(dead_code)]
impl MockEmailProvider {
    /// Provider that accepts every email.
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Accept(json!({ "messageId": "<mock@smtp-relay>" })))
    }

    /// Provider that rejects every email with `status` and `message`.
    pub fn rejecting(status: u16, message: &str) -> Self {
        Self::with_behavior(MockBehavior::Reject {
            status,
            message: message.to_string(),
        })
    }

    /// Provider whose every call times out.
    pub fn timing_out() -> Self {
        Self::with_behavior(MockBehavior::Timeout)
    }

    fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of send calls received.
    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Requests received, in order.
    pub fn sent_requests(&self) -> Vec<EmailRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockEmailProvider {
    async fn send_email(&self, request: &EmailRequest) -> ProviderResult<ProviderResponse> {
        self.sent.lock().unwrap().push(request.clone());

        let behavior = self.behavior.lock().unwrap().clone();
        match behavior {
            MockBehavior::Accept(body) => Ok(ProviderResponse { status: 201, body }),
            MockBehavior::Reject { status, message } => Err(ProviderError::ApiError {
                status,
                message,
                code: None,
            }),
            MockBehavior::Timeout => Err(ProviderError::Timeout),
        }
    }
}

//! Submits a contact form to the dispatch endpoint.

use super::notification::{
    Notification, Notifier, HTTP_FAILURE_TEXT, NETWORK_FAILURE_TEXT, SUCCESS_TEXT,
};
use super::state::ContactForm;
use crate::error::{FormError, FormResult};
use crate::models::ContactSubmission;
use crate::server::DISPATCH_PATH;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Result of one POST to the dispatch endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx
    Accepted,
    /// Any other status, with the server's message when it sent one
    Rejected { status: u16, message: Option<String> },
    /// The request never got a response
    NetworkError(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }

    /// Notification the user sees for this outcome.
    pub fn notification(&self) -> Notification {
        match self {
            SubmitOutcome::Accepted => Notification::success(SUCCESS_TEXT),
            SubmitOutcome::Rejected { message, .. } => {
                Notification::error(message.as_deref().unwrap_or(HTTP_FAILURE_TEXT))
            }
            SubmitOutcome::NetworkError(_) => Notification::error(NETWORK_FAILURE_TEXT),
        }
    }

    fn into_result(self) -> FormResult<()> {
        match self {
            SubmitOutcome::Accepted => Ok(()),
            SubmitOutcome::Rejected { status, message } => Err(FormError::Http {
                status,
                message: message.unwrap_or_else(|| HTTP_FAILURE_TEXT.to_string()),
            }),
            SubmitOutcome::NetworkError(e) => Err(FormError::Transport(e)),
        }
    }
}

/// HTTP side of the form client.
///
/// Uses a blocking `ureq` agent; one submission is in flight at a time
/// because [`ContactForm::begin_submit`] refuses a second one.
pub struct FormClient {
    endpoint: String,
    agent: ureq::Agent,
    notifier: Notifier,
}

impl FormClient {
    /// Client for the dispatch endpoint on the site at `base_url`.
    pub fn new(base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), DISPATCH_PATH);
        Self::with_endpoint(endpoint)
    }

    /// Client for an explicit endpoint URL.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .build();

        Self {
            endpoint: endpoint.into(),
            agent,
            notifier: Notifier::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    /// Validate and send the form.
    ///
    /// Validation failures mark the fields and send nothing. Otherwise
    /// exactly one request is made, the form is reset on success, and a
    /// notification is shown either way.
    pub fn submit(&mut self, form: &mut ContactForm) -> FormResult<()> {
        let payload = form.begin_submit()?;

        let outcome = self.post(&payload);
        tracing::debug!(endpoint = %self.endpoint, ?outcome, "Contact form submitted");

        form.complete(outcome.is_success());
        self.notifier.notify(&outcome.notification(), Instant::now());

        outcome.into_result()
    }

    /// POST one submission and classify the response.
    pub fn post(&self, payload: &ContactSubmission) -> SubmitOutcome {
        let result = self
            .agent
            .post(&self.endpoint)
            .set("accept", "application/json")
            .set("content-type", "application/json")
            .send_json(payload);

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return SubmitOutcome::NetworkError(transport.to_string())
            }
        };

        let status = response.status();
        if (200..300).contains(&status) {
            return SubmitOutcome::Accepted;
        }

        let text = response.into_string().unwrap_or_default();
        SubmitOutcome::Rejected {
            status,
            message: server_message(&text),
        }
    }
}

/// `error`, falling back to `message`, from a JSON error body.
fn server_message(text: &str) -> Option<String> {
    let body: Value = serde_json::from_str(text).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

//! Mail dispatch service.
//!
//! Turns one HTTP request into at most one provider call and exactly one
//! HTTP response. Stateless: nothing survives between invocations.

use crate::client::EmailProvider;
use crate::domain::validate;
use crate::error::{DispatchError, DispatchResult};
use crate::models::{ContactSubmission, EmailRequest, MailRouting};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Message returned when the provider accepts the email.
pub const SUCCESS_MESSAGE: &str = "Email sent successfully";

/// Terminal response of one dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub status: u16,
    pub body: Value,
}

impl From<&DispatchError> for DispatchResponse {
    fn from(err: &DispatchError) -> Self {
        Self {
            status: err.status_code(),
            body: err.to_body(),
        }
    }
}

/// Mail dispatch trait for the HTTP layer.
#[async_trait]
pub trait MailDispatchService: Send + Sync {
    /// Handle one request and produce its response. Never fails.
    async fn handle(&self, method: &str, body: &str) -> DispatchResponse;
}

/// Default implementation of MailDispatchService.
pub struct MailDispatchServiceImpl {
    provider: Arc<dyn EmailProvider>,
    routing: MailRouting,
}

impl MailDispatchServiceImpl {
    /// Create a new dispatch service.
    pub fn new(provider: Arc<dyn EmailProvider>, routing: MailRouting) -> Self {
        Self { provider, routing }
    }

    /// Parse a request body into a submission.
    ///
    /// Missing fields are left empty for validation to report; anything
    /// that is not a JSON object of strings is malformed.
    pub fn parse_submission(body: &str) -> DispatchResult<ContactSubmission> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| DispatchError::MalformedRequest(format!("Invalid JSON body: {}", e)))?;

        if !value.is_object() {
            return Err(DispatchError::MalformedRequest(
                "Request body must be a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| DispatchError::MalformedRequest(format!("Invalid submission: {}", e)))
    }

    /// Run the dispatch pipeline, returning the success body.
    pub async fn dispatch(&self, method: &str, body: &str) -> DispatchResult<Value> {
        if method != "POST" {
            return Err(DispatchError::MethodNotAllowed);
        }

        let submission = Self::parse_submission(body)?;

        let report = validate(&submission);
        if !report.valid {
            return Err(DispatchError::Validation(report));
        }

        let request = EmailRequest::from_submission(&submission, &self.routing)
            .map_err(|e| DispatchError::MalformedRequest(e.to_string()))?;

        info!(subject = %request.subject, "Dispatching contact email");
        let response = self.provider.send_email(&request).await?;

        let mut body = json!({ "message": SUCCESS_MESSAGE });
        if !response.body.is_null() {
            body["providerResponse"] = response.body;
        }
        Ok(body)
    }
}

#[async_trait]
impl MailDispatchService for MailDispatchServiceImpl {
    async fn handle(&self, method: &str, body: &str) -> DispatchResponse {
        match self.dispatch(method, body).await {
            Ok(body) => DispatchResponse { status: 200, body },
            Err(err) => {
                match &err {
                    DispatchError::MethodNotAllowed | DispatchError::Validation(_) => {
                        warn!(method, "Rejected contact request: {}", err)
                    }
                    DispatchError::ProviderRejection { status, .. } => {
                        warn!(status, "Provider rejected contact email: {}", err)
                    }
                    _ => error!("Error in send-email dispatch: {}", err),
                }
                DispatchResponse::from(&err)
            }
        }
    }
}

//! Transactional email payload for the Brevo `/v3/smtp/email` endpoint.

use crate::domain::{EmailAddress, ValidationError};
use crate::models::ContactSubmission;
use crate::templates;
use serde::{Deserialize, Serialize};

/// An address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    pub email: EmailAddress,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Mailbox {
    pub fn new(email: EmailAddress, name: Option<String>) -> Self {
        let name = name.filter(|n| !n.trim().is_empty());
        Self { email, name }
    }
}

/// Where contact emails go and how they are labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRouting {
    pub sender: Mailbox,
    pub recipient: Mailbox,
    /// Prepended verbatim to the submitted subject.
    pub subject_prefix: String,
}

/// Request body accepted by the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub sender: Mailbox,

    pub to: Vec<Mailbox>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Mailbox>,

    pub subject: String,

    pub html_content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

impl EmailRequest {
    /// Build the provider payload for a submission.
    ///
    /// Replies go straight to the submitter.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if the submitter's address
    /// cannot be used as a reply-to address.
    pub fn from_submission(
        submission: &ContactSubmission,
        routing: &MailRouting,
    ) -> Result<Self, ValidationError> {
        let reply_to = Mailbox::new(
            EmailAddress::new(submission.email.as_str())?,
            Some(submission.name.trim().to_string()),
        );

        Ok(Self {
            sender: routing.sender.clone(),
            to: vec![routing.recipient.clone()],
            reply_to: Some(reply_to),
            subject: format!("{}{}", routing.subject_prefix, submission.subject.trim()),
            html_content: templates::render_html(submission),
            text_content: Some(templates::render_text(submission)),
        })
    }
}

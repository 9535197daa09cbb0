//! Data models for contact submissions and outbound email.
//!
//! A `ContactSubmission` arrives from the form client and is turned into an
//! `EmailRequest` for the email provider. Neither is persisted.

pub mod email_request;
pub mod submission;

pub use email_request::{EmailRequest, MailRouting, Mailbox};
pub use submission::ContactSubmission;

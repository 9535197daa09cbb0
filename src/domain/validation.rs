//! Contact form field rules.
//!
//! The same rules run in the form client before a submission leaves the
//! browser and in the dispatch service before anything reaches the provider.

use super::email::EmailAddress;
use crate::models::ContactSubmission;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Minimum message length, counted in characters after trimming.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// A contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Phone,
    Company,
    Subject,
    Message,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::Company,
        Field::Subject,
        Field::Message,
    ];

    /// Fields that must pass validation before a submission is sent.
    pub const REQUIRED: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Company => "company",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating a whole submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// One message per failing field.
    pub errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// Check a single address against the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EmailAddress::is_valid(email)
}

/// Validate one field of a submission.
///
/// Returns the error message for the field, or `None` when it passes.
/// Optional fields always pass.
pub fn validate_field(field: Field, submission: &ContactSubmission) -> Option<&'static str> {
    match field {
        Field::Name if submission.name.trim().is_empty() => Some("Name is required"),
        Field::Email => {
            let email = submission.email.trim();
            if email.is_empty() {
                Some("Email is required")
            } else if !validate_email(email) {
                Some("Please enter a valid email")
            } else {
                None
            }
        }
        Field::Subject if submission.subject.trim().is_empty() => Some("Subject is required"),
        Field::Message => {
            let message = submission.message.trim();
            if message.is_empty() {
                Some("Message is required")
            } else if message.chars().count() < MIN_MESSAGE_CHARS {
                Some("Message must be at least 10 characters")
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Validate every required field of a submission.
pub fn validate(submission: &ContactSubmission) -> ValidationReport {
    let errors: BTreeMap<Field, String> = Field::REQUIRED
        .iter()
        .filter_map(|&field| validate_field(field, submission).map(|msg| (field, msg.to_string())))
        .collect();

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

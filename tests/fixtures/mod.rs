//! Shared test data.

#![allow(dead_code)]

use contact_mailer::domain::EmailAddress;
use contact_mailer::models::{MailRouting, Mailbox};
use serde_json::{json, Value};

pub const SENDER: &str = "noreply@portfolio.example";
pub const RECIPIENT: &str = "owner@portfolio.example";

pub fn routing() -> MailRouting {
    MailRouting {
        sender: Mailbox::new(
            EmailAddress::new(SENDER).unwrap(),
            Some("Portfolio Contact Form".to_string()),
        ),
        recipient: Mailbox::new(
            EmailAddress::new(RECIPIENT).unwrap(),
            Some("Portfolio Owner".to_string()),
        ),
        subject_prefix: "New Portfolio Contact: ".to_string(),
    }
}

/// A submission that passes validation, without optional fields.
pub fn valid_submission() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "subject": "Speaking invitation",
        "message": "Would you give a talk at our conference?\nThanks!"
    })
}

/// A submission that passes validation, with every field filled.
pub fn full_submission() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "phone": "+1 555 0100",
        "company": "Navy Labs",
        "subject": "Speaking invitation",
        "message": "Would you give a talk at our conference?\nThanks!"
    })
}

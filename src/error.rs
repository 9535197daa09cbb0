//! Error types for the contact mailer.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::ValidationReport;
use serde_json::{json, Value};
use thiserror::Error;

/// Errors that can occur when calling the email provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Provider answered with a non-2xx status
    #[error("Provider error (status {status}): {message}")]
    ApiError {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// Failed to encode or decode JSON
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,
}

/// Errors produced by the mail dispatch function.
///
/// Every variant maps to exactly one terminal HTTP response.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Request used a method other than POST
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// Body is not valid JSON or has the wrong shape
    #[error("{0}")]
    MalformedRequest(String),

    /// Body parsed but required fields failed validation
    #[error("Validation failed")]
    Validation(ValidationReport),

    /// Provider rejected the email
    #[error("{message}")]
    ProviderRejection {
        status: u16,
        message: String,
        code: Option<String>,
    },

    /// Provider could not be reached, or the call failed locally
    #[error("{0}")]
    TransportFailure(String),
}

impl DispatchError {
    /// HTTP status returned to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::Validation(_) => 400,
            Self::ProviderRejection { status, .. } => *status,
            Self::MalformedRequest(_) | Self::TransportFailure(_) => 500,
        }
    }

    /// Structured JSON body returned to the caller.
    pub fn to_body(&self) -> Value {
        match self {
            Self::Validation(report) => json!({
                "error": self.to_string(),
                "fields": report.errors,
            }),
            Self::ProviderRejection {
                code: Some(code), ..
            } => json!({ "error": self.to_string(), "code": code }),
            Self::MalformedRequest(msg) | Self::TransportFailure(msg) if msg.trim().is_empty() => {
                json!({ "error": "Internal server error" })
            }
            _ => json!({ "error": self.to_string() }),
        }
    }
}

impl From<ProviderError> for DispatchError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiError {
                status,
                message,
                code,
            } => Self::ProviderRejection {
                status,
                message,
                code,
            },
            other => Self::TransportFailure(other.to_string()),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors surfaced by the form client.
#[derive(Error, Debug)]
pub enum FormError {
    /// Client-side validation failed; nothing was sent
    #[error("Validation failed")]
    Validation(ValidationReport),

    /// A submission is already in flight
    #[error("A submission is already in progress")]
    AlreadySubmitting,

    /// Dispatch endpoint answered with a non-2xx status
    #[error("Submission rejected (status {status}): {message}")]
    Http { status: u16, message: String },

    /// Dispatch endpoint could not be reached
    #[error("Network error: {0}")]
    Transport(String),
}

/// Convenience type alias for Results with ProviderError
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Convenience type alias for Results with DispatchError
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with FormError
pub type FormResult<T> = Result<T, FormError>;

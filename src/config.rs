//! Configuration management for the contact mailer.
//!
//! This module handles loading and validating configuration from environment
//! variables, with an optional `.env` file for local development.

use crate::domain::EmailAddress;
use crate::error::{ConfigError, ConfigResult};
use crate::models::{MailRouting, Mailbox};
use std::env;

/// Brevo transactional email endpoint.
pub const DEFAULT_BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Configuration for the contact mailer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Email provider endpoint
    pub brevo_api_url: String,

    /// Email provider API key
    pub brevo_api_key: String,

    /// Verified sender address
    pub sender_email: String,

    /// Sender display name (default: "Portfolio Contact Form")
    pub sender_name: String,

    /// Address that receives contact emails
    pub recipient_email: String,

    /// Recipient display name
    pub recipient_name: Option<String>,

    /// Prefix for every email subject (default: "New Portfolio Contact: ")
    pub subject_prefix: String,

    /// Socket address the HTTP server binds to (default: "0.0.0.0:8888")
    pub bind_address: String,

    /// Provider request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `BREVO_API_KEY`: API key for the email provider
    /// - `SENDER_EMAIL`: Verified sender address
    /// - `RECIPIENT_EMAIL`: Address that receives submissions
    ///
    /// Optional environment variables:
    /// - `BREVO_API_URL`: Provider endpoint (default: Brevo SMTP API)
    /// - `SENDER_NAME`: Sender display name
    /// - `RECIPIENT_NAME`: Recipient display name
    /// - `SUBJECT_PREFIX`: Subject prefix
    /// - `BIND_ADDRESS`: Listen address (default: "0.0.0.0:8888")
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let brevo_api_key = Self::required("BREVO_API_KEY")?;
        let sender_email = Self::required("SENDER_EMAIL")?;
        let recipient_email = Self::required("RECIPIENT_EMAIL")?;

        let brevo_api_url =
            env::var("BREVO_API_URL").unwrap_or_else(|_| DEFAULT_BREVO_API_URL.to_string());

        if !brevo_api_url.starts_with("http://") && !brevo_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "BREVO_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if brevo_api_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "BREVO_API_KEY".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        Self::check_email("SENDER_EMAIL", &sender_email)?;
        Self::check_email("RECIPIENT_EMAIL", &recipient_email)?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        Ok(Config {
            brevo_api_url,
            brevo_api_key,
            sender_email,
            sender_name: env::var("SENDER_NAME")
                .unwrap_or_else(|_| "Portfolio Contact Form".to_string()),
            recipient_email,
            recipient_name: env::var("RECIPIENT_NAME").ok(),
            subject_prefix: env::var("SUBJECT_PREFIX")
                .unwrap_or_else(|_| "New Portfolio Contact: ".to_string()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8888".to_string()),
            request_timeout,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Sender, recipient and subject prefix for outgoing mail.
    pub fn mail_routing(&self) -> ConfigResult<MailRouting> {
        let sender = EmailAddress::new(self.sender_email.as_str()).map_err(|e| {
            ConfigError::InvalidValue {
                var: "SENDER_EMAIL".to_string(),
                reason: e.to_string(),
            }
        })?;
        let recipient = EmailAddress::new(self.recipient_email.as_str()).map_err(|e| {
            ConfigError::InvalidValue {
                var: "RECIPIENT_EMAIL".to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(MailRouting {
            sender: Mailbox::new(sender, Some(self.sender_name.clone())),
            recipient: Mailbox::new(recipient, self.recipient_name.clone()),
            subject_prefix: self.subject_prefix.clone(),
        })
    }

    fn required(var_name: &str) -> ConfigResult<String> {
        env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))
    }

    fn check_email(var_name: &str, value: &str) -> ConfigResult<()> {
        if EmailAddress::is_valid(value.trim()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Not a valid email address: {}", value),
            })
        }
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            brevo_api_url: DEFAULT_BREVO_API_URL.to_string(),
            brevo_api_key: String::new(),
            sender_email: String::new(),
            sender_name: "Portfolio Contact Form".to_string(),
            recipient_email: String::new(),
            recipient_name: None,
            subject_prefix: "New Portfolio Contact: ".to_string(),
            bind_address: "0.0.0.0:8888".to_string(),
            request_timeout: 10,
            log_level: "info".to_string(),
        }
    }
}

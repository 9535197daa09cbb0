//! Contact Mailer - contact form backend for static portfolio sites.
//!
//! A form submission is validated, rendered into a transactional email and
//! forwarded to the Brevo email API in a single request/response exchange.
//! Nothing is stored and nothing is retried.
//!
//! # Architecture
//!
//! - **domain**: Email value object and the shared field validation rules
//! - **models**: Contact submissions and the provider's email payload
//! - **templates**: HTML and plain-text email bodies
//! - **client**: HTTP client for the Brevo API
//! - **services**: The mail dispatch pipeline
//! - **server**: axum router exposing the dispatch endpoint
//! - **form**: Form client with validation state, lifecycle and notifications
//! - **config**: Configuration from environment variables
//! - **metrics**: Provider call counters

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod metrics;
pub mod models;
pub mod server;
pub mod services;
pub mod templates;

pub use client::{AsyncBrevoClient, BrevoClient, EmailProvider, ProviderResponse};
pub use config::Config;
pub use domain::{validate, validate_email, EmailAddress, Field, ValidationReport};
pub use error::{ConfigError, DispatchError, FormError, ProviderError};
pub use form::{ContactForm, FormClient, FormState};
pub use metrics::{CallTimer, Metrics, MetricsSummary};
pub use models::{ContactSubmission, EmailRequest, MailRouting, Mailbox};
pub use server::{create_router, AppState};
pub use services::{DispatchResponse, MailDispatchService, MailDispatchServiceImpl};

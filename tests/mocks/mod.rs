//! Test doubles shared by the integration tests.

mod mock_email_provider;

pub use mock_email_provider::MockEmailProvider;

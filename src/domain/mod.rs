//! Domain value objects and validation rules.
//!
//! Contact form submissions are checked against these rules on both sides
//! of the wire, so the client and the dispatch service agree on what a
//! valid submission is.

pub mod email;
pub mod errors;
pub mod validation;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use validation::{validate, validate_email, validate_field, Field, ValidationReport};

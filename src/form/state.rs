//! Contact form state: field values, per-field validation marks and the
//! submission lifecycle.

use crate::domain::{validate, validate_field, Field, ValidationReport};
use crate::error::{FormError, FormResult};
use crate::models::ContactSubmission;
use std::collections::BTreeMap;

/// Visual validation state of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldState {
    /// Never validated; no marker shown.
    #[default]
    Untouched,
    /// Passed its last validation.
    Valid,
    /// Failed its last validation with this message.
    Invalid(String),
}

impl FieldState {
    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldState::Invalid(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FieldState::Invalid(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Submission lifecycle.
///
/// ```text
/// Idle -> Validating -> Submitting -> Succeeded
///             |              \-----> Failed
///             \-> Idle (validation errors)
/// ```
///
/// Editing a field after `Succeeded` or `Failed` returns the form to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Contact form model driven by user events.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: ContactSubmission,
    fields: BTreeMap<Field, FieldState>,
    state: FormState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &ContactSubmission {
        &self.values
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn field_state(&self, field: Field) -> &FieldState {
        static UNTOUCHED: FieldState = FieldState::Untouched;
        self.fields.get(&field).unwrap_or(&UNTOUCHED)
    }

    /// The submit control is disabled while a request is in flight.
    pub fn submit_enabled(&self) -> bool {
        !matches!(self.state, FormState::Validating | FormState::Submitting)
    }

    /// Busy indicator visibility.
    pub fn is_busy(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Input event: store the new value.
    ///
    /// Only a field already marked invalid is re-validated, so the user gets
    /// immediate feedback on a correction without errors appearing while
    /// they type into a fresh field.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.set_value(field, value.into());

        if matches!(self.state, FormState::Succeeded | FormState::Failed) {
            self.state = FormState::Idle;
        }

        if self.field_state(field).is_invalid() {
            self.revalidate(field);
        }
    }

    /// Blur event: always re-validate the field.
    pub fn blur(&mut self, field: Field) {
        if field.is_required() {
            self.revalidate(field);
        }
    }

    /// Validate every required field and mark each one.
    pub fn validate(&mut self) -> ValidationReport {
        let report = validate(&self.values);
        for field in Field::REQUIRED {
            let state = match report.error_for(field) {
                Some(msg) => FieldState::Invalid(msg.to_string()),
                None => FieldState::Valid,
            };
            self.fields.insert(field, state);
        }
        report
    }

    /// Start a submission.
    ///
    /// Returns the payload to send when validation passes; the form is then
    /// `Submitting` until [`ContactForm::complete`] is called.
    pub fn begin_submit(&mut self) -> FormResult<ContactSubmission> {
        if !self.submit_enabled() {
            return Err(FormError::AlreadySubmitting);
        }

        self.state = FormState::Validating;
        let report = self.validate();
        if !report.valid {
            self.state = FormState::Idle;
            return Err(FormError::Validation(report));
        }

        self.state = FormState::Submitting;
        Ok(self.payload())
    }

    /// Finish a submission started with [`ContactForm::begin_submit`].
    ///
    /// Success clears the form; failure keeps what the user typed so they
    /// can retry.
    pub fn complete(&mut self, succeeded: bool) {
        if succeeded {
            self.reset();
            self.state = FormState::Succeeded;
        } else {
            self.state = FormState::Failed;
        }
    }

    /// Clear all values and validation markers.
    pub fn reset(&mut self) {
        self.values = ContactSubmission::default();
        self.fields.clear();
        self.state = FormState::Idle;
    }

    fn revalidate(&mut self, field: Field) {
        let state = match validate_field(field, &self.values) {
            Some(msg) => FieldState::Invalid(msg.to_string()),
            None => FieldState::Valid,
        };
        self.fields.insert(field, state);
    }

    fn set_value(&mut self, field: Field, value: String) {
        let optional = |v: String| Some(v).filter(|v| !v.trim().is_empty());
        match field {
            Field::Name => self.values.name = value,
            Field::Email => self.values.email = value,
            Field::Phone => self.values.phone = optional(value),
            Field::Company => self.values.company = optional(value),
            Field::Subject => self.values.subject = value,
            Field::Message => self.values.message = value,
        }
    }

    /// Trimmed copy of the values for the wire.
    fn payload(&self) -> ContactSubmission {
        let v = &self.values;
        ContactSubmission {
            name: v.name.trim().to_string(),
            email: v.email.trim().to_string(),
            phone: v.phone().map(str::to_string),
            company: v.company().map(str::to_string),
            subject: v.subject.trim().to_string(),
            message: v.message.trim().to_string(),
        }
    }
}

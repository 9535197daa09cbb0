//! Form client: field validation, submission lifecycle and notifications.
//!
//! [`ContactForm`] holds what the user typed and reacts to blur/input
//! events; [`FormClient`] sends it to the dispatch endpoint and reports the
//! outcome through a [`Notifier`].

mod client;
mod notification;
mod state;

pub use client::{FormClient, SubmitOutcome};
pub use notification::{
    Alert, LogAlert, Notification, NotificationKind, NotificationSurface, Notifier,
    HTTP_FAILURE_TEXT, NETWORK_FAILURE_TEXT, NOTIFICATION_DURATION, SUCCESS_TEXT,
};
pub use state::{ContactForm, FieldState, FormState};

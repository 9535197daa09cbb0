//! Transient notifications shown after a submission.

use std::time::{Duration, Instant};

/// How long a toast stays visible before it is hidden.
pub const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

pub const SUCCESS_TEXT: &str = "Your message has been received. I will get back to you soon.";
pub const HTTP_FAILURE_TEXT: &str = "Something went wrong. Please try again.";
pub const NETWORK_FAILURE_TEXT: &str = "Network error. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// A page element that can display a toast.
pub trait NotificationSurface: Send {
    /// Apply the text and color state and switch to the "show" class.
    fn show(&mut self, notification: &Notification);

    /// Switch to the "hide" class.
    fn hide(&mut self);
}

/// Blocking alert used when the page has no notification surface.
pub trait Alert: Send {
    fn alert(&mut self, message: &str);
}

/// Alert that writes to the log; used outside a browser.
#[derive(Debug, Default)]
pub struct LogAlert;

impl Alert for LogAlert {
    fn alert(&mut self, message: &str) {
        tracing::info!(target: "contact_mailer::alert", "{}", message);
    }
}

/// Routes notifications to a surface, or to an alert when there is none,
/// and hides the surface once its display time has passed.
pub struct Notifier {
    surface: Option<Box<dyn NotificationSurface>>,
    alert: Box<dyn Alert>,
    duration: Duration,
    hide_at: Option<Instant>,
}

impl Notifier {
    pub fn new(surface: Option<Box<dyn NotificationSurface>>, alert: Box<dyn Alert>) -> Self {
        Self {
            surface,
            alert,
            duration: NOTIFICATION_DURATION,
            hide_at: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Show `notification`, replacing whatever is currently displayed.
    pub fn notify(&mut self, notification: &Notification, now: Instant) {
        match self.surface.as_mut() {
            Some(surface) => {
                surface.show(notification);
                self.hide_at = Some(now + self.duration);
            }
            None => self.alert.alert(&notification.message),
        }
    }

    /// Hide the surface if its display time has passed.
    ///
    /// Returns `true` when this call hid it.
    pub fn tick(&mut self, now: Instant) -> bool {
        match (self.hide_at, self.surface.as_mut()) {
            (Some(deadline), Some(surface)) if now >= deadline => {
                surface.hide();
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_showing(&self) -> bool {
        self.hide_at.is_some()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(None, Box::new(LogAlert))
    }
}

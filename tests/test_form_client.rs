//! Form client tests against a mocked dispatch endpoint.

use contact_mailer::domain::Field;
use contact_mailer::error::FormError;
use contact_mailer::form::{
    Alert, ContactForm, FieldState, FormClient, FormState, Notification, NotificationKind,
    NotificationSurface, Notifier, HTTP_FAILURE_TEXT, NETWORK_FAILURE_TEXT, SUCCESS_TEXT,
};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingSurface {
    shown: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationSurface for RecordingSurface {
    fn show(&mut self, notification: &Notification) {
        self.shown.lock().unwrap().push(notification.clone());
    }

    fn hide(&mut self) {}
}

#[derive(Clone, Default)]
struct RecordingAlert {
    messages: Arc<Mutex<Vec<String>>>,
}

impl Alert for RecordingAlert {
    fn alert(&mut self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

fn filled_form() -> ContactForm {
    let mut form = ContactForm::new();
    form.input(Field::Name, "Grace Hopper");
    form.input(Field::Email, "grace@example.com");
    form.input(Field::Company, "Navy Labs");
    form.input(Field::Subject, "Speaking invitation");
    form.input(Field::Message, "Would you give a talk at our conference?");
    form
}

fn client_with_surface(endpoint: String) -> (FormClient, RecordingSurface) {
    let surface = RecordingSurface::default();
    let notifier = Notifier::new(
        Some(Box::new(surface.clone())),
        Box::new(RecordingAlert::default()),
    );
    (
        FormClient::with_endpoint(endpoint).with_notifier(notifier),
        surface,
    )
}

#[test]
fn test_submit_success_resets_form() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/api/send-email")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "company": "Navy Labs",
            "subject": "Speaking invitation",
            "message": "Would you give a talk at our conference?"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Email sent successfully"}"#)
        .expect(1)
        .create();

    let (mut client, surface) = client_with_surface(format!("{}/api/send-email", server.url()));
    let mut form = filled_form();

    client.submit(&mut form).unwrap();

    mock.assert();
    assert_eq!(form.state(), FormState::Succeeded);
    assert!(form.values().name.is_empty());
    assert_eq!(form.field_state(Field::Email), &FieldState::Untouched);

    let shown = surface.shown.lock().unwrap();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].kind, NotificationKind::Success);
    assert_eq!(shown[0].message, SUCCESS_TEXT);
}

#[test]
fn test_submit_error_keeps_form_and_shows_server_message() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/api/send-email")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Invalid API key"}"#)
        .create();

    let (mut client, surface) = client_with_surface(format!("{}/api/send-email", server.url()));
    let mut form = filled_form();

    let result = client.submit(&mut form);

    mock.assert();
    match result {
        Err(FormError::Http { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("Expected Http error, got: {:?}", other),
    }
    assert_eq!(form.state(), FormState::Failed);
    assert_eq!(form.values().name, "Grace Hopper");
    assert!(form.submit_enabled());

    let shown = surface.shown.lock().unwrap();
    assert_eq!(shown[0].kind, NotificationKind::Error);
    assert_eq!(shown[0].message, "Invalid API key");
}

#[test]
fn test_submit_error_without_message_uses_fallback() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/")
        .with_status(502)
        .with_body("Bad Gateway")
        .create();

    let (mut client, surface) = client_with_surface(format!("{}/", server.url()));
    let mut form = filled_form();

    assert!(client.submit(&mut form).is_err());

    mock.assert();
    assert_eq!(surface.shown.lock().unwrap()[0].message, HTTP_FAILURE_TEXT);
}

#[test]
fn test_submit_non_2xx_below_400_is_a_failure() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/api/send-email")
        .with_status(304)
        .create();

    let (mut client, surface) = client_with_surface(format!("{}/api/send-email", server.url()));
    let mut form = filled_form();

    let result = client.submit(&mut form);

    mock.assert();
    assert!(matches!(result, Err(FormError::Http { status: 304, .. })));
    assert_eq!(form.state(), FormState::Failed);
    assert_eq!(form.values().name, "Grace Hopper");

    let shown = surface.shown.lock().unwrap();
    assert_eq!(shown[0].kind, NotificationKind::Error);
    assert_eq!(shown[0].message, HTTP_FAILURE_TEXT);
}

#[test]
fn test_invalid_form_sends_nothing() {
    let mut server = Server::new();

    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let (mut client, surface) = client_with_surface(format!("{}/api/send-email", server.url()));
    let mut form = filled_form();
    form.input(Field::Message, "too short");

    match client.submit(&mut form) {
        Err(FormError::Validation(report)) => {
            assert_eq!(
                report.error_for(Field::Message),
                Some("Message must be at least 10 characters")
            );
        }
        other => panic!("Expected validation error, got: {:?}", other),
    }

    mock.assert();
    assert!(surface.shown.lock().unwrap().is_empty());
    assert!(form.field_state(Field::Message).is_invalid());
    assert_eq!(form.field_state(Field::Name), &FieldState::Valid);
}

#[test]
fn test_network_error_alerts_without_surface() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let alert = RecordingAlert::default();
    let messages = alert.messages.clone();
    let mut client = FormClient::with_endpoint(format!("http://127.0.0.1:{}/api/send-email", port))
        .with_notifier(Notifier::new(None, Box::new(alert)));
    let mut form = filled_form();

    let result = client.submit(&mut form);

    assert!(matches!(result, Err(FormError::Transport(_))));
    assert_eq!(form.state(), FormState::Failed);
    assert_eq!(form.values().subject, "Speaking invitation");
    assert_eq!(
        *messages.lock().unwrap(),
        vec![NETWORK_FAILURE_TEXT.to_string()]
    );
}

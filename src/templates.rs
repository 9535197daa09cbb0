//! HTML and plain-text bodies for contact emails.
//!
//! Optional fields are rendered only when present; there is never an empty
//! "Phone:" row.

use crate::models::ContactSubmission;
use std::fmt::Write;

const HTML_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
body { font-family: Arial, sans-serif; }
.container { max-width: 600px; margin: 0 auto; padding: 20px; }
.header { background: #00A86B; color: white; padding: 20px; text-align: center; }
.content { padding: 20px; background: #f9f9f9; }
.field { margin-bottom: 15px; }
.label { font-weight: bold; color: #333; }
</style>
</head>
<body>
<div class="container">
<div class="header"><h1>New Contact Form Submission</h1></div>
<div class="content">
"#;

const HTML_TAIL: &str = "</div>\n</div>\n</body>\n</html>\n";

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Labelled fields in display order, skipping absent optional ones.
fn rows(submission: &ContactSubmission) -> Vec<(&'static str, &str)> {
    let mut rows = vec![
        ("Name", submission.name.trim()),
        ("Email", submission.email.trim()),
    ];
    if let Some(phone) = submission.phone() {
        rows.push(("Phone", phone));
    }
    if let Some(company) = submission.company() {
        rows.push(("Company", company));
    }
    rows.push(("Subject", submission.subject.trim()));
    rows
}

/// Render the styled HTML body.
pub fn render_html(submission: &ContactSubmission) -> String {
    let mut html = String::from(HTML_HEAD);

    for (label, value) in rows(submission) {
        let _ = writeln!(
            html,
            r#"<div class="field"><span class="label">{}:</span> {}</div>"#,
            label,
            escape_html(value)
        );
    }

    let message = escape_html(submission.message.trim())
        .replace("\r\n", "\n")
        .replace('\n', "<br>");
    let _ = writeln!(
        html,
        r#"<div class="field"><span class="label">Message:</span><p>{}</p></div>"#,
        message
    );

    html.push_str(HTML_TAIL);
    html
}

/// Render the unstyled plain-text body.
pub fn render_text(submission: &ContactSubmission) -> String {
    let mut text = String::from("New Contact Form Submission\n============================\n");

    for (label, value) in rows(submission) {
        let _ = writeln!(text, "{}: {}", label, value);
    }
    let _ = writeln!(text, "Message: {}", submission.message.trim());

    text
}

//! Contact form submission as posted by the form client.

use serde::{Deserialize, Deserializer, Serialize};

/// A single contact form submission.
///
/// Never persisted: it lives for one HTTP exchange. Missing or `null`
/// required fields deserialize to empty strings so that validation, not
/// the JSON parser, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default, deserialize_with = "nullable_text")]
    pub name: String,

    #[serde(default, deserialize_with = "nullable_text")]
    pub email: String,

    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,

    #[serde(
        default,
        deserialize_with = "optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,

    #[serde(default, deserialize_with = "nullable_text")]
    pub subject: String,

    #[serde(default, deserialize_with = "nullable_text")]
    pub message: String,
}

impl ContactSubmission {
    /// Phone number, if one was given.
    pub fn phone(&self) -> Option<&str> {
        present(self.phone.as_deref())
    }

    /// Company name, if one was given.
    pub fn company(&self) -> Option<&str> {
        present(self.company.as_deref())
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn nullable_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blank optional fields count as absent.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

//! Field-level validation messages attached to re-rendered forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Key used for errors that do not belong to a single field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Message used when a required field is blank.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Ordered map from field name to its validation messages.
///
/// # Examples
/// ```
/// use noticeboard::domain::FormErrors;
///
/// let mut errors = FormErrors::default();
/// assert!(errors.is_empty());
/// errors.add("title", "This field is required.");
/// assert_eq!(errors.field("title"), ["This field is required."]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    /// Record a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Record a message that is not tied to a specific field.
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    /// Messages recorded for `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether any message was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return `Ok(value)` when no message was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Trim `value` and record [`REQUIRED_MESSAGE`] when nothing remains.
pub(crate) fn required<'a>(errors: &mut FormErrors, field: &str, value: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, REQUIRED_MESSAGE);
    }
    trimmed
}

/// Record a length error when `value` exceeds `max` characters.
pub(crate) fn max_length(errors: &mut FormErrors, field: &str, value: &str, max: usize) {
    let length = value.chars().count();
    if length > max {
        errors.add(
            field,
            format!("Ensure this value has at most {max} characters (it has {length})."),
        );
    }
}

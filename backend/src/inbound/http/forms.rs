//! Form payloads and the JSON contexts views render instead of templates.
//!
//! A rendered form is `{"data": {...}, "errors": {field: [messages]}}`; the
//! `data` map echoes what the user submitted (passwords excepted) so a
//! re-rendered form keeps its values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Comment, FormErrors, Note};

/// Form state embedded in page contexts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormContext {
    /// Field values to prefill.
    pub data: BTreeMap<String, String>,
    /// Validation messages keyed by field, `__all__` for the whole form.
    pub errors: FormErrors,
}

impl FormContext {
    /// Empty, unbound form.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Form prefilled with `data` and no errors.
    pub fn bound<I, K, V>(data: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: data
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            errors: FormErrors::default(),
        }
    }

    /// Attach validation messages.
    #[must_use]
    pub fn with_errors(mut self, errors: FormErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// Note create/edit submission.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: String,
}

impl NoteForm {
    /// Prefill values for editing `note`.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_owned(),
            text: note.text().to_owned(),
            slug: note.slug().as_ref().to_owned(),
        }
    }

    /// Unvalidated values as a form context.
    pub fn context(&self) -> FormContext {
        FormContext::bound([
            ("title", self.title.as_str()),
            ("text", self.text.as_str()),
            ("slug", self.slug.as_str()),
        ])
    }
}

/// Comment create/edit submission.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    /// Prefill values for editing `comment`.
    pub fn from_comment(comment: &Comment) -> Self {
        Self {
            text: comment.text.clone(),
        }
    }

    /// Unvalidated values as a form context.
    pub fn context(&self) -> FormContext {
        FormContext::bound([("text", self.text.as_str())])
    }
}

/// Login submission.
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after signing in.
    #[serde(default)]
    pub next: Option<String>,
}

impl LoginForm {
    /// Echo the submission without the password.
    pub fn context(&self) -> FormContext {
        FormContext::bound([("username", self.username.as_str())])
    }
}

/// Signup submission.
#[derive(Deserialize, ToSchema)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

impl SignupForm {
    /// Echo the submission without the passwords.
    pub fn context(&self) -> FormContext {
        FormContext::bound([("username", self.username.as_str())])
    }
}

//! Personal notes owned by a single author.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::form::{FormErrors, max_length, required};
use super::slug::{Slug, SlugValidationError};
use super::user::UserId;

/// Maximum note title length in characters.
pub const TITLE_MAX: usize = 100;

/// Message attached to `slug` when a title yields no usable slug.
pub const UNDERIVABLE_SLUG_MESSAGE: &str =
    "Could not build a slug from the title; enter one explicitly.";

/// Database identifier of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message shown when `slug` is already used by another note.
pub fn duplicate_slug_message(slug: impl fmt::Display) -> String {
    format!("{slug} - такой slug уже существует, придумайте уникальное значение!")
}

/// Validated note submission.
///
/// ## Invariants
/// - `title` and `text` are trimmed and non-empty.
/// - `title` is at most [`TITLE_MAX`] characters.
/// - `slug` is either the submitted slug or one derived from `title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    text: String,
    slug: Slug,
}

impl NoteDraft {
    /// Validate raw form values, deriving the slug when none was submitted.
    ///
    /// # Examples
    /// ```
    /// use noticeboard::domain::NoteDraft;
    ///
    /// let draft = NoteDraft::validate("Auto Slug Note", "text", "").expect("valid");
    /// assert_eq!(draft.slug().as_ref(), "auto-slug-note");
    /// ```
    pub fn validate(title: &str, text: &str, slug: &str) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::default();
        let title = required(&mut errors, "title", title);
        max_length(&mut errors, "title", title, TITLE_MAX);
        let text = required(&mut errors, "text", text);

        let slug = slug.trim();
        let slug = if slug.is_empty() {
            if title.is_empty() {
                None
            } else {
                let derived = Slug::from_title(title);
                if derived.is_none() {
                    errors.add("slug", UNDERIVABLE_SLUG_MESSAGE);
                }
                derived
            }
        } else {
            match Slug::new(slug) {
                Ok(slug) => Some(slug),
                Err(SlugValidationError::Empty) => None,
                Err(err) => {
                    errors.add("slug", err.to_string());
                    None
                }
            }
        };

        match slug {
            Some(slug) if errors.is_empty() => Ok(Self {
                title: title.to_owned(),
                text: text.to_owned(),
                slug,
            }),
            _ => Err(errors),
        }
    }

    /// Build a draft from already validated parts.
    pub fn from_parts(title: impl Into<String>, text: impl Into<String>, slug: Slug) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            slug,
        }
    }

    /// Note title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Note body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Unique slug.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }
}

/// Persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Note {
    #[schema(value_type = i64, example = 1)]
    id: NoteId,
    #[schema(example = "Sample Title")]
    title: String,
    #[schema(example = "Sample Text")]
    text: String,
    #[schema(value_type = String, example = "sample-slug")]
    slug: Slug,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    author: UserId,
}

impl Note {
    /// Assemble a stored note.
    pub fn new(id: NoteId, author: UserId, draft: NoteDraft) -> Self {
        let NoteDraft { title, text, slug } = draft;
        Self {
            id,
            title,
            text,
            slug,
            author,
        }
    }

    /// Database identifier.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Note title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Note body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Unique slug.
    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    /// Owning user.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Whether `user` owns this note.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.author == user
    }

    /// Copy of the note with the draft's fields applied; the author is kept.
    #[must_use]
    pub fn with_draft(&self, draft: NoteDraft) -> Self {
        Self::new(self.id, self.author.clone(), draft)
    }
}

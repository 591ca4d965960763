//! Public news items and the comments attached to them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::banned_words::BannedWords;
use super::form::{FormErrors, required};
use super::user::User;

/// Database identifier of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(i64);

impl NewsId {
    /// Wrap a raw identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum length of a news title, in characters.
pub const NEWS_TITLE_MAX: usize = 250;

/// Fields for publishing a news item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    /// Headline.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Publication date; the service fills in the current time when absent.
    pub date: Option<DateTime<Utc>>,
}

/// Published news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct News {
    #[schema(value_type = i64, example = 1)]
    pub id: NewsId,
    #[schema(example = "Sample News Title")]
    pub title: String,
    #[schema(example = "Sample news content")]
    pub text: String,
    pub date: DateTime<Utc>,
}

impl News {
    /// Listing position used by home page cursors.
    pub fn cursor_key(&self) -> NewsCursorKey {
        NewsCursorKey {
            date: self.date,
            id: self.id,
        }
    }
}

/// Position in the newest-first news listing.
///
/// Items strictly after the key are those with an older date, or the same
/// date and a smaller id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsCursorKey {
    /// Date of the last item on the previous page.
    pub date: DateTime<Utc>,
    /// Identifier of the last item on the previous page.
    pub id: NewsId,
}

impl NewsCursorKey {
    /// Whether `news` sorts after this key in the listing.
    pub fn precedes(&self, news: &News) -> bool {
        (news.date, news.id) < (self.date, self.id)
    }
}

/// Comment left by a user on a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    #[schema(value_type = i64, example = 1)]
    pub id: CommentId,
    #[schema(value_type = i64, example = 1)]
    pub news: NewsId,
    pub author: User,
    #[schema(example = "Sample comment text")]
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Validated comment body.
///
/// # Examples
/// ```
/// use noticeboard::domain::{BannedWords, CommentText};
///
/// let filter = BannedWords::default();
/// assert!(CommentText::validate("User comment", &filter).is_ok());
/// let errors = CommentText::validate("Ах ты, редиска", &filter).expect_err("banned");
/// assert_eq!(errors.field("text"), ["Не ругайтесь!"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    /// Require non-blank text free of banned words.
    pub fn validate(text: &str, banned: &BannedWords) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::default();
        let text = required(&mut errors, "text", text);
        if !text.is_empty() && banned.is_offensive(text) {
            errors.add("text", banned.warning());
        }
        errors.into_result(Self(text.to_owned()))
    }

    /// Validated text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<CommentText> for String {
    fn from(value: CommentText) -> Self {
        value.0
    }
}

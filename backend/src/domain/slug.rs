//! Note slugs and their derivation from titles.
//!
//! Submitted slugs follow the usual web convention of ASCII letters, digits,
//! underscores and hyphens. Derived slugs are stricter: the title is
//! transliterated from Cyrillic to Latin, lowercased and every run of other
//! characters collapses into a single hyphen.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum slug length in characters.
pub const SLUG_MAX: usize = 100;

/// Message used when a submitted slug contains disallowed characters.
pub const INVALID_SLUG_MESSAGE: &str =
    "Enter a valid “slug” consisting of letters, numbers, underscores or hyphens.";

/// Validation errors returned by [`Slug::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugValidationError {
    /// The slug was blank.
    #[error("slug must not be empty")]
    Empty,
    /// The slug exceeds [`SLUG_MAX`].
    #[error("Ensure this value has at most {max} characters (it has {length}).")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
        /// Observed length.
        length: usize,
    },
    /// The slug contains characters outside `[-a-zA-Z0-9_]`.
    #[error("{}", INVALID_SLUG_MESSAGE)]
    InvalidCharacters,
}

/// URL-safe unique identifier for a note.
///
/// # Examples
/// ```
/// use noticeboard::domain::Slug;
///
/// let slug = Slug::from_title("Новая заметка!").expect("title has letters");
/// assert_eq!(slug.as_ref(), "novaya-zametka");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate a submitted slug.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        let length = value.chars().count();
        if length > SLUG_MAX {
            return Err(SlugValidationError::TooLong {
                max: SLUG_MAX,
                length,
            });
        }
        if !value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(SlugValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }

    /// Derive a slug from a note title.
    ///
    /// Returns `None` when nothing slug-worthy remains, for example a title
    /// made only of punctuation.
    pub fn from_title(title: &str) -> Option<Self> {
        let slug = slugify(title);
        if slug.is_empty() { None } else { Some(Self(slug)) }
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for ch in title.chars() {
        let latin = transliterate(ch);
        for out in latin.chars() {
            if out.is_ascii_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(out.to_ascii_lowercase());
            } else {
                pending_hyphen = true;
            }
        }
    }
    let truncated: String = slug.chars().take(SLUG_MAX).collect();
    truncated.trim_end_matches('-').to_owned()
}

fn transliterate(ch: char) -> std::borrow::Cow<'static, str> {
    let latin = match ch.to_lowercase().next().unwrap_or(ch) {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "yi",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'є' => "ye",
        'і' => "i",
        'ї' => "yi",
        'ґ' => "g",
        '&' => "-and-",
        _ => return std::borrow::Cow::Owned(ch.to_string()),
    };
    std::borrow::Cow::Borrowed(latin)
}

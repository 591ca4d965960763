//! Banned-word filter applied to comment text.

/// Words rejected in comments unless configuration overrides them.
pub const DEFAULT_BANNED_WORDS: [&str; 2] = ["редиска", "негодяй"];

/// Field error shown when a comment contains a banned word.
pub const DEFAULT_WARNING: &str = "Не ругайтесь!";

/// Case-insensitive substring filter.
///
/// # Examples
/// ```
/// use noticeboard::domain::BannedWords;
///
/// let filter = BannedWords::default();
/// assert!(filter.is_offensive("Какой же ты НЕГОДЯЙ"));
/// assert!(!filter.is_offensive("Спасибо за новость"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedWords {
    words: Vec<String>,
    warning: String,
}

impl BannedWords {
    /// Build a filter from configured words; blank entries are ignored.
    pub fn new<I, S>(words: I, warning: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self {
            words,
            warning: warning.into(),
        }
    }

    /// Whether `text` contains any banned word.
    pub fn is_offensive(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.words.iter().any(|word| lowered.contains(word.as_str()))
    }

    /// Message attached to the `text` field on rejection.
    pub fn warning(&self) -> &str {
        &self.warning
    }
}

impl Default for BannedWords {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS, DEFAULT_WARNING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Comment with редиска", true)]
    #[case("РЕДИСКА!", true)]
    #[case("негодяйский поступок", true)]
    #[case("редис", false)]
    #[case("User comment", false)]
    fn default_filter_matches_substrings(#[case] text: &str, #[case] offensive: bool) {
        assert_eq!(BannedWords::default().is_offensive(text), offensive);
    }

    #[rstest]
    fn configured_words_are_normalised() {
        let filter = BannedWords::new(["  Spam ", ""], "no spam");
        assert!(filter.is_offensive("buy SPAM now"));
        assert!(!filter.is_offensive("anything else"));
        assert_eq!(filter.warning(), "no spam");
    }

    #[rstest]
    fn empty_configuration_allows_everything() {
        let filter = BannedWords::new(Vec::<String>::new(), DEFAULT_WARNING);
        assert!(!filter.is_offensive("редиска"));
    }
}

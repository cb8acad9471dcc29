//! Comment text moderation
//!
//! A single validation rule: comment text must not contain any of the
//! configured forbidden substrings. Matching is case-insensitive; the
//! word list is lowercased once at construction and the submitted text
//! is lowercased per check.

use crate::config::ModerationConfig;

/// Forbidden-word filter for comment text
#[derive(Debug, Clone)]
pub struct WordFilter {
    words: Vec<String>,
    warning: String,
}

impl WordFilter {
    /// Build a filter from a word list and warning message
    pub fn new(words: impl IntoIterator<Item = String>, warning: impl Into<String>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            warning: warning.into(),
        }
    }

    /// Build a filter from the moderation configuration section
    pub fn from_config(config: &ModerationConfig) -> Self {
        Self::new(config.forbidden_words.iter().cloned(), config.warning.clone())
    }

    /// The warning message shown when text is rejected
    pub fn warning(&self) -> &str {
        &self.warning
    }

    /// The lowercased word list
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether the text contains no forbidden word
    pub fn is_clean(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        !self.words.iter().any(|word| lowered.contains(word))
    }

    /// Validate comment text, returning the configured warning on
    /// rejection
    pub fn validate(&self, text: &str) -> Result<(), String> {
        if self.is_clean(text) {
            Ok(())
        } else {
            Err(self.warning.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filter() -> WordFilter {
        WordFilter::from_config(&ModerationConfig::default())
    }

    #[test]
    fn clean_text_passes() {
        assert!(filter().validate("Просто текст.").is_ok());
        assert!(filter().validate("Новый текст").is_ok());
        assert!(filter().validate("").is_ok());
    }

    #[test]
    fn text_containing_forbidden_word_is_rejected() {
        let filter = filter();
        let word = &filter.words()[0];
        let text = format!("Какой-то текст, {}, еще текст", word);
        assert_eq!(filter.validate(&text), Err(filter.warning().to_string()));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = WordFilter::new(vec!["Spam".to_string()], "no");
        assert!(!filter.is_clean("this is SPAM indeed"));
        assert!(!filter.is_clean("this is spam indeed"));
        assert!(filter.is_clean("this is ham indeed"));
    }

    #[test]
    fn word_inside_a_longer_word_still_matches() {
        // Substring semantics, not word-boundary semantics.
        let filter = WordFilter::new(vec!["scam".to_string()], "no");
        assert!(!filter.is_clean("what a scammer"));
    }

    #[test]
    fn empty_word_list_accepts_everything() {
        let filter = WordFilter::new(Vec::new(), "no");
        assert!(filter.validate("anything at all").is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn embedding_a_forbidden_word_always_rejects(
            prefix in "[a-zа-я ]{0,20}",
            suffix in "[a-zа-я ]{0,20}",
        ) {
            let filter = filter();
            let word = &filter.words()[0];
            let text = format!("{}{}{}", prefix, word, suffix);
            prop_assert!(filter.validate(&text).is_err());
        }

        #[test]
        fn latin_only_text_is_clean_for_default_words(text in "[a-zA-Z ,.!?]{0,80}") {
            // The default list is Cyrillic, so Latin text never matches.
            prop_assert!(filter().validate(&text).is_ok());
        }
    }
}

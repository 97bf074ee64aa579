//! Resume text normalization ahead of vectorization.

use super::patterns::{HASHTAG, MENTION, NON_ASCII, PUNCT, RETWEET_CC, URL, WHITESPACE_RUN};

/// Rewrites raw resume text into the form the vectorizer was trained on.
///
/// Rules run in a fixed order, each replacing every occurrence:
/// 1. URLs (`http…` plus trailing whitespace) become a space
/// 2. `RT` and `cc` become a space, wherever they occur
/// 3. hashtags are deleted
/// 4. mentions become two spaces
/// 5. ASCII punctuation becomes a space
/// 6. non-ASCII characters become a space
/// 7. whitespace runs collapse to one space
///
/// Hashtags and mentions must go before punctuation, otherwise `#` and `@` are
/// already gone. Leading and trailing spaces are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, text: &str) -> String {
        let text = URL.replace_all(text, " ");
        let text = RETWEET_CC.replace_all(&text, " ");
        let text = HASHTAG.replace_all(&text, "");
        let text = MENTION.replace_all(&text, "  ");
        let text = PUNCT.replace_all(&text, " ");
        let text = NON_ASCII.replace_all(&text, " ");
        WHITESPACE_RUN.replace_all(&text, " ").into_owned()
    }
}

/// Normalize resume text.
pub fn normalize(text: &str) -> String {
    TextNormalizer::new().normalize(text)
}

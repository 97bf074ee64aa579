//! Regex patterns for resume cleaning and contact extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Characters replaced by a space during normalization.
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

lazy_static! {
    // Cleaning rules, applied in this order by the normalizer.
    // Whitespace also covers the U+001C..U+001F separators.
    pub static ref URL: Regex = Regex::new(r"http[^\s\x1C-\x1F]+[\s\x1C-\x1F]*").unwrap();

    pub static ref RETWEET_CC: Regex = Regex::new(r"RT|cc").unwrap();

    pub static ref HASHTAG: Regex = Regex::new(r"#[^\s\x1C-\x1F]+").unwrap();

    pub static ref MENTION: Regex = Regex::new(r"@[^\s\x1C-\x1F]+").unwrap();

    pub static ref PUNCT: Regex = Regex::new(
        &format!("[{}]", regex::escape(PUNCTUATION))
    ).unwrap();

    pub static ref NON_ASCII: Regex = Regex::new(r"[^\x00-\x7F]").unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"[\s\x1C-\x1F]+").unwrap();

    // Contact fields
    pub static ref NAME_LABEL: Regex = Regex::new(r"Name:[\s\x1C-\x1F]*(.*)").unwrap();

    // `[A-Z|a-z]` admits a literal '|' in the TLD; kept for output compatibility
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b"
    ).unwrap();

    pub static ref PHONE: Regex = Regex::new(r"\+?\d[\d -]{8,12}\d").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punct_covers_every_character() {
        for c in PUNCTUATION.chars() {
            assert!(PUNCT.is_match(&c.to_string()), "{:?} not matched", c);
        }
        assert!(!PUNCT.is_match("a"));
        assert!(!PUNCT.is_match(" "));
        assert!(!PUNCT.is_match("7"));
    }

    #[test]
    fn test_url_swallows_trailing_whitespace() {
        assert_eq!(URL.replace_all("see https://x.io/a   now", " "), "see  now");
    }

    #[test]
    fn test_information_separators_are_whitespace() {
        assert_eq!(HASHTAG.find("#tag\u{1f}word").unwrap().as_str(), "#tag");
        assert_eq!(MENTION.find("@bob\u{1c}x").unwrap().as_str(), "@bob");
        assert_eq!(URL.replace_all("http://a.b\u{1d}\u{1e}next", " "), " next");
        assert_eq!(WHITESPACE_RUN.replace_all("a\u{1c} \u{1f}b", " "), "a b");
    }

    #[test]
    fn test_phone_bounds() {
        assert!(PHONE.is_match("0123456789"));
        assert!(!PHONE.is_match("123456789"));
        assert_eq!(PHONE.find("+1 555-123-4567").unwrap().as_str(), "+1 555-123-4567");
    }
}

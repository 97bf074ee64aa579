//! Contact field extraction from raw resume text.

use super::patterns::{EMAIL, NAME_LABEL, PHONE};
use crate::models::result::{ContactInfo, EMAIL_NOT_FOUND, NAME_NOT_FOUND, PHONE_NOT_FOUND};

/// One of the three contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl ContactField {
    /// Value reported when the field is absent.
    pub fn sentinel(self) -> &'static str {
        match self {
            ContactField::Name => NAME_NOT_FOUND,
            ContactField::Email => EMAIL_NOT_FOUND,
            ContactField::Phone => PHONE_NOT_FOUND,
        }
    }

    /// First match of this field in `text`.
    ///
    /// For names only the text after the `Name:` label is returned, up to the
    /// end of that line. A label followed by blank lines picks up the next
    /// non-empty line.
    pub fn find(self, text: &str) -> Option<String> {
        match self {
            ContactField::Name => NAME_LABEL
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string()),
            ContactField::Email => EMAIL.find(text).map(|m| m.as_str().to_string()),
            ContactField::Phone => PHONE.find(text).map(|m| m.as_str().to_string()),
        }
    }

    /// First match, or the sentinel.
    pub fn find_or_sentinel(self, text: &str) -> String {
        self.find(text).unwrap_or_else(|| self.sentinel().to_string())
    }
}

/// Pulls name, email and phone out of raw (not normalized) text.
///
/// The three searches are independent: a missing email never stops the phone
/// search. Names are only found behind a literal `Name:` label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContactExtractor;

impl ContactExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> ContactInfo {
        ContactInfo {
            name: ContactField::Name.find_or_sentinel(text),
            email: ContactField::Email.find_or_sentinel(text),
            phone: ContactField::Phone.find_or_sentinel(text),
        }
    }
}

/// Extract contact fields from raw text.
pub fn extract_contacts(text: &str) -> ContactInfo {
    ContactExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_resume_header() {
        let text = "Name: John Smith\nEmail: john@example.com\nPhone: +1 555-123-4567\nExperienced Java developer with Hadoop skills.";
        let info = extract_contacts(text);

        assert_eq!(info.name, "John Smith");
        assert_eq!(info.email, "john@example.com");
        assert_eq!(info.phone, "+1 555-123-4567");
    }

    #[test]
    fn test_name_label() {
        assert_eq!(extract_contacts("Name: Jane Doe").name, "Jane Doe");
        assert_eq!(extract_contacts("Full Name:   Ada Lovelace  \nx").name, "Ada Lovelace  ");
        assert_eq!(extract_contacts("Name:\nAlan Turing\nmore").name, "Alan Turing");
    }

    #[test]
    fn test_name_requires_label() {
        let info = extract_contacts("Jane Doe\nSoftware engineer");
        assert_eq!(info.name, "Name not found");
        assert!(!info.has_name());
    }

    #[test]
    fn test_email_not_found_without_at() {
        let info = extract_contacts("Contact me on the usual channels, example.com");
        assert_eq!(info.email, "Email not found");
    }

    #[test]
    fn test_email_first_match() {
        let info = extract_contacts("a.b+cv@mail.co.uk or other@example.org");
        assert_eq!(info.email, "a.b+cv@mail.co.uk");
    }

    #[test]
    fn test_email_rejects_short_tld() {
        assert_eq!(extract_contacts("user@host.c").email, "Email not found");
    }

    #[test]
    fn test_phone_variants() {
        assert_eq!(extract_contacts("Call 9876543210 now").phone, "9876543210");
        assert_eq!(extract_contacts("Mob: 98765 43210").phone, "98765 43210");
        assert_eq!(extract_contacts("tel 555-1234").phone, "Phone number not found");
    }

    #[test]
    fn test_phone_stops_at_newline() {
        let info = extract_contacts("12345\n67890");
        assert_eq!(info.phone, "Phone number not found");
    }

    #[test]
    fn test_fields_are_independent() {
        let info = extract_contacts("reach me at dev@rust-lang.org");
        assert_eq!(info.email, "dev@rust-lang.org");
        assert_eq!(info.name, "Name not found");
        assert_eq!(info.phone, "Phone number not found");
    }

    #[test]
    fn test_extraction_runs_on_raw_text() {
        // a non-ASCII separator next to the number does not block the match
        let info = extract_contacts("☎+44 7946 0958");
        assert_eq!(info.phone, "+44 7946 0958");
    }
}

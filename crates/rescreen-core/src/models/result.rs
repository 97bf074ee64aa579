//! Per-document screening output.

use serde::{Deserialize, Serialize};

/// Returned in place of a name when no `Name:` label is present.
pub const NAME_NOT_FOUND: &str = "Name not found";
/// Returned in place of an email when no address matches.
pub const EMAIL_NOT_FOUND: &str = "Email not found";
/// Returned in place of a phone number when no number matches.
pub const PHONE_NOT_FOUND: &str = "Phone number not found";

/// Contact fields found in a document. Each field holds either the matched text
/// or its sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactInfo {
    /// All three fields set to their sentinels.
    pub fn not_found() -> Self {
        Self {
            name: NAME_NOT_FOUND.to_string(),
            email: EMAIL_NOT_FOUND.to_string(),
            phone: PHONE_NOT_FOUND.to_string(),
        }
    }

    pub fn has_name(&self) -> bool {
        self.name != NAME_NOT_FOUND
    }

    pub fn has_email(&self) -> bool {
        self.email != EMAIL_NOT_FOUND
    }

    pub fn has_phone(&self) -> bool {
        self.phone != PHONE_NOT_FOUND
    }
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self::not_found()
    }
}

/// Result of screening one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    /// Contact fields extracted from raw text.
    #[serde(flatten)]
    pub contact: ContactInfo,
    /// Raw id returned by the classifier.
    pub category_id: i64,
    /// Human readable label, `"Unknown"` for ids outside the table.
    pub category: String,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ScreeningResult {
    /// Render the four display fields as labeled lines.
    pub fn to_display(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nPhone: {}\nPredicted Category: {}\n",
            self.contact.name, self.contact.email, self.contact.phone, self.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_fields() {
        let result = ScreeningResult {
            contact: ContactInfo {
                name: "Jane Doe".to_string(),
                ..ContactInfo::not_found()
            },
            category_id: 6,
            category: "Data Science".to_string(),
            processing_time_ms: 3,
        };

        assert_eq!(
            result.to_display(),
            "Name: Jane Doe\nEmail: Email not found\nPhone: Phone number not found\nPredicted Category: Data Science\n"
        );
    }

    #[test]
    fn test_json_is_flat() {
        let result = ScreeningResult {
            contact: ContactInfo::not_found(),
            category_id: 99,
            category: "Unknown".to_string(),
            processing_time_ms: 0,
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["name"], "Name not found");
        assert_eq!(json["category_id"], 99);
        assert_eq!(json["category"], "Unknown");
    }
}

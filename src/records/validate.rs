// Local pre-flight checks for records before they are sent anywhere.
//
// These checks only report problems. Redaction is the guardrail's job.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde_json::Value;

/// Top-level fields every record must carry.
pub const REQUIRED_FIELDS: &[&str] = &["modelInput", "metadata", "recordId"];

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+1-\d{3}-\d{3}-\d{4}$").expect("valid phone regex"));

/// A single problem found in a record.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationIssue {
    NotAnObject,
    MissingField(&'static str),
    InvalidEmail(String),
    InvalidPhone(String),
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "record is not a JSON object"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidEmail(email) => write!(f, "email `{email}` is not a valid address"),
            Self::InvalidPhone(phone) => write!(f, "phone `{phone}` is not in +1-XXX-XXX-XXXX form"),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Check a raw JSON record. An empty result means the record is fine.
///
/// Works on `Value` rather than `FeedbackRecord` so a record with missing
/// fields can still be reported on instead of failing to deserialize.
pub fn validate_record(record: &Value) -> Vec<ValidationIssue> {
    let Some(object) = record.as_object() else {
        return vec![ValidationIssue::NotAnObject];
    };

    let mut issues: Vec<ValidationIssue> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| ValidationIssue::MissingField(*field))
        .collect();

    let contact = record.pointer("/metadata/contact");
    if let Some(email) = contact.and_then(|c| c.get("email")).and_then(Value::as_str) {
        if !is_valid_email(email) {
            issues.push(ValidationIssue::InvalidEmail(email.to_string()));
        }
    }
    if let Some(phone) = contact.and_then(|c| c.get("phone")).and_then(Value::as_str) {
        if !is_valid_phone(phone) {
            issues.push(ValidationIssue::InvalidPhone(phone.to_string()));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_generated_style_contact() {
        assert!(is_valid_email("olivia.garcia42@example.com"));
        assert!(is_valid_phone("+1-212-555-1234"));
    }

    #[test]
    fn rejects_malformed_contact() {
        assert!(!is_valid_email("olivia@localhost"));
        assert!(!is_valid_email("not an email"));
        assert!(!is_valid_phone("212-555-1234"));
        assert!(!is_valid_phone("+1-212-555-12345"));
    }

    #[test]
    fn reports_every_missing_field() {
        let issues = validate_record(&json!({"recordId": "001"}));
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingField("modelInput"),
                ValidationIssue::MissingField("metadata"),
            ]
        );
    }

    #[test]
    fn non_object_is_rejected() {
        assert_eq!(validate_record(&json!([1, 2])), vec![ValidationIssue::NotAnObject]);
    }

    #[test]
    fn bad_contact_values_are_reported() {
        let record = json!({
            "recordId": "001",
            "modelInput": {},
            "metadata": {"contact": {"email": "nope", "phone": "555"}}
        });
        let issues = validate_record(&record);
        assert_eq!(
            issues,
            vec![
                ValidationIssue::InvalidEmail("nope".to_string()),
                ValidationIssue::InvalidPhone("555".to_string()),
            ]
        );
    }
}

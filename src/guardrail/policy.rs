// The PII protection policy, expressed in the vendor's JSON shape.
//
// These types mirror the CreateGuardrail payload so the policy can be printed
// with `--dry-run` and checked in tests without touching the network. The
// Bedrock implementation converts them into SDK types at call time.

use serde::Serialize;

pub const DEFAULT_GUARDRAIL_NAME: &str = "PII_Protection_Guardrail";
pub const DEFAULT_GUARDRAIL_DESCRIPTION: &str = "Guardrail to protect customer PII information";

pub const BLOCKED_INPUT_MESSAGE: &str =
    "This input contains sensitive personal information and cannot be processed.";
pub const BLOCKED_OUTPUT_MESSAGE: &str =
    "This response contains sensitive information and has been blocked.";

/// Email pattern used by the custom regex detector.
pub const CUSTOM_EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiEntityType {
    Email,
    Phone,
    CreditDebitCardNumber,
    UsSocialSecurityNumber,
    Address,
}

impl PiiEntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::CreditDebitCardNumber => "CREDIT_DEBIT_CARD_NUMBER",
            Self::UsSocialSecurityNumber => "US_SOCIAL_SECURITY_NUMBER",
            Self::Address => "ADDRESS",
        }
    }
}

/// What the guardrail does with a detected entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensitiveAction {
    Anonymize,
}

impl SensitiveAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anonymize => "ANONYMIZE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentFilterType {
    Misconduct,
}

impl ContentFilterType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Misconduct => "MISCONDUCT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterStrength {
    High,
}

impl FilterStrength {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
        }
    }
}

/// Full configuration payload for creating a guardrail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardrailPolicy {
    pub name: String,
    pub description: String,
    pub blocked_input_messaging: String,
    pub blocked_outputs_messaging: String,
    pub sensitive_information_policy_config: SensitiveInformationPolicy,
    pub content_policy_config: ContentPolicy,
    pub word_policy_config: WordPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveInformationPolicy {
    pub pii_entities_config: Vec<PiiEntity>,
    pub regexes_config: Vec<RegexDetector>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PiiEntity {
    #[serde(rename = "type")]
    pub entity_type: PiiEntityType,
    pub action: SensitiveAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegexDetector {
    pub name: String,
    pub description: String,
    pub pattern: String,
    pub action: SensitiveAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPolicy {
    pub filters_config: Vec<ContentFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFilter {
    pub input_strength: FilterStrength,
    pub output_strength: FilterStrength,
    #[serde(rename = "type")]
    pub filter_type: ContentFilterType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordPolicy {
    pub words_config: Vec<BlockedWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedWord {
    pub text: String,
}

impl GuardrailPolicy {
    /// The customer-PII policy: anonymize contact and financial identifiers,
    /// filter misconduct strongly, and block explicit SSN mentions.
    pub fn pii_protection(name: impl Into<String>, description: impl Into<String>) -> Self {
        let anonymize = |entity_type| PiiEntity {
            entity_type,
            action: SensitiveAction::Anonymize,
        };

        Self {
            name: name.into(),
            description: description.into(),
            blocked_input_messaging: BLOCKED_INPUT_MESSAGE.to_string(),
            blocked_outputs_messaging: BLOCKED_OUTPUT_MESSAGE.to_string(),
            sensitive_information_policy_config: SensitiveInformationPolicy {
                pii_entities_config: vec![
                    anonymize(PiiEntityType::Email),
                    anonymize(PiiEntityType::Phone),
                    anonymize(PiiEntityType::CreditDebitCardNumber),
                    anonymize(PiiEntityType::UsSocialSecurityNumber),
                    anonymize(PiiEntityType::Address),
                ],
                regexes_config: vec![RegexDetector {
                    name: "CustomEmailPattern".to_string(),
                    description: "Custom pattern to catch email addresses".to_string(),
                    pattern: CUSTOM_EMAIL_PATTERN.to_string(),
                    action: SensitiveAction::Anonymize,
                }],
            },
            content_policy_config: ContentPolicy {
                filters_config: vec![ContentFilter {
                    input_strength: FilterStrength::High,
                    output_strength: FilterStrength::High,
                    filter_type: ContentFilterType::Misconduct,
                }],
            },
            word_policy_config: WordPolicy {
                words_config: ["ssn", "social security"]
                    .into_iter()
                    .map(|text| BlockedWord {
                        text: text.to_string(),
                    })
                    .collect(),
            },
        }
    }
}

impl Default for GuardrailPolicy {
    fn default() -> Self {
        Self::pii_protection(DEFAULT_GUARDRAIL_NAME, DEFAULT_GUARDRAIL_DESCRIPTION)
    }
}

// Feedback records — the one data contract shared by every command.
//
// A record is generated once, written to a JSONL file, and later read back
// by the apply command. Field names match the wire format exactly, which
// mixes camelCase (recordId, modelInput) with snake_case (everything else).

pub mod generator;
pub mod jsonl;
pub mod validate;

use serde::{Deserialize, Serialize};

/// Placeholder written over personally-identifying contact fields.
pub const REDACTED: &str = "***REDACTED***";

/// A single customer-feedback record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(rename = "recordId")]
    pub record_id: String,
    #[serde(rename = "modelInput")]
    pub model_input: ModelInput,
    pub metadata: Metadata,
}

/// Parameters for a single inference call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInput {
    pub prompt: String,
    pub max_tokens_to_sample: u32,
    pub temperature: f64,
}

/// Descriptive and personally-identifying fields attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub customer_id: String,
    pub feedback: String,
    pub pizza_type: String,
    pub rating: f64,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// What the apply command prints for a record once the model has answered.
///
/// Field order matters for display: modelInput, metadata, recordId, then
/// the raw model reply.
#[derive(Debug, Clone, Serialize)]
pub struct RedactedSummary {
    #[serde(rename = "modelInput")]
    pub model_input: ModelInput,
    pub metadata: Metadata,
    #[serde(rename = "recordId")]
    pub record_id: String,
    pub model_response: serde_json::Value,
}

impl Contact {
    /// A contact block with every field replaced by the redaction marker.
    pub fn redacted() -> Self {
        Self {
            name: REDACTED.to_string(),
            email: REDACTED.to_string(),
            phone: REDACTED.to_string(),
        }
    }
}

impl FeedbackRecord {
    /// Build the redacted summary for display alongside the model's reply.
    ///
    /// Only the contact block is scrubbed. The prompt is copied verbatim
    /// since generated prompts never embed contact details.
    pub fn redacted(&self, model_response: serde_json::Value) -> RedactedSummary {
        RedactedSummary {
            model_input: self.model_input.clone(),
            metadata: Metadata {
                contact: Contact::redacted(),
                ..self.metadata.clone()
            },
            record_id: self.record_id.clone(),
            model_response,
        }
    }
}

// Guardrail service traits — the seam between our code and the cloud SDK.
//
// The Bedrock implementations live in `bedrock.rs`. Tests plug in recording
// mocks so the payload shapes can be checked without credentials.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::GuardrailError;
use super::invoke::InvokeRequest;
use super::policy::GuardrailPolicy;

/// Whether content is being checked on its way into or out of the model.
/// Records are only ever checked as model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Input,
}

impl ContentSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "INPUT",
        }
    }
}

/// Marks how the guardrail should treat a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentQualifier {
    GuardContent,
}

impl ContentQualifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GuardContent => "guard_content",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub qualifiers: Vec<ContentQualifier>,
}

/// A request to evaluate content against an existing guardrail.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyGuardrailRequest {
    pub guardrail_identifier: String,
    pub guardrail_version: String,
    pub source: ContentSource,
    pub content: Vec<TextBlock>,
}

/// What the guardrail decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardrailAction {
    /// Content passed through untouched (wire value `NONE`)
    Passed,
    /// The guardrail masked or blocked part of the content
    Intervened,
    /// An action this build does not know about, kept verbatim
    Unknown(String),
}

impl GuardrailAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "NONE",
            Self::Intervened => "GUARDRAIL_INTERVENED",
            Self::Unknown(value) => value,
        }
    }
}

/// Result of applying a guardrail.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardrailAssessment {
    pub action: GuardrailAction,
    /// Rewritten content when the guardrail intervened
    pub outputs: Vec<String>,
    /// Number of policy assessments the service reported
    pub assessment_count: usize,
}

/// Identifiers of a newly created guardrail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedGuardrail {
    pub guardrail_id: String,
    pub guardrail_arn: String,
    pub version: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Administrative side: provisioning guardrails.
#[async_trait]
pub trait GuardrailAdmin: Send + Sync {
    async fn create_guardrail(
        &self,
        policy: &GuardrailPolicy,
    ) -> Result<CreatedGuardrail, GuardrailError>;
}

/// Runtime side: evaluating content and calling the hosted model.
#[async_trait]
pub trait GuardrailRuntime: Send + Sync {
    async fn apply_guardrail(
        &self,
        request: &ApplyGuardrailRequest,
    ) -> Result<GuardrailAssessment, GuardrailError>;

    /// Invoke a model with a JSON body and return the parsed JSON reply.
    async fn invoke_model(
        &self,
        model_id: &str,
        request: &InvokeRequest,
    ) -> Result<serde_json::Value, GuardrailError>;
}


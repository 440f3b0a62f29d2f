// Guarded model invocation: evaluate a record's prompt against the guardrail,
// then send it to the hosted model.
//
// Two remote calls in sequence. If the guardrail call fails the model is
// never called. Nothing is retried; the caller decides whether to move on
// to the next record.

use tracing::{debug, info, warn};

use super::error::InvokeError;
use super::invoke::InvokeRequest;
use super::traits::{
    ApplyGuardrailRequest, ContentQualifier, ContentSource, GuardrailAction, GuardrailAssessment,
    GuardrailRuntime, TextBlock,
};
use crate::records::FeedbackRecord;

pub const DEFAULT_GUARDRAIL_VERSION: &str = "DRAFT";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";

/// Both halves of a successful guarded call.
#[derive(Debug, Clone)]
pub struct GuardedResponse {
    pub assessment: GuardrailAssessment,
    pub model_response: serde_json::Value,
}

/// Applies one guardrail and one model to feedback records.
pub struct GuardedInvoker<'a> {
    runtime: &'a dyn GuardrailRuntime,
    guardrail_id: String,
    guardrail_version: String,
    model_id: String,
}

impl<'a> GuardedInvoker<'a> {
    pub fn new(
        runtime: &'a dyn GuardrailRuntime,
        guardrail_id: impl Into<String>,
        guardrail_version: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            runtime,
            guardrail_id: guardrail_id.into(),
            guardrail_version: guardrail_version.into(),
            model_id: model_id.into(),
        }
    }

    pub fn guardrail_id(&self) -> &str {
        &self.guardrail_id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// The request sent to the guardrail for a record: the prompt as a single
    /// input text block marked as content to guard.
    pub fn guardrail_request(&self, record: &FeedbackRecord) -> ApplyGuardrailRequest {
        ApplyGuardrailRequest {
            guardrail_identifier: self.guardrail_id.clone(),
            guardrail_version: self.guardrail_version.clone(),
            source: ContentSource::Input,
            content: vec![TextBlock {
                text: record.model_input.prompt.clone(),
                qualifiers: vec![ContentQualifier::GuardContent],
            }],
        }
    }

    /// Evaluate a record's prompt against the guardrail.
    pub async fn apply_guardrail(
        &self,
        record: &FeedbackRecord,
    ) -> Result<GuardrailAssessment, InvokeError> {
        let request = self.guardrail_request(record);
        let assessment = self
            .runtime
            .apply_guardrail(&request)
            .await
            .map_err(InvokeError::Guardrail)?;

        if let GuardrailAction::Unknown(action) = &assessment.action {
            warn!(
                record_id = record.record_id,
                action = action.as_str(),
                "Guardrail returned an unrecognized action"
            );
        }

        debug!(
            record_id = record.record_id,
            action = assessment.action.as_str(),
            assessments = assessment.assessment_count,
            "Guardrail applied"
        );
        Ok(assessment)
    }

    /// Apply the guardrail, then invoke the model with the record's input.
    pub async fn invoke_with_guardrail(
        &self,
        record: &FeedbackRecord,
    ) -> Result<GuardedResponse, InvokeError> {
        let assessment = self.apply_guardrail(record).await?;

        let body = InvokeRequest::from_model_input(&record.model_input);
        let model_response = self
            .runtime
            .invoke_model(&self.model_id, &body)
            .await
            .map_err(InvokeError::Model)?;

        info!(
            record_id = record.record_id,
            model_id = self.model_id,
            guardrail_action = assessment.action.as_str(),
            "Model response received"
        );

        Ok(GuardedResponse {
            assessment,
            model_response,
        })
    }
}

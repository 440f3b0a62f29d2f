// Amazon Bedrock implementations of the guardrail traits.
//
// `BedrockAdmin` talks to the control plane (`bedrock`) to create guardrails.
// `BedrockRuntime` talks to `bedrock-runtime` to apply guardrails and invoke
// models. Both are thin: build the SDK request from our types, send it,
// translate the reply or classify the error.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrock::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_bedrock::types::{
    GuardrailContentFilterConfig, GuardrailContentFilterType, GuardrailContentPolicyConfig,
    GuardrailFilterStrength, GuardrailPiiEntityConfig, GuardrailPiiEntityType,
    GuardrailRegexConfig, GuardrailSensitiveInformationAction,
    GuardrailSensitiveInformationPolicyConfig, GuardrailWordConfig, GuardrailWordPolicyConfig,
};
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::{
    GuardrailAction as SdkGuardrailAction, GuardrailContentBlock, GuardrailContentQualifier,
    GuardrailContentSource, GuardrailTextBlock,
};
use tracing::debug;

use super::error::GuardrailError;
use super::invoke::InvokeRequest;
use super::policy::{ContentPolicy, GuardrailPolicy, SensitiveInformationPolicy, WordPolicy};
use super::traits::{
    ApplyGuardrailRequest, ContentSource, CreatedGuardrail, GuardrailAction, GuardrailAdmin,
    GuardrailAssessment, GuardrailRuntime, TextBlock,
};

/// Turn an SDK error into a classified `GuardrailError`.
fn classify<E>(err: &E) -> GuardrailError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(err).to_string());
    GuardrailError::from_code(err.code(), message)
}

fn build_error(err: impl std::fmt::Display) -> GuardrailError {
    GuardrailError::Request(err.to_string())
}

/// Guardrail provisioning via the Bedrock control plane.
pub struct BedrockAdmin {
    client: aws_sdk_bedrock::Client,
}

impl BedrockAdmin {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_bedrock::Client::new(sdk_config),
        }
    }
}

fn sensitive_information_config(
    policy: &SensitiveInformationPolicy,
) -> Result<GuardrailSensitiveInformationPolicyConfig, GuardrailError> {
    let mut builder = GuardrailSensitiveInformationPolicyConfig::builder();

    for entity in &policy.pii_entities_config {
        let config = GuardrailPiiEntityConfig::builder()
            .r#type(GuardrailPiiEntityType::from(entity.entity_type.as_str()))
            .action(GuardrailSensitiveInformationAction::from(
                entity.action.as_str(),
            ))
            .build()
            .map_err(build_error)?;
        builder = builder.pii_entities_config(config);
    }

    for regex in &policy.regexes_config {
        let config = GuardrailRegexConfig::builder()
            .name(&regex.name)
            .description(&regex.description)
            .pattern(&regex.pattern)
            .action(GuardrailSensitiveInformationAction::from(
                regex.action.as_str(),
            ))
            .build()
            .map_err(build_error)?;
        builder = builder.regexes_config(config);
    }

    Ok(builder.build())
}

fn content_config(policy: &ContentPolicy) -> Result<GuardrailContentPolicyConfig, GuardrailError> {
    let mut builder = GuardrailContentPolicyConfig::builder();
    for filter in &policy.filters_config {
        let config = GuardrailContentFilterConfig::builder()
            .r#type(GuardrailContentFilterType::from(filter.filter_type.as_str()))
            .input_strength(GuardrailFilterStrength::from(filter.input_strength.as_str()))
            .output_strength(GuardrailFilterStrength::from(
                filter.output_strength.as_str(),
            ))
            .build()
            .map_err(build_error)?;
        builder = builder.filters_config(config);
    }
    builder.build().map_err(build_error)
}

fn word_config(policy: &WordPolicy) -> Result<GuardrailWordPolicyConfig, GuardrailError> {
    let mut builder = GuardrailWordPolicyConfig::builder();
    for word in &policy.words_config {
        let config = GuardrailWordConfig::builder()
            .text(&word.text)
            .build()
            .map_err(build_error)?;
        builder = builder.words_config(config);
    }
    Ok(builder.build())
}

#[async_trait]
impl GuardrailAdmin for BedrockAdmin {
    async fn create_guardrail(
        &self,
        policy: &GuardrailPolicy,
    ) -> Result<CreatedGuardrail, GuardrailError> {
        debug!(name = policy.name, "Creating guardrail");

        let output = self
            .client
            .create_guardrail()
            .name(&policy.name)
            .description(&policy.description)
            .blocked_input_messaging(&policy.blocked_input_messaging)
            .blocked_outputs_messaging(&policy.blocked_outputs_messaging)
            .sensitive_information_policy_config(sensitive_information_config(
                &policy.sensitive_information_policy_config,
            )?)
            .content_policy_config(content_config(&policy.content_policy_config)?)
            .word_policy_config(word_config(&policy.word_policy_config)?)
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let created_at = output.created_at();
        Ok(CreatedGuardrail {
            guardrail_id: output.guardrail_id().to_string(),
            guardrail_arn: output.guardrail_arn().to_string(),
            version: output.version().to_string(),
            created_at: chrono::DateTime::from_timestamp(
                created_at.secs(),
                created_at.subsec_nanos(),
            ),
        })
    }
}

impl From<&SdkGuardrailAction> for GuardrailAction {
    fn from(action: &SdkGuardrailAction) -> Self {
        match action {
            SdkGuardrailAction::None => Self::Passed,
            SdkGuardrailAction::GuardrailIntervened => Self::Intervened,
            other => Self::Unknown(other.as_str().to_string()),
        }
    }
}

fn content_source(source: ContentSource) -> GuardrailContentSource {
    GuardrailContentSource::from(source.as_str())
}

fn content_block(block: &TextBlock) -> Result<GuardrailContentBlock, GuardrailError> {
    let mut text = GuardrailTextBlock::builder().text(&block.text);
    for qualifier in &block.qualifiers {
        text = text.qualifiers(GuardrailContentQualifier::from(qualifier.as_str()));
    }
    Ok(GuardrailContentBlock::Text(text.build().map_err(build_error)?))
}

/// Guardrail evaluation and model invocation via Bedrock runtime.
pub struct BedrockRuntime {
    client: aws_sdk_bedrockruntime::Client,
}

impl BedrockRuntime {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_bedrockruntime::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl GuardrailRuntime for BedrockRuntime {
    async fn apply_guardrail(
        &self,
        request: &ApplyGuardrailRequest,
    ) -> Result<GuardrailAssessment, GuardrailError> {
        let mut call = self
            .client
            .apply_guardrail()
            .guardrail_identifier(&request.guardrail_identifier)
            .guardrail_version(&request.guardrail_version)
            .source(content_source(request.source));

        for block in &request.content {
            call = call.content(content_block(block)?);
        }

        let output = call.send().await.map_err(|e| classify(&e))?;

        Ok(GuardrailAssessment {
            action: GuardrailAction::from(output.action()),
            outputs: output
                .outputs()
                .iter()
                .filter_map(|o| o.text().map(str::to_string))
                .collect(),
            assessment_count: output.assessments().len(),
        })
    }

    async fn invoke_model(
        &self,
        model_id: &str,
        request: &InvokeRequest,
    ) -> Result<serde_json::Value, GuardrailError> {
        let body = serde_json::to_vec(request)?;

        let output = self
            .client
            .invoke_model()
            .model_id(model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| classify(&e))?;

        Ok(serde_json::from_slice(output.body().as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrail::traits::ContentQualifier;

    #[test]
    fn pii_policy_converts_to_known_sdk_values() {
        let policy = GuardrailPolicy::default();
        let config =
            sensitive_information_config(&policy.sensitive_information_policy_config).unwrap();

        let entities = config.pii_entities_config();
        assert_eq!(entities.len(), 5);
        assert_eq!(entities[0].r#type(), &GuardrailPiiEntityType::Email);
        assert_eq!(
            entities[0].action(),
            &GuardrailSensitiveInformationAction::Anonymize
        );
        for entity in entities {
            assert!(
                GuardrailPiiEntityType::values().contains(&entity.r#type().as_str()),
                "unrecognized entity type {:?}",
                entity.r#type()
            );
            assert_eq!(
                entity.action(),
                &GuardrailSensitiveInformationAction::Anonymize
            );
        }

        let regexes = config.regexes_config();
        assert_eq!(regexes.len(), 1);
        assert_eq!(regexes[0].name(), "CustomEmailPattern");
        assert_eq!(
            regexes[0].action(),
            &GuardrailSensitiveInformationAction::Anonymize
        );
    }

    #[test]
    fn content_filters_convert_to_known_sdk_values() {
        let policy = GuardrailPolicy::default();
        let config = content_config(&policy.content_policy_config).unwrap();

        let filters = config.filters_config();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].r#type(), &GuardrailContentFilterType::Misconduct);
        assert_eq!(filters[0].input_strength(), &GuardrailFilterStrength::High);
        assert_eq!(filters[0].output_strength(), &GuardrailFilterStrength::High);
    }

    #[test]
    fn blocked_words_are_carried_over() {
        let policy = GuardrailPolicy::default();
        let config = word_config(&policy.word_policy_config).unwrap();

        let words: Vec<&str> = config.words_config().iter().map(|w| w.text()).collect();
        assert_eq!(words, vec!["ssn", "social security"]);
    }

    #[test]
    fn text_block_keeps_guard_content_qualifier() {
        let block = content_block(&TextBlock {
            text: "Customer says: Arrived cold".to_string(),
            qualifiers: vec![ContentQualifier::GuardContent],
        })
        .unwrap();

        let text = block.as_text().unwrap();
        assert_eq!(text.text(), "Customer says: Arrived cold");
        assert_eq!(
            text.qualifiers(),
            &[GuardrailContentQualifier::GuardContent]
        );
        assert_eq!(
            content_source(ContentSource::Input),
            GuardrailContentSource::Input
        );
    }

    #[test]
    fn sdk_actions_map_without_guessing() {
        assert_eq!(
            GuardrailAction::from(&SdkGuardrailAction::None),
            GuardrailAction::Passed
        );
        assert_eq!(
            GuardrailAction::from(&SdkGuardrailAction::GuardrailIntervened),
            GuardrailAction::Intervened
        );

        let action = GuardrailAction::from(&SdkGuardrailAction::from("SOME_FUTURE_ACTION"));
        assert_eq!(
            action,
            GuardrailAction::Unknown("SOME_FUTURE_ACTION".to_string())
        );
        assert_ne!(action, GuardrailAction::Passed);
        assert_eq!(action.as_str(), "SOME_FUTURE_ACTION");
    }
}

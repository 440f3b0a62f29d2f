// Error types for the guardrail service calls.
//
// The remote service reports failures as error codes. We map the codes we
// know about onto variants so callers can print something specific, and
// fall back to `Service` for everything else.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardrailError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Conflict error: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServer(String),

    #[error("Throttling error: {0}")]
    Throttling(String),

    #[error("Too many tags error: {0}")]
    TooManyTags(String),

    #[error("Service quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Service error: {0}")]
    Service(String),

    /// The request could not be assembled locally (missing required field).
    #[error("Invalid request: {0}")]
    Request(String),

    /// The service answered but the body was not the JSON we expected.
    #[error("Invalid response payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl GuardrailError {
    /// Map a service error code onto a variant.
    pub fn from_code(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some("ValidationException") => Self::Validation(message),
            Some("AccessDeniedException") => Self::AccessDenied(message),
            Some("ConflictException") => Self::Conflict(message),
            Some("InternalServerException") => Self::InternalServer(message),
            Some("ThrottlingException") => Self::Throttling(message),
            Some("TooManyTagsException") => Self::TooManyTags(message),
            Some("ServiceQuotaExceededException") => Self::QuotaExceeded(message),
            Some("ResourceNotFoundException") => Self::NotFound(message),
            _ => Self::Service(message),
        }
    }
}

/// Which half of the guarded call failed.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Guardrail check failed: {0}")]
    Guardrail(#[source] GuardrailError),

    #[error("Error in model invocation: {0}")]
    Model(#[source] GuardrailError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_are_classified() {
        assert!(matches!(
            GuardrailError::from_code(Some("ThrottlingException"), "slow down"),
            GuardrailError::Throttling(m) if m == "slow down"
        ));
        assert!(matches!(
            GuardrailError::from_code(Some("TooManyTagsException"), ""),
            GuardrailError::TooManyTags(_)
        ));
    }

    #[test]
    fn unknown_or_missing_code_is_a_service_error() {
        assert!(matches!(
            GuardrailError::from_code(Some("SomethingNew"), "x"),
            GuardrailError::Service(_)
        ));
        assert!(matches!(
            GuardrailError::from_code(None, "dispatch failure"),
            GuardrailError::Service(_)
        ));
    }

    #[test]
    fn messages_carry_the_category() {
        let err =
            GuardrailError::from_code(Some("AccessDeniedException"), "no bedrock:CreateGuardrail");
        assert_eq!(err.to_string(), "Access denied: no bedrock:CreateGuardrail");
    }
}

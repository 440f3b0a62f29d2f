// Anthropic messages request body for InvokeModel.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::records::ModelInput;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl InvokeRequest {
    /// Single user turn carrying the record's prompt and sampling settings.
    pub fn from_model_input(input: &ModelInput) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            max_tokens: input.max_tokens_to_sample,
            temperature: input.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: input.prompt.clone(),
            }],
        }
    }
}

/// Concatenate the text blocks of a messages-API reply, if there are any.
pub fn response_text(response: &Value) -> Option<String> {
    let blocks = response.get("content")?.as_array()?;
    let text: Vec<&str> = blocks
        .iter()
        .filter(|b| b.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|b| b.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_matches_messages_api_shape() {
        let input = ModelInput {
            prompt: "Rate this".to_string(),
            max_tokens_to_sample: 300,
            temperature: 0.7,
        };
        let body = serde_json::to_value(InvokeRequest::from_model_input(&input)).unwrap();
        assert_eq!(
            body,
            json!({
                "anthropic_version": "bedrock-2023-05-31",
                "max_tokens": 300,
                "temperature": 0.7,
                "messages": [{"role": "user", "content": "Rate this"}]
            })
        );
    }

    #[test]
    fn response_text_joins_text_blocks() {
        let reply = json!({
            "content": [
                {"type": "text", "text": "First."},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "Second."}
            ]
        });
        assert_eq!(response_text(&reply).as_deref(), Some("First.\nSecond."));
    }

    #[test]
    fn response_text_none_without_content() {
        assert_eq!(response_text(&json!({"error": "nope"})), None);
        assert_eq!(response_text(&json!({"content": []})), None);
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::InferenceResult;
use crate::models::message::{Message, ResponseMessage};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Everything a provider needs for one chat-completion round trip
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    /// Ranked models: the first is requested, the rest are provider-side fallbacks
    pub models: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Wire JSON Schema the provider must enforce on the output
    pub response_schema: Option<Value>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>, models: Vec<String>) -> Self {
        Self {
            messages,
            models,
            max_tokens: 4096,
            temperature: 1.0,
            response_schema: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Base trait for chat-completion gateways
///
/// One call is one outbound request. Implementations must not retry; the
/// inference engine owns the retry policy.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Return every candidate message the provider produced, in provider order
    ///
    /// Local checks run before any I/O: the primary model against the
    /// registry first, then the credential.
    async fn complete(&self, request: &CompletionRequest) -> InferenceResult<Vec<ResponseMessage>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usage_serialization() -> anyhow::Result<()> {
        let usage = Usage::new(Some(10), Some(20), Some(30));
        let serialized = serde_json::to_string(&usage)?;
        let deserialized: Usage = serde_json::from_str(&serialized)?;
        assert_eq!(usage, deserialized);

        let json_value: Value = serde_json::from_str(&serialized)?;
        assert_eq!(json_value["input_tokens"], json!(10));
        assert_eq!(json_value["total_tokens"], json!(30));
        Ok(())
    }

    #[test]
    fn test_completion_request_defaults() {
        let request = CompletionRequest::new(
            vec![Message::user("hi")],
            vec!["openai/gpt-4o".to_string()],
        );
        assert_eq!(request.max_tokens, 4096);
        assert_eq!(request.temperature, 1.0);
        assert!(request.response_schema.is_none());
    }
}

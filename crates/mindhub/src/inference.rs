use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{InferenceError, InferenceResult, ResponseRejection};
use crate::models::message::{Message, ResponseMessage};
use crate::providers::base::{CompletionRequest, Provider};
use crate::providers::registry::{primary_model, supports_native_schema};
use crate::repair::RepairPipeline;
use crate::schema::Schema;

pub const DEFAULT_MODELS: &[&str] = &["google/gemini-2.5-flash", "deepseek/deepseek-chat-v3-0324"];
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Ranked models; only the first is checked against the registry
    pub models: Vec<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on provider round trips for structured calls
    pub max_attempts: u32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl InferenceConfig {
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn request(&self, messages: Vec<Message>) -> CompletionRequest {
        CompletionRequest::new(messages, self.models.clone())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
    }
}

/// Append the in-band schema instruction for models that cannot enforce a
/// schema themselves. Returns a new conversation; the input is left alone.
pub fn with_schema_instructions(conversation: &[Message], schema: &Schema) -> Vec<Message> {
    let mut augmented = conversation.to_vec();
    augmented.push(Message::system(format!(
        "Response schema (reply with a single JSON object that conforms to it and nothing else):\n{}",
        schema.describe()
    )));
    augmented
}

pub struct Inference<P> {
    provider: P,
    repairs: RepairPipeline,
}

impl<P: Provider> Inference<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            repairs: RepairPipeline::default(),
        }
    }

    /// Replace the default repair steps
    pub fn with_repairs(mut self, repairs: RepairPipeline) -> Self {
        self.repairs = repairs;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// One unvalidated round trip returning the provider's raw candidates
    pub async fn complete_raw(
        &self,
        conversation: &[Message],
        config: &InferenceConfig,
    ) -> InferenceResult<Vec<ResponseMessage>> {
        ensure_not_empty(conversation)?;
        self.provider
            .complete(&config.request(conversation.to_vec()))
            .await
    }

    /// Return the first response that parses and validates against `schema`.
    /// Provider errors are returned at once; only rejected content is retried.
    pub async fn complete_structured(
        &self,
        conversation: &[Message],
        schema: &Schema,
        config: &InferenceConfig,
    ) -> InferenceResult<Value> {
        self.run(conversation, schema, config, Ok).await
    }

    /// Like [`Inference::complete_structured`], decoded into `T`. A validated
    /// value that does not decode counts as a failed attempt.
    pub async fn complete_as<T: DeserializeOwned>(
        &self,
        conversation: &[Message],
        schema: &Schema,
        config: &InferenceConfig,
    ) -> InferenceResult<T> {
        self.run(conversation, schema, config, |value| {
            serde_json::from_value(value).map_err(ResponseRejection::from)
        })
        .await
    }

    async fn run<T, F>(
        &self,
        conversation: &[Message],
        schema: &Schema,
        config: &InferenceConfig,
        decode: F,
    ) -> InferenceResult<T>
    where
        F: Fn(Value) -> Result<T, ResponseRejection>,
    {
        ensure_not_empty(conversation)?;
        if config.max_attempts == 0 {
            return Err(InferenceError::InvalidRequest(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let primary = primary_model(&config.models)?;
        let request = if supports_native_schema(primary) {
            config
                .request(conversation.to_vec())
                .with_response_schema(schema.to_wire())
        } else {
            config.request(with_schema_instructions(conversation, schema))
        };

        let mut last_response = None;
        for attempt in 1..=config.max_attempts {
            let messages = self.provider.complete(&request).await?;

            match self.accept(&messages, schema).and_then(&decode) {
                Ok(value) => {
                    tracing::debug!(attempt, model = primary, "Inference response validated");
                    return Ok(value);
                }
                Err(rejection) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = config.max_attempts,
                        model = primary,
                        error = %rejection,
                        "Unable to validate inference response"
                    );
                }
            }
            last_response = messages.first().map(|message| message.text().to_string());
        }

        Err(InferenceError::Exhausted {
            attempts: config.max_attempts,
            last_response,
        })
    }

    /// Repair, parse and validate the first candidate message
    fn accept(
        &self,
        messages: &[ResponseMessage],
        schema: &Schema,
    ) -> Result<Value, ResponseRejection> {
        let first = messages.first().ok_or(ResponseRejection::NoChoices)?;
        let repaired = self.repairs.apply(first.text());
        let value: Value = serde_json::from_str(&repaired)?;
        schema.validate(&value).map_err(ResponseRejection::Validation)?;
        Ok(value)
    }
}

fn ensure_not_empty(conversation: &[Message]) -> InferenceResult<()> {
    if conversation.is_empty() {
        return Err(InferenceError::InvalidRequest(
            "conversation must contain at least one message".to_string(),
        ));
    }
    Ok(())
}

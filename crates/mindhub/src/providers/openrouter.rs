use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::base::{CompletionRequest, Provider};
use super::configs::OpenRouterProviderConfig;
use super::registry::primary_model;
use super::utils::{get_usage, openrouter_response_to_messages, request_to_openrouter_spec};
use crate::errors::{InferenceError, InferenceResult};
use crate::models::message::ResponseMessage;

pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterProviderConfig,
}

impl OpenRouterProvider {
    pub fn new(config: OpenRouterProviderConfig) -> InferenceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(600)) // 10 minutes timeout
            .build()?;

        Ok(Self { client, config })
    }

    async fn post(&self, api_key: &str, payload: Value) -> InferenceResult<Value> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.host.trim_end_matches('/')
        );

        let mut builder = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key));
        if let Some(app_url) = &self.config.app_url {
            builder = builder.header("HTTP-Referer", app_url);
        }
        if let Some(app_title) = &self.config.app_title {
            builder = builder.header("X-Title", app_title);
        }

        let response = builder.json(&payload).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "OpenRouter request failed");
        Err(InferenceError::Provider {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
        })
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    async fn complete(&self, request: &CompletionRequest) -> InferenceResult<Vec<ResponseMessage>> {
        let primary = primary_model(&request.models)?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(InferenceError::MissingCredential)?;

        let payload = request_to_openrouter_spec(request)?;
        tracing::debug!(
            model = primary,
            fallbacks = request.models.len() - 1,
            messages = request.messages.len(),
            structured = request.response_schema.is_some(),
            "Sending chat completion request"
        );

        let response = self.post(api_key, payload).await?;

        if let Some(usage) = get_usage(&response) {
            tracing::debug!(
                input_tokens = ?usage.input_tokens,
                output_tokens = ?usage.output_tokens,
                total_tokens = ?usage.total_tokens,
                "Chat completion usage"
            );
        }

        openrouter_response_to_messages(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::message::Message;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> OpenRouterProviderConfig {
        OpenRouterProviderConfig::new("test_api_key")
            .with_host(server.uri())
            .with_attribution("https://example.com", "Example")
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(
            vec![Message::user("Hello?")],
            vec![
                "google/gemini-2.5-flash".to_string(),
                "deepseek/deepseek-chat-v3-0324".to_string(),
            ],
        )
    }

    #[tokio::test]
    async fn test_complete_basic() -> InferenceResult<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test_api_key"))
            .and(header("HTTP-Referer", "https://example.com"))
            .and(header("X-Title", "Example"))
            .and(body_partial_json(json!({
                "model": "google/gemini-2.5-flash",
                "models": ["deepseek/deepseek-chat-v3-0324"],
                "stream": false,
                "reasoning": {"exclude": true}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "gen-123",
                "object": "chat.completion",
                "model": "google/gemini-2.5-flash",
                "choices": [{
                    "finish_reason": "stop",
                    "native_finish_reason": "STOP",
                    "message": {
                        "role": "assistant",
                        "content": "Hello! How can I assist you today?"
                    }
                }],
                "usage": {
                    "prompt_tokens": 12,
                    "completion_tokens": 15,
                    "total_tokens": 27
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenRouterProvider::new(config_for(&mock_server))?;
        let messages = provider.complete(&request()).await?;

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text(), "Hello! How can I assist you today?");
        Ok(())
    }

    #[tokio::test]
    async fn test_non_success_status() -> InferenceResult<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "slow down"}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenRouterProvider::new(config_for(&mock_server))?;
        match provider.complete(&request()).await {
            Err(InferenceError::Provider { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Too Many Requests");
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() -> InferenceResult<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut config = config_for(&mock_server);
        config.api_key = None;
        let provider = OpenRouterProvider::new(config)?;

        assert!(matches!(
            provider.complete(&request()).await,
            Err(InferenceError::MissingCredential)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_model_sends_nothing() -> InferenceResult<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = OpenRouterProvider::new(config_for(&mock_server))?;
        let request = CompletionRequest::new(
            vec![Message::user("Hello?")],
            vec!["not-a-real-model".to_string()],
        );

        assert!(matches!(
            provider.complete(&request).await,
            Err(InferenceError::ModelNotAllowed(model)) if model == "not-a-real-model"
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_model_reported_before_missing_credential() -> InferenceResult<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut config = config_for(&mock_server);
        config.api_key = None;
        let provider = OpenRouterProvider::new(config)?;
        let request = CompletionRequest::new(
            vec![Message::user("Hello?")],
            vec!["not-a-real-model".to_string()],
        );

        assert!(matches!(
            provider.complete(&request).await,
            Err(InferenceError::ModelNotAllowed(model)) if model == "not-a-real-model"
        ));
        Ok(())
    }
}

use serde_json::{json, Value};

use super::base::{CompletionRequest, Usage};
use crate::errors::{InferenceError, InferenceResult};
use crate::models::message::ResponseMessage;

/// Build the OpenRouter chat-completions payload for a request
///
/// The first ranked model is requested directly; the rest go into `models`
/// so the provider can fall back to them within the same request.
pub fn request_to_openrouter_spec(request: &CompletionRequest) -> InferenceResult<Value> {
    let (primary, fallbacks) = request
        .models
        .split_first()
        .ok_or_else(|| InferenceError::InvalidRequest("model list is empty".to_string()))?;

    let messages = serde_json::to_value(&request.messages)
        .map_err(|e| InferenceError::InvalidRequest(format!("unserializable messages: {}", e)))?;

    let mut payload = json!({
        "model": primary,
        "models": fallbacks,
        "messages": messages,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
        "stream": false,
        "reasoning": { "exclude": true },
    });

    if let Some(schema) = &request.response_schema {
        payload["response_format"] = json!({
            "type": "json_schema",
            "json_schema": {
                "name": "response",
                "schema": schema,
                "strict": true,
            }
        });
    }

    Ok(payload)
}

/// Convert an OpenRouter response body into the candidate messages it holds
///
/// Choices whose message cannot be decoded are skipped; an in-body error
/// object is reported as a provider error.
pub fn openrouter_response_to_messages(response: &Value) -> InferenceResult<Vec<ResponseMessage>> {
    if let Some(error) = response.get("error") {
        let status = error
            .get("code")
            .and_then(|c| c.as_u64())
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(500);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        return Err(InferenceError::Provider { status, message });
    }

    let choices = match response.get("choices").and_then(|c| c.as_array()) {
        Some(choices) => choices,
        None => return Ok(Vec::new()),
    };

    let messages = choices
        .iter()
        .filter_map(|choice| {
            let message = choice.get("message")?;
            match serde_json::from_value::<ResponseMessage>(message.clone()) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::warn!("Skipping undecodable choice message: {}", e);
                    None
                }
            }
        })
        .collect();

    Ok(messages)
}

pub fn get_usage(response: &Value) -> Option<Usage> {
    let usage = response.get("usage")?;

    let input_tokens = usage
        .get("prompt_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let output_tokens = usage
        .get("completion_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32);

    let total_tokens = usage
        .get("total_tokens")
        .and_then(|v| v.as_i64())
        .map(|v| v as i32)
        .or_else(|| match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

    Some(Usage::new(input_tokens, output_tokens, total_tokens))
}

use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::errors::{InferenceError, InferenceResult};

/// Models whose provider integration enforces `response_format` schemas.
pub const STRUCTURED_OUTPUT_MODELS: &[&str] = &[
    "deepseek/deepseek-chat-v3-0324",
    "google/gemini-2.0-flash-001",
    "google/gemini-2.5-flash-lite-preview-06-17",
    "google/gemini-2.5-flash",
    "openai/gpt-5",
    "openai/gpt-4o-mini",
    "openai/gpt-4.1",
    "openai/gpt-4o",
    "google/gemini-2.5-pro",
    "google/gemini-3-flash-preview",
];

/// Allowed models that must be steered toward JSON with in-band instructions.
pub const INSTRUCTION_ONLY_MODELS: &[&str] = &[
    "anthropic/claude-3.5-sonnet",
    "anthropic/claude-3.5-sonnet-20240620",
    "anthropic/claude-3.5-haiku",
    "anthropic/claude-3.7-sonnet",
    "nousresearch/hermes-4-70b",
];

lazy_static! {
    static ref STRUCTURED_OUTPUT_SET: HashSet<&'static str> =
        STRUCTURED_OUTPUT_MODELS.iter().copied().collect();
    static ref ALLOWED_SET: HashSet<&'static str> = STRUCTURED_OUTPUT_MODELS
        .iter()
        .chain(INSTRUCTION_ONLY_MODELS)
        .copied()
        .collect();
}

pub fn is_allowed(model: &str) -> bool {
    ALLOWED_SET.contains(model)
}

pub fn supports_native_schema(model: &str) -> bool {
    STRUCTURED_OUTPUT_SET.contains(model)
}

/// Every allowed model, schema-native ones first
pub fn allowed_models() -> impl Iterator<Item = &'static str> {
    STRUCTURED_OUTPUT_MODELS
        .iter()
        .chain(INSTRUCTION_ONLY_MODELS)
        .copied()
}

/// The model a ranked list routes to first. Only this one is checked; the
/// fallbacks are passed through to the provider's own routing.
pub fn primary_model(models: &[String]) -> InferenceResult<&str> {
    let primary = models
        .first()
        .ok_or_else(|| InferenceError::InvalidRequest("model list is empty".to_string()))?;

    if !is_allowed(primary) {
        return Err(InferenceError::ModelNotAllowed(primary.clone()));
    }
    Ok(primary.as_str())
}

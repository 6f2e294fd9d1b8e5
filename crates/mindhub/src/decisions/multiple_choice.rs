use serde::{Deserialize, Serialize};

use super::frame_conversation;
use crate::errors::{InferenceError, InferenceResult};
use crate::inference::{Inference, InferenceConfig};
use crate::models::message::Message;
use crate::providers::base::Provider;
use crate::schema::Schema;

pub const MULTIPLE_CHOICE_MODELS: &[&str] = &["google/gemini-2.5-flash"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleChoice {
    /// One of the caller's choices, in the caller's casing
    pub answer: String,
    pub rationale: String,
    /// In `[0, 1]`
    pub confidence: f64,
}

/// First character uppercased, the rest lowercased
fn capitalize(choice: &str) -> String {
    let mut chars = choice.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Every accepted spelling of the choices: original, lowercase, uppercase and
/// capitalized, deduplicated in first-seen order
pub fn choice_variants(choices: &[String]) -> Vec<String> {
    let mut variants: Vec<String> = Vec::with_capacity(choices.len() * 4);
    for choice in choices {
        for variant in [
            choice.clone(),
            choice.to_lowercase(),
            choice.to_uppercase(),
            capitalize(choice),
        ] {
            if !variants.contains(&variant) {
                variants.push(variant);
            }
        }
    }
    variants
}

pub fn multiple_choice_schema(choices: &[String]) -> Schema {
    Schema::object([
        ("answer", Schema::literals(choice_variants(choices))),
        ("rationale", Schema::String),
        ("confidence", Schema::number_range(0.0, 1.0)),
    ])
}

/// Map the model's answer back onto the caller's spelling of the matching
/// choice, keeping the raw answer when nothing matches
pub fn normalize_answer(choices: &[String], answer: &str) -> String {
    let answer_lower = answer.to_lowercase();
    choices
        .iter()
        .find(|choice| choice.to_lowercase() == answer_lower)
        .cloned()
        .unwrap_or_else(|| answer.to_string())
}

fn multiple_choice_prompt(choices: &[String]) -> String {
    format!(
        r#"Please respond with a JSON object containing:
- "answer": one of the choices, which MUST be one of the choices provided
- "rationale": your reasoning for this decision
- "confidence": a number between 0 and 1 indicating how confident you are

The choices are:
{}"#,
        choices.join("\n")
    )
}

/// Ask the model to pick one of `choices`
pub async fn multiple_choice<P: Provider>(
    engine: &Inference<P>,
    base_prompt: &str,
    conversation: &[Message],
    choices: &[String],
) -> InferenceResult<MultipleChoice> {
    if choices.is_empty() {
        return Err(InferenceError::InvalidRequest(
            "multiple choice needs at least one choice".to_string(),
        ));
    }

    let instruction = multiple_choice_prompt(choices);
    let prompt = frame_conversation(base_prompt, conversation, &instruction);
    let config = InferenceConfig::default().with_models(MULTIPLE_CHOICE_MODELS.iter().copied());

    let response: MultipleChoice = engine
        .complete_as(&prompt, &multiple_choice_schema(choices), &config)
        .await?;

    Ok(MultipleChoice {
        answer: normalize_answer(choices, &response.answer),
        ..response
    })
}

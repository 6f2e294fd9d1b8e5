use serde::{Deserialize, Serialize};

use super::frame_conversation;
use crate::errors::InferenceResult;
use crate::inference::{Inference, InferenceConfig};
use crate::models::message::Message;
use crate::providers::base::Provider;
use crate::schema::Schema;

pub const YES_OR_NO_MODELS: &[&str] = &["google/gemini-3-flash-preview"];

const YES_OR_NO_PROMPT: &str = r#"Please respond with a JSON object containing:
- "answer": true or false, corresponding to "yes" and "no"
- "rationale": your reasoning for this decision
- "confidence": a number between 0 and 1 indicating how confident you are"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YesOrNo {
    pub answer: bool,
    pub rationale: String,
    /// In `[0, 1]`
    pub confidence: f64,
}

pub fn yes_or_no_schema() -> Schema {
    Schema::object([
        ("answer", Schema::Boolean),
        ("rationale", Schema::String),
        ("confidence", Schema::number_range(0.0, 1.0)),
    ])
}

/// Ask the model a yes/no question about the conversation
pub async fn yes_or_no<P: Provider>(
    engine: &Inference<P>,
    base_prompt: &str,
    conversation: &[Message],
) -> InferenceResult<YesOrNo> {
    let prompt = frame_conversation(base_prompt, conversation, YES_OR_NO_PROMPT);
    let config = InferenceConfig::default().with_models(YES_OR_NO_MODELS.iter().copied());

    engine
        .complete_as(&prompt, &yes_or_no_schema(), &config)
        .await
}

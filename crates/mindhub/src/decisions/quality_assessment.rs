use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::frame_conversation;
use crate::errors::InferenceResult;
use crate::inference::{Inference, InferenceConfig};
use crate::models::message::Message;
use crate::providers::base::Provider;
use crate::schema::Schema;

pub const QUALITY_ASSESSMENT_MODELS: &[&str] = &["google/gemini-3-flash-preview"];

const QUALITY_ASSESSMENT_PROMPT: &str = r#"Please respond with a JSON object containing:
- "score": overall quality score from 0-100 (weighted average of the three dimensions)
- "rationale": brief explanation of the overall quality assessment
- "accuracy_score": 0-100 score for technical accuracy and correctness
- "clarity_score": 0-100 score for clarity, readability, and organization
- "actionability_score": 0-100 score for practical usefulness and implementability

Scoring guidelines:
- 90-100: Exceptional - highly accurate, crystal clear, immediately actionable
- 70-89: Good - accurate and useful with minor improvements possible
- 50-69: Fair - has value but needs significant improvement
- 30-49: Poor - major issues with accuracy, clarity, or usefulness
- 0-29: Very Poor - misleading, unclear, or not actionable"#;

/// System prompt for judging a knowledge-base entry (a "mindchunk")
pub const MINDCHUNK_QUALITY_PROMPT: &str = r#"You are a quality assessor for a shared knowledge base. The user will provide a "mindchunk": a short summary and longer context (often instructions, documentation, or technical guidance).

Evaluate the mindchunk on three key dimensions:

1. **Accuracy** - Is the information technically correct and reliable?
   - Are facts, commands, and code examples correct?
   - Are there any misleading or incorrect statements?
   - Does it reflect current best practices?

2. **Clarity** - Is the information clear and well-organized?
   - Is it easy to understand?
   - Is the writing concise and well-structured?
   - Are explanations logical and coherent?

3. **Actionability** - Is the information practical and usable?
   - Can someone actually implement or apply this knowledge?
   - Are there concrete examples or steps?
   - Is it specific enough to be useful?

Provide scores for each dimension (0-100) and an overall quality score (weighted average with emphasis on accuracy)."#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub score: f64,
    pub rationale: String,
    pub accuracy_score: f64,
    pub clarity_score: f64,
    pub actionability_score: f64,
}

impl QualityAssessment {
    /// The per-dimension breakdown stored alongside the overall score
    pub fn notes(&self) -> Value {
        json!({
            "rationale": self.rationale,
            "accuracy": self.accuracy_score,
            "clarity": self.clarity_score,
            "actionability": self.actionability_score,
        })
    }
}

pub fn quality_assessment_schema() -> Schema {
    Schema::object([
        ("score", Schema::number_range(0.0, 100.0)),
        ("rationale", Schema::String),
        ("accuracy_score", Schema::number_range(0.0, 100.0)),
        ("clarity_score", Schema::number_range(0.0, 100.0)),
        ("actionability_score", Schema::number_range(0.0, 100.0)),
    ])
}

/// Score the conversation's content for accuracy, clarity and actionability
pub async fn quality_assessment<P: Provider>(
    engine: &Inference<P>,
    base_prompt: &str,
    conversation: &[Message],
) -> InferenceResult<QualityAssessment> {
    let prompt = frame_conversation(base_prompt, conversation, QUALITY_ASSESSMENT_PROMPT);
    let config =
        InferenceConfig::default().with_models(QUALITY_ASSESSMENT_MODELS.iter().copied());

    engine
        .complete_as(&prompt, &quality_assessment_schema(), &config)
        .await
}

/// Assess a knowledge-base entry given its summary and context
pub async fn assess_mindchunk<P: Provider>(
    engine: &Inference<P>,
    summary: &str,
    context: &str,
) -> InferenceResult<QualityAssessment> {
    let conversation = [Message::user(format!(
        "Summary: {}\n\nContext: {}",
        summary, context
    ))];
    let result = quality_assessment(engine, MINDCHUNK_QUALITY_PROMPT, &conversation).await?;

    tracing::info!(
        score = result.score,
        accuracy = result.accuracy_score,
        clarity = result.clarity_score,
        actionability = result.actionability_score,
        "Quality assessment completed"
    );
    Ok(result)
}

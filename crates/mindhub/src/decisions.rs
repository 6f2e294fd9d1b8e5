pub mod multiple_choice;
pub mod quality_assessment;
pub mod yes_or_no;

pub use multiple_choice::{multiple_choice, MultipleChoice};
pub use quality_assessment::{assess_mindchunk, quality_assessment, QualityAssessment};
pub use yes_or_no::{yes_or_no, YesOrNo};

use crate::models::message::Message;

/// `[system(base_prompt), ..conversation, user(instruction)]`
pub(crate) fn frame_conversation(
    base_prompt: &str,
    conversation: &[Message],
    instruction: &str,
) -> Vec<Message> {
    let mut prompt = Vec::with_capacity(conversation.len() + 2);
    prompt.push(Message::system(base_prompt));
    prompt.extend_from_slice(conversation);
    prompt.push(Message::user(instruction));
    prompt
}

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::base::{CompletionRequest, Provider};
use super::registry::primary_model;
use crate::errors::{InferenceError, InferenceResult};
use crate::models::message::ResponseMessage;

/// A scripted reply for one call to the mock provider
pub enum MockReply {
    /// A single assistant message with this content
    Content(String),
    /// Exactly these candidate messages
    Messages(Vec<ResponseMessage>),
    /// A non-success HTTP status
    Status(u16),
}

/// A mock provider that returns pre-configured responses for testing and
/// records every request it receives
pub struct MockProvider {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of replies
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock provider answering with one content string per call
    pub fn with_contents<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            contents
                .into_iter()
                .map(|content| MockReply::Content(content.into()))
                .collect(),
        )
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, request: &CompletionRequest) -> InferenceResult<Vec<ResponseMessage>> {
        primary_model(&request.models)?;
        self.requests.lock().unwrap().push(request.clone());

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            // Return an empty response if no more pre-configured replies
            None => Ok(vec![ResponseMessage::assistant("")]),
            Some(MockReply::Content(content)) => Ok(vec![ResponseMessage::assistant(content)]),
            Some(MockReply::Messages(messages)) => Ok(messages),
            Some(MockReply::Status(status)) => Err(InferenceError::Provider {
                status,
                message: "mock failure".to_string(),
            }),
        }
    }
}

use super::content::{ContentSegment, MessageContent};
use super::role::Role;
use super::tool::ToolCall;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A message sent to the LLM as part of a conversation
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
    /// Prepended as `{name}: {content}` by providers that do not support names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only set on tool-role messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn new<C: Into<MessageContent>>(role: Role, content: C) -> Self {
        Message {
            role,
            content: content.into(),
            name: None,
            tool_call_id: None,
        }
    }

    /// Create a new user message
    pub fn user<C: Into<MessageContent>>(content: C) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message
    pub fn assistant<C: Into<MessageContent>>(content: C) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create a new system message
    pub fn system<C: Into<MessageContent>>(content: C) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a tool result answering the tool call with the given id
    pub fn tool<S: Into<String>, T: Into<String>>(tool_call_id: S, content: T) -> Self {
        Message {
            role: Role::Tool,
            content: MessageContent::Text(content.into()),
            name: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// Create a user message made of a text caption followed by an image reference
    pub fn user_with_image<S: Into<String>, U: Into<String>>(text: S, image_url: U) -> Self {
        Self::user(vec![
            ContentSegment::text(text),
            ContentSegment::image_url(image_url),
        ])
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A candidate message returned by the provider
pub struct ResponseMessage {
    pub role: Role,
    /// Null when the model answered with tool calls only
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl ResponseMessage {
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        ResponseMessage {
            role: Role::Assistant,
            content: Some(content.into()),
            tool_calls: None,
        }
    }

    /// The text content, or an empty string when there is none
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// A typed segment of multi-part message content
pub enum ContentSegment {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentSegment {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentSegment::Text { text: text.into() }
    }

    pub fn image_url<S: Into<String>>(url: S) -> Self {
        ContentSegment::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }

    /// Get the text if this is a text segment
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentSegment::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
/// Message content is either a plain string or an ordered list of segments
pub enum MessageContent {
    Text(String),
    Segments(Vec<ContentSegment>),
}

impl MessageContent {
    /// Get the content if it is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Segments(_) => None,
        }
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<Vec<ContentSegment>> for MessageContent {
    fn from(segments: Vec<ContentSegment>) -> Self {
        MessageContent::Segments(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_text_serializes_as_string() {
        let content = MessageContent::from("hello");
        assert_eq!(serde_json::to_value(&content).unwrap(), json!("hello"));
    }

    #[test]
    fn test_segments_serialize_with_type_tags() {
        let content = MessageContent::from(vec![
            ContentSegment::text("look at this"),
            ContentSegment::image_url("https://example.com/cat.png"),
        ]);

        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!([
                {"type": "text", "text": "look at this"},
                {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}}
            ])
        );
    }

    #[test]
    fn test_segments_deserialize() {
        let content: MessageContent = serde_json::from_value(json!([
            {"type": "text", "text": "caption"}
        ]))
        .unwrap();

        match content {
            MessageContent::Segments(segments) => {
                assert_eq!(segments[0].as_text(), Some("caption"));
            }
            MessageContent::Text(_) => panic!("Expected segments"),
        }
    }
}

//! These models represent the conversation passed to the completion provider
//! and the messages it hands back.
//!
//! The request side mirrors the OpenRouter chat-completions message format
//! closely enough that a conversation serializes straight onto the wire. The
//! response side only keeps what the inference engine reads.
pub mod content;
pub mod message;
pub mod role;
pub mod tool;

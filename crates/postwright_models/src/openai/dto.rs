//! Chat completions wire types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatMessage {
    /// "system", "user" or "assistant"
    pub(crate) role: String,
    /// Message text
    pub(crate) content: String,
}

/// Chat completions request body.
#[derive(Debug, Clone, Serialize, derive_builder::Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation
    messages: Vec<ChatMessage>,
    /// Token cap
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatCompletionRequest {
    /// Creates a new request builder.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// Message inside a completion choice. Content may be null.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct Choice {
    message: ChoiceMessage,
}

/// Chat completions response body.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

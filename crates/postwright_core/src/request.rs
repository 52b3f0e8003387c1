//! Request and response types for model generation.

use crate::{Message, Output};
use serde::{Deserialize, Serialize};

/// Provider-independent generation request.
///
/// # Examples
///
/// ```
/// use postwright_core::GenerateRequest;
///
/// let request = GenerateRequest::chat(
///     "You are an expert at social media hashtag strategy.",
///     "Generate 2 hashtags",
///     0.7,
///     150,
/// );
///
/// assert_eq!(request.messages.len(), 2);
/// assert_eq!(request.max_tokens, Some(150));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default, setter(into))]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    #[builder(setter(into, strip_option))]
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(setter(into, strip_option))]
    pub temperature: Option<f32>,
    /// Model identifier override
    #[builder(setter(into, strip_option))]
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// System persona plus one user prompt, with a temperature and token cap.
    pub fn chat(
        system: impl Into<String>,
        user: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> Self {
        Self {
            messages: vec![Message::system(system), Message::user(user)],
            max_tokens: Some(max_tokens),
            temperature: Some(temperature),
            model: None,
        }
    }

    /// A single user prompt with a temperature, as sent to image models.
    pub fn prompt(user: impl Into<String>, temperature: f32) -> Self {
        Self {
            messages: vec![Message::user(user)],
            max_tokens: None,
            temperature: Some(temperature),
            model: None,
        }
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use postwright_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("  Hello!  ".to_string())],
/// };
///
/// assert_eq!(response.text().as_deref(), Some("Hello!"));
/// assert!(response.image().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Concatenated text outputs, trimmed. `None` when there is no non-blank text.
    pub fn text(&self) -> Option<String> {
        let joined: String = self
            .outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Bytes of the first non-empty image output.
    pub fn image(&self) -> Option<&[u8]> {
        self.outputs.iter().find_map(|output| match output {
            Output::Image { data, .. } if !data.is_empty() => Some(data.as_slice()),
            _ => None,
        })
    }
}

//! OpenAI chat completions backend.

mod client;
mod conversion;
mod dto;

pub use client::OpenAiClient;

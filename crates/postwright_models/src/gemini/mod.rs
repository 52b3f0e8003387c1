//! Gemini image generation backend.

mod client;
mod dto;

pub use client::GeminiImageClient;

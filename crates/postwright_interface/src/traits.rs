//! Model driver trait.

use async_trait::async_trait;
use postwright_core::{GenerateRequest, GenerateResponse};
use postwright_error::PostwrightResult;
use std::sync::Arc;

/// Core trait that every model backend implements.
///
/// Text models answer with [`postwright_core::Output::Text`]; image models
/// answer with [`postwright_core::Output::Image`]. A response without the
/// expected output is a failure for the caller to classify.
#[async_trait]
pub trait PostwrightDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> PostwrightResult<GenerateResponse>;

    /// Provider name (e.g., "openai", "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4").
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: PostwrightDriver + ?Sized> PostwrightDriver for Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> PostwrightResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

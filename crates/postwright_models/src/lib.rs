//! Model clients for Postwright.
//!
//! Two backends implement [`postwright_interface::PostwrightDriver`]:
//!
//! - [`OpenAiClient`]: chat completions for drafting, shortening, hashtags,
//!   image prompts and quality checks
//! - [`GeminiImageClient`]: image generation returning inline image bytes
//!
//! # Example
//!
//! ```no_run
//! use postwright_core::GenerateRequest;
//! use postwright_interface::PostwrightDriver;
//! use postwright_models::OpenAiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new()?;
//! let request = GenerateRequest::chat("You are helpful.", "Say hello", 0.7, 50);
//! let response = client.generate(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod metrics;
mod openai;

pub use gemini::GeminiImageClient;
pub use metrics::ModelMetrics;
pub use openai::OpenAiClient;

use postwright_error::{ModelsError, ModelsErrorKind, ModelsResult};
use std::time::Duration;

/// Request timeout shared by both clients.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn http_client() -> ModelsResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| {
            ModelsError::new(ModelsErrorKind::ApiRequest(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })
}

/// Turn a non-success response into an `Http` error carrying the body.
async fn check_status(response: reqwest::Response) -> ModelsResult<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status_code = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(ModelsError::new(ModelsErrorKind::Http {
        status_code,
        message,
    }))
}

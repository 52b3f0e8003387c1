//! OpenAI chat completions client.

use super::conversion;
use super::dto::ChatCompletionResponse;
use crate::{ModelMetrics, check_status, http_client};
use async_trait::async_trait;
use postwright_config::{Credentials, OPENAI_API_KEY_VAR, TextModelSettings};
use postwright_core::{GenerateRequest, GenerateResponse};
use postwright_error::{ModelsError, ModelsErrorKind, ModelsResult, PostwrightResult};
use postwright_interface::PostwrightDriver;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";

/// Client for any OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a client for `gpt-4`, reading `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    #[instrument]
    pub fn new() -> ModelsResult<Self> {
        let api_key = std::env::var(OPENAI_API_KEY_VAR)
            .map_err(|_| ModelsError::new(ModelsErrorKind::MissingApiKey(OPENAI_API_KEY_VAR.into())))?;
        Self::with_api_key(api_key, DEFAULT_MODEL.to_string())
    }

    /// Creates a client with an explicit key and model.
    #[instrument(skip(api_key), fields(model = %model))]
    pub fn with_api_key(api_key: String, model: String) -> ModelsResult<Self> {
        Ok(Self {
            client: http_client()?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Creates a client from configured settings.
    #[instrument(skip_all, fields(model = %settings.model()))]
    pub fn from_settings(
        settings: &TextModelSettings,
        credentials: &Credentials,
    ) -> ModelsResult<Self> {
        Ok(Self::with_api_key(
            credentials.openai_api_key().to_string(),
            settings.model().clone(),
        )?
        .with_base_url(settings.base_url().clone()))
    }

    /// Point at a different compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(&self, req: &GenerateRequest) -> ModelsResult<GenerateResponse> {
        let body = conversion::to_chat_request(req, &self.model)?;
        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, messages = body.messages().len(), "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelsError::new(ModelsErrorKind::ApiRequest(e.to_string())))?;

        let response = check_status(response).await?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(e.to_string()))
        })?;

        conversion::from_chat_response(parsed)
    }
}

#[async_trait]
impl PostwrightDriver for OpenAiClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> PostwrightResult<GenerateResponse> {
        let metrics = ModelMetrics::get();
        let started = Instant::now();

        match self.send(req).await {
            Ok(response) => {
                metrics.record_request("openai", &self.model, started.elapsed().as_secs_f64());
                Ok(response)
            }
            Err(e) => {
                metrics.record_error("openai", &self.model, e.kind.label());
                Err(e.into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

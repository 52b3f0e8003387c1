//! Gemini image client.

use super::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::{ModelMetrics, check_status, http_client};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use postwright_config::{Credentials, GOOGLE_API_KEY_VAR, ImageModelSettings};
use postwright_core::{GenerateRequest, GenerateResponse, Output};
use postwright_error::{ModelsError, ModelsErrorKind, ModelsResult, PostwrightResult};
use postwright_interface::PostwrightDriver;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "imagen-3.0-generate-001";

/// Image generation through the Gemini `generateContent` REST endpoint.
///
/// The user messages of a request are joined into one prompt. The response
/// carries the first inline image as [`Output::Image`].
#[derive(Clone)]
pub struct GeminiImageClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for GeminiImageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiImageClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiImageClient {
    /// Creates a client for the default image model, reading `GOOGLE_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not set.
    #[instrument]
    pub fn new() -> ModelsResult<Self> {
        let api_key = std::env::var(GOOGLE_API_KEY_VAR)
            .map_err(|_| ModelsError::new(ModelsErrorKind::MissingApiKey(GOOGLE_API_KEY_VAR.into())))?;
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
        settings: &ImageModelSettings,
        credentials: &Credentials,
    ) -> ModelsResult<Self> {
        Ok(Self::with_api_key(
            credentials.google_api_key().to_string(),
            settings.model().clone(),
        )?
        .with_base_url(settings.base_url().clone()))
    }

    /// Point at a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn send(&self, req: &GenerateRequest) -> ModelsResult<GenerateResponse> {
        let model = req.model.as_deref().unwrap_or(&self.model);
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = to_content_request(req);
        debug!(url = %url, "Sending image generation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelsError::new(ModelsErrorKind::ApiRequest(e.to_string())))?;

        let response = check_status(response).await?;

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            ModelsError::new(ModelsErrorKind::ResponseParsing(e.to_string()))
        })?;

        from_content_response(parsed)
    }
}

fn to_content_request(req: &GenerateRequest) -> GenerateContentRequest {
    let prompt = req
        .messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: Some(prompt),
                inline_data: None,
            }],
        }],
        generation_config: GenerationConfig {
            temperature: req.temperature,
            response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
        },
    }
}

fn from_content_response(resp: GenerateContentResponse) -> ModelsResult<GenerateResponse> {
    let inline = resp
        .candidates
        .iter()
        .flat_map(|c| c.content.parts.iter())
        .find_map(|p| p.inline_data.as_ref())
        .ok_or_else(|| ModelsError::new(ModelsErrorKind::NoImageData))?;

    let data = STANDARD
        .decode(inline.data.as_bytes())
        .map_err(|e| ModelsError::new(ModelsErrorKind::Base64Decode(e.to_string())))?;

    if data.is_empty() {
        return Err(ModelsError::new(ModelsErrorKind::NoImageData));
    }

    Ok(GenerateResponse {
        outputs: vec![Output::Image {
            mime: Some(inline.mime_type.clone()),
            data,
        }],
    })
}

#[async_trait]
impl PostwrightDriver for GeminiImageClient {
    #[instrument(skip(self, req), fields(provider = "gemini", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> PostwrightResult<GenerateResponse> {
        let metrics = ModelMetrics::get();
        let started = Instant::now();

        match self.send(req).await {
            Ok(response) => {
                metrics.record_request("gemini", &self.model, started.elapsed().as_secs_f64());
                metrics.record_image(&self.model);
                Ok(response)
            }
            Err(e) => {
                metrics.record_error("gemini", &self.model, e.kind.label());
                Err(e.into())
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = GenerateRequest::prompt("A lighthouse at dawn", 0.4);
        let json = serde_json::to_value(to_content_request(&req)).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "A lighthouse at dawn");
        assert!(json["contents"][0]["parts"][0].get("inlineData").is_none());
        assert_eq!(json["generationConfig"]["responseModalities"][1], "IMAGE");
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_response_decodes_first_inline_image() {
        let encoded = STANDARD.encode([0x89u8, b'P', b'N', b'G']);
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your image"},
                        {"inlineData": {"mimeType": "image/png", "data": encoded}}
                    ]
                }
            }]
        });
        let resp: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let out = from_content_response(resp).unwrap();
        assert_eq!(out.image(), Some(&[0x89u8, b'P', b'N', b'G'][..]));
    }

    #[test]
    fn test_text_only_response_has_no_image() {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "I cannot draw that"}]}}]
        });
        let resp: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let err = from_content_response(resp).unwrap_err();
        assert_eq!(err.kind, ModelsErrorKind::NoImageData);
    }

    #[test]
    fn test_bad_base64_is_reported() {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "!!not base64!!"}}
            ]}}]
        });
        let resp: GenerateContentResponse = serde_json::from_value(body).unwrap();
        let err = from_content_response(resp).unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::Base64Decode(_)));
    }
}

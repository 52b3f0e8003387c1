//! Scripted model driver.

use async_trait::async_trait;
use postwright_core::{GenerateRequest, GenerateResponse, Output};
use postwright_error::{ModelsError, ModelsErrorKind, PostwrightResult};
use postwright_interface::PostwrightDriver;
use std::sync::{Arc, Mutex};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Text output
    Text(String),
    /// PNG (or any) image bytes
    Image(Vec<u8>),
    /// A response with no outputs
    Empty,
    /// A model error
    Fail(ModelsErrorKind),
}

type Responder = dyn Fn(&GenerateRequest, usize) -> MockResponse + Send + Sync;

/// Driver that answers from a script and records every request.
///
/// Clones share the script and the recorded calls.
#[derive(Clone)]
pub struct MockDriver {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockDriver {
    /// Answer with `f(request, zero_based_call_index)`.
    pub fn routed<F>(f: F) -> Self
    where
        F: Fn(&GenerateRequest, usize) -> MockResponse + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(f),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always the same reply.
    pub fn always(response: MockResponse) -> Self {
        Self::routed(move |_, _| response.clone())
    }

    /// Replies in order; the last one repeats.
    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self::routed(move |_, call| {
            responses
                .get(call)
                .or_else(|| responses.last())
                .cloned()
                .unwrap_or(MockResponse::Empty)
        })
    }

    /// Always fail with a transient error.
    pub fn failing() -> Self {
        Self::always(MockResponse::Fail(ModelsErrorKind::Http {
            status_code: 503,
            message: "Service unavailable".to_string(),
        }))
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("Mock lock").len()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().expect("Mock lock").clone()
    }
}

#[async_trait]
impl PostwrightDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> PostwrightResult<GenerateResponse> {
        let call = {
            let mut requests = self.requests.lock().expect("Mock lock");
            requests.push(req.clone());
            requests.len() - 1
        };

        match (self.responder)(req, call) {
            MockResponse::Text(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text)],
            }),
            MockResponse::Image(data) => Ok(GenerateResponse {
                outputs: vec![Output::Image {
                    mime: Some("image/png".to_string()),
                    data,
                }],
            }),
            MockResponse::Empty => Ok(GenerateResponse { outputs: vec![] }),
            MockResponse::Fail(kind) => Err(ModelsError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

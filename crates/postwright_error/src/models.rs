//! Errors raised by the text and image model providers.

/// Model provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelsErrorKind {
    /// API key not found in environment
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Request could not be sent or the connection dropped
    #[display("API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message (response body when available)
        message: String,
    },
    /// Response body did not have the expected shape
    #[display("Failed to parse response: {}", _0)]
    ResponseParsing(String),
    /// Response parsed but carried no text
    #[display("Model returned an empty response")]
    EmptyResponse,
    /// Image response carried no inline image data
    #[display("No image data in response")]
    NoImageData,
    /// Base64 decoding failed
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
}

impl ModelsErrorKind {
    /// Check if this error is transient.
    ///
    /// Malformed and empty responses count as transient: a second attempt
    /// against a sampling model commonly succeeds.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelsErrorKind::Http { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ModelsErrorKind::ApiRequest(_)
            | ModelsErrorKind::ResponseParsing(_)
            | ModelsErrorKind::EmptyResponse
            | ModelsErrorKind::NoImageData
            | ModelsErrorKind::Base64Decode(_) => true,
            ModelsErrorKind::MissingApiKey(_) => false,
        }
    }

    /// Short label used for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ModelsErrorKind::MissingApiKey(_) => "auth",
            ModelsErrorKind::ApiRequest(_) => "network",
            ModelsErrorKind::Http { status_code, .. } => match *status_code {
                429 => "rate_limit",
                401 | 403 => "auth",
                408 => "timeout",
                400..=499 => "invalid_request",
                _ => "server",
            },
            ModelsErrorKind::ResponseParsing(_) | ModelsErrorKind::Base64Decode(_) => "malformed",
            ModelsErrorKind::EmptyResponse | ModelsErrorKind::NoImageData => "empty",
        }
    }
}

/// Model provider error with source location tracking.
///
/// # Examples
///
/// ```
/// use postwright_error::{ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::MissingApiKey("OPENAI_API_KEY".to_string()));
/// assert!(format!("{}", err).contains("OPENAI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at line {} in {}", kind, line, file)]
pub struct ModelsError {
    /// The kind of error that occurred
    pub kind: ModelsErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new ModelsError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for model provider operations.
pub type ModelsResult<T> = Result<T, ModelsError>;

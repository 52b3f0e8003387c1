//! Top-level error wrapper types.

use crate::{
    BrandVoiceError, ConfigError, GenerationError, JsonError, ModelsError, StorageError,
};
#[cfg(feature = "database")]
use crate::DatabaseError;
#[cfg(feature = "tui")]
use crate::TuiError;

/// Every error a Postwright operation can produce.
///
/// # Examples
///
/// ```
/// use postwright_error::{PostwrightError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::FileWrite("disk full".to_string()));
/// let err: PostwrightError = storage_err.into();
/// assert!(format!("{}", err).contains("disk full"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PostwrightErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Text or image model error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Generation pipeline error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Brand guideline loading error
    #[from(BrandVoiceError)]
    BrandVoice(BrandVoiceError),
    /// Image storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// TUI error
    #[cfg(feature = "tui")]
    #[from(TuiError)]
    Tui(TuiError),
}

/// Postwright error with kind discrimination.
///
/// # Examples
///
/// ```
/// use postwright_error::{PostwrightErrorKind, PostwrightResult, ConfigError};
///
/// fn might_fail() -> PostwrightResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), PostwrightErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Postwright Error: {}", _0)]
pub struct PostwrightError(Box<PostwrightErrorKind>);

impl PostwrightError {
    /// Create a new error from a kind.
    pub fn new(kind: PostwrightErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PostwrightErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to PostwrightErrorKind
impl<T> From<T> for PostwrightError
where
    T: Into<PostwrightErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Postwright operations.
pub type PostwrightResult<T> = std::result::Result<T, PostwrightError>;

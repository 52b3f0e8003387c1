//! Transient-error classification.

use crate::{ModelsError, PostwrightError, PostwrightErrorKind};

/// Trait for errors that know whether a retry could help.
///
/// # Examples
///
/// ```
/// use postwright_error::{ModelsError, ModelsErrorKind, RetryableError};
///
/// let err = ModelsError::new(ModelsErrorKind::Http {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let err = ModelsError::new(ModelsErrorKind::Http {
///     status_code: 401,
///     message: "Unauthorized".to_string(),
/// });
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503 (service unavailable), 429 (rate limit),
    /// dropped connections or malformed model output return true. Permanent
    /// errors like 401 (unauthorized) or an unknown platform return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ModelsError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl RetryableError for PostwrightError {
    fn is_retryable(&self) -> bool {
        match self.kind() {
            PostwrightErrorKind::Models(e) => e.is_retryable(),
            PostwrightErrorKind::Json(_) => true,
            _ => false,
        }
    }
}

//! Errors raised by the generation pipeline itself.

/// Generation pipeline error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Platform key is not in the platform registry
    #[display("Unsupported platform: {}", _0)]
    UnsupportedPlatform(String),
    /// Platform is known but has no prompt template registered
    #[display("No prompt template registered for platform: {}", _0)]
    TemplateNotFound(String),
    /// Quality check reply could not be read as the expected JSON
    #[display("Invalid quality check response: {}", _0)]
    QualityResponse(String),
    /// Review action targeted a platform with no generated post
    #[display("No generated post for platform: {}", _0)]
    NoPost(String),
    /// A result type could not be assembled
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use postwright_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::UnsupportedPlatform("myspace".into()));
/// assert!(format!("{}", err).contains("myspace"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

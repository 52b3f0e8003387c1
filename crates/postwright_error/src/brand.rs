//! Brand guideline loading errors.

/// Reasons a brand guideline document could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BrandVoiceErrorKind {
    /// Guideline file does not exist
    #[display("Brand guidelines not found: {}", _0)]
    NotFound(String),
    /// Guideline file exists but could not be read
    #[display("Failed to read brand guidelines: {}", _0)]
    Read(String),
    /// Document is not valid YAML
    #[display("Invalid YAML in brand guidelines: {}", _0)]
    InvalidYaml(String),
    /// Top level of the document is not a mapping
    #[display("Brand guidelines must be a mapping at the top level, found {}", _0)]
    WrongShape(String),
    /// A known key holds a value of the wrong type
    #[display("Invalid brand guideline field: {}", _0)]
    InvalidField(String),
}

/// Brand guideline error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Brand Voice Error: {} at line {} in {}", kind, line, file)]
pub struct BrandVoiceError {
    /// The kind of error that occurred
    pub kind: BrandVoiceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BrandVoiceError {
    /// Create a new BrandVoiceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BrandVoiceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

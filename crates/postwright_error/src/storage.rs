//! Image storage error types.

/// Kinds of image storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Failed to create output directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Image bytes could not be decoded
    #[display("Failed to decode image: {}", _0)]
    ImageDecode(String),
    /// Image could not be encoded or saved
    #[display("Failed to encode image: {}", _0)]
    ImageEncode(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use postwright_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::ImageDecode("bad header".to_string()));
/// assert!(format!("{}", err).contains("decode"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

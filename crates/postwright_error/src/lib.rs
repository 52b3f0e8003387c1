//! Error types for Postwright.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use postwright_error::{PostwrightResult, ConfigError};
//!
//! fn load() -> PostwrightResult<String> {
//!     Err(ConfigError::new("OPENAI_API_KEY not set"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brand;
mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod generation;
mod json;
mod models;
mod retryable;
mod storage;
#[cfg(feature = "tui")]
mod tui;

pub use brand::{BrandVoiceError, BrandVoiceErrorKind};
pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind, DatabaseResult};
pub use error::{PostwrightError, PostwrightErrorKind, PostwrightResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
pub use models::{ModelsError, ModelsErrorKind, ModelsResult};
pub use retryable::RetryableError;
pub use storage::{StorageError, StorageErrorKind};
#[cfg(feature = "tui")]
pub use tui::{TuiError, TuiErrorKind, TuiResult};

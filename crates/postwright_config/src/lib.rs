//! Configuration for Postwright.
//!
//! Settings are layered with the `config` crate (bundled defaults, then the
//! home directory, then the working directory, then `POSTWRIGHT__*`
//! environment variables). Credentials come from the environment only.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
mod settings;

pub use credentials::{Credentials, GOOGLE_API_KEY_VAR, OPENAI_API_KEY_VAR};
pub use settings::{
    BrandSettings, ConfigReport, ImageModelSettings, OutputSettings, PostwrightConfig,
    RetrySettings, TextModelSettings,
};

//! API credentials read from the environment.

use postwright_error::ConfigError;

/// Environment variable holding the text model API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the image model API key.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Both model API keys.
///
/// Keys never appear in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    openai_api_key: String,
    google_api_key: String,
}

impl Credentials {
    /// Build credentials from explicit keys.
    pub fn new(openai_api_key: impl Into<String>, google_api_key: impl Into<String>) -> Self {
        Self {
            openai_api_key: openai_api_key.into(),
            google_api_key: google_api_key.into(),
        }
    }

    /// Read both keys from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            read_key(OPENAI_API_KEY_VAR)?,
            read_key(GOOGLE_API_KEY_VAR)?,
        ))
    }

    /// Text model API key.
    pub fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    /// Image model API key.
    pub fn google_api_key(&self) -> &str {
        &self.google_api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("google_api_key", &"<redacted>")
            .finish()
    }
}

fn read_key(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::new(format!(
            "{} environment variable not set",
            var
        ))),
    }
}

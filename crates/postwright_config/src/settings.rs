//! Layered application settings.

use config::{Config, Environment, File, FileFormat};
use postwright_core::PlatformRegistry;
use postwright_error::ConfigError;
use postwright_retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../postwright.toml");

/// Environment variable that overrides the text model name.
const OPENAI_MODEL_VAR: &str = "OPENAI_MODEL";
/// Environment variable that overrides the text model temperature.
const OPENAI_TEMPERATURE_VAR: &str = "OPENAI_TEMPERATURE";

/// Text model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct TextModelSettings {
    /// Model name sent with each request
    model: String,
    /// Sampling temperature for drafting and shortening
    temperature: f32,
    /// Base URL of the chat completions API
    base_url: String,
}

/// Image model selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ImageModelSettings {
    /// Model name used in the request path
    model: String,
    /// Sampling temperature for image generation
    temperature: f32,
    /// Base URL of the generative language API
    base_url: String,
}

/// Separate backoff policies for text and image calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
pub struct RetrySettings {
    /// Policy for text model calls
    #[serde(default)]
    text: RetryPolicy,
    /// Policy for image model calls
    #[serde(default)]
    image: RetryPolicy,
}

/// Where generated artifacts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct OutputSettings {
    /// Directory for generated and placeholder images
    image_dir: PathBuf,
}

/// Brand guideline location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct BrandSettings {
    /// Path to the YAML brand guideline document
    guidelines_path: PathBuf,
}

/// Complete Postwright configuration.
///
/// # Examples
///
/// ```no_run
/// use postwright_config::PostwrightConfig;
///
/// let config = PostwrightConfig::load().unwrap();
/// let twitter = config.platforms().get("twitter").unwrap();
/// assert_eq!(*twitter.char_limit(), 280);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PostwrightConfig {
    /// Supported platforms and their constraints
    platforms: PlatformRegistry,
    /// Text model settings
    text_model: TextModelSettings,
    /// Image model settings
    image_model: ImageModelSettings,
    /// Retry policies
    #[serde(default)]
    retry: RetrySettings,
    /// Output locations
    output: OutputSettings,
    /// Brand guideline settings
    brand: BrandSettings,
}

impl PostwrightConfig {
    /// Load configuration from all sources.
    ///
    /// Sources, lowest precedence first:
    /// 1. Bundled `postwright.toml`
    /// 2. `~/.config/postwright/postwright.toml`
    /// 3. `./postwright.toml`
    /// 4. `POSTWRIGHT__SECTION__KEY` environment variables
    /// 5. `OPENAI_MODEL` and `OPENAI_TEMPERATURE`
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".config/postwright/postwright.toml");
            debug!(path = %user_config.display(), "Checking user config");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder.add_source(File::with_name("postwright").required(false));

        let builder = with_env_overrides(builder)?;
        finish(builder.build())
    }

    /// Load configuration from a specific file on top of the bundled defaults.
    ///
    /// Environment overrides still apply.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading configuration from file");
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        let builder = with_env_overrides(builder)?;
        finish(builder.build())
    }

    /// Parse configuration from a TOML string on top of the bundled defaults.
    ///
    /// No environment overrides are applied.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let built = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build();
        finish(built)
    }

    /// The bundled defaults alone.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml("")
    }

    /// Replace the platform registry.
    pub fn with_platforms(mut self, platforms: PlatformRegistry) -> Self {
        self.platforms = platforms;
        self
    }

    /// Redirect generated images.
    pub fn with_image_dir(mut self, image_dir: impl Into<PathBuf>) -> Self {
        self.output.image_dir = image_dir.into();
        self
    }

    /// Replace both retry policies.
    pub fn with_retry(mut self, text: RetryPolicy, image: RetryPolicy) -> Self {
        self.retry = RetrySettings { text, image };
        self
    }

    /// Point at a different brand guideline document.
    pub fn with_guidelines_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.brand.guidelines_path = path.into();
        self
    }

    /// Check settings that deserialization alone cannot catch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.platforms.is_empty() {
            return Err(ConfigError::new("No platforms configured"));
        }
        for (name, spec) in self.platforms.iter() {
            if *spec.char_limit() < 4 {
                return Err(ConfigError::new(format!(
                    "Platform {} has a character limit too small to hold a post: {}",
                    name,
                    spec.char_limit()
                )));
            }
            if *spec.image_width() == 0 || *spec.image_height() == 0 {
                return Err(ConfigError::new(format!(
                    "Platform {} has an empty image size: {}",
                    name,
                    spec.dimensions()
                )));
            }
        }
        self.retry.text.validate()?;
        self.retry.image.validate()?;
        Ok(())
    }

    /// Report which runtime prerequisites are present.
    pub fn report(&self) -> ConfigReport {
        ConfigReport {
            openai_api_key: env_present(crate::OPENAI_API_KEY_VAR),
            google_api_key: env_present(crate::GOOGLE_API_KEY_VAR),
            database_url: env_present("DATABASE_URL"),
            brand_guidelines: self.brand.guidelines_path.is_file(),
        }
    }
}

/// Presence of each runtime prerequisite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct ConfigReport {
    /// `OPENAI_API_KEY` is set
    openai_api_key: bool,
    /// `GOOGLE_API_KEY` is set
    google_api_key: bool,
    /// `DATABASE_URL` is set
    database_url: bool,
    /// Brand guideline file exists
    brand_guidelines: bool,
}

impl ConfigReport {
    /// Whether generation can run: both model keys are present.
    pub fn can_generate(&self) -> bool {
        self.openai_api_key && self.google_api_key
    }

    /// Named checks in display order.
    pub fn checks(&self) -> [(&'static str, bool); 4] {
        [
            ("OPENAI_API_KEY", self.openai_api_key),
            ("GOOGLE_API_KEY", self.google_api_key),
            ("DATABASE_URL", self.database_url),
            ("brand guidelines", self.brand_guidelines),
        ]
    }
}

fn env_present(var: &str) -> bool {
    std::env::var(var).is_ok_and(|v| !v.trim().is_empty())
}

fn with_env_overrides(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    builder
        .add_source(
            Environment::with_prefix("POSTWRIGHT")
                .prefix_separator("__")
                .separator("__"),
        )
        .set_override_option("text_model.model", std::env::var(OPENAI_MODEL_VAR).ok())
        .and_then(|b| {
            b.set_override_option(
                "text_model.temperature",
                std::env::var(OPENAI_TEMPERATURE_VAR).ok(),
            )
        })
        .map_err(|e| ConfigError::new(format!("Failed to apply environment overrides: {}", e)))
}

fn finish(built: Result<Config, config::ConfigError>) -> Result<PostwrightConfig, ConfigError> {
    let config: PostwrightConfig = built
        .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
        .try_deserialize()
        .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;
    config.validate()?;
    debug!(
        platforms = config.platforms.len(),
        text_model = %config.text_model.model,
        image_model = %config.image_model.model,
        "Configuration loaded"
    );
    Ok(config)
}

//! Per-platform publishing constraints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pixel size of a platform's feed image.
///
/// # Examples
///
/// ```
/// use postwright_core::ImageDimensions;
///
/// let dims = ImageDimensions::new(1200, 675);
/// assert_eq!(dims.to_string(), "1200x675");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{}x{}", width, height)]
pub struct ImageDimensions {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageDimensions {
    /// Create dimensions from width and height.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Static constraints for one social platform.
///
/// # Examples
///
/// ```
/// use postwright_core::PlatformSpec;
///
/// let spec = PlatformSpec::builder()
///     .char_limit(280usize)
///     .image_width(1200u32)
///     .image_height(675u32)
///     .max_hashtags(2usize)
///     .tone_description("Conversational, punchy")
///     .build()
///     .unwrap();
///
/// assert_eq!(*spec.char_limit(), 280);
/// assert_eq!(spec.dimensions().to_string(), "1200x675");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct PlatformSpec {
    /// Maximum post length in characters
    char_limit: usize,
    /// Target image width in pixels
    image_width: u32,
    /// Target image height in pixels
    image_height: u32,
    /// Maximum number of hashtags
    max_hashtags: usize,
    /// Short tone description
    tone_description: String,
    /// Recommended length, as guidance for prompts and reviewers
    #[serde(default)]
    #[builder(default)]
    optimal_length: String,
}

impl PlatformSpec {
    /// Creates a new platform spec builder.
    pub fn builder() -> PlatformSpecBuilder {
        PlatformSpecBuilder::default()
    }

    /// Target image size.
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.image_width, self.image_height)
    }

    fn standard(
        char_limit: usize,
        (image_width, image_height): (u32, u32),
        max_hashtags: usize,
        tone_description: &str,
        optimal_length: &str,
    ) -> Self {
        Self {
            char_limit,
            image_width,
            image_height,
            max_hashtags,
            tone_description: tone_description.to_string(),
            optimal_length: optimal_length.to_string(),
        }
    }
}

/// Platform specs keyed by platform name.
///
/// Loaded once at startup and shared read-only. Iteration is in name order.
///
/// # Examples
///
/// ```
/// use postwright_core::PlatformRegistry;
///
/// let registry = PlatformRegistry::standard();
/// assert_eq!(*registry.get("twitter").unwrap().char_limit(), 280);
/// assert!(registry.get("myspace").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformRegistry(BTreeMap<String, PlatformSpec>);

impl PlatformRegistry {
    /// The four built-in platforms: linkedin, twitter, facebook, nextdoor.
    pub fn standard() -> Self {
        let mut specs = BTreeMap::new();
        specs.insert(
            "linkedin".to_string(),
            PlatformSpec::standard(
                3000,
                (1200, 627),
                5,
                "Professional, insightful",
                "150-300 words",
            ),
        );
        specs.insert(
            "twitter".to_string(),
            PlatformSpec::standard(
                280,
                (1200, 675),
                2,
                "Conversational, punchy",
                "200-270 characters",
            ),
        );
        specs.insert(
            "facebook".to_string(),
            PlatformSpec::standard(
                63206,
                (1200, 630),
                5,
                "Friendly, engaging",
                "100-200 words",
            ),
        );
        specs.insert(
            "nextdoor".to_string(),
            PlatformSpec::standard(
                5000,
                (1200, 900),
                3,
                "Neighborly, helpful",
                "100-250 words",
            ),
        );
        Self(specs)
    }

    /// Look up a platform by key.
    pub fn get(&self, platform: &str) -> Option<&PlatformSpec> {
        self.0.get(platform)
    }

    /// Whether the platform key is registered.
    pub fn contains(&self, platform: &str) -> bool {
        self.0.contains_key(platform)
    }

    /// Register or replace a platform.
    pub fn insert(&mut self, platform: impl Into<String>, spec: PlatformSpec) {
        self.0.insert(platform.into(), spec);
    }

    /// Platform names in iteration order.
    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Iterate over `(name, spec)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PlatformSpec)> {
        self.0.iter()
    }

    /// Number of registered platforms.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no platforms are registered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PlatformSpec)> for PlatformRegistry {
    fn from_iter<I: IntoIterator<Item = (String, PlatformSpec)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

//! Brand guideline loading and voice composition.

use postwright_core::{
    Avoidances, BrandGuidelines, CtaPreferences, HashtagStrategy, PlatformRegistry,
};
use postwright_error::{BrandVoiceError, BrandVoiceErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const DEFAULT_PRIMARY_VOICE: &str = "professional and engaging";
const FALLBACK_MAX_HASHTAGS: usize = 3;
const STOP_WORDS: [&str; 4] = ["the", "and", "for", "with"];
const INDUSTRY_TAGS: [&str; 4] = ["Innovation", "Technology", "Business", "Growth"];

/// Loaded brand guidelines plus the derived voice descriptions.
///
/// Read-only after construction and safe to share between pipeline runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BrandVoice {
    guidelines: BrandGuidelines,
    source: Option<PathBuf>,
}

impl BrandVoice {
    /// Load guidelines from a YAML document.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file does not exist
    /// - `Read` if it cannot be read
    /// - `InvalidYaml` if it is not YAML
    /// - `WrongShape` if the top level is not a mapping
    /// - `InvalidField` if a known section has the wrong type
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BrandVoiceError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BrandVoiceError::new(BrandVoiceErrorKind::NotFound(
                path.display().to_string(),
            )));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| {
            BrandVoiceError::new(BrandVoiceErrorKind::Read(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let guidelines = Self::parse(&raw)?;
        info!("Loaded brand guidelines");

        Ok(Self {
            guidelines,
            source: Some(path.to_path_buf()),
        })
    }

    /// Parse guidelines from YAML text.
    pub fn parse(yaml: &str) -> Result<BrandGuidelines, BrandVoiceError> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(|e| {
            BrandVoiceError::new(BrandVoiceErrorKind::InvalidYaml(e.to_string()))
        })?;

        if !value.is_mapping() {
            return Err(BrandVoiceError::new(BrandVoiceErrorKind::WrongShape(
                yaml_kind(&value).to_string(),
            )));
        }

        serde_yaml::from_value(value).map_err(|e| {
            BrandVoiceError::new(BrandVoiceErrorKind::InvalidField(e.to_string()))
        })
    }

    /// Wrap guidelines already in memory.
    pub fn from_guidelines(guidelines: BrandGuidelines) -> Self {
        Self {
            guidelines,
            source: None,
        }
    }

    /// The parsed guidelines.
    pub fn guidelines(&self) -> &BrandGuidelines {
        &self.guidelines
    }

    /// File the guidelines were loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Compose the voice description used in prompts.
    ///
    /// # Examples
    ///
    /// ```
    /// use postwright_generation::BrandVoice;
    ///
    /// let voice = BrandVoice::default();
    /// assert_eq!(voice.voice_for("twitter"), "professional and engaging");
    /// ```
    pub fn voice_for(&self, platform: &str) -> String {
        let brand = &self.guidelines.brand_voice;
        let mut voice = brand
            .primary
            .as_deref()
            .unwrap_or(DEFAULT_PRIMARY_VOICE)
            .to_string();

        if !brand.tone_keywords.is_empty() {
            voice.push_str(", emphasizing ");
            voice.push_str(&brand.tone_keywords.join(", "));
        }

        if let Some(prefs) = self.guidelines.platform_preferences.get(platform) {
            voice.push_str(&format!(
                " For {}: {}, focusing on {}.",
                platform, prefs.style, prefs.focus
            ));
        }

        debug!(platform, voice = %voice, "Composed brand voice");
        voice
    }

    /// Preferred and avoided hashtag categories.
    pub fn hashtag_strategy(&self) -> &HashtagStrategy {
        &self.guidelines.hashtag_strategy
    }

    /// Call-to-action preferences.
    pub fn cta_preferences(&self) -> &CtaPreferences {
        &self.guidelines.call_to_action
    }

    /// Brand values.
    pub fn values(&self) -> &[String] {
        &self.guidelines.values
    }

    /// Language and topics to avoid.
    pub fn avoidances(&self) -> &Avoidances {
        &self.guidelines.avoid
    }

    /// Content focus for a platform, empty when unset.
    pub fn platform_focus(&self, platform: &str) -> &str {
        self.guidelines
            .platform_preferences
            .get(platform)
            .map(|p| p.focus.as_str())
            .unwrap_or("")
    }

    /// Writing style for a platform, empty when unset.
    pub fn platform_style(&self, platform: &str) -> &str {
        self.guidelines
            .platform_preferences
            .get(platform)
            .map(|p| p.style.as_str())
            .unwrap_or("")
    }

    /// Offline hashtags derived from the topic text.
    ///
    /// Used when the text model is unavailable. `count` defaults to the
    /// platform's maximum, or 3 for platforms not in `platforms`.
    pub fn keyword_hashtags(
        &self,
        platforms: &PlatformRegistry,
        platform: &str,
        topic: &str,
        count: Option<usize>,
    ) -> Vec<String> {
        let count = count.unwrap_or_else(|| {
            platforms
                .get(platform)
                .map(|spec| *spec.max_hashtags())
                .unwrap_or(FALLBACK_MAX_HASHTAGS)
        });

        let mut tags: Vec<String> = Vec::new();
        let lowered = topic.to_lowercase().replace('-', " ");
        for word in lowered.split_whitespace() {
            if word.chars().count() > 3 && !STOP_WORDS.contains(&word) {
                let tag = capitalize(word);
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }

        let industry = self
            .hashtag_strategy()
            .preferred_categories
            .iter()
            .any(|c| c == "industry-specific");
        if industry {
            for tag in INDUSTRY_TAGS {
                if !tags.iter().any(|t| t == tag) {
                    tags.push(tag.to_string());
                }
            }
        }

        tags.truncate(count);
        tags
    }
}

/// Render hashtags for a post: one `#` per entry, space separated.
///
/// Entries that already start with `#` are not doubled.
///
/// # Examples
///
/// ```
/// use postwright_generation::format_hashtags;
///
/// let tags = vec!["AI".to_string(), "#Teamwork".to_string(), "##Growth".to_string()];
/// assert_eq!(format_hashtags(&tags), "#AI #Teamwork #Growth");
/// ```
pub fn format_hashtags(hashtags: &[String]) -> String {
    hashtags
        .iter()
        .map(|tag| format!("#{}", tag.trim_start_matches('#')))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GUIDELINES: &str = r#"
brand_voice:
  primary: "Confident and approachable"
  tone_keywords: [innovative, helpful]
platform_preferences:
  linkedin:
    focus: "industry insights"
    style: "thought leadership"
hashtag_strategy:
  preferred_categories: [industry-specific, trending]
  avoid: [controversial]
values: [integrity]
"#;

    fn voice() -> BrandVoice {
        BrandVoice::from_guidelines(BrandVoice::parse(GUIDELINES).unwrap())
    }

    #[test]
    fn test_voice_for_platform_with_preferences() {
        assert_eq!(
            voice().voice_for("linkedin"),
            "Confident and approachable, emphasizing innovative, helpful For linkedin: thought leadership, focusing on industry insights."
        );
    }

    #[test]
    fn test_voice_for_platform_without_preferences() {
        assert_eq!(
            voice().voice_for("twitter"),
            "Confident and approachable, emphasizing innovative, helpful"
        );
    }

    #[test]
    fn test_accessors() {
        let voice = voice();
        assert_eq!(voice.platform_focus("linkedin"), "industry insights");
        assert_eq!(voice.platform_style("facebook"), "");
        assert_eq!(voice.values(), ["integrity".to_string()]);
        assert_eq!(voice.hashtag_strategy().avoid, vec!["controversial"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = BrandVoice::load("/nonexistent/brand.yaml").unwrap_err();
        assert!(matches!(err.kind, BrandVoiceErrorKind::NotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GUIDELINES.as_bytes()).unwrap();
        let voice = BrandVoice::load(file.path()).unwrap();
        assert_eq!(voice.source(), Some(file.path()));
        assert_eq!(voice.platform_style("linkedin"), "thought leadership");
    }

    #[test]
    fn test_sample_guidelines_load() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/brand_guidelines.yaml");
        let voice = BrandVoice::load(path).unwrap();
        assert_eq!(
            voice.voice_for("nextdoor"),
            "professional yet approachable, emphasizing innovative, helpful, collaborative For nextdoor: friendly and neighborly, focusing on local community value."
        );
        assert!(!voice.values().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_documents() {
        let err = BrandVoice::parse("brand_voice: [unclosed").unwrap_err();
        assert!(matches!(err.kind, BrandVoiceErrorKind::InvalidYaml(_)));

        let err = BrandVoice::parse("- just\n- a list\n").unwrap_err();
        assert_eq!(
            err.kind,
            BrandVoiceErrorKind::WrongShape("a sequence".to_string())
        );

        let err = BrandVoice::parse("values: 42\n").unwrap_err();
        assert!(matches!(err.kind, BrandVoiceErrorKind::InvalidField(_)));
    }

    #[test]
    fn test_keyword_hashtags() {
        let registry = PlatformRegistry::standard();
        let tags = voice().keyword_hashtags(
            &registry,
            "linkedin",
            "Launching the AI-powered collaboration suite",
            None,
        );
        assert_eq!(
            tags,
            vec!["Launching", "Powered", "Collaboration", "Suite", "Innovation"]
        );

        let tags = BrandVoice::default().keyword_hashtags(&registry, "myspace", "with the big data", None);
        assert_eq!(tags, vec!["Data"]);
    }

    #[test]
    fn test_format_hashtags_never_doubles() {
        let tags = vec!["#Already".to_string(), "Plain".to_string()];
        let once = format_hashtags(&tags);
        assert_eq!(once, "#Already #Plain");
        assert!(!once.contains("##"));
    }
}

//! Brand guideline document model.
//!
//! Mirrors the YAML layout:
//!
//! ```yaml
//! brand_voice: { primary: ..., tone_keywords: [...] }
//! platform_preferences: { linkedin: { focus: ..., style: ... } }
//! hashtag_strategy: { preferred_categories: [...], avoid: [...] }
//! call_to_action: { preferred: [...], avoid: [...] }
//! values: [...]
//! avoid: { language: [...], topics: [...] }
//! ```
//!
//! Every section is optional; absent sections deserialize to empty values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed brand guidelines. Read-only after load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandGuidelines {
    /// Overall voice
    pub brand_voice: VoiceGuidelines,
    /// Per-platform focus and style overrides
    pub platform_preferences: BTreeMap<String, PlatformPreference>,
    /// Hashtag categories to prefer and avoid
    pub hashtag_strategy: HashtagStrategy,
    /// Call-to-action phrasing preferences
    pub call_to_action: CtaPreferences,
    /// Brand values
    pub values: Vec<String>,
    /// Language and topics to stay away from
    pub avoid: Avoidances,
}

/// Primary voice and tone keywords.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceGuidelines {
    /// One-phrase description of the voice
    pub primary: Option<String>,
    /// Keywords the voice should emphasise
    pub tone_keywords: Vec<String>,
}

/// Platform-specific override.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformPreference {
    /// What posts on this platform should focus on
    pub focus: String,
    /// How posts on this platform should read
    pub style: String,
}

/// Hashtag categories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HashtagStrategy {
    /// Categories to draw hashtags from
    pub preferred_categories: Vec<String>,
    /// Categories to never use
    pub avoid: Vec<String>,
}

/// Call-to-action phrasing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CtaPreferences {
    /// Preferred calls to action
    pub preferred: Vec<String>,
    /// Calls to action to avoid
    pub avoid: Vec<String>,
}

/// Things the brand never says or discusses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Avoidances {
    /// Words and phrasing to avoid
    pub language: Vec<String>,
    /// Topics to avoid
    pub topics: Vec<String>,
}

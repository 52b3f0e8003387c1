//! Model-graded quality checks.

use crate::prompts::{
    APPROPRIATENESS_TEMPLATE, BRAND_ALIGNMENT_TEMPLATE, ENGAGEMENT_TEMPLATE, GRAMMAR_TEMPLATE,
    fill,
};
use crate::{BrandVoice, complete_text};
use postwright_core::{GenerateRequest, NewQualityCheck, QualityCheckType};
use postwright_error::{GenerationError, GenerationErrorKind, PostwrightResult};
use postwright_interface::PostwrightDriver;
use postwright_retry::RetryPolicy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, instrument};

const SYSTEM_ROLE: &str =
    "You are a meticulous social media content reviewer. Respond with JSON only.";
const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 500;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("Valid JSON object regex"));

/// Brand alignment verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandAlignmentResult {
    /// Whether the post fits the brand
    pub passed: bool,
    /// 0.0 to 1.0
    pub score: f64,
    /// Reviewer notes
    #[serde(default)]
    pub alignment_notes: String,
    /// Suggested change
    #[serde(default)]
    pub recommendation: String,
}

/// Content safety verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppropriatenessResult {
    /// Whether the post is safe to publish
    pub passed: bool,
    /// 0.0 to 1.0
    pub score: f64,
    /// Problems found
    #[serde(default)]
    pub issues: Vec<String>,
    /// Suggested change
    #[serde(default)]
    pub recommendation: String,
}

/// Grammar and spelling verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarResult {
    /// Whether the text is clean enough
    pub passed: bool,
    /// 0.0 to 1.0
    pub score: f64,
    /// Errors found
    #[serde(default)]
    pub errors: Vec<String>,
    /// none, minor or major
    #[serde(default)]
    pub severity: String,
}

/// Engagement prediction. Advisory; has no pass/fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementResult {
    /// 0.0 to 1.0
    pub score: f64,
    /// low, medium or high
    #[serde(default)]
    pub prediction: String,
    /// What works
    #[serde(default)]
    pub strengths: Vec<String>,
    /// What to change
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// All four checks for one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Brand alignment
    pub brand_alignment: BrandAlignmentResult,
    /// Appropriateness
    pub appropriateness: AppropriatenessResult,
    /// Grammar
    pub grammar: GrammarResult,
    /// Engagement prediction
    pub engagement: EngagementResult,
}

impl QualityReport {
    /// Whether every pass/fail check passed.
    pub fn overall_passed(&self) -> bool {
        self.brand_alignment.passed && self.appropriateness.passed && self.grammar.passed
    }

    /// One persistable row per check.
    pub fn to_records(&self, post_id: i32) -> Vec<NewQualityCheck> {
        vec![
            record(
                post_id,
                QualityCheckType::BrandAlignment,
                Some(self.brand_alignment.passed),
                self.brand_alignment.score,
                &self.brand_alignment,
            ),
            record(
                post_id,
                QualityCheckType::Appropriateness,
                Some(self.appropriateness.passed),
                self.appropriateness.score,
                &self.appropriateness,
            ),
            record(
                post_id,
                QualityCheckType::Grammar,
                Some(self.grammar.passed),
                self.grammar.score,
                &self.grammar,
            ),
            record(
                post_id,
                QualityCheckType::Engagement,
                None,
                self.engagement.score,
                &self.engagement,
            ),
        ]
    }
}

fn record<T: Serialize>(
    post_id: i32,
    check_type: QualityCheckType,
    passed: Option<bool>,
    score: f64,
    details: &T,
) -> NewQualityCheck {
    NewQualityCheck {
        post_id,
        check_type,
        passed: passed.unwrap_or(true),
        score: Some(score),
        details: serde_json::to_value(details).ok(),
    }
}

/// Runs the review checks against the text model.
pub struct QualityChecker {
    text: Arc<dyn PostwrightDriver>,
    retry: RetryPolicy,
}

impl QualityChecker {
    /// Create a checker.
    pub fn new(text: Arc<dyn PostwrightDriver>, retry: RetryPolicy) -> Self {
        Self { text, retry }
    }

    /// Does the post match the brand guidelines?
    #[instrument(skip_all)]
    pub async fn check_brand_alignment(
        &self,
        content: &str,
        brand: &BrandVoice,
    ) -> PostwrightResult<BrandAlignmentResult> {
        let guidelines = serde_yaml::to_string(brand.guidelines()).map_err(|e| {
            GenerationError::new(GenerationErrorKind::QualityResponse(e.to_string()))
        })?;
        let prompt = fill(
            BRAND_ALIGNMENT_TEMPLATE,
            &[("content", content), ("brand_guidelines", &guidelines)],
        );
        self.ask("check_brand_alignment", prompt).await
    }

    /// Is the post safe to publish?
    #[instrument(skip_all)]
    pub async fn check_appropriateness(
        &self,
        content: &str,
    ) -> PostwrightResult<AppropriatenessResult> {
        let prompt = fill(APPROPRIATENESS_TEMPLATE, &[("content", content)]);
        self.ask("check_appropriateness", prompt).await
    }

    /// Grammar and spelling.
    #[instrument(skip_all)]
    pub async fn check_grammar(&self, content: &str) -> PostwrightResult<GrammarResult> {
        let prompt = fill(GRAMMAR_TEMPLATE, &[("content", content)]);
        self.ask("check_grammar", prompt).await
    }

    /// Predicted engagement on `platform`.
    #[instrument(skip(self, content))]
    pub async fn predict_engagement(
        &self,
        content: &str,
        platform: &str,
    ) -> PostwrightResult<EngagementResult> {
        let prompt = fill(
            ENGAGEMENT_TEMPLATE,
            &[("content", content), ("platform", platform)],
        );
        self.ask("predict_engagement", prompt).await
    }

    /// All four checks, in order.
    #[instrument(skip(self, content, brand))]
    pub async fn run_all(
        &self,
        content: &str,
        platform: &str,
        brand: &BrandVoice,
    ) -> PostwrightResult<QualityReport> {
        let report = QualityReport {
            brand_alignment: self.check_brand_alignment(content, brand).await?,
            appropriateness: self.check_appropriateness(content).await?,
            grammar: self.check_grammar(content).await?,
            engagement: self.predict_engagement(content, platform).await?,
        };
        info!(passed = report.overall_passed(), "Quality checks complete");
        Ok(report)
    }

    /// A reply that is not the expected JSON counts as a failed attempt.
    async fn ask<T: DeserializeOwned>(&self, operation: &str, prompt: String) -> PostwrightResult<T> {
        let request = GenerateRequest::chat(SYSTEM_ROLE, prompt, TEMPERATURE, MAX_TOKENS);
        let request = &request;
        self.retry
            .run(operation, || async move {
                let reply = complete_text(self.text.as_ref(), request).await?;
                debug!(reply = %reply, "Quality check reply");
                parse_reply(&reply)
            })
            .await
    }
}

fn parse_reply<T: DeserializeOwned>(reply: &str) -> PostwrightResult<T> {
    let json = extract_json_object(reply).ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::QualityResponse(
            "no JSON object in reply".to_string(),
        ))
    })?;
    serde_json::from_str(json).map_err(|e| {
        GenerationError::new(GenerationErrorKind::QualityResponse(e.to_string())).into()
    })
}

/// The outermost `{ ... }` span of a model reply.
///
/// Tolerates prose or code fences around the object.
///
/// # Examples
///
/// ```
/// use postwright_generation::extract_json_object;
///
/// let reply = "Sure!\n```json\n{\"score\": 0.8}\n```";
/// assert_eq!(extract_json_object(reply), Some("{\"score\": 0.8}"));
/// assert_eq!(extract_json_object("no json here"), None);
/// ```
pub fn extract_json_object(reply: &str) -> Option<&str> {
    JSON_OBJECT.find(reply).map(|m| m.as_str())
}

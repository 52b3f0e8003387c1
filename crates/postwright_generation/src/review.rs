//! Review decisions over one generation run.

use crate::SocialMediaGenerator;
use postwright_core::{
    CharStatus, FeedbackType, GeneratedPost, GenerationRequest, NewFeedback, NewPost, PostRecord,
    PostStatus,
};
use postwright_error::{GenerationError, GenerationErrorKind, PostwrightError, PostwrightResult};
use postwright_interface::PostRepository;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const REVIEWER: &str = "tui_user";

/// Content and hashtags as the pipeline produced them.
#[derive(Debug, Clone, PartialEq)]
struct Generated {
    content: String,
    hashtags: Vec<String>,
}

impl From<&GeneratedPost> for Generated {
    fn from(post: &GeneratedPost) -> Self {
        Self {
            content: post.content().clone(),
            hashtags: post.hashtags().clone(),
        }
    }
}

/// One run's posts under review, with decisions persisted through `R`.
///
/// Every action the review screen offers is a method here, so the workflow
/// can be driven without a terminal.
pub struct ReviewSession<R> {
    generator: Arc<SocialMediaGenerator>,
    repository: R,
    template: GenerationRequest,
    results: BTreeMap<String, PostwrightResult<GeneratedPost>>,
    generated: BTreeMap<String, Generated>,
    decisions: BTreeMap<String, PostRecord>,
}

impl<R: PostRepository> ReviewSession<R> {
    /// Generate every platform for `template` and open a session on the results.
    #[instrument(skip_all, fields(topic = %template.topic()))]
    pub async fn start(
        generator: Arc<SocialMediaGenerator>,
        repository: R,
        template: GenerationRequest,
    ) -> Self {
        let results = generator.generate_all_platforms(&template).await;
        Self::new(generator, repository, template, results)
    }

    /// Open a session on results produced elsewhere.
    pub fn new(
        generator: Arc<SocialMediaGenerator>,
        repository: R,
        template: GenerationRequest,
        results: BTreeMap<String, PostwrightResult<GeneratedPost>>,
    ) -> Self {
        let generated = results
            .iter()
            .filter_map(|(platform, result)| {
                result
                    .as_ref()
                    .ok()
                    .map(|post| (platform.clone(), Generated::from(post)))
            })
            .collect();
        Self {
            generator,
            repository,
            template,
            results,
            generated,
            decisions: BTreeMap::new(),
        }
    }

    /// Platforms in the run, in name order.
    pub fn platforms(&self) -> Vec<String> {
        self.results.keys().cloned().collect()
    }

    /// The topic every post was generated from.
    pub fn topic(&self) -> &str {
        self.template.topic()
    }

    /// Successful post for a platform.
    pub fn post(&self, platform: &str) -> Option<&GeneratedPost> {
        self.results.get(platform).and_then(|r| r.as_ref().ok())
    }

    /// Failure for a platform.
    pub fn error(&self, platform: &str) -> Option<&PostwrightError> {
        self.results.get(platform).and_then(|r| r.as_ref().err())
    }

    /// Number of platforms that produced a post.
    pub fn succeeded(&self) -> usize {
        self.results.values().filter(|r| r.is_ok()).count()
    }

    /// Length status of the platform's current content.
    pub fn char_status(&self, platform: &str) -> Option<CharStatus> {
        self.post(platform)
            .map(|post| CharStatus::classify(post.char_count(), *post.metadata().char_limit()))
    }

    /// Review status: the saved decision, or draft.
    pub fn status(&self, platform: &str) -> PostStatus {
        self.decisions
            .get(platform)
            .map(|record| record.status)
            .unwrap_or_default()
    }

    /// Saved record for a decided platform.
    pub fn decision(&self, platform: &str) -> Option<&PostRecord> {
        self.decisions.get(platform)
    }

    /// Whether content or hashtags differ from what was generated.
    pub fn is_edited(&self, platform: &str) -> bool {
        match (self.post(platform), self.generated.get(platform)) {
            (Some(post), Some(generated)) => Generated::from(post) != *generated,
            _ => false,
        }
    }

    /// The repository decisions are written to.
    pub fn repository(&mut self) -> &mut R {
        &mut self.repository
    }

    fn post_mut(&mut self, platform: &str) -> Result<&mut GeneratedPost, GenerationError> {
        self.results
            .get_mut(platform)
            .and_then(|r| r.as_mut().ok())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::NoPost(platform.to_string())))
    }

    /// Overwrite content and hashtags.
    ///
    /// `hashtags` is free text: entries separated by spaces or commas, with
    /// or without `#`.
    pub fn edit(&mut self, platform: &str, content: &str, hashtags: &str) -> PostwrightResult<()> {
        let post = self.post_mut(platform)?;
        post.apply_edit(content, parse_hashtag_input(hashtags));
        info!(platform, "Post edited");
        Ok(())
    }

    /// Run the whole pipeline again for one platform.
    ///
    /// On failure the previous post is kept and the error returned.
    #[instrument(skip(self))]
    pub async fn regenerate_post(&mut self, platform: &str) -> PostwrightResult<()> {
        let request = self.template.clone().with_platform(platform);

        match self.generator.generate_post(&request).await {
            Ok(post) => {
                self.generated
                    .insert(platform.to_string(), Generated::from(&post));
                self.results.insert(platform.to_string(), Ok(post));
                self.decisions.remove(platform);
                info!("Post regenerated");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Regeneration failed, keeping previous result");
                Err(e)
            }
        }
    }

    /// Render a new image for the current content.
    #[instrument(skip(self))]
    pub async fn regenerate_image(&mut self, platform: &str) -> PostwrightResult<()> {
        let content = self
            .post(platform)
            .map(|post| post.content().clone())
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::NoPost(platform.to_string())))?;

        let image = self
            .generator
            .regenerate_image(&content, platform, Some(self.template.topic()))
            .await?;
        self.post_mut(platform)?.replace_image(image);
        info!("Image regenerated");
        Ok(())
    }

    /// Save the post as approved and record the feedback.
    ///
    /// Feedback is `edited`, with the edit details, when content or hashtags
    /// changed; otherwise `approved_as_is`.
    #[instrument(skip(self))]
    pub fn approve(&mut self, platform: &str) -> PostwrightResult<PostRecord> {
        let edit_details = self.edit_details(platform);
        let new_post = self.new_post(platform, PostStatus::Approved, edit_details.clone())?;
        let record = self.repository.save_post(new_post)?;

        let feedback = match edit_details {
            Some(details) => NewFeedback::new(record.id, FeedbackType::Edited).with_edit_details(details),
            None => NewFeedback::new(record.id, FeedbackType::ApprovedAsIs),
        }
        .with_created_by(REVIEWER);
        self.repository.save_feedback(feedback)?;

        info!(post_id = record.id, "Post approved");
        self.decisions.insert(platform.to_string(), record.clone());
        Ok(record)
    }

    /// Save the post as rejected with the reviewer's reason.
    #[instrument(skip(self))]
    pub fn reject(&mut self, platform: &str, reason: &str) -> PostwrightResult<PostRecord> {
        let edit_details = self.edit_details(platform);
        let new_post = self.new_post(platform, PostStatus::Rejected, edit_details)?;
        let record = self.repository.save_post(new_post)?;

        let mut feedback =
            NewFeedback::new(record.id, FeedbackType::Rejected).with_created_by(REVIEWER);
        let reason = reason.trim();
        if !reason.is_empty() {
            feedback = feedback.with_rejection_reason(reason);
        }
        self.repository.save_feedback(feedback)?;

        info!(post_id = record.id, "Post rejected");
        self.decisions.insert(platform.to_string(), record.clone());
        Ok(record)
    }

    fn edit_details(&self, platform: &str) -> Option<serde_json::Value> {
        if !self.is_edited(platform) {
            return None;
        }
        let post = self.post(platform)?;
        let generated = self.generated.get(platform)?;
        Some(json!({
            "original_content": generated.content,
            "edited_content": post.content(),
            "original_hashtags": generated.hashtags,
            "edited_hashtags": post.hashtags(),
        }))
    }

    fn new_post(
        &self,
        platform: &str,
        status: PostStatus,
        edit_details: Option<serde_json::Value>,
    ) -> Result<NewPost, GenerationError> {
        let post = self
            .post(platform)
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::NoPost(platform.to_string())))?;
        let generated_content = self
            .generated
            .get(platform)
            .map(|g| g.content.clone())
            .unwrap_or_else(|| post.content().clone());

        let mut new_post = NewPost::new(self.template.topic(), platform, post.content().clone())
            .with_generated_content(generated_content)
            .with_image_url(post.image_path().display().to_string())
            .with_image_prompt(post.image_prompt().clone())
            .with_status(status);
        if let Some(details) = edit_details {
            new_post = new_post.with_human_edits(details);
        }
        Ok(new_post)
    }
}

/// Split reviewer hashtag input on spaces and commas.
///
/// # Examples
///
/// ```
/// use postwright_generation::parse_hashtag_input;
///
/// assert_eq!(parse_hashtag_input("#AI, #Teamwork Growth"), vec!["AI", "Teamwork", "Growth"]);
/// ```
pub fn parse_hashtag_input(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|tag| tag.trim_start_matches('#'))
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

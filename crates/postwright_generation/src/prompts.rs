//! Prompt templates and substitution.

use postwright_error::{GenerationError, GenerationErrorKind};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

const LINKEDIN_TEMPLATE: &str = r#"
Create a professional LinkedIn post about: {topic}

BRAND VOICE & TONE:
Your writing must embody this brand voice: {brand_voice}
Primary tone: Professional, thought-leadership style
Approach: Insightful, industry-focused, value-driven

CONTENT REQUIREMENTS:
- Length: 150-300 words (optimal for LinkedIn engagement)
- Structure: Start with a compelling hook or thought-provoking question
- Substance: Provide genuine industry insights or clear value proposition
- Formatting: Use line breaks every 2-3 sentences for scannability
- Call-to-action: End with a strong, professional CTA

HASHTAG STRATEGY:
- Include 3-5 highly relevant industry or trending hashtags
- Place hashtags at the end of the post
- Mix specific industry terms with broader trending topics
- Example format: #IndustryTerm #TrendingTopic #BrandRelevant

WHAT TO AVOID:
- Overly casual language or slang
- Aggressive sales pitch
- Generic buzzwords without substance
- Emoji overuse (1-2 strategic emojis max)

Additional context: {context}

Format: Plain text with natural paragraph breaks. Do not use markdown formatting.
"#;

const TWITTER_TEMPLATE: &str = r#"
Create an engaging Twitter/X post about: {topic}

BRAND VOICE & TONE:
Your writing must embody this brand voice: {brand_voice}
Primary tone: Conversational, punchy, authentic
Approach: Quick-hitting, attention-grabbing, shareable

CONTENT REQUIREMENTS:
- STRICT CHARACTER LIMIT: Maximum 280 characters (including hashtags and spaces)
- Hook: Lead with your strongest point in the first 10 words
- Value: Deliver immediate value or spark curiosity
- Urgency: Create FOMO or drive engagement when appropriate
- Emojis: Use 1-2 relevant emojis strategically (optional but effective)

HASHTAG STRATEGY:
- Use ONLY 1-2 highly targeted hashtags
- Choose trending or niche-specific tags
- Place at the end or naturally within the text
- Count hashtags in your 280-character limit

TWITTER-SPECIFIC TACTICS:
- Front-load the most important information
- Use conversational language that feels authentic
- End with a question to drive replies (optional)
- Make it retweetable - think shareability

WHAT TO AVOID:
- Thread-style multi-tweets (single tweet only)
- Hashtag stuffing (#no #more #than #two)
- Overly promotional language
- Going over 280 characters (this will cause rejection)

Additional context: {context}

Format: Single paragraph. Count characters carefully. Must be under 280 total.
"#;

const FACEBOOK_TEMPLATE: &str = r#"
Create a community-focused Facebook post about: {topic}

BRAND VOICE & TONE:
Your writing must embody this brand voice: {brand_voice}
Primary tone: Friendly, conversational, relatable
Approach: Community-building, authentic storytelling, engaging

CONTENT REQUIREMENTS:
- Length: 100-200 words (optimal for Facebook feed)
- Opening: Start with a relatable statement or question
- Engagement: Explicitly encourage comments, shares, or reactions
- Storytelling: Use conversational, authentic language
- Call-to-action: Include clear engagement prompt (ask questions, run polls, etc.)
- Formatting: Short paragraphs with natural breaks

HASHTAG STRATEGY:
- Include 2-4 relevant hashtags
- Place at the end of the post
- Mix branded hashtags with popular topics
- Less formal than LinkedIn, more playful options acceptable

FACEBOOK-SPECIFIC TACTICS:
- Ask questions to drive comments
- Use "Tag a friend who..." style prompts
- Reference shared experiences or emotions
- Slightly more casual than LinkedIn (but still professional)
- Emojis are welcome (2-3 relevant ones)

WHAT TO AVOID:
- Corporate jargon
- Overly formal language
- Link-heavy posts (algorithm deprioritizes)
- Clickbait tactics

Additional context: {context}

Format: Conversational paragraphs with natural breaks. Write like you're talking to friends.
"#;

const NEXTDOOR_TEMPLATE: &str = r#"
Create a neighborhood-friendly Nextdoor post about: {topic}

BRAND VOICE & TONE:
Your writing must embody this brand voice: {brand_voice}
Primary tone: Neighborly, helpful, locally-focused
Approach: Community service, genuine helpfulness, local value

CONTENT REQUIREMENTS:
- Length: 100-250 words
- Opening: Greet neighbors warmly (e.g., "Hi neighbors!")
- Local focus: Explicitly connect to neighborhood benefit or local community
- Helpfulness: Frame as service or valuable information for locals
- Authenticity: Be genuinely neighborly, not sales-focused
- Call-to-action: Gentle invitation (not aggressive sales pitch)

HASHTAG STRATEGY:
- Minimal hashtags: 1-2 maximum
- Use local area or community-focused tags
- Example: #YourNeighborhood #CommunityFirst
- Hashtags are less important on Nextdoor than other platforms

NEXTDOOR-SPECIFIC TACTICS:
- Emphasize how this helps the local community
- Reference neighborhood-specific benefits
- Use warm, personal language
- Position as a neighbor helping neighbors
- Avoid corporate speak entirely
- Think "local business owner" not "national brand"

WHAT TO AVOID:
- Aggressive sales language or pressure tactics
- Corporate/marketing speak
- Anything not relevant to local community
- Heavy promotion without genuine local value
- Overly promotional tone

Additional context: {context}

Format: Friendly, approachable paragraphs. Write like a helpful neighbor, not a marketer.
"#;

pub(crate) const IMAGE_PROMPT_TEMPLATE: &str = r#"
Based on this social media post, create a detailed image generation prompt.

Post content:
{content}

Original topic: {topic}

Create a prompt for an image that:
- Visually represents the key concept
- Is appropriate for {platform}
- Is eye-catching and professional
- Avoids text/words in the image
- Uses vibrant, engaging colors

Return only the image generation prompt, nothing else.
"#;

pub(crate) const SHORTEN_TEMPLATE: &str = r#"
The following content is too long for {platform} (limit: {char_limit} characters).

Original content:
{original_content}

Please rewrite this to be under {char_limit} characters while maintaining the key message,
tone ({brand_voice}), and call-to-action. Keep it engaging and complete.
"#;

pub(crate) const HASHTAG_TEMPLATE: &str = r#"
Generate {max_hashtags} highly relevant and effective hashtags for this {platform} post.

Post content:
{content}

Original topic: {topic}

Requirements:
- Generate EXACTLY {max_hashtags} hashtags
- Make them relevant to the content and {platform} audience
- Preferred categories: {preferred}
- Avoid: {avoid}
- Mix of specific and broader hashtags
- Use proper capitalization (e.g., #SocialMedia not #socialmedia)
- No spaces in hashtags
- Make them searchable and trending-friendly

Return ONLY the hashtags as a comma-separated list, without the # symbol.
Example format: Innovation, TechTrends, BusinessGrowth
"#;

pub(crate) const BRAND_ALIGNMENT_TEMPLATE: &str = r#"
Review this social media post for brand alignment.

Post: {content}

Brand Guidelines:
{brand_guidelines}

Evaluate if the post:
1. Matches the brand voice
2. Reflects brand values
3. Avoids prohibited language/tone
4. Would resonate with target audience

Return ONLY a JSON object:
{
  "passed": true/false,
  "score": 0.0-1.0,
  "alignment_notes": "brief notes",
  "recommendation": "brief recommendation"
}
"#;

pub(crate) const APPROPRIATENESS_TEMPLATE: &str = r#"
Review this social media post for content appropriateness.

Post: {content}

Check for:
1. Offensive language or slurs
2. Controversial political statements
3. Misinformation or unverified claims
4. Brand safety issues
5. Potential legal issues

Return ONLY a JSON object with this structure:
{
  "passed": true/false,
  "score": 0.0-1.0,
  "issues": ["list of any issues found"],
  "recommendation": "brief recommendation"
}
"#;

pub(crate) const GRAMMAR_TEMPLATE: &str = r#"
Review this text for grammar and spelling errors.

Text: {content}

Return ONLY a JSON object:
{
  "passed": true/false,
  "score": 0.0-1.0,
  "errors": ["list of errors found"],
  "severity": "none/minor/major"
}
"#;

pub(crate) const ENGAGEMENT_TEMPLATE: &str = r#"
Predict the engagement potential of this {platform} post.

Post: {content}

Consider:
1. Hook/opening strength
2. Value provided to reader
3. Call-to-action clarity
4. Emotional appeal
5. Relevance to platform audience

Return ONLY a JSON object:
{
  "score": 0.0-1.0,
  "prediction": "low/medium/high",
  "strengths": ["list strengths"],
  "improvements": ["suggested improvements"]
}
"#;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("Valid placeholder regex"));

/// Substitute `{name}` placeholders in one pass.
///
/// Values are inserted literally; placeholder-like text inside a value is
/// never expanded. Braces that do not name a variable are left alone.
pub(crate) fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            vars.iter()
                .find(|(var, _)| *var == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Per-platform drafting templates.
///
/// # Examples
///
/// ```
/// use postwright_generation::PromptFormatter;
///
/// let formatter = PromptFormatter::standard();
/// let prompt = formatter
///     .format("twitter", "Launch day", None, "playful")
///     .unwrap();
///
/// assert!(prompt.contains("Launch day"));
/// assert!(prompt.contains("Additional context: None"));
/// assert!(formatter.format("myspace", "Launch day", None, "playful").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PromptFormatter {
    templates: BTreeMap<String, String>,
}

impl PromptFormatter {
    /// Templates for linkedin, twitter, facebook and nextdoor.
    pub fn standard() -> Self {
        let templates = [
            ("linkedin", LINKEDIN_TEMPLATE),
            ("twitter", TWITTER_TEMPLATE),
            ("facebook", FACEBOOK_TEMPLATE),
            ("nextdoor", NEXTDOOR_TEMPLATE),
        ]
        .into_iter()
        .map(|(platform, template)| (platform.to_string(), template.to_string()))
        .collect();
        Self { templates }
    }

    /// Register a template for an additional platform.
    ///
    /// The template may use `{topic}`, `{context}` and `{brand_voice}`.
    pub fn with_template(mut self, platform: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(platform.into(), template.into());
        self
    }

    /// Whether a template is registered for the platform.
    pub fn has_template(&self, platform: &str) -> bool {
        self.templates.contains_key(platform)
    }

    /// Fill the platform's template.
    ///
    /// An absent or blank context is written as `None`.
    ///
    /// # Errors
    ///
    /// `TemplateNotFound` when the platform has no template.
    pub fn format(
        &self,
        platform: &str,
        topic: &str,
        context: Option<&str>,
        brand_voice: &str,
    ) -> Result<String, GenerationError> {
        let template = self.templates.get(platform).ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::TemplateNotFound(platform.to_string()))
        })?;

        let context = context
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("None");

        Ok(fill(
            template,
            &[
                ("topic", topic),
                ("context", context),
                ("brand_voice", brand_voice),
            ],
        ))
    }
}

impl Default for PromptFormatter {
    fn default() -> Self {
        Self::standard()
    }
}

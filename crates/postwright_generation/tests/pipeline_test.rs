//! End-to-end tests of the generation pipeline against scripted models.

mod test_utils;

use postwright_core::{BrandGuidelines, VoiceGuidelines, GenerationRequest};
use postwright_error::{GenerationErrorKind, ModelsErrorKind, PostwrightErrorKind};
use postwright_generation::{BrandVoice, SocialMediaGenerator};
use std::sync::Arc;
use test_utils::{
    MockDriver, MockResponse, Stage, generator, pipeline_text, png, stage, system_role,
    test_config, user_prompt,
};

fn image_size(path: &std::path::Path) -> (u32, u32) {
    let img = image::ImageReader::open(path)
        .expect("Open image")
        .decode()
        .expect("Decode image");
    (img.width(), img.height())
}

#[tokio::test]
async fn test_twitter_post_fits_limit_with_hashtags() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("x".repeat(350), "AI, Productivity, Launch, Tech");
    let image = MockDriver::always(MockResponse::Image(png(64, 64)));
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new("New AI feature", "twitter"))
        .await
        .unwrap();

    assert!(post.content().chars().count() <= 280);
    assert!(post.hashtags().len() <= 2);
    assert_eq!(*post.metadata().char_count(), post.content().chars().count());
    assert_eq!(*post.metadata().char_limit(), 280);
}

#[tokio::test]
async fn test_overlong_drafts_fit_every_platform() {
    let dir = tempfile::tempdir().unwrap();
    let registry = test_config(dir.path()).platforms().clone();
    let limit_of = |platform: &str| *registry.get(platform).unwrap().char_limit();

    // Each stage answers ten times the longest limit.
    let long = "word ".repeat(13_000);
    let text = pipeline_text(long, "One, Two, Three");
    let image = MockDriver::always(MockResponse::Image(png(32, 32)));
    let generator = generator(&text, &image, dir.path());

    let posts = generator
        .generate_all_platforms(&GenerationRequest::new("Launch", "ignored"))
        .await;

    assert_eq!(posts.len(), 4);
    for (platform, result) in &posts {
        let post = result.as_ref().unwrap();
        assert_eq!(post.platform(), platform);
        assert!(
            post.content().chars().count() <= limit_of(platform),
            "{} post exceeds its limit",
            platform
        );
    }
}

#[tokio::test]
async fn test_shortening_request_sent_once_for_overlong_draft() {
    let dir = tempfile::tempdir().unwrap();
    let text = MockDriver::routed(|req, _| match stage(req) {
        Stage::Draft => MockResponse::Text("y".repeat(400)),
        Stage::Shorten => MockResponse::Text("Short and sweet.".to_string()),
        Stage::Hashtags => MockResponse::Text("Tips".to_string()),
        _ => MockResponse::Text("A calm scene".to_string()),
    });
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new("Tips", "twitter"))
        .await
        .unwrap();

    assert_eq!(post.content(), "Short and sweet.\n\n#Tips");
    let shorten_calls = text
        .requests()
        .iter()
        .filter(|r| stage(r) == Stage::Shorten)
        .count();
    assert_eq!(shorten_calls, 1);
}

#[tokio::test]
async fn test_hashtags_capped_at_platform_maximum() {
    let dir = tempfile::tempdir().unwrap();
    let reply = (1..=15)
        .map(|n| format!("#Tag{}", n))
        .collect::<Vec<_>>()
        .join(", ");
    let text = pipeline_text("A thoughtful update.", reply);
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new("Culture", "linkedin"))
        .await
        .unwrap();

    assert_eq!(post.hashtags().len(), 5);
    assert_eq!(post.hashtags()[0], "Tag1");
    assert!(post.hashtags().iter().all(|tag| !tag.starts_with('#')));
    assert!(post.content().ends_with("#Tag1 #Tag2 #Tag3 #Tag4 #Tag5"));
}

#[tokio::test]
async fn test_empty_hashtag_reply_falls_back_to_topic_keywords() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("A thoughtful update.", " # , ,#");
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new(
            "Launching the collaboration suite",
            "linkedin",
        ))
        .await
        .unwrap();

    assert_eq!(post.hashtags(), &["Launching", "Collaboration", "Suite"]);
    assert!(post.content().ends_with("#Launching #Collaboration #Suite"));
}

#[tokio::test]
async fn test_hashtags_disabled_skips_hashtag_model_call() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("Plain update with no tags.", "Should, Not, Appear");
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let request = GenerationRequest::new("Update", "nextdoor").with_include_hashtags(false);
    let post = generator.generate_post(&request).await.unwrap();

    assert!(post.hashtags().is_empty());
    assert!(!post.content().contains('#'));
    assert!(text.requests().iter().all(|r| stage(r) != Stage::Hashtags));
}

#[tokio::test]
async fn test_unsupported_platform_makes_no_model_calls() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("unused", "unused");
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let err = generator
        .generate_post(&GenerationRequest::new("Launch", "myspace"))
        .await
        .unwrap_err();

    match err.kind() {
        PostwrightErrorKind::Generation(e) => {
            assert_eq!(
                e.kind,
                GenerationErrorKind::UnsupportedPlatform("myspace".to_string())
            );
        }
        other => panic!("Expected UnsupportedPlatform, got {}", other),
    }
    assert_eq!(text.call_count(), 0);
    assert_eq!(image.call_count(), 0);
}

#[tokio::test]
async fn test_image_failure_writes_placeholder_at_platform_size() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("Neighborhood cleanup this Saturday!", "Community");
    let image = MockDriver::failing();
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new("Cleanup", "nextdoor"))
        .await
        .unwrap();

    let path = post.image_path();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("nextdoor_"));
    assert!(name.ends_with("_placeholder.png"));
    assert_eq!(image_size(path), (1200, 900));

    let sidecar = path.with_file_name(name.replace(".png", "_prompt.txt"));
    let notes = std::fs::read_to_string(sidecar).unwrap();
    assert!(notes.contains("Platform: nextdoor"));
    assert!(notes.contains("Dimensions: 1200x900"));
    assert!(notes.contains(post.image_prompt().as_str()));

    // max_retries = 3
    assert_eq!(image.call_count(), 4);
}

#[tokio::test]
async fn test_image_without_data_falls_back_to_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("Hello!", "Hi");
    let image = MockDriver::always(MockResponse::Text("I cannot draw that".to_string()));
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new("Hello", "twitter"))
        .await
        .unwrap();

    assert!(post.image_path().to_string_lossy().contains("_placeholder"));
    assert_eq!(image_size(post.image_path()), (1200, 675));
}

#[tokio::test]
async fn test_generated_image_resized_to_platform_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("Big news!", "News");
    let image = MockDriver::always(MockResponse::Image(png(300, 200)));
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new("News", "linkedin"))
        .await
        .unwrap();

    let path = post.image_path();
    assert!(path.starts_with(dir.path()));
    assert!(!path.to_string_lossy().contains("placeholder"));
    assert_eq!(image_size(path), (1200, 627));

    let prompt = user_prompt(&image.requests()[0]).to_string();
    assert!(prompt.contains(post.image_prompt().as_str()));
    assert!(prompt.contains("1200x627"));
}

#[tokio::test]
async fn test_one_platform_failure_does_not_stop_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let text = MockDriver::routed(|req, _| match stage(req) {
        Stage::Draft if user_prompt(req).contains("Facebook") => {
            MockResponse::Fail(ModelsErrorKind::Http {
                status_code: 500,
                message: "Internal error".to_string(),
            })
        }
        Stage::Draft | Stage::Shorten => MockResponse::Text("Come join us.".to_string()),
        Stage::Hashtags => MockResponse::Text("Events".to_string()),
        _ => MockResponse::Text("A park at sunset".to_string()),
    });
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let posts = generator
        .generate_all_platforms(&GenerationRequest::new("Park day", "twitter"))
        .await;

    assert_eq!(
        posts.keys().cloned().collect::<Vec<_>>(),
        vec!["facebook", "linkedin", "nextdoor", "twitter"]
    );
    assert!(posts["facebook"].is_err());
    assert!(posts["linkedin"].is_ok());
    assert!(posts["nextdoor"].is_ok());
    assert!(posts["twitter"].is_ok());
}

#[tokio::test]
async fn test_transient_text_failures_are_retried() {
    let dir = tempfile::tempdir().unwrap();
    let text = MockDriver::routed(|req, call| match stage(req) {
        Stage::Draft if call < 2 => MockResponse::Fail(ModelsErrorKind::Http {
            status_code: 429,
            message: "Rate limited".to_string(),
        }),
        Stage::Draft | Stage::Shorten => MockResponse::Text("Third time lucky.".to_string()),
        Stage::Hashtags => MockResponse::Text("Luck".to_string()),
        _ => MockResponse::Text("A horseshoe".to_string()),
    });
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let post = generator
        .generate_post(&GenerationRequest::new("Luck", "twitter"))
        .await
        .unwrap();

    assert!(post.content().starts_with("Third time lucky."));
    let drafts = text
        .requests()
        .iter()
        .filter(|r| stage(r) == Stage::Draft)
        .count();
    assert_eq!(drafts, 3);
}

#[tokio::test]
async fn test_exhausted_text_retries_surface_last_error() {
    let dir = tempfile::tempdir().unwrap();
    let text = MockDriver::always(MockResponse::Fail(ModelsErrorKind::Http {
        status_code: 503,
        message: "Overloaded".to_string(),
    }));
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let err = generator
        .generate_post(&GenerationRequest::new("Launch", "twitter"))
        .await
        .unwrap_err();

    match err.kind() {
        PostwrightErrorKind::Models(e) => {
            assert_eq!(
                e.kind,
                ModelsErrorKind::Http {
                    status_code: 503,
                    message: "Overloaded".to_string()
                }
            );
        }
        other => panic!("Expected a models error, got {}", other),
    }
    assert_eq!(text.call_count(), 4);
    assert_eq!(image.call_count(), 0);
}

#[tokio::test]
async fn test_empty_text_response_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let text = MockDriver::always(MockResponse::Empty);
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let err = generator
        .generate_post(&GenerationRequest::new("Launch", "linkedin"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        PostwrightErrorKind::Models(e) if e.kind == ModelsErrorKind::EmptyResponse
    ));
}

#[tokio::test]
async fn test_explicit_brand_voice_used_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("Yo!", "Hey");
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let request = GenerationRequest::new("Greetings", "twitter").with_brand_voice("cheeky and bold");
    let post = generator.generate_post(&request).await.unwrap();

    assert_eq!(post.metadata().brand_voice_used(), "cheeky and bold");
    let draft = text
        .requests()
        .into_iter()
        .find(|r| stage(r) == Stage::Draft)
        .unwrap();
    assert!(user_prompt(&draft).contains("cheeky and bold"));
}

#[tokio::test]
async fn test_brand_voice_derived_from_guidelines() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("Warm wishes.", "Care");
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));

    let guidelines = BrandGuidelines {
        brand_voice: VoiceGuidelines {
            primary: Some("warm and optimistic".to_string()),
            tone_keywords: vec!["helpful".to_string()],
        },
        ..BrandGuidelines::default()
    };
    let generator = SocialMediaGenerator::new(
        &test_config(dir.path()),
        BrandVoice::from_guidelines(guidelines),
        Arc::new(text.clone()),
        Arc::new(image.clone()),
    );

    let post = generator
        .generate_post(&GenerationRequest::new("Care", "facebook"))
        .await
        .unwrap();

    assert_eq!(
        post.metadata().brand_voice_used(),
        "warm and optimistic, emphasizing helpful"
    );
}

#[tokio::test]
async fn test_context_reaches_the_draft_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("Focus time!", "Focus");
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let request =
        GenerationRequest::new("New AI feature", "linkedin").with_context("Focus on productivity");
    generator.generate_post(&request).await.unwrap();

    let draft = text
        .requests()
        .into_iter()
        .find(|r| stage(r) == Stage::Draft)
        .unwrap();
    assert!(system_role(&draft).contains("content creator"));
    assert!(user_prompt(&draft).contains("Focus on productivity"));
    assert!(user_prompt(&draft).contains("New AI feature"));
}

#[tokio::test]
async fn test_regenerate_image_without_topic_uses_content_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let text = pipeline_text("unused", "unused");
    let image = MockDriver::always(MockResponse::Image(png(16, 16)));
    let generator = generator(&text, &image, dir.path());

    let content = format!("{}{}", "a".repeat(100), "ZZZ-after-the-cut");
    let regenerated = generator
        .regenerate_image(&content, "facebook", None)
        .await
        .unwrap();

    assert_eq!(regenerated.image_prompt, "A bright, modern workspace");
    assert_eq!(image_size(&regenerated.image_path), (1200, 630));

    let requests = text.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(stage(&requests[0]), Stage::ImagePrompt);
    // The content appears in full, the topic only as its first 100 chars.
    assert_eq!(user_prompt(&requests[0]).matches("ZZZ-after-the-cut").count(), 1);
}

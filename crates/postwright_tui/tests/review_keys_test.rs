//! Key handling against a review session, without a terminal.

use async_trait::async_trait;
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use postwright_config::PostwrightConfig;
use postwright_core::{
    FeedbackType, GenerateRequest, GenerateResponse, GeneratedPost, GenerationRequest,
    ImageDimensions, PostMetadata, PostStatus,
};
use postwright_error::{ModelsError, ModelsErrorKind, PostwrightResult};
use postwright_generation::{BrandVoice, ReviewSession, SocialMediaGenerator};
use postwright_interface::{InMemoryPostRepository, PostwrightDriver};
use postwright_retry::RetryPolicy;
use postwright_tui::{App, AppMode, EditField, handle_key};
use std::collections::BTreeMap;
use std::sync::Arc;

struct Offline;

#[async_trait]
impl PostwrightDriver for Offline {
    async fn generate(&self, _req: &GenerateRequest) -> PostwrightResult<GenerateResponse> {
        Err(ModelsError::new(ModelsErrorKind::ApiRequest("offline".to_string())).into())
    }

    fn provider_name(&self) -> &'static str {
        "offline"
    }

    fn model_name(&self) -> &str {
        "none"
    }
}

fn post(platform: &str, content: &str) -> GeneratedPost {
    let metadata = PostMetadata::builder()
        .char_count(content.chars().count())
        .char_limit(280usize)
        .image_dimensions(ImageDimensions::new(1200, 675))
        .brand_voice_used("friendly")
        .generated_at(Utc::now())
        .build()
        .unwrap();
    GeneratedPost::builder()
        .content(content)
        .hashtags(vec!["Launch".to_string()])
        .image_path(format!("generated_images/{}.png", platform))
        .image_prompt("A rocket")
        .platform(platform)
        .metadata(metadata)
        .build()
        .unwrap()
}

fn session() -> ReviewSession<InMemoryPostRepository> {
    let fast = RetryPolicy::new(1, 0.001, 2.0).unwrap();
    let config = PostwrightConfig::bundled()
        .unwrap()
        .with_image_dir(std::env::temp_dir().join("postwright_tui_tests"))
        .with_retry(fast.clone(), fast);
    let generator = SocialMediaGenerator::new(
        &config,
        BrandVoice::default(),
        Arc::new(Offline),
        Arc::new(Offline),
    );

    let mut results = BTreeMap::new();
    results.insert("linkedin".to_string(), Ok(post("linkedin", "Hello LinkedIn")));
    results.insert("twitter".to_string(), Ok(post("twitter", "Hello Twitter")));

    ReviewSession::new(
        Arc::new(generator),
        InMemoryPostRepository::new(),
        GenerationRequest::new("Launch", "twitter"),
        results,
    )
}

fn press(app: &mut App, session: &mut ReviewSession<InMemoryPostRepository>, code: KeyCode) {
    handle_key(app, session, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, session: &mut ReviewSession<InMemoryPostRepository>, text: &str) {
    for c in text.chars() {
        press(app, session, KeyCode::Char(c));
    }
}

#[test]
fn test_approve_key_saves_selected_post() {
    let mut session = session();
    let mut app = App::new(session.topic(), session.platforms());

    press(&mut app, &mut session, KeyCode::Down);
    press(&mut app, &mut session, KeyCode::Char('a'));

    assert_eq!(session.status("twitter"), PostStatus::Approved);
    assert_eq!(session.status("linkedin"), PostStatus::Draft);
    assert!(app.status_message.starts_with("Approved twitter"));
}

#[test]
fn test_edit_keys_update_post_then_approve_records_edit() {
    let mut session = session();
    let mut app = App::new(session.topic(), session.platforms());

    press(&mut app, &mut session, KeyCode::Char('e'));
    assert_eq!(app.mode, AppMode::Edit);
    type_text(&mut app, &mut session, "!");
    press(&mut app, &mut session, KeyCode::Tab);
    assert_eq!(
        app.edit_buffer.as_ref().unwrap().focused_field,
        EditField::Hashtags
    );
    type_text(&mut app, &mut session, " #Growth");
    handle_key(
        &mut app,
        &mut session,
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
    );

    assert_eq!(app.mode, AppMode::List);
    let edited = session.post("linkedin").unwrap();
    assert_eq!(edited.content(), "Hello LinkedIn!");
    assert_eq!(
        edited.hashtags(),
        &vec!["Launch".to_string(), "Growth".to_string()]
    );

    press(&mut app, &mut session, KeyCode::Char('a'));
    let feedback: Vec<_> = session.repository().feedback().cloned().collect();
    assert_eq!(feedback[0].feedback_type, FeedbackType::Edited);
}

#[test]
fn test_reject_keys_save_reason() {
    let mut session = session();
    let mut app = App::new(session.topic(), session.platforms());

    press(&mut app, &mut session, KeyCode::Char('r'));
    assert_eq!(app.mode, AppMode::Reject);
    type_text(&mut app, &mut session, "Too salesy");
    press(&mut app, &mut session, KeyCode::Enter);

    assert_eq!(app.mode, AppMode::List);
    assert_eq!(session.status("linkedin"), PostStatus::Rejected);
    let feedback: Vec<_> = session.repository().feedback().cloned().collect();
    assert_eq!(feedback[0].rejection_reason.as_deref(), Some("Too salesy"));
}

#[test]
fn test_escape_cancels_edit_without_changes() {
    let mut session = session();
    let mut app = App::new(session.topic(), session.platforms());

    press(&mut app, &mut session, KeyCode::Char('e'));
    type_text(&mut app, &mut session, "junk");
    press(&mut app, &mut session, KeyCode::Esc);

    assert_eq!(app.mode, AppMode::List);
    assert_eq!(session.post("linkedin").unwrap().content(), "Hello LinkedIn");
    assert!(!session.is_edited("linkedin"));
}

#[test]
fn test_history_lists_saved_posts() {
    let mut session = session();
    let mut app = App::new(session.topic(), session.platforms());

    press(&mut app, &mut session, KeyCode::Char('a'));
    press(&mut app, &mut session, KeyCode::Char('h'));

    assert_eq!(app.mode, AppMode::History);
    assert_eq!(app.history.len(), 1);
    assert_eq!(app.history[0].platform, "linkedin");

    press(&mut app, &mut session, KeyCode::Esc);
    assert_eq!(app.mode, AppMode::List);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failed_regeneration_reported_in_status_bar() {
    let mut session = session();
    let mut app = App::new(session.topic(), session.platforms());

    press(&mut app, &mut session, KeyCode::Char('g'));

    assert!(app.status_message.starts_with("Error:"));
    assert_eq!(session.post("linkedin").unwrap().content(), "Hello LinkedIn");
}

#[test]
fn test_quit_keys() {
    let mut session = session();
    let mut app = App::new(session.topic(), session.platforms());

    press(&mut app, &mut session, KeyCode::Enter);
    assert_eq!(app.mode, AppMode::Detail);
    press(&mut app, &mut session, KeyCode::Esc);
    assert_eq!(app.mode, AppMode::List);
    assert!(!app.should_quit);
    press(&mut app, &mut session, KeyCode::Char('q'));
    assert!(app.should_quit);
}

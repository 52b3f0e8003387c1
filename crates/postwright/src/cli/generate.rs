//! Generation command handler.

use super::commands::{GenerateArgs, GenerationArgs, OutputFormat};
use postwright::{
    GeneratedPost, JsonError, NewPost, PostRepository, PostwrightConfig, PostwrightResult,
    QualityChecker, QualityReport, SocialMediaGenerator, format_hashtags,
};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Per-platform results of one run.
pub type RunResults = BTreeMap<String, PostwrightResult<GeneratedPost>>;

/// Generate, print, and optionally check and save posts.
pub async fn handle_generate(args: GenerateArgs, config: &PostwrightConfig) -> PostwrightResult<()> {
    if args.save && cfg!(not(feature = "database")) {
        eprintln!("Error: Database feature not enabled. Rebuild with --features database");
        std::process::exit(1);
    }

    let generator = SocialMediaGenerator::from_config(config)?;
    let results = generate(&generator, &args.generation).await;

    let mut reports = BTreeMap::new();
    if args.quality {
        let checker = QualityChecker::new(generator.text_driver(), config.retry().text().clone());
        for (platform, post) in succeeded(&results) {
            match checker
                .run_all(post.content(), platform, generator.brand_voice())
                .await
            {
                Ok(report) => {
                    reports.insert(platform.clone(), report);
                }
                Err(e) => warn!(platform = %platform, error = %e, "Quality checks failed"),
            }
        }
    }

    match args.format {
        OutputFormat::Human => print_human(&results, &reports),
        OutputFormat::Json => print_json(&results, &reports)?,
    }

    if args.save {
        save_drafts(&args.generation.topic, &results, &reports)?;
    }

    Ok(())
}

/// Run the pipeline for the requested platform, or for all of them.
pub async fn generate(generator: &SocialMediaGenerator, args: &GenerationArgs) -> RunResults {
    if args.all_platforms() {
        return generator.generate_all_platforms(&args.request("")).await;
    }
    let platform = args.platform.to_lowercase();
    let result = generator.generate_post(&args.request(&platform)).await;
    BTreeMap::from([(platform, result)])
}

fn succeeded(results: &RunResults) -> impl Iterator<Item = (&String, &GeneratedPost)> {
    results
        .iter()
        .filter_map(|(platform, result)| result.as_ref().ok().map(|post| (platform, post)))
}

fn print_human(results: &RunResults, reports: &BTreeMap<String, QualityReport>) {
    for (platform, result) in results {
        println!("\n{:=<60}", "");
        println!("{}", platform.to_uppercase());
        println!("{:=<60}", "");

        match result {
            Ok(post) => {
                println!("\nContent:\n{}", post.content());
                if !post.hashtags().is_empty() {
                    println!("\nHashtags: {}", format_hashtags(post.hashtags()));
                }
                println!("\nImage: {}", post.image_path().display());
                println!(
                    "Character count: {}/{}",
                    post.char_count(),
                    post.metadata().char_limit()
                );
                if let Some(report) = reports.get(platform) {
                    print_quality(report);
                }
            }
            Err(e) => println!("\nError: {}", e),
        }
    }

    let ok = results.values().filter(|r| r.is_ok()).count();
    println!("\nSuccessfully generated: {}/{} platforms", ok, results.len());
}

fn print_quality(report: &QualityReport) {
    let verdict = if report.overall_passed() {
        "passed"
    } else {
        "needs attention"
    };
    println!("\nQuality checks: {}", verdict);
    println!(
        "  Brand alignment: {:.2}{}",
        report.brand_alignment.score,
        note(&report.brand_alignment.recommendation)
    );
    println!(
        "  Appropriateness: {:.2}{}",
        report.appropriateness.score,
        note(&report.appropriateness.issues.join("; "))
    );
    println!(
        "  Grammar: {:.2}{}",
        report.grammar.score,
        note(&report.grammar.errors.join("; "))
    );
    println!(
        "  Engagement: {:.2} ({})",
        report.engagement.score, report.engagement.prediction
    );
}

fn note(text: &str) -> String {
    if text.trim().is_empty() {
        String::new()
    } else {
        format!(" - {}", text.trim())
    }
}

fn print_json(
    results: &RunResults,
    reports: &BTreeMap<String, QualityReport>,
) -> PostwrightResult<()> {
    let platforms: serde_json::Map<String, serde_json::Value> = results
        .iter()
        .map(|(platform, result)| {
            let value = match result {
                Ok(post) => json!({ "post": post, "quality": reports.get(platform) }),
                Err(e) => json!({ "error": e.to_string() }),
            };
            (platform.clone(), value)
        })
        .collect();

    let output = json!({
        "platforms": platforms,
        "succeeded": results.values().filter(|r| r.is_ok()).count(),
        "total": results.len(),
    });
    let json = serde_json::to_string_pretty(&output).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

#[cfg(feature = "database")]
fn save_drafts(
    topic: &str,
    results: &RunResults,
    reports: &BTreeMap<String, QualityReport>,
) -> PostwrightResult<()> {
    use postwright::{PostgresPostRepository, establish_connection};

    let mut conn = establish_connection()?;
    let mut repo = PostgresPostRepository::new(&mut conn);
    persist(&mut repo, topic, results, reports)?;
    Ok(())
}

#[cfg(not(feature = "database"))]
fn save_drafts(
    _topic: &str,
    _results: &RunResults,
    _reports: &BTreeMap<String, QualityReport>,
) -> PostwrightResult<()> {
    eprintln!("Error: Database feature not enabled. Rebuild with --features database");
    std::process::exit(1);
}

/// Save every generated post as a draft, with its quality checks.
///
/// Returns the new post IDs in platform order.
#[cfg_attr(not(feature = "database"), allow(dead_code))]
pub fn persist<R: PostRepository>(
    repo: &mut R,
    topic: &str,
    results: &RunResults,
    reports: &BTreeMap<String, QualityReport>,
) -> PostwrightResult<Vec<i32>> {
    let mut ids = Vec::new();
    for (platform, post) in succeeded(results) {
        let draft = NewPost::new(topic, platform.as_str(), post.content().clone())
            .with_image_url(post.image_path().display().to_string())
            .with_image_prompt(post.image_prompt().clone());
        let record = repo.save_post(draft)?;

        if let Some(report) = reports.get(platform) {
            for check in report.to_records(record.id) {
                repo.save_quality_check(check)?;
            }
        }

        info!(platform = %platform, post_id = record.id, "Saved draft");
        ids.push(record.id);
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use postwright::{
        AppropriatenessResult, BrandAlignmentResult, EngagementResult, GenerationError,
        GenerationErrorKind, GrammarResult, ImageDimensions, InMemoryPostRepository, PostMetadata,
        PostStatus,
    };

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
            .image_prompt("A bright office")
            .platform(platform)
            .metadata(metadata)
            .build()
            .unwrap()
    }

    fn report() -> QualityReport {
        QualityReport {
            brand_alignment: BrandAlignmentResult {
                passed: true,
                score: 0.9,
                alignment_notes: String::new(),
                recommendation: String::new(),
            },
            appropriateness: AppropriatenessResult {
                passed: true,
                score: 1.0,
                issues: Vec::new(),
                recommendation: String::new(),
            },
            grammar: GrammarResult {
                passed: true,
                score: 0.95,
                errors: Vec::new(),
                severity: "none".to_string(),
            },
            engagement: EngagementResult {
                score: 0.7,
                prediction: "medium".to_string(),
                strengths: Vec::new(),
                improvements: Vec::new(),
            },
        }
    }

    #[test]
    fn test_persist_saves_successful_posts_only() {
        let mut results = RunResults::new();
        results.insert("linkedin".to_string(), Ok(post("linkedin", "Big news")));
        results.insert(
            "twitter".to_string(),
            Err(GenerationError::new(GenerationErrorKind::UnsupportedPlatform(
                "twitter".to_string(),
            ))
            .into()),
        );
        let reports = BTreeMap::from([("linkedin".to_string(), report())]);

        let mut repo = InMemoryPostRepository::new();
        let ids = persist(&mut repo, "Launch day", &results, &reports).unwrap();

        assert_eq!(ids.len(), 1);
        let saved = repo.get_post(ids[0]).unwrap().unwrap();
        assert_eq!(saved.platform, "linkedin");
        assert_eq!(saved.user_prompt, "Launch day");
        assert_eq!(saved.status, PostStatus::Draft);
        assert_eq!(saved.image_prompt.as_deref(), Some("A bright office"));
        assert_eq!(repo.quality_checks().count(), 4);
    }

    #[test]
    fn test_note_skips_blank_text() {
        assert_eq!(note("  "), "");
        assert_eq!(note("Add a call to action"), " - Add a call to action");
    }
}

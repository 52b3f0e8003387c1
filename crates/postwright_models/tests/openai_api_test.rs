use postwright_core::GenerateRequest;
use postwright_error::{ModelsErrorKind, PostwrightErrorKind};
use postwright_interface::PostwrightDriver;
use postwright_models::OpenAiClient;

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_openai_simple_chat() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let client = OpenAiClient::new()?;

    let request = GenerateRequest::chat(
        "You are a terse assistant.",
        "Say 'test' and nothing else.",
        0.0,
        10,
    );
    let response = client.generate(&request).await?;

    let text = response.text().expect("Text output");
    assert!(text.to_lowercase().contains("test"));
    println!("Response: {}", text);

    Ok(())
}

#[tokio::test]
async fn test_openai_unreachable_endpoint_is_request_error() {
    let client = OpenAiClient::with_api_key("sk-test".to_string(), "gpt-4".to_string())
        .unwrap()
        .with_base_url("http://127.0.0.1:9/v1");

    let err = client
        .generate(&GenerateRequest::prompt("Hello", 0.7))
        .await
        .unwrap_err();

    match err.kind() {
        PostwrightErrorKind::Models(e) => {
            assert!(matches!(e.kind, ModelsErrorKind::ApiRequest(_)));
            assert!(e.kind.is_retryable());
        }
        other => panic!("Expected a models error, got {}", other),
    }
}

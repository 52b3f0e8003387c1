//! Conversion between core request types and chat completions wire types.

use super::dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use postwright_core::{GenerateRequest, GenerateResponse, Output};
use postwright_error::{ModelsError, ModelsErrorKind, ModelsResult};

pub(crate) fn to_chat_request(
    req: &GenerateRequest,
    default_model: &str,
) -> ModelsResult<ChatCompletionRequest> {
    let messages: Vec<ChatMessage> = req
        .messages
        .iter()
        .map(|m| ChatMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        })
        .collect();

    ChatCompletionRequest::builder()
        .model(req.model.clone().unwrap_or_else(|| default_model.to_string()))
        .messages(messages)
        .max_tokens(req.max_tokens)
        .temperature(req.temperature)
        .build()
        .map_err(|e| ModelsError::new(ModelsErrorKind::ApiRequest(e.to_string())))
}

/// First choice's content. No choices is a parse failure, blank content is empty.
pub(crate) fn from_chat_response(resp: ChatCompletionResponse) -> ModelsResult<GenerateResponse> {
    let choice = resp.choices().first().ok_or_else(|| {
        ModelsError::new(ModelsErrorKind::ResponseParsing(
            "response contained no choices".to_string(),
        ))
    })?;

    match choice.message().content() {
        Some(text) if !text.trim().is_empty() => Ok(GenerateResponse {
            outputs: vec![Output::Text(text.trim().to_string())],
        }),
        _ => Err(ModelsError::new(ModelsErrorKind::EmptyResponse)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_default_model_and_roles() {
        let req = GenerateRequest::chat("sys", "hello", 0.7, 150);
        let chat = to_chat_request(&req, "gpt-4").unwrap();
        let json = serde_json::to_value(&chat).unwrap();

        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(json["max_tokens"], 150);
    }

    #[test]
    fn test_request_omits_unset_fields() {
        let req = GenerateRequest::prompt("draw a cat", 0.4);
        let json = serde_json::to_value(to_chat_request(&req, "gpt-4").unwrap()).unwrap();
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_response_trims_first_choice() {
        let resp: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Hi there \n"}}]}"#,
        )
        .unwrap();
        let out = from_chat_response(resp).unwrap();
        assert_eq!(out.text().as_deref(), Some("Hi there"));
    }

    #[test]
    fn test_response_without_choices_is_parse_error() {
        let resp: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = from_chat_response(resp).unwrap_err();
        assert!(matches!(err.kind, ModelsErrorKind::ResponseParsing(_)));
    }

    #[test]
    fn test_null_content_is_empty_response() {
        let resp: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        let err = from_chat_response(resp).unwrap_err();
        assert_eq!(err.kind, ModelsErrorKind::EmptyResponse);
    }
}

use colloquy_llm::{ChatClient, ChatOptions, ChatRequest, ErrorKind, LLMError, OpenAIClient};

fn request() -> ChatRequest {
    ChatRequest::instructed("gpt-4o-mini", "You summarize conversations.", "User: hi")
        .with_options(ChatOptions::new().temperature(0.3))
}

#[tokio::test]
async fn test_successful_completion() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "A short digest."}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
            }"#,
        )
        .create_async()
        .await;

    let client = OpenAIClient::new("test-key").unwrap().with_base_url(server.url());
    let response = client.chat(request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.content.as_deref(), Some("A short digest."));
    assert_eq!(response.usage.map(|u| u.total_tokens), Some(16));
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_rate_limit_is_classified() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error": {"message": "quota exceeded"}}"#)
        .create_async()
        .await;

    let client = OpenAIClient::new("test-key").unwrap().with_base_url(server.url());
    let err = client.chat(request()).await.unwrap_err();

    assert!(matches!(err, LLMError::RateLimited(_)));
    assert_eq!(err.kind(), ErrorKind::RateLimit);
}

#[tokio::test]
async fn test_unauthorized_is_configuration_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body("invalid api key")
        .create_async()
        .await;

    let client = OpenAIClient::new("bad-key").unwrap().with_base_url(server.url());
    let err = client.chat(request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[tokio::test]
async fn test_garbage_body_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = OpenAIClient::new("test-key").unwrap().with_base_url(server.url());
    let err = client.chat(request()).await.unwrap_err();

    assert!(matches!(err, LLMError::InvalidResponse(_)));
}

#[test]
fn test_empty_key_rejected() {
    assert!(matches!(
        OpenAIClient::new("   "),
        Err(LLMError::MissingCredentials(_))
    ));
}

use bankbot::core::error::BankbotError;
use bankbot::providers::mistral::MistralProvider;
use bankbot::providers::{ChatProvider, Message};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> MistralProvider {
    MistralProvider::with_endpoint(
        server.uri(),
        "test-key".to_string(),
        "mistral-large-latest".to_string(),
    )
    .unwrap()
}

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "cmpl-test",
        "object": "chat.completion",
        "model": "mistral-large-latest",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn returns_the_first_candidates_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("  We offer checking and savings accounts.\n")),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let reply = provider
        .complete(&[
            Message::system("You are a banking assistant."),
            Message::user("What banking services do you offer?"),
        ])
        .await
        .unwrap();

    assert_eq!(reply, "We offer checking and savings accounts.");
}

#[tokio::test]
async fn sends_bearer_auth_and_the_assembled_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "mistral-large-latest",
            "messages": [
                { "role": "system", "content": "You are a banking assistant." },
                { "role": "user", "content": "Hi" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Hello!")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    provider
        .complete(&[
            Message::system("You are a banking assistant."),
            Message::user("Hi"),
        ])
        .await
        .unwrap();
}

#[tokio::test]
async fn error_status_becomes_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized" })),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.complete(&[Message::user("Hi")]).await.unwrap_err();

    assert!(matches!(err, BankbotError::Api(_)));
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn undecodable_body_is_a_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.complete(&[Message::user("Hi")]).await.unwrap_err();

    assert!(matches!(err, BankbotError::Serialization(_)));
}

#[tokio::test]
async fn empty_choices_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider.complete(&[Message::user("Hi")]).await.unwrap_err();

    assert!(matches!(err, BankbotError::Api(_)));
}

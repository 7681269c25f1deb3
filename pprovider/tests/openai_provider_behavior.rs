#![cfg(feature = "provider-openai")]

use std::sync::{Arc, Mutex};

use pprovider::adapters::openai::{
    OpenAiAuth, OpenAiChatRequest, OpenAiCompletionRequest, OpenAiFinishReason, OpenAiProvider,
    OpenAiResponse, OpenAiRole, OpenAiTransport,
};
use pprovider::{
    FinishReason, Message, ModelProvider, ModelRequest, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderId, Role, TextRequest,
};
use serde_json::json;

#[derive(Debug, Default)]
struct FakeTransport {
    captured_key: Mutex<Option<String>>,
    captured_chat: Mutex<Option<OpenAiChatRequest>>,
    captured_completion: Mutex<Option<OpenAiCompletionRequest>>,
    fail_with: Option<ProviderError>,
}

impl FakeTransport {
    fn failing(error: ProviderError) -> Self {
        Self {
            fail_with: Some(error),
            ..Self::default()
        }
    }

    fn capture_auth(&self, auth: OpenAiAuth) {
        *self.captured_key.lock().expect("auth lock") = Some(match auth {
            OpenAiAuth::ApiKey(value) => value.expose().to_string(),
        });
    }
}

impl OpenAiTransport for FakeTransport {
    fn chat_completion<'a>(
        &'a self,
        request: OpenAiChatRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            self.capture_auth(auth);
            *self.captured_chat.lock().expect("request lock") = Some(request);
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }

            Ok(OpenAiResponse {
                model: "gpt-3.5-turbo-0125".to_string(),
                content: "hello world".to_string(),
                finish_reason: OpenAiFinishReason::Stop,
                usage: Some(json!({"prompt_tokens": 7, "completion_tokens": 3, "total_tokens": 10})),
            })
        })
    }

    fn text_completion<'a>(
        &'a self,
        request: OpenAiCompletionRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            self.capture_auth(auth);
            *self.captured_completion.lock().expect("request lock") = Some(request);
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }

            Ok(OpenAiResponse {
                model: "gpt-3.5-turbo-instruct".to_string(),
                content: " generated".to_string(),
                finish_reason: OpenAiFinishReason::Length,
                usage: None,
            })
        })
    }

    fn list_models<'a>(
        &'a self,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            self.capture_auth(auth);
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }

            Ok(vec!["gpt-4o".to_string(), "gpt-3.5-turbo".to_string()])
        })
    }
}

#[tokio::test]
async fn complete_maps_openai_response_to_provider_response() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(transport.clone()).with_api_key("sk-live-123");
    let request = ModelRequest::new(
        "gpt-3.5-turbo",
        vec![
            Message::new(Role::System, "be brief"),
            Message::new(Role::User, "hi"),
        ],
    )
    .with_temperature(0.7)
    .with_max_tokens(1000);

    let response = provider.complete(request).await.expect("completion should succeed");
    assert_eq!(response.provider, ProviderId::OpenAi);
    assert_eq!(response.model, "gpt-3.5-turbo-0125");
    assert_eq!(response.content, "hello world");
    assert_eq!(response.finish_reason, FinishReason::EndTurn);
    assert_eq!(response.usage.as_ref().map(|usage| &usage["total_tokens"]), Some(&json!(10)));

    let key = transport
        .captured_key
        .lock()
        .expect("auth lock")
        .clone()
        .expect("auth should be captured");
    assert_eq!(key, "sk-live-123");

    let captured = transport
        .captured_chat
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(captured.model, "gpt-3.5-turbo");
    assert_eq!(captured.messages.len(), 2);
    assert_eq!(captured.messages[0].role, OpenAiRole::System);
    assert_eq!(captured.temperature, Some(0.7));
    assert_eq!(captured.max_tokens, Some(1000));
}

#[tokio::test]
async fn complete_text_forwards_raw_prompt() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(transport.clone()).with_api_key("sk-live-123");
    let request = TextRequest::new("gpt-3.5-turbo-instruct", "Write a haiku")
        .with_temperature(0.3)
        .with_max_tokens(100);

    let response = provider
        .complete_text(request)
        .await
        .expect("completion should succeed");
    assert_eq!(response.content, " generated");
    assert_eq!(response.finish_reason, FinishReason::MaxTokens);
    assert_eq!(response.usage, None);

    let captured = transport
        .captured_completion
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(captured.prompt, "Write a haiku");
    assert_eq!(captured.max_tokens, Some(100));
}

#[tokio::test]
async fn list_models_passes_ids_through() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(transport).with_api_key("sk-live-123");

    let models = provider.list_models().await.expect("listing should succeed");
    assert_eq!(models, vec!["gpt-4o", "gpt-3.5-turbo"]);
}

#[tokio::test]
async fn missing_api_key_returns_auth_error_without_calling_transport() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(transport.clone()).with_api_key("   ");
    assert!(!provider.has_api_key());

    let request = ModelRequest::new("gpt-3.5-turbo", vec![Message::new(Role::User, "hi")]);
    let error = provider.complete(request).await.expect_err("missing key should fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert_eq!(error.message, "no OpenAI API key configured");

    let error = provider.list_models().await.expect_err("missing key should fail");
    assert_eq!(error.kind, ProviderErrorKind::Authentication);
    assert!(transport.captured_key.lock().expect("auth lock").is_none());
}

#[tokio::test]
async fn invalid_request_is_rejected_before_transport() {
    let transport = Arc::new(FakeTransport::default());
    let provider = OpenAiProvider::new(transport.clone()).with_api_key("sk-live-123");

    let error = provider
        .complete(ModelRequest::new("gpt-3.5-turbo", Vec::new()))
        .await
        .expect_err("empty messages should fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
    assert!(transport.captured_chat.lock().expect("request lock").is_none());
}

#[tokio::test]
async fn transport_errors_propagate_unchanged() {
    let transport = Arc::new(FakeTransport::failing(ProviderError::rate_limited(
        "You exceeded your current quota",
    )));
    let provider = OpenAiProvider::new(transport).with_api_key("sk-live-123");

    let error = provider
        .complete_text(TextRequest::new("gpt-3.5-turbo-instruct", "hi"))
        .await
        .expect_err("transport failure should surface");
    assert_eq!(error.kind, ProviderErrorKind::RateLimited);
    assert_eq!(error.message, "You exceeded your current quota");
}

#[test]
fn debug_output_redacts_api_key() {
    let provider = OpenAiProvider::new(Arc::new(FakeTransport::default())).with_api_key("sk-secret");
    let debug = format!("{provider:?}");
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("[REDACTED]"));
}

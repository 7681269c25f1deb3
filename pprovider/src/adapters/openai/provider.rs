//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecretString, TextRequest,
};

use super::auth::resolve_openai_auth;
use super::transport::OpenAiTransport;
use super::types::{OpenAiChatRequest, OpenAiCompletionRequest, OpenAiMessage};

#[derive(Clone)]
pub struct OpenAiProvider {
    api_key: Option<SecretString>,
    transport: Arc<dyn OpenAiTransport>,
}

impl OpenAiProvider {
    pub fn new(transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            api_key: None,
            transport,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = SecretString::non_empty(api_key);
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn build_chat_request(&self, request: ModelRequest) -> OpenAiChatRequest {
        OpenAiChatRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(OpenAiMessage::from)
                .collect(),
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }

    pub(crate) fn build_completion_request(
        &self,
        request: TextRequest,
    ) -> OpenAiCompletionRequest {
        OpenAiCompletionRequest {
            model: request.model,
            prompt: request.prompt,
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &self.api_key)
            .field("transport", &self.transport)
            .finish()
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_openai_auth(self.api_key.as_ref())?;
            let openai_request = self.build_chat_request(request);
            let response = self.transport.chat_completion(openai_request, auth).await?;
            Ok(response.into_model_response())
        })
    }

    fn complete_text<'a>(
        &'a self,
        request: TextRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_openai_auth(self.api_key.as_ref())?;
            let openai_request = self.build_completion_request(request);
            let response = self.transport.text_completion(openai_request, auth).await?;
            Ok(response.into_model_response())
        })
    }

    fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let auth = resolve_openai_auth(self.api_key.as_ref())?;
            self.transport.list_models(auth).await
        })
    }
}

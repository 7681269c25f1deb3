//! OpenAI HTTP payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderError;

use super::types::{
    OpenAiChatRequest, OpenAiCompletionRequest, OpenAiFinishReason, OpenAiMessage,
    OpenAiResponse,
};

pub(crate) fn build_chat_request(
    request: OpenAiChatRequest,
) -> Result<OpenAiApiChatRequest, ProviderError> {
    if request.messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "OpenAI request requires at least one message",
        ));
    }

    Ok(OpenAiApiChatRequest {
        model: request.model,
        messages: request
            .messages
            .into_iter()
            .map(OpenAiApiMessage::from)
            .collect(),
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    })
}

pub(crate) fn build_completion_request(
    request: OpenAiCompletionRequest,
) -> OpenAiApiCompletionRequest {
    OpenAiApiCompletionRequest {
        model: request.model,
        prompt: request.prompt,
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

pub(crate) fn parse_finish_reason(value: Option<&str>) -> OpenAiFinishReason {
    match value {
        Some("stop") => OpenAiFinishReason::Stop,
        Some("length") => OpenAiFinishReason::Length,
        Some("content_filter") => OpenAiFinishReason::ContentFilter,
        _ => OpenAiFinishReason::Other,
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<OpenAiApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message).filter(|message| !message.trim().is_empty())
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiErrorEnvelope {
    pub error: OpenAiApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiChatRequest {
    pub model: String,
    pub messages: Vec<OpenAiApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<OpenAiMessage> for OpenAiApiMessage {
    fn from(value: OpenAiMessage) -> Self {
        Self {
            role: value.role.as_str(),
            content: value.content,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OpenAiApiCompletionRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiChatResponse {
    pub model: String,
    pub choices: Vec<OpenAiApiChatChoice>,
    #[serde(default)]
    pub usage: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiChatChoice {
    pub message: OpenAiApiAssistantMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiAssistantMessage {
    pub content: Option<String>,
}

impl TryFrom<OpenAiApiChatResponse> for OpenAiResponse {
    type Error = ProviderError;

    fn try_from(value: OpenAiApiChatResponse) -> Result<Self, Self::Error> {
        let choice =
            value.choices.into_iter().next().ok_or_else(|| {
                ProviderError::transport("OpenAI response did not include choices")
            })?;

        Ok(Self {
            model: value.model,
            content: choice.message.content.unwrap_or_default(),
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
            usage: value.usage,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiCompletionResponse {
    pub model: String,
    pub choices: Vec<OpenAiApiCompletionChoice>,
    #[serde(default)]
    pub usage: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiCompletionChoice {
    #[serde(default)]
    pub text: String,
    pub finish_reason: Option<String>,
}

impl TryFrom<OpenAiApiCompletionResponse> for OpenAiResponse {
    type Error = ProviderError;

    fn try_from(value: OpenAiApiCompletionResponse) -> Result<Self, Self::Error> {
        let choice =
            value.choices.into_iter().next().ok_or_else(|| {
                ProviderError::transport("OpenAI response did not include choices")
            })?;

        Ok(Self {
            model: value.model,
            content: choice.text,
            finish_reason: parse_finish_reason(choice.finish_reason.as_deref()),
            usage: value.usage,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiModelList {
    pub data: Vec<OpenAiApiModel>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenAiApiModel {
    pub id: String,
}

impl OpenAiApiModelList {
    pub(crate) fn into_ids(self) -> Vec<String> {
        self.data.into_iter().map(|model| model.id).collect()
    }
}

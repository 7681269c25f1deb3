//! OpenAI transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{ProviderError, ProviderFuture};

use super::serde_api::{
    OpenAiApiChatResponse, OpenAiApiCompletionResponse, OpenAiApiModelList, build_chat_request,
    build_completion_request, extract_error_message,
};
use super::types::{OpenAiAuth, OpenAiChatRequest, OpenAiCompletionRequest, OpenAiResponse};

pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn chat_completion<'a>(
        &'a self,
        request: OpenAiChatRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>>;

    fn text_completion<'a>(
        &'a self,
        request: OpenAiCompletionRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>>;

    fn list_models<'a>(
        &'a self,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OPENAI_DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn apply_auth(
        &self,
        builder: reqwest::RequestBuilder,
        auth: &OpenAiAuth,
    ) -> reqwest::RequestBuilder {
        match auth {
            OpenAiAuth::ApiKey(key) => builder.bearer_auth(key.expose()),
        }
    }

    async fn post_json<B, R>(
        &self,
        path: &str,
        body: &B,
        auth: &OpenAiAuth,
    ) -> Result<R, ProviderError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let builder = self.client.post(self.endpoint(path)).json(body);
        let response = self
            .apply_auth(builder, auth)
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_json(response).await
    }

    async fn get_json<R>(&self, path: &str, auth: &OpenAiAuth) -> Result<R, ProviderError>
    where
        R: DeserializeOwned,
    {
        let builder = self.client.get(self.endpoint(path));
        let response = self
            .apply_auth(builder, auth)
            .send()
            .await
            .map_err(map_send_error)?;

        Self::read_json(response).await
    }

    async fn read_json<R>(response: Response) -> Result<R, ProviderError>
    where
        R: DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(Self::parse_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|err| ProviderError::transport(err.to_string()))
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("OpenAI request failed with status {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(message)
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => {
                ProviderError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                ProviderError::unavailable(message)
            }
            _ => ProviderError::transport(message),
        }
    }
}

fn map_send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn chat_completion<'a>(
        &'a self,
        request: OpenAiChatRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_chat_request(request)?;
            let parsed: OpenAiApiChatResponse =
                self.post_json("chat/completions", &api_request, &auth).await?;

            OpenAiResponse::try_from(parsed)
        })
    }

    fn text_completion<'a>(
        &'a self,
        request: OpenAiCompletionRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_completion_request(request);
            let parsed: OpenAiApiCompletionResponse =
                self.post_json("completions", &api_request, &auth).await?;

            OpenAiResponse::try_from(parsed)
        })
    }

    fn list_models<'a>(
        &'a self,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
        Box::pin(async move {
            let parsed: OpenAiApiModelList = self.get_json("models", &auth).await?;
            Ok(parsed.into_ids())
        })
    }
}

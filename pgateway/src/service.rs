//! The delegation gateway: validate, forward once, translate.

use std::sync::Arc;

use pcommon::GenerationOptions;
use pprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks,
    ProviderOperationHooks, Role, TextRequest, observe_operation,
};

use crate::defaults::{SUMMARY_TEMPERATURE, summarize_prompt, summary_max_tokens};
use crate::{
    ChatExchange, DelegationResult, GatewayDefaults, GatewayError, GenerationRequest,
    ModelCatalog, SummarizationRequest, SummarizeStyle, SummaryResult,
};

#[derive(Clone)]
pub struct DelegationGateway {
    provider: Arc<dyn ModelProvider>,
    hooks: Arc<dyn ProviderOperationHooks>,
    defaults: GatewayDefaults,
    summarize_style: SummarizeStyle,
}

impl DelegationGateway {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::builder(provider).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> DelegationGatewayBuilder {
        DelegationGatewayBuilder::new(provider)
    }

    pub fn defaults(&self) -> &GatewayDefaults {
        &self.defaults
    }

    pub fn summarize_style(&self) -> SummarizeStyle {
        self.summarize_style
    }

    pub async fn chat(&self, exchange: ChatExchange) -> Result<DelegationResult, GatewayError> {
        if exchange.messages.is_empty() {
            return Err(GatewayError::invalid_request("messages must not be empty"));
        }

        let model = self.resolve_model(exchange.model)?;
        let options = GenerationOptions::new(
            exchange.temperature.unwrap_or(self.defaults.temperature),
            exchange.max_tokens.unwrap_or(self.defaults.chat_max_tokens),
        );
        options.check()?;

        let request = ModelRequest::new(model.clone(), exchange.messages).with_options(options);
        let response = self.complete("chat", request).await?;
        Ok(delegation_result(response, model))
    }

    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<DelegationResult, GatewayError> {
        let model = self.resolve_model(request.model)?;
        let options = GenerationOptions::new(
            request.temperature.unwrap_or(self.defaults.temperature),
            request
                .max_tokens
                .unwrap_or(self.defaults.generate_max_tokens),
        );
        options.check()?;

        let text_request = TextRequest::new(model.clone(), request.prompt).with_options(options);
        let response = self.complete_text("generate", text_request).await?;
        Ok(delegation_result(response, model))
    }

    pub async fn summarize(
        &self,
        request: SummarizationRequest,
    ) -> Result<SummaryResult, GatewayError> {
        let max_length = request
            .max_length
            .unwrap_or(self.defaults.summary_max_length);
        if max_length == 0 {
            return Err(GatewayError::invalid_request(
                "max_length must be greater than zero",
            ));
        }

        let model = self.resolve_model(request.model)?;
        let prompt = summarize_prompt(max_length, &request.text);
        let options = GenerationOptions::new(SUMMARY_TEMPERATURE, summary_max_tokens(max_length));

        let response = match self.summarize_style {
            SummarizeStyle::Completion => {
                let text_request = TextRequest::new(model, prompt).with_options(options);
                self.complete_text("summarize", text_request).await?
            }
            SummarizeStyle::Chat => {
                let chat_request =
                    ModelRequest::new(model, vec![Message::new(Role::User, prompt)])
                        .with_options(options);
                self.complete("summarize", chat_request).await?
            }
        };

        let summary = response.content.trim().to_string();
        Ok(SummaryResult {
            original_length: request.text.chars().count(),
            summary_length: summary.chars().count(),
            summary,
        })
    }

    pub async fn list_models(&self) -> Result<ModelCatalog, GatewayError> {
        let models = observe_operation(
            self.provider.id(),
            "list_models",
            self.hooks.as_ref(),
            self.provider.list_models(),
        )
        .await?;

        Ok(ModelCatalog::new(models))
    }

    fn resolve_model(&self, requested: Option<String>) -> Result<String, GatewayError> {
        let model = requested.unwrap_or_else(|| self.defaults.model.clone());
        if model.trim().is_empty() {
            return Err(GatewayError::invalid_request("model must not be blank"));
        }

        Ok(model)
    }

    async fn complete(
        &self,
        operation: &str,
        request: ModelRequest,
    ) -> Result<ModelResponse, GatewayError> {
        let response = observe_operation(
            self.provider.id(),
            operation,
            self.hooks.as_ref(),
            self.provider.complete(request),
        )
        .await?;

        Ok(response)
    }

    async fn complete_text(
        &self,
        operation: &str,
        request: TextRequest,
    ) -> Result<ModelResponse, GatewayError> {
        let response = observe_operation(
            self.provider.id(),
            operation,
            self.hooks.as_ref(),
            self.provider.complete_text(request),
        )
        .await?;

        Ok(response)
    }
}

impl std::fmt::Debug for DelegationGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegationGateway")
            .field("provider", &self.provider.id())
            .field("defaults", &self.defaults)
            .field("summarize_style", &self.summarize_style)
            .finish_non_exhaustive()
    }
}

/// Keeps the provider's echoed model, or `requested_model` when the echo is blank.
fn delegation_result(response: ModelResponse, requested_model: String) -> DelegationResult {
    let model = if response.model.trim().is_empty() {
        requested_model
    } else {
        response.model
    };

    DelegationResult {
        text: response.content,
        model,
        usage: response.usage,
    }
}

pub struct DelegationGatewayBuilder {
    provider: Arc<dyn ModelProvider>,
    hooks: Arc<dyn ProviderOperationHooks>,
    defaults: GatewayDefaults,
    summarize_style: SummarizeStyle,
}

impl DelegationGatewayBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            hooks: Arc::new(NoopOperationHooks),
            defaults: GatewayDefaults::default(),
            summarize_style: SummarizeStyle::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: GatewayDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_summarize_style(mut self, style: SummarizeStyle) -> Self {
        self.summarize_style = style;
        self
    }

    pub fn build(self) -> DelegationGateway {
        DelegationGateway {
            provider: self.provider,
            hooks: self.hooks,
            defaults: self.defaults,
            summarize_style: self.summarize_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::sync::Mutex;
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    use pprovider::{FinishReason, ProviderError, ProviderFuture, ProviderId};

    use super::*;

    #[derive(Debug, Default)]
    struct EchoProvider {
        chat_requests: Mutex<Vec<ModelRequest>>,
        text_requests: Mutex<Vec<TextRequest>>,
    }

    impl ModelProvider for EchoProvider {
        fn id(&self) -> ProviderId {
            ProviderId::OpenAi
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                let model = request.model.clone();
                self.chat_requests.lock().expect("lock").push(request);
                Ok(response(model, "  chat reply \n"))
            })
        }

        fn complete_text<'a>(
            &'a self,
            request: TextRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                let model = request.model.clone();
                self.text_requests.lock().expect("lock").push(request);
                Ok(response(model, "  text reply \n"))
            })
        }

        fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>> {
            Box::pin(async { Ok(vec!["gpt-4o".to_string()]) })
        }
    }

    fn response(model: String, content: &str) -> ModelResponse {
        ModelResponse {
            provider: ProviderId::OpenAi,
            model,
            content: content.to_string(),
            finish_reason: FinishReason::EndTurn,
            usage: None,
        }
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        let mut future = std::pin::pin!(future);
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        loop {
            match future.as_mut().poll(&mut cx) {
                Poll::Ready(value) => return value,
                Poll::Pending => std::thread::yield_now(),
            }
        }
    }

    fn noop_waker() -> Waker {
        unsafe fn clone(_: *const ()) -> RawWaker {
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        unsafe fn wake(_: *const ()) {}

        unsafe fn wake_by_ref(_: *const ()) {}

        unsafe fn drop(_: *const ()) {}

        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, wake, wake_by_ref, drop);

        let raw_waker = RawWaker::new(std::ptr::null(), &VTABLE);
        unsafe { Waker::from_raw(raw_waker) }
    }

    #[test]
    fn chat_fills_defaults_before_delegating() {
        let provider = Arc::new(EchoProvider::default());
        let gateway = DelegationGateway::new(provider.clone());

        let result = block_on(gateway.chat(ChatExchange::new(vec![Message::new(
            Role::User,
            "hello",
        )])))
        .expect("chat should succeed");

        assert_eq!(result.text, "  chat reply \n");
        assert_eq!(result.model, "gpt-3.5-turbo");

        let requests = provider.chat_requests.lock().expect("lock");
        assert_eq!(requests[0].options, GenerationOptions::new(0.7, 1000));
    }

    #[test]
    fn generate_uses_its_own_token_default() {
        let provider = Arc::new(EchoProvider::default());
        let gateway = DelegationGateway::builder(provider.clone())
            .with_defaults(GatewayDefaults::default().with_model("gpt-4o-mini"))
            .build();

        block_on(gateway.generate(GenerationRequest::new("Write a haiku")))
            .expect("generate should succeed");

        let requests = provider.text_requests.lock().expect("lock");
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].prompt, "Write a haiku");
        assert_eq!(requests[0].options, GenerationOptions::new(0.7, 500));
    }

    #[test]
    fn summarize_chat_style_sends_one_user_message() {
        let provider = Arc::new(EchoProvider::default());
        let gateway = DelegationGateway::builder(provider.clone())
            .with_summarize_style(SummarizeStyle::Chat)
            .build();

        let summary = block_on(gateway.summarize(SummarizationRequest::new("abc")))
            .expect("summarize should succeed");

        assert_eq!(summary.summary, "chat reply");
        assert_eq!(summary.summary_length, 10);
        assert_eq!(summary.original_length, 3);
        assert!(provider.text_requests.lock().expect("lock").is_empty());

        let requests = provider.chat_requests.lock().expect("lock");
        assert_eq!(
            requests[0].messages,
            vec![Message::new(Role::User, summarize_prompt(150, "abc"))]
        );
        assert_eq!(requests[0].options, GenerationOptions::new(0.3, 200));
    }

    #[test]
    fn blank_model_is_rejected_without_delegating() {
        let provider = Arc::new(EchoProvider::default());
        let gateway = DelegationGateway::new(provider.clone());

        let error = block_on(gateway.generate(GenerationRequest::new("hi").with_model("  ")))
            .expect_err("blank model should fail");

        assert!(error.is_invalid_request());
        assert_eq!(error.message, "model must not be blank");
        assert!(provider.text_requests.lock().expect("lock").is_empty());
    }
}

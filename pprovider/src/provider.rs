use crate::{ModelRequest, ModelResponse, ProviderError, ProviderId, TextRequest};

pub type ProviderFuture<'a, T> = pcommon::BoxFuture<'a, T>;

/// The three capabilities the gateway delegates to.
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Chat completion over an ordered message sequence.
    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    /// Free-form completion over a raw prompt.
    fn complete_text<'a>(
        &'a self,
        request: TextRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    /// Model ids in the order the provider reports them.
    fn list_models<'a>(&'a self) -> ProviderFuture<'a, Result<Vec<String>, ProviderError>>;
}

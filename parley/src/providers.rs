//! Provider construction from service configuration.

use std::sync::Arc;

use reqwest::Client;

use crate::{ModelProvider, ProviderError, ServiceConfig};

pub fn build_provider(config: &ServiceConfig) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let http = Client::builder()
        .timeout(config.provider_timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    build_openai_provider(config, http)
}

#[cfg(feature = "provider-openai")]
fn build_openai_provider(
    config: &ServiceConfig,
    http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::openai::{OpenAiHttpTransport, OpenAiProvider};

    let transport = Arc::new(OpenAiHttpTransport::new(http).with_base_url(&config.base_url));
    let mut provider = OpenAiProvider::new(transport);
    if let Some(api_key) = &config.api_key {
        provider = provider.with_api_key(api_key.expose());
    }

    Ok(Arc::new(provider))
}

#[cfg(not(feature = "provider-openai"))]
fn build_openai_provider(
    _config: &ServiceConfig,
    _http: Client,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on parley",
    ))
}

#[cfg(all(test, feature = "provider-openai"))]
mod tests {
    use super::*;
    use crate::ProviderId;

    #[test]
    fn builds_openai_provider_without_a_key() {
        let provider = build_provider(&ServiceConfig::default()).expect("provider should build");
        assert_eq!(provider.id(), ProviderId::OpenAi);
    }
}

//! OpenAI auth resolution policy.

use crate::{ProviderError, SecretString};

use super::types::OpenAiAuth;

/// Resolves OpenAI authentication from the configured API key.
///
/// A missing key is reported per call, so a gateway without credentials still
/// serves its non-provider routes.
pub(crate) fn resolve_openai_auth(
    api_key: Option<&SecretString>,
) -> Result<OpenAiAuth, ProviderError> {
    match api_key {
        Some(key) if !key.is_empty() => Ok(OpenAiAuth::ApiKey(key.clone())),
        _ => Err(ProviderError::authentication("no OpenAI API key configured")),
    }
}

//! Common `pprovider` imports for downstream crates.

pub use crate::{
    FinishReason, GenerationOptions, Message, ModelProvider, ModelRequest, ModelResponse,
    NoopOperationHooks, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
    ProviderOperationHooks, Role, SecretString, TextRequest, observe_operation,
};
pub use pcommon::BoxFuture;

//! Provider contracts and adapters for the parley delegation gateway.
//!
//! ```rust
//! use pprovider::{Message, ModelRequest, ProviderError, ProviderErrorKind, Role};
//!
//! let request = ModelRequest::new("gpt-3.5-turbo", vec![Message::new(Role::User, "hi")])
//!     .with_temperature(0.7)
//!     .with_max_tokens(1000);
//! assert!(request.validate().is_ok());
//!
//! let error = ProviderError::rate_limited("quota exceeded");
//! assert_eq!(error.kind, ProviderErrorKind::RateLimited);
//! ```

pub mod adapters;
pub mod prelude;

mod credentials;
mod error;
mod hooks;
mod model;
mod provider;

pub use credentials::SecretString;
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks, observe_operation};
pub use model::{
    FinishReason, Message, ModelRequest, ModelResponse, ProviderId, Role, TextRequest,
};
pub use pcommon::GenerationOptions;
pub use provider::{ModelProvider, ProviderFuture};

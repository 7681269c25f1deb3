//! Text-analysis HTTP service that delegates every request to an
//! OpenAI-compatible provider.
//!
//! This crate ties the workspace together: configuration from the
//! environment, provider construction, the axum router, and logging setup.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use parley::{ServiceConfig, build_provider, gateway_for, router};
//!
//! let config = ServiceConfig::default();
//! let provider = build_provider(&config).expect("provider should build");
//! let gateway = Arc::new(gateway_for(&config, provider));
//! let _app = router(gateway);
//! ```

pub mod config;
pub mod http;
pub mod logging;
pub mod prelude;
pub mod providers;
pub mod runtime;
pub mod server;

pub use pcommon;
pub use pgateway;
pub use pobserve;
pub use pprovider;

pub use config::{ConfigError, LogFormat, ServiceConfig};
pub use http::{ApiError, AppState, router};
pub use logging::init_logging;
pub use pgateway::{
    ChatExchange, DelegationGateway, DelegationGatewayBuilder, DelegationResult,
    GatewayDefaults, GatewayError, GatewayErrorKind, GenerationRequest, ModelCatalog,
    SummarizationRequest, SummarizeStyle, SummaryResult,
};
pub use pobserve::{SafeProviderHooks, TracingObservabilityHooks};
pub use pprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderId, ProviderOperationHooks, Role, SecretString, TextRequest,
};
pub use providers::build_provider;
pub use runtime::gateway_for;
pub use server::serve;

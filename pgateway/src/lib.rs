//! Request delegation over a model provider.
//!
//! A [`DelegationGateway`] fills unset request fields from [`GatewayDefaults`],
//! rejects malformed requests, makes exactly one provider call, and reports any
//! provider failure as a [`GatewayError`] of kind [`GatewayErrorKind::Provider`].
//!
//! ```rust
//! use pgateway::{GatewayDefaults, SummarizeStyle, summarize_prompt};
//!
//! let defaults = GatewayDefaults::default().with_model("gpt-4o-mini");
//! assert_eq!(defaults.chat_max_tokens, 1000);
//! assert_eq!("chat".parse::<SummarizeStyle>(), Ok(SummarizeStyle::Chat));
//! assert!(summarize_prompt(20, "text").starts_with("Please summarize"));
//! ```

mod defaults;
mod error;
mod service;
mod types;

pub mod prelude {
    pub use crate::{
        ChatExchange, DelegationGateway, DelegationGatewayBuilder, DelegationResult,
        GatewayDefaults, GatewayError, GatewayErrorKind, GenerationRequest, ModelCatalog,
        SummarizationRequest, SummarizeStyle, SummaryResult,
    };
    pub use pprovider::{Message, Role};
}

pub use defaults::{
    DEFAULT_CHAT_MAX_TOKENS, DEFAULT_GENERATE_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_SUMMARY_MAX_LENGTH, DEFAULT_TEMPERATURE, GatewayDefaults, SUMMARY_TEMPERATURE,
    SUMMARY_TOKEN_BUFFER, SummarizeStyle, UnknownSummarizeStyle, summarize_prompt,
    summary_max_tokens,
};
pub use error::{GatewayError, GatewayErrorKind};
pub use service::{DelegationGateway, DelegationGatewayBuilder};
pub use types::{
    ChatExchange, DelegationResult, GenerationRequest, ModelCatalog, SummarizationRequest,
    SummaryResult,
};
pub use pprovider::{Message, Role};

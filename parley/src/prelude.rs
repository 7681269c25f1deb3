pub use crate::{
    ChatExchange, DelegationGateway, GatewayDefaults, GatewayError, GenerationRequest, Message,
    ModelProvider, Role, ServiceConfig, SummarizationRequest, SummarizeStyle, build_provider,
    gateway_for, router,
};

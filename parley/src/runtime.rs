//! Wiring from configuration to a ready gateway.

use std::sync::Arc;

use pobserve::{SafeProviderHooks, TracingObservabilityHooks};

use crate::{DelegationGateway, ModelProvider, ServiceConfig};

/// Builds a gateway whose provider calls are traced.
pub fn gateway_for(config: &ServiceConfig, provider: Arc<dyn ModelProvider>) -> DelegationGateway {
    DelegationGateway::builder(provider)
        .with_defaults(config.gateway_defaults())
        .with_summarize_style(config.summarize_style)
        .with_hooks(Arc::new(SafeProviderHooks::new(TracingObservabilityHooks)))
        .build()
}

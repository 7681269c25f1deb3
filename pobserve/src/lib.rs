//! Observability hooks for provider delegations.
//!
//! ```rust
//! use pobserve::{SafeProviderHooks, TracingObservabilityHooks};
//! use pprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = SafeProviderHooks::new(TracingObservabilityHooks);
//! accepts_provider_hooks(&hooks);
//! ```

mod safe_hooks;
mod tracing_hooks;

pub use safe_hooks::SafeProviderHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{SafeProviderHooks, TracingObservabilityHooks};
}

//! Gateway errors and their provider translation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pcommon::OptionsViolation;
use pprovider::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    /// Rejected before any provider call.
    InvalidRequest,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::InvalidRequest, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Provider, message)
    }

    pub fn is_invalid_request(&self) -> bool {
        self.kind == GatewayErrorKind::InvalidRequest
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for GatewayError {}

impl From<ProviderError> for GatewayError {
    fn from(value: ProviderError) -> Self {
        if value.message.trim().is_empty() {
            return GatewayError::provider(format!("provider error: {}", value.kind.as_str()));
        }

        GatewayError::provider(value.message)
    }
}

impl From<OptionsViolation> for GatewayError {
    fn from(value: OptionsViolation) -> Self {
        GatewayError::invalid_request(value.to_string())
    }
}

//! HTTP surface over the delegation gateway.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::{
    ChatExchange, DelegationGateway, DelegationResult, GatewayError, GatewayErrorKind,
    GenerationRequest, ModelCatalog, SummarizationRequest, SummaryResult,
};

pub const SERVICE_NAME: &str = "ai-service";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

const ENDPOINTS: [&str; 6] = [
    "GET /health - Health check",
    "POST /chat - Chat with AI",
    "POST /generate - Generate text",
    "POST /summarize - Summarize text",
    "GET /models - List available models",
    "POST /ai/analyze - Analyze text (placeholder)",
];

#[derive(Clone)]
pub struct AppState {
    gateway: Arc<DelegationGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<DelegationGateway>) -> Self {
        Self { gateway }
    }
}

pub fn router(gateway: Arc<DelegationGateway>) -> Router {
    Router::new()
        .route("/", get(service_banner))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/generate", post(generate))
        .route("/summarize", post(summarize))
        .route("/models", get(models))
        .route("/ai/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(gateway))
}

#[derive(Debug, Serialize)]
struct ServiceBanner {
    message: &'static str,
    version: &'static str,
    endpoints: [&'static str; 6],
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatReply {
    response: String,
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<Value>,
}

impl From<DelegationResult> for ChatReply {
    fn from(result: DelegationResult) -> Self {
        Self {
            response: result.text,
            model: result.model,
            usage: result.usage,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateReply {
    generated_text: String,
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    usage: Option<Value>,
}

impl From<DelegationResult> for GenerateReply {
    fn from(result: DelegationResult) -> Self {
        Self {
            generated_text: result.text,
            model: result.model,
            usage: result.usage,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeReply {
    text: String,
    analysis: &'static str,
    sentiment: &'static str,
    confidence: f64,
}

async fn service_banner() -> Json<ServiceBanner> {
    Json(ServiceBanner {
        message: "AI Service API",
        version: SERVICE_VERSION,
        endpoints: ENDPOINTS,
    })
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}

async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatExchange>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let Json(exchange) = payload.map_err(|rejection| ApiError::rejected("chat", rejection))?;
    let result = state
        .gateway
        .chat(exchange)
        .await
        .map_err(|err| ApiError::gateway("chat", err))?;

    Ok(Json(result.into()))
}

async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerateReply>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::rejected("generate", rejection))?;
    let result = state
        .gateway
        .generate(request)
        .await
        .map_err(|err| ApiError::gateway("generate", err))?;

    Ok(Json(result.into()))
}

async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizationRequest>, JsonRejection>,
) -> Result<Json<SummaryResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::rejected("summarize", rejection))?;
    let summary = state
        .gateway
        .summarize(request)
        .await
        .map_err(|err| ApiError::gateway("summarize", err))?;

    Ok(Json(summary))
}

async fn models(State(state): State<AppState>) -> Result<Json<ModelCatalog>, ApiError> {
    let catalog = state
        .gateway
        .list_models()
        .await
        .map_err(|err| ApiError::gateway("models", err))?;

    Ok(Json(catalog))
}

/// Canned response; never reaches the provider.
async fn analyze(Query(query): Query<AnalyzeQuery>) -> Json<AnalyzeReply> {
    Json(AnalyzeReply {
        text: query.text,
        analysis: "This is a placeholder for AI analysis",
        sentiment: "positive",
        confidence: 0.85,
    })
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// Failure reply carrying `{detail}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Provider failures are already logged at error level by the operation hooks.
    fn gateway(endpoint: &str, err: GatewayError) -> Self {
        match err.kind {
            GatewayErrorKind::InvalidRequest => {
                warn!(endpoint, "rejected {endpoint} request: {}", err.message);
            }
            GatewayErrorKind::Provider => {
                debug!(endpoint, "error in {endpoint} endpoint: {}", err.message);
            }
        }
        Self::from(err)
    }

    fn rejected(endpoint: &str, rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        warn!(endpoint, "rejected {endpoint} payload: {detail}");
        Self::new(rejection.status(), detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let status = match err.kind {
            GatewayErrorKind::InvalidRequest => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayErrorKind::Provider => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self::new(status, err.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("output lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn captured_lines(body: impl FnOnce()) -> Vec<String> {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, body);
        let bytes = output.0.lock().expect("output lock").clone();
        String::from_utf8(bytes)
            .expect("utf8 output")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn provider_failures_are_not_logged_again_at_the_boundary() {
        let lines = captured_lines(|| {
            let _ = ApiError::gateway("chat", GatewayError::provider("upstream unavailable"));
        });

        assert!(lines.is_empty(), "unexpected output: {lines:?}");
    }

    #[test]
    fn invalid_requests_are_logged_once_as_warnings() {
        let lines = captured_lines(|| {
            let _ = ApiError::gateway(
                "chat",
                GatewayError::invalid_request("messages must not be empty"),
            );
        });

        assert_eq!(lines.len(), 1, "unexpected output: {lines:?}");
        assert!(lines[0].contains("WARN"));
        assert!(lines[0].contains("messages must not be empty"));
    }

    #[test]
    fn gateway_error_kinds_map_to_status_codes() {
        let invalid = ApiError::from(GatewayError::invalid_request("messages must not be empty"));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.detail(), "messages must not be empty");

        let provider = ApiError::from(GatewayError::provider("upstream unavailable"));
        assert_eq!(provider.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn replies_omit_missing_usage() {
        let reply = ChatReply::from(DelegationResult {
            text: "hi".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            usage: None,
        });

        let json = serde_json::to_value(&reply).expect("reply should serialize");
        assert_eq!(
            json,
            serde_json::json!({"response": "hi", "model": "gpt-3.5-turbo"})
        );
    }
}

use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use parley::{ServiceConfig, build_provider, gateway_for, init_logging, serve};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = ServiceConfig::from_env()?;
    init_logging(&config.log_filter, config.log_format)?;

    if config.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; provider calls will fail until it is configured");
    }

    let provider = build_provider(&config)?;
    let gateway = Arc::new(gateway_for(&config, provider));
    info!(
        model = %config.default_model,
        summarize_style = %config.summarize_style,
        base_url = %config.base_url,
        "gateway ready"
    );

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    serve(listener, gateway).await?;
    Ok(())
}

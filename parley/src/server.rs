use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::{DelegationGateway, http};

/// Serves the gateway on `listener` until Ctrl-C, then drains in-flight requests.
pub async fn serve(listener: TcpListener, gateway: Arc<DelegationGateway>) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("listening on http://{addr}");

    axum::serve(listener, http::router(gateway))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }

    info!("shutdown signal received, finishing in-flight requests");
}

//! HTTP edge of the service: shared middleware stack, health probe, and the
//! listener loop with graceful shutdown.

use anyhow::{Context, Result};
use axum::{middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
};

pub mod request_id;
mod web;

pub use web::health_check;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Wrap module routes with `/health` and the middleware stack.
///
/// Order, outermost first:
/// SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions -> BodyLimit
pub fn build_router(routes: Router) -> Router {
    tracing::debug!("Building router");
    let x_request_id = request_id::header();

    // `Router::layer` wraps what is already there, so layers go innermost first.
    routes
        .route("/health", get(web::health_check))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(from_fn(request_id::push_req_id_to_extensions))
        .layer(request_id::create_trace_layer())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
}

/// Bind `addr` and serve until `cancel` fires.
pub async fn serve(addr: &str, router: Router, cancel: CancellationToken) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);
    serve_listener(listener, router, cancel).await
}

/// Serve on an already bound listener; in-flight requests drain on cancel.
pub async fn serve_listener(
    listener: TcpListener,
    router: Router,
    cancel: CancellationToken,
) -> Result<()> {
    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully (cancellation)");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

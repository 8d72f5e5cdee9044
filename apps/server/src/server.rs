//! Router assembly and server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{Method, header};
use color_eyre::eyre::Result;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use codemerge_core::FilePipeline;
use codemerge_shared::AppConfig;
use codemerge_store::{MemoryStore, RecordStore, spawn_sweeper};

use crate::routes::{file_routes, health_routes, merge_routes, upload_routes};
use crate::state::AppState;

/// Headroom on top of the aggregate upload limit for multipart framing.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Assemble the application router for the given state.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let body_limit = state.limits.max_total_size_bytes + BODY_LIMIT_SLACK;

    Router::new()
        .merge(upload_routes())
        .merge(merge_routes())
        .merge(file_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// Run the server until a shutdown signal arrives, then tear down the
/// background sweeper.
pub async fn run(config: AppConfig) -> Result<()> {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
    let pipeline = Arc::new(FilePipeline::new(
        Arc::clone(&store),
        config.limits.max_file_size_bytes,
    ));
    let sweeper = spawn_sweeper(
        store,
        config.retention.file_ttl(),
        config.retention.sweep_interval(),
    );

    let state = AppState {
        pipeline,
        limits: config.limits.clone(),
    };
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server started on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped, draining sweeper");
    sweeper.shutdown().await;

    Ok(())
}

/// Resolve when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{Router, extract::State, response::Html, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app::AppContext;
use crate::page::render_shell;

/// The full application router: page shell, JSON API and static assets
pub fn app(ctx: Arc<AppContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // upstream calls are bounded by the client timeout; leave room for two
    let request_timeout = Duration::from_secs(u64::from(ctx.config().weather.timeout_seconds) * 2 + 5);
    let static_dir = ctx.config().server.static_dir.clone();

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api", api::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(ctx)
}

async fn index(State(ctx): State<Arc<AppContext>>) -> Html<String> {
    Html(render_shell(&ctx.page().await).into_string())
}

async fn health() -> &'static str {
    "ok"
}

pub async fn run(ctx: Arc<AppContext>, port: u16) -> anyhow::Result<()> {
    let app = app(ctx);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}

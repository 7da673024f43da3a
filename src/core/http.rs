//! Health and dashboard endpoints using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::core::runtime::SharedSnapshot;
use crate::metrics::Metrics;
use crate::models::dashboard::DashboardSnapshot;

pub const ROOT_BANNER: &str = "STONKS SIGNALS - ONLINE";
pub const SERVICE_NAME: &str = "stonks-signal-engine";

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub snapshot: SharedSnapshot,
}

impl AppState {
    pub fn new(metrics: Arc<Metrics>, snapshot: SharedSnapshot) -> Self {
        Self {
            metrics,
            start_time: Arc::new(Instant::now()),
            snapshot,
        }
    }
}

pub async fn root() -> &'static str {
    ROOT_BANNER
}

/// Liveness plus the polling loop's own state from the last published
/// snapshot: `starting` until the first cycle completes, then `running`.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let (loop_status, cycle) = {
        let snapshot = state.snapshot.read().await;
        (snapshot.status.clone(), snapshot.cycle)
    };
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Json(json!({
        "status": "healthy",
        "loop": loop_status,
        "cycle": cycle,
        "uptime_seconds": uptime_seconds,
        "service": SERVICE_NAME
    }))
}

/// Most recent ranking and open trades published by the polling loop.
pub async fn snapshot_handler(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let snapshot = state.snapshot.read().await.clone();
    Json(snapshot)
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

async fn metrics_middleware(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;
    state.metrics.http_requests_total.inc();

    if response.status().is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %response.status(),
            "HTTP request error"
        );
    }

    response
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/snapshot", get(snapshot_handler))
        .route("/metrics", get(metrics_handler))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    axum::serve(listener, app).await
}

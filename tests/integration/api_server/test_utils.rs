//! Test utilities for API server integration tests

use axum_test::TestServer;
use std::sync::Arc;
use stonks_signals::core::http::{create_router, AppState};
use stonks_signals::core::runtime::SharedSnapshot;
use stonks_signals::metrics::Metrics;
use stonks_signals::models::dashboard::DashboardSnapshot;
use tokio::sync::RwLock;

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub snapshot: SharedSnapshot,
}

impl TestApiServer {
    pub async fn new() -> Self {
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let snapshot: SharedSnapshot = Arc::new(RwLock::new(DashboardSnapshot::default()));
        let state = AppState::new(metrics.clone(), snapshot.clone());

        let app = create_router(state);
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            snapshot,
        }
    }
}

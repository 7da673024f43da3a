//! Integration tests for the API Server
//!
//! Tests the banner, health check, dashboard snapshot and metrics endpoints.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use chrono::Utc;
use serde_json::Value;
use stonks_signals::models::dashboard::DashboardSnapshot;
use stonks_signals::models::signal::{Direction, ScoredSymbol};
use stonks_signals::models::trade::Trade;

use test_utils::TestApiServer;

#[tokio::test]
async fn root_returns_banner() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/").await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "STONKS SIGNALS - ONLINE");
}

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "stonks-signal-engine");
    assert_eq!(body["loop"], "starting");
    assert_eq!(body["cycle"], 0);
}

#[tokio::test]
async fn health_endpoint_follows_published_loop_state() {
    let app = TestApiServer::new().await;
    {
        let mut snapshot = app.snapshot.write().await;
        snapshot.status = "running".to_string();
        snapshot.cycle = 3;
    }

    let body: Value = app.server.get("/health").await.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["loop"], "running");
    assert_eq!(body["cycle"], 3);
}

#[tokio::test]
async fn snapshot_defaults_to_starting() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/snapshot").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "starting");
    assert_eq!(body["cycle"], 0);
    assert!(body["ranking"].as_array().unwrap().is_empty());
    assert!(body["trades"].as_array().unwrap().is_empty());
    assert!(body.get("updated_at").is_none());
}

#[tokio::test]
async fn snapshot_reflects_published_state() {
    let app = TestApiServer::new().await;
    *app.snapshot.write().await = DashboardSnapshot {
        status: "running".to_string(),
        cycle: 7,
        updated_at: Some(Utc::now()),
        ranking: vec![ScoredSymbol {
            symbol: "BTCUSDT".to_string(),
            score: 86.67,
            direction: Direction::Long,
            price: 64_000.0,
        }],
        trades: vec![Trade {
            symbol: "BTCUSDT".to_string(),
            direction: Direction::Long,
            entry_price: 64_000.0,
            stop_price: 63_360.0,
            take_price: 65_280.0,
            opened_at: Utc::now(),
        }],
    };

    let body: Value = app.server.get("/api/snapshot").await.json();
    assert_eq!(body["status"], "running");
    assert_eq!(body["cycle"], 7);
    assert_eq!(body["ranking"][0]["symbol"], "BTCUSDT");
    assert_eq!(body["ranking"][0]["direction"], "LONG");
    assert_eq!(body["ranking"][0]["score"], 86.67);
    assert_eq!(body["trades"][0]["stop_price"], 63_360.0);

    let decoded: DashboardSnapshot = app.server.get("/api/snapshot").await.json();
    assert_eq!(decoded.trades.len(), 1);
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    for name in [
        "signal_cycles_total",
        "signals_emitted_total",
        "trades_opened_total",
        "open_trades",
        "http_requests_total",
    ] {
        assert!(body.contains(name), "Expected {} metric", name);
    }
}

#[tokio::test]
async fn metrics_endpoint_tracks_request_count() {
    let app = TestApiServer::new().await;

    for _ in 0..3 {
        let _ = app.server.get("/health").await;
    }

    assert_eq!(app.metrics.http_requests_total.get(), 3);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/unknown").expect_failure().await;
    assert_eq!(response.status_code(), 404);
}

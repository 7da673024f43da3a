//! Unit tests for logging setup

use stonks_signals::logging::{init_logging, is_production};

#[test]
fn test_production_detection() {
    assert!(is_production("production"));
    assert!(is_production("prod"));
    assert!(!is_production("sandbox"));
    assert!(!is_production("staging"));
}

#[test]
fn test_init_logging_is_idempotent() {
    init_logging();
    init_logging();
    tracing::info!("logging initialized twice without panicking");
}

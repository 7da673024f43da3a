//! Unit tests for top-K ranking

use stonks_signals::config::RankingConfig;
use stonks_signals::models::signal::{Direction, ScoredSymbol};
use stonks_signals::signals::ranking::RankingSelector;

fn scored(symbol: &str, score: f64, direction: Direction) -> ScoredSymbol {
    ScoredSymbol {
        symbol: symbol.to_string(),
        score,
        direction,
        price: 100.0,
    }
}

fn symbols(entries: &[ScoredSymbol]) -> Vec<&str> {
    entries.iter().map(|e| e.symbol.as_str()).collect()
}

#[test]
fn test_top_k_keeps_input_order_on_ties() {
    let input = vec![
        scored("A", 70.0, Direction::Long),
        scored("B", 90.0, Direction::Long),
        scored("C", 50.0, Direction::Long),
        scored("D", 90.0, Direction::Long),
    ];
    let selected = RankingSelector::new(3, 0.0).select(input);
    assert_eq!(symbols(&selected), vec!["B", "D", "A"]);
}

#[test]
fn test_min_score_filter_applies_after_top_k() {
    let input = vec![
        scored("A", 70.0, Direction::Long),
        scored("B", 90.0, Direction::Short),
        scored("C", 50.0, Direction::Long),
        scored("D", 90.0, Direction::Long),
    ];
    let selected = RankingSelector::new(3, 80.0).select(input);
    assert_eq!(symbols(&selected), vec!["B", "D"]);
}

#[test]
fn test_neutral_entries_are_dropped() {
    let input = vec![
        scored("A", 95.0, Direction::Neutral),
        scored("B", 85.0, Direction::Long),
        scored("C", 75.0, Direction::Long),
    ];
    // A takes a top-K slot before it is filtered
    let selected = RankingSelector::new(2, 60.0).select(input);
    assert_eq!(symbols(&selected), vec!["B"]);
}

#[test]
fn test_rank_returns_full_ordering() {
    let input = vec![
        scored("A", 10.0, Direction::Neutral),
        scored("B", 30.0, Direction::Long),
        scored("C", 20.0, Direction::Short),
    ];
    let ranked = RankingSelector::new(1, 0.0).rank(input);
    assert_eq!(symbols(&ranked), vec!["B", "C", "A"]);
}

#[test]
fn test_from_config_defaults() {
    let selector = RankingSelector::from(&RankingConfig::default());
    assert_eq!(selector, RankingSelector::new(3, 60.0));
}

//! Alert texts sent through the notification channels.

use crate::models::signal::Signal;
use crate::models::trade::{Trade, TradeOutcome, TradeResult};

pub const SETUP_NAME: &str = "STONKS_CORE_SETUP";

pub fn startup_message(symbols: &[String], timeframes: &[String]) -> String {
    format!(
        "🤖 STONKS SIGNALS started, monitoring {} on {}",
        symbols.join(", "),
        timeframes.join(" / ")
    )
}

pub fn signal_message(signal: &Signal, timeframes: &[String], stop_pct: f64, take_pct: f64) -> String {
    let mut text = format!(
        "📊 SIGNAL CONFIRMED\n\nPair: {}\nDirection: {}\nPrice: {}\nTimeframes: {}\n",
        signal.symbol,
        signal.direction,
        format_price(signal.price),
        timeframes.join(" / ")
    );
    if let Some(score) = signal.score {
        text.push_str(&format!("Score: {:.2}\n", score));
    }
    text.push_str(&format!(
        "Stop: {}%\nTarget: {}%\nRR: 1:{}\n\nSetup: {}",
        format_pct(stop_pct * 100.0),
        format_pct(take_pct * 100.0),
        format_pct(take_pct / stop_pct),
        SETUP_NAME
    ));
    text
}

pub fn trade_opened_message(trade: &Trade) -> String {
    format!(
        "🟢 PAPER TRADE OPENED\n\nPair: {}\nDirection: {}\nEntry: {}\nStop: {}\nTake: {}",
        trade.symbol,
        trade.direction,
        format_price(trade.entry_price),
        format_price(trade.stop_price),
        format_price(trade.take_price)
    )
}

pub fn trade_closed_message(result: &TradeResult) -> String {
    let icon = match result.outcome {
        TradeOutcome::Take => "✅",
        TradeOutcome::Stop => "🛑",
    };
    format!(
        "{} PAPER TRADE CLOSED ({})\n\nPair: {}\nDirection: {}\nEntry: {}\nExit: {}\nPnL: {:+.2}%",
        icon,
        result.outcome,
        result.symbol,
        result.direction,
        format_price(result.entry_price),
        format_price(result.exit_price),
        result.pnl_percent
    )
}

fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.6}", price)
    }
}

fn format_pct(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{}", rounded)
    }
}

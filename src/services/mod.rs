//! External collaborators: market data and alert delivery.

pub mod binance;
pub mod discord;
pub mod market_data;
pub mod messages;
pub mod notifier;
pub mod telegram;

pub use binance::BinanceMarketDataProvider;
pub use discord::DiscordNotifier;
pub use market_data::{MarketDataError, MarketDataProvider};
pub use notifier::{NotificationError, Notifier, NotifierSet};
pub use telegram::TelegramNotifier;

//! Signal evaluation: confluence, scoring, ranking and deduplication.

pub mod categories;
pub mod confluence;
pub mod dedup;
pub mod ranking;
pub mod scoring;

pub use categories::*;
pub use confluence::*;
pub use dedup::SignalDeduplicator;
pub use ranking::RankingSelector;
pub use scoring::*;

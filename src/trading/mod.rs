//! Paper trading.

pub mod lifecycle;
pub mod registry;

pub use lifecycle::{TradeError, TradeLifecycleManager};
pub use registry::{Confirmation, TradeRegistry};

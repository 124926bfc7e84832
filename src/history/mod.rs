mod classifier;
mod types;

pub use classifier::{is_real_trading_symbol, NON_TRADING_KEYWORDS};
pub use types::{Deal, DealEntry, HistoryWindow};

mod aggregator;
mod types;

pub use aggregator::aggregate;
pub use types::{AnalysisResult, Recommendation, SymbolStats, TradeSummary, WinRate};

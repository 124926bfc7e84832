pub mod analysis;
pub mod history;
pub mod report;
pub mod terminal;

// Re-export key types
pub use analysis::{aggregate, AnalysisResult, Recommendation, SymbolStats, TradeSummary, WinRate};

pub use history::{is_real_trading_symbol, Deal, DealEntry, HistoryWindow};

pub use report::{ConsoleSink, PresentationSink};

pub use terminal::{
    AnalysisError, AnalyzerConfig, Credentials, ErrorKind, ExportFileProvider, HistoryAnalyzer,
    SessionProvider,
};

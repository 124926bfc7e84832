mod config;
mod error;
mod export;
mod runner;
mod session;

pub use config::{AnalyzerConfig, DEFAULT_CONNECT_TIMEOUT};
pub use error::{AnalysisError, ConnectStage, ErrorKind};
pub use export::{AccountExport, ExportFileProvider, ExportSession};
pub use runner::{HistoryAnalyzer, STATUS_ANALYZING, STATUS_LAUNCHING, STATUS_LOGGING_IN};
pub use session::{Credentials, SessionGuard, SessionProvider};

use log::{error, info};

use super::config::AnalyzerConfig;
use super::error::AnalysisError;
use super::session::{SessionGuard, SessionProvider};
use crate::analysis::{aggregate, AnalysisResult};
use crate::report::PresentationSink;

pub const STATUS_LAUNCHING: &str = "Launching MetaTrader 5...";
pub const STATUS_LOGGING_IN: &str = "Logging in...";
pub const STATUS_ANALYZING: &str = "Connected. Analyzing trade history...";

/// Drives one connect, fetch, aggregate, close cycle against a terminal.
pub struct HistoryAnalyzer {
    config: AnalyzerConfig,
}

impl HistoryAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn run<P, S>(&self, provider: &mut P, sink: &mut S) -> Result<AnalysisResult, AnalysisError>
    where
        P: SessionProvider,
        S: PresentationSink + ?Sized,
    {
        report_status(sink, STATUS_LAUNCHING);
        let mut session = SessionGuard::connect(
            provider,
            &self.config.terminal_path,
            self.config.connect_timeout,
        )?;

        report_status(sink, STATUS_LOGGING_IN);
        session.login(&self.config.credentials)?;

        report_status(sink, STATUS_ANALYZING);
        let balance = session.account_balance()?;
        let window = self.config.history_window();
        let deals = session.fetch_deals(&window)?;
        drop(session);

        info!(
            "Fetched {} deals between {} and {}",
            deals.len(),
            window.from.format("%Y-%m-%d"),
            window.to.format("%Y-%m-%d %H:%M")
        );

        Ok(AnalysisResult::new(aggregate(&deals), balance))
    }

    /// Runs and hands the outcome to `sink`, whichever way it went.
    pub fn run_and_present<P, S>(
        &self,
        provider: &mut P,
        sink: &mut S,
    ) -> Result<AnalysisResult, AnalysisError>
    where
        P: SessionProvider,
        S: PresentationSink + ?Sized,
    {
        match self.run(provider, sink) {
            Ok(result) => {
                sink.show_results(&result);
                Ok(result)
            }
            Err(e) => {
                error!("Analysis failed: {}", e);
                sink.show_error(&e);
                Err(e)
            }
        }
    }
}

fn report_status<S: PresentationSink + ?Sized>(sink: &mut S, message: &str) {
    info!("{}", message);
    sink.status(message);
}

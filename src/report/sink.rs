use std::env;
use std::io::{self, Write};

use log::{info, warn};

use super::format::format_balance;
use crate::analysis::AnalysisResult;
use crate::terminal::AnalysisError;

pub const STATUS_COMPLETE: &str = "Analysis complete";
pub const STATUS_FAILED: &str = "Connection failed – check credentials, server name or path";

pub const NOTICE: &str = "Make sure to read the readme file that comes with this app for best results and to avoid common issues, such as:\n\n\
- Incorrect server name (check MT5 login screen for exact name if unsure)\n\
- Wrong MT5 path (browse to terminal64.exe or terminal.exe)\n\
- Account with no trade history (use a real account with past trades for meaningful analysis)";

/// Receives progress and the final outcome of an analysis run.
pub trait PresentationSink {
    fn status(&mut self, message: &str);

    fn show_results(&mut self, result: &AnalysisResult);

    fn show_error(&mut self, error: &AnalysisError);
}

/// Label/value rows in display order.
pub fn result_rows(result: &AnalysisResult) -> Vec<(&'static str, String)> {
    vec![
        ("Current Balance", format_balance(result.balance)),
        ("Real Trades", result.total_real_trades.to_string()),
        ("Win Rate", result.win_rate.to_string()),
        ("Recommendation", result.recommendation_text()),
    ]
}

/// Writes everything as plain text lines.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            warn!("Failed to write to console: {}", e);
        }
    }
}

impl<W: Write> PresentationSink for ConsoleSink<W> {
    fn status(&mut self, message: &str) {
        self.write_lines(&format!("[status] {}", message));
    }

    fn show_results(&mut self, result: &AnalysisResult) {
        self.status(STATUS_COMPLETE);
        for (label, value) in result_rows(result) {
            let mut lines = value.lines();
            let first = lines.next().unwrap_or_default();
            self.write_lines(&format!("{:<16} {}", format!("{}:", label), first));
            for line in lines {
                self.write_lines(&format!("{:<16} {}", "", line));
            }
        }
    }

    fn show_error(&mut self, error: &AnalysisError) {
        self.write_lines(&format!("Error: {}", error));
        if error.is_connection_stage() {
            self.status(STATUS_FAILED);
        }
    }
}

/// Emits the result as one pretty-printed JSON document; progress goes to the log.
pub struct JsonSink<W: Write> {
    out: W,
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json(&mut self, value: &serde_json::Value) {
        let written = serde_json::to_string_pretty(value)
            .map_err(io::Error::from)
            .and_then(|text| writeln!(self.out, "{}", text));
        if let Err(e) = written {
            warn!("Failed to write JSON output: {}", e);
        }
    }
}

impl<W: Write> PresentationSink for JsonSink<W> {
    fn status(&mut self, message: &str) {
        info!("{}", message);
    }

    fn show_results(&mut self, result: &AnalysisResult) {
        match serde_json::to_value(result) {
            Ok(value) => self.write_json(&value),
            Err(e) => warn!("Failed to serialize analysis result: {}", e),
        }
    }

    fn show_error(&mut self, error: &AnalysisError) {
        self.write_json(&serde_json::json!({ "error": error.to_string() }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, AnalysisError> {
        match value.trim().to_lowercase().as_str() {
            "" | "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnalysisError::configuration(format!(
                "WINLY_OUTPUT must be \"text\" or \"json\", got {:?}",
                other
            ))),
        }
    }

    /// Reads `WINLY_OUTPUT`, defaulting to text.
    pub fn from_env() -> Result<Self, AnalysisError> {
        env::var("WINLY_OUTPUT").map_or(Ok(OutputFormat::Text), |value| Self::parse(&value))
    }

    pub fn stdout_sink(&self) -> Box<dyn PresentationSink + Send> {
        match self {
            OutputFormat::Text => Box::new(ConsoleSink::stdout()),
            OutputFormat::Json => Box::new(JsonSink::stdout()),
        }
    }
}

use std::process::ExitCode;

use dotenv::dotenv;
use log::{error, info};

use winly::report::{OutputFormat, NOTICE};
use winly::{AnalyzerConfig, ExportFileProvider, HistoryAnalyzer};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    let format = match OutputFormat::from_env() {
        Ok(format) => format,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut sink = format.stdout_sink();

    if format == OutputFormat::Text {
        println!("Winly\n\n{}\n", NOTICE);
    }

    let config = match AnalyzerConfig::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            sink.show_error(&e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Analyzing account {} on {}",
        config.credentials.login, config.credentials.server
    );

    // The terminal API blocks; keep it off the runtime threads.
    let analyzer = HistoryAnalyzer::new(config);
    let outcome = tokio::task::spawn_blocking(move || {
        let mut provider = ExportFileProvider::new();
        analyzer.run_and_present(&mut provider, sink.as_mut())
    })
    .await;

    match outcome {
        Ok(Ok(_)) => ExitCode::SUCCESS,
        Ok(Err(_)) => ExitCode::FAILURE,
        Err(e) => {
            error!("Analysis task panicked: {}", e);
            ExitCode::FAILURE
        }
    }
}

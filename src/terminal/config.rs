use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};

use super::error::AnalysisError;
use super::session::Credentials;
use crate::history::HistoryWindow;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Everything one analysis run needs, validated before the terminal is touched.
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    pub credentials: Credentials,
    pub terminal_path: PathBuf,
    pub connect_timeout: Duration,
    pub history_from: DateTime<Utc>,
}

impl AnalyzerConfig {
    /// Validates raw form input the way the login form does.
    pub fn from_fields(
        account: &str,
        password: &str,
        server: &str,
        terminal_path: &str,
    ) -> Result<Self, AnalysisError> {
        let account = account.trim();
        let password = password.trim();
        let server = server.trim();
        let terminal_path = terminal_path.trim();

        if [account, password, server, terminal_path]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(AnalysisError::configuration(
                "Please fill all fields and select MT5 path.",
            ));
        }

        let login: u64 = account
            .parse()
            .map_err(|_| AnalysisError::configuration("Account ID must be a number."))?;

        let terminal_path = PathBuf::from(terminal_path);
        if !terminal_path.exists() {
            return Err(AnalysisError::configuration(format!(
                "MT5 terminal not found at:\n{}",
                terminal_path.display()
            )));
        }

        Ok(Self {
            credentials: Credentials::new(login, password, server),
            terminal_path,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            history_from: HistoryWindow::history_epoch(),
        })
    }

    pub fn load_from_env() -> Result<Self, AnalysisError> {
        let var = |name: &str| env::var(name).unwrap_or_default();

        let mut config = Self::from_fields(
            &var("WINLY_ACCOUNT"),
            &var("WINLY_PASSWORD"),
            &var("WINLY_SERVER"),
            &var("WINLY_TERMINAL_PATH"),
        )?;

        if let Ok(from) = env::var("WINLY_HISTORY_FROM") {
            config.history_from = parse_history_from(&from)?;
        }

        if let Ok(timeout) = env::var("WINLY_CONNECT_TIMEOUT_MS") {
            let millis: u64 = timeout.trim().parse().map_err(|_| {
                AnalysisError::configuration(format!(
                    "WINLY_CONNECT_TIMEOUT_MS must be a number of milliseconds, got {:?}",
                    timeout
                ))
            })?;
            config.connect_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// History range for a run starting now.
    pub fn history_window(&self) -> HistoryWindow {
        HistoryWindow::until_now(self.history_from)
    }
}

fn parse_history_from(value: &str) -> Result<DateTime<Utc>, AnalysisError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AnalysisError::configuration(format!(
                "WINLY_HISTORY_FROM must be a YYYY-MM-DD date, got {:?}",
                value
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn existing_path() -> String {
        env!("CARGO_MANIFEST_DIR").to_string()
    }

    #[test]
    fn missing_fields_are_rejected() {
        let err = AnalyzerConfig::from_fields("123", "  ", "Broker-Demo", &existing_path())
            .unwrap_err();
        assert_eq!(err.to_string(), "Please fill all fields and select MT5 path.");
    }

    #[test]
    fn account_must_be_numeric() {
        let err = AnalyzerConfig::from_fields("abc", "pw", "Broker-Demo", &existing_path())
            .unwrap_err();
        assert_eq!(err.to_string(), "Account ID must be a number.");
    }

    #[test]
    fn account_accepts_plus_sign_but_not_negative() {
        let config =
            AnalyzerConfig::from_fields("+123", "pw", "Broker-Demo", &existing_path()).unwrap();
        assert_eq!(config.credentials.login, 123);

        let err = AnalyzerConfig::from_fields("-123", "pw", "Broker-Demo", &existing_path())
            .unwrap_err();
        assert_eq!(err.to_string(), "Account ID must be a number.");
    }

    #[test]
    fn terminal_path_must_exist() {
        let err = AnalyzerConfig::from_fields("123", "pw", "Broker-Demo", "/no/such/terminal64.exe")
            .unwrap_err();
        assert!(err.to_string().starts_with("MT5 terminal not found at:\n"));
    }

    #[test]
    fn valid_fields_are_trimmed() {
        let config =
            AnalyzerConfig::from_fields(" 5012345 ", " secret ", " Broker-Demo ", &existing_path())
                .unwrap();

        assert_eq!(config.credentials.login, 5_012_345);
        assert_eq!(config.credentials.password.as_str(), "secret");
        assert_eq!(config.credentials.server, "Broker-Demo");
        assert_eq!(config.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
        assert_eq!(config.history_from, HistoryWindow::history_epoch());
    }

    #[test]
    fn history_from_parses_dates() {
        assert_eq!(
            parse_history_from("2023-06-15").unwrap(),
            Utc.with_ymd_and_hms(2023, 6, 15, 0, 0, 0).unwrap()
        );
        assert!(parse_history_from("15/06/2023").is_err());
    }
}

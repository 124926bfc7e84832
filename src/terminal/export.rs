use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::error::AnalysisError;
use super::session::{Credentials, SessionProvider};
use crate::history::{Deal, HistoryWindow};

// Terminal result codes reported for the failure modes an export can hit.
const RES_E_INVALID_PARAMS: i32 = -2;
const RES_E_AUTH_FAILED: i32 = -6;
const RES_E_INTERNAL_FAIL_INIT: i32 = -10003;

/// Account snapshot exported from a terminal.
#[derive(Clone, Debug, Deserialize)]
pub struct AccountExport {
    pub login: u64,
    pub server: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub deals: Option<Vec<Deal>>,
}

#[derive(Debug)]
pub struct ExportSession {
    account: AccountExport,
}

/// Replays an exported account instead of talking to a live terminal.
/// The terminal path points at the JSON export.
#[derive(Debug, Default)]
pub struct ExportFileProvider {
    open_sessions: usize,
}

impl ExportFileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_sessions(&self) -> usize {
        self.open_sessions
    }
}

impl SessionProvider for ExportFileProvider {
    type Session = ExportSession;

    fn connect(&mut self, terminal: &Path, timeout: Duration) -> Result<ExportSession, AnalysisError> {
        info!("Launching terminal from export {}", terminal.display());
        debug!("Connect timeout {:?} (not used for file exports)", timeout);

        let raw = fs::read_to_string(terminal).map_err(|e| {
            AnalysisError::connection_init(RES_E_INTERNAL_FAIL_INIT, e.to_string())
        })?;
        let account: AccountExport = serde_json::from_str(&raw).map_err(|e| {
            AnalysisError::connection_init(RES_E_INVALID_PARAMS, format!("invalid export: {}", e))
        })?;

        self.open_sessions += 1;
        Ok(ExportSession { account })
    }

    fn login(&mut self, session: &ExportSession, credentials: &Credentials) -> Result<(), AnalysisError> {
        let account = &session.account;
        let password_ok = account
            .password
            .as_deref()
            .map_or(true, |expected| expected == credentials.password.as_str());

        if account.login != credentials.login || account.server != credentials.server || !password_ok {
            warn!("Login rejected for account {}", credentials.login);
            return Err(AnalysisError::connection_login(RES_E_AUTH_FAILED, "Authorization failed"));
        }
        Ok(())
    }

    fn account_balance(&mut self, session: &ExportSession) -> Result<Decimal, AnalysisError> {
        session
            .account
            .balance
            .ok_or_else(|| AnalysisError::data_unavailable("Could not retrieve account info"))
    }

    fn fetch_deals(
        &mut self,
        session: &ExportSession,
        window: &HistoryWindow,
    ) -> Result<Vec<Deal>, AnalysisError> {
        let deals = match &session.account.deals {
            Some(deals) => deals,
            None => return Ok(Vec::new()),
        };

        Ok(deals
            .iter()
            .filter(|deal| window.contains(&deal.time))
            .cloned()
            .collect())
    }

    fn close(&mut self, _session: &ExportSession) {
        self.open_sessions = self.open_sessions.saturating_sub(1);
    }
}

use std::path::Path;
use std::time::Duration;

use log::debug;
use rust_decimal::Decimal;
use zeroize::Zeroizing;

use super::error::AnalysisError;
use crate::history::{Deal, HistoryWindow};

/// Login details for one trading account.
#[derive(Clone)]
pub struct Credentials {
    pub login: u64,
    pub password: Zeroizing<String>,
    pub server: String,
}

impl Credentials {
    pub fn new(login: u64, password: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            login,
            password: Zeroizing::new(password.into()),
            server: server.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"***")
            .field("server", &self.server)
            .finish()
    }
}

/// Access to a trading terminal.
///
/// A session returned by `connect` must be handed back to `close` exactly
/// once, whatever happens in between; [`SessionGuard`] takes care of that.
#[cfg_attr(test, mockall::automock(type Session = u32;))]
pub trait SessionProvider {
    type Session;

    fn connect(&mut self, terminal: &Path, timeout: Duration)
        -> Result<Self::Session, AnalysisError>;

    fn login(
        &mut self,
        session: &Self::Session,
        credentials: &Credentials,
    ) -> Result<(), AnalysisError>;

    fn account_balance(&mut self, session: &Self::Session) -> Result<Decimal, AnalysisError>;

    fn fetch_deals(
        &mut self,
        session: &Self::Session,
        window: &HistoryWindow,
    ) -> Result<Vec<Deal>, AnalysisError>;

    fn close(&mut self, session: &Self::Session);
}

/// Open session that is closed when dropped.
pub struct SessionGuard<'p, P: SessionProvider> {
    provider: &'p mut P,
    session: P::Session,
}

impl<'p, P: SessionProvider> SessionGuard<'p, P> {
    pub fn connect(
        provider: &'p mut P,
        terminal: &Path,
        timeout: Duration,
    ) -> Result<Self, AnalysisError> {
        let session = provider.connect(terminal, timeout)?;
        Ok(Self { provider, session })
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<(), AnalysisError> {
        self.provider.login(&self.session, credentials)
    }

    pub fn account_balance(&mut self) -> Result<Decimal, AnalysisError> {
        self.provider.account_balance(&self.session)
    }

    pub fn fetch_deals(&mut self, window: &HistoryWindow) -> Result<Vec<Deal>, AnalysisError> {
        self.provider.fetch_deals(&self.session, window)
    }
}

impl<P: SessionProvider> Drop for SessionGuard<'_, P> {
    fn drop(&mut self) {
        debug!("Shutting down terminal session");
        self.provider.close(&self.session);
    }
}

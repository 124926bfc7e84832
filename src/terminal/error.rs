use std::fmt;
use thiserror::Error;

/// Which half of opening a session failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectStage {
    Initialize,
    Login,
}

impl fmt::Display for ConnectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectStage::Initialize => f.write_str("initialize"),
            ConnectStage::Login => f.write_str("login"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("{0}")]
    Configuration(String),

    #[error("MT5 {stage} failed: {code} → {message}")]
    Connection {
        stage: ConnectStage,
        code: i32,
        message: String,
    },

    #[error("{0}")]
    DataUnavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Connection,
    DataUnavailable,
}

impl AnalysisError {
    pub fn configuration(message: impl Into<String>) -> Self {
        AnalysisError::Configuration(message.into())
    }

    pub fn connection_init(code: i32, message: impl Into<String>) -> Self {
        AnalysisError::Connection {
            stage: ConnectStage::Initialize,
            code,
            message: message.into(),
        }
    }

    pub fn connection_login(code: i32, message: impl Into<String>) -> Self {
        AnalysisError::Connection {
            stage: ConnectStage::Login,
            code,
            message: message.into(),
        }
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        AnalysisError::DataUnavailable(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Configuration(_) => ErrorKind::Configuration,
            AnalysisError::Connection { .. } => ErrorKind::Connection,
            AnalysisError::DataUnavailable(_) => ErrorKind::DataUnavailable,
        }
    }

    /// True once the terminal has been contacted; configuration problems are
    /// caught before that.
    pub fn is_connection_stage(&self) -> bool {
        self.kind() != ErrorKind::Configuration
    }
}

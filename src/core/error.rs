use std::io;
use thiserror::Error;

/// Unified error type for the banking assistant.
///
/// Configuration problems are kept separate from service failures so that
/// startup can refuse to run on a missing credential while a flaky upstream
/// call only fails the one exchange that hit it.
#[derive(Error, Debug)]
pub enum BankbotError {
    /// The completion endpoint answered with an error or an unusable body
    #[error("model service error: {0}")]
    Api(String),

    /// Missing or invalid configuration (credential, config file)
    #[error("configuration error: {0}")]
    Config(String),

    /// User input errors (empty question, bad command, editor failure)
    #[error("input error: {0}")]
    Input(String),

    /// Transport-level failures before an HTTP response was obtained
    #[error("network error: {0}")]
    Network(String),

    /// JSON/YAML encoding or decoding failures
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl From<reqwest::Error> for BankbotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BankbotError::Network(format!("request timed out: {}", err))
        } else if err.is_connect() {
            BankbotError::Network(format!("connection failed: {}", err))
        } else if err.is_status() {
            BankbotError::Api(format!("service returned error status: {}", err))
        } else {
            BankbotError::Network(format!("request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for BankbotError {
    fn from(err: serde_json::Error) -> Self {
        BankbotError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for BankbotError {
    fn from(err: serde_yml::Error) -> Self {
        BankbotError::Serialization(format!("YAML error: {}", err))
    }
}

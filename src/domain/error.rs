//! Domain error types.

use super::symbol::Symbol;

/// Top-level error type for coarsefine.
#[derive(Debug, thiserror::Error)]
pub enum CoarseFineError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config section [{section}]")]
    ConfigMissing { section: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("order rejected for {symbol}: {reason}")]
    Order { symbol: Symbol, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoarseFineError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        CoarseFineError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&CoarseFineError> for std::process::ExitCode {
    fn from(err: &CoarseFineError) -> Self {
        let code: u8 = match err {
            CoarseFineError::Io(_) | CoarseFineError::Order { .. } => 1,
            CoarseFineError::ConfigParse { .. }
            | CoarseFineError::ConfigMissing { .. }
            | CoarseFineError::ConfigInvalid { .. } => 2,
            CoarseFineError::Data { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}

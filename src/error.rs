//! Error taxonomy for the scoring and aggregation core.
//!
//! Scoring itself is total over its input (empty or unmatched text resolves to
//! a neutral, low-confidence result), so the only failures are usage errors on
//! the aggregation side and malformed custom lexicons.

use thiserror::Error;

/// Convenience result type used by the core.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Misaligned or incomplete caller input (e.g. metadata length mismatch).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A custom lexicon could not be parsed or failed validation.
    #[error("lexicon error: {message}")]
    Lexicon { message: String },
}

impl AnalysisError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn lexicon(message: impl Into<String>) -> Self {
        AnalysisError::Lexicon {
            message: message.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput { .. })
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::lexicon(err.to_string())
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please enter an acknowledgment number";
pub const NO_RECORDS_MESSAGE: &str = "No records found";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Application,
    Transport,
    Decode,
}

/// Terminal outcome of a lookup that did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("acknowledgment number is empty")]
    Validation,
    #[error("lookup service returned {status}: {message}")]
    Application { status: u16, message: String },
    #[error("lookup request failed: {0}")]
    Transport(String),
    #[error("lookup response could not be decoded: {0}")]
    Decode(String),
}

impl LookupError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LookupError::Validation => ErrorCode::Validation,
            LookupError::Application { .. } => ErrorCode::Application,
            LookupError::Transport(_) => ErrorCode::Transport,
            LookupError::Decode(_) => ErrorCode::Decode,
        }
    }

    /// The text shown on the form. Transport and decode details stay in the log.
    pub fn user_message(&self) -> &str {
        match self {
            LookupError::Validation => VALIDATION_MESSAGE,
            LookupError::Application { message, .. } => message,
            LookupError::Transport(_) | LookupError::Decode(_) => TRANSPORT_FAILURE_MESSAGE,
        }
    }
}

#[derive(Debug, Error)]
#[error("unsupported year '{0}', expected 2024 or 2025")]
pub struct UnknownYear(pub String);

use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Invalid request")]
    InvalidRequest,
    #[error("Option does not belong to poll")]
    OptionMismatch,
    #[error("Duplicate vote")]
    DuplicateVote,
    #[error("Resource not found")]
    NotFound,
    #[error("Storage error")]
    StorageError,
}

impl ErrorCode {
    pub const fn http_status(self) -> u16 {
        match self {
            ErrorCode::InvalidRequest | ErrorCode::OptionMismatch => 400,
            ErrorCode::DuplicateVote => 409,
            ErrorCode::NotFound => 404,
            ErrorCode::StorageError => 500,
        }
    }
}

/// JSON body of every failed API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

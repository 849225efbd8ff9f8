use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    #[error("Validation failed")]
    ValidationFailed,
    #[error("Resource not found")]
    NotFound,
    #[error("Resource conflict")]
    Conflict,
    #[error("Storage failure")]
    StorageFailure,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(details) = &self.details {
            write!(f, "{} ({})", self.message, details)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(code: ErrorCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// `id` names the missing record and lands in `details`.
    pub fn not_found(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self::with_details(ErrorCode::NotFound, message, id)
    }

    pub fn conflict(message: impl Into<String>, id: impl Into<String>) -> Self {
        Self::with_details(ErrorCode::Conflict, message, id)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageFailure, message)
    }

    pub fn is_validation(&self) -> bool { self.code == ErrorCode::ValidationFailed }
    pub fn is_not_found(&self) -> bool { self.code == ErrorCode::NotFound }
    pub fn is_conflict(&self) -> bool { self.code == ErrorCode::Conflict }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

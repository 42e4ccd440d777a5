use crate::models::ValidationFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("{0}")]
    ValidationFailed(ValidationFailure),
    #[error("Image processing error: {0}")]
    ImageProcessingError(String),
    #[error("OCR error: {0}")]
    OcrError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Whether an error was caused by what the caller submitted or by us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BadInput,
    Internal,
}

impl CardError {
    pub fn class(&self) -> ErrorClass {
        match self {
            CardError::ValidationFailed(_) => ErrorClass::BadInput,
            _ => ErrorClass::Internal,
        }
    }

    /// HTTP status for callers that put this crate behind an upload endpoint.
    pub fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::BadInput => 400,
            ErrorClass::Internal => 500,
        }
    }

    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            CardError::ValidationFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<ValidationFailure> for CardError {
    fn from(failure: ValidationFailure) -> Self {
        CardError::ValidationFailed(failure)
    }
}

impl From<std::io::Error> for CardError {
    fn from(err: std::io::Error) -> Self {
        CardError::IoError(err.to_string())
    }
}

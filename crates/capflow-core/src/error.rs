//! Capflow Error Definitions
//!
//! Defines error types used throughout the project.

use thiserror::Error;

use crate::subtitles::ParseError;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported subtitle format: {0}")]
    UnsupportedFormat(String),

    #[error("Subtitle parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

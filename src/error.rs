//! Error types for the captcha WASM core
//!
//! The taxonomy is deliberately small:
//! - Malformed calls fail fast with `InvalidArgument`
//! - Environmental unavailability (no canvas, missing ambient API) is never
//!   an error — those paths degrade to empty/false/partial results
//! - A validation mismatch is a normal `false`, not an error

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, CaptchaError>;

/// Error codes for programmatic handling on the JS side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Argument errors (1xx)
    InvalidArgument = 100,

    // Environment errors (2xx)
    EntropyError = 200,

    // Internal errors (9xx)
    InternalError = 900,
}

/// Main error type for the captcha WASM core
#[derive(Error, Debug, Clone)]
pub enum CaptchaError {
    /// Input outside the byte-range (U+0000..=U+00FF) contract of the
    /// obfuscation pipeline, or otherwise malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Entropy/RNG failure: {0}")]
    EntropyError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl CaptchaError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            CaptchaError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            CaptchaError::EntropyError(_) => ErrorCode::EntropyError,
            CaptchaError::InternalError(_) => ErrorCode::InternalError,
        }
    }
}

impl From<CaptchaError> for JsValue {
    fn from(err: CaptchaError) -> Self {
        JsValue::from_str(&format!("[{}] {}", err.code() as u32, err))
    }
}

//! Error types for message-types crate.

use thiserror::Error;

/// Errors raised by message schema construction and instance access.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Message '{message}' has no field '{field}'")]
    UnknownField { message: String, field: String },

    #[error("Message '{message}' declares field '{field}' twice")]
    DuplicateField { message: String, field: String },

    #[error("Message '{message}' uses field number {number} twice")]
    DuplicateNumber { message: String, number: u32 },

    #[error("Field '{field}' of message '{message}' has invalid number {number}")]
    InvalidNumber {
        message: String,
        field: String,
        number: u32,
    },

    #[error("Field '{field}' of message '{message}' expects {expected}, got {found}")]
    KindMismatch {
        message: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("JSON decode error for field '{field}': {reason}")]
    JsonDecode { field: String, reason: String },
}

/// Result type alias for message-types operations.
pub type Result<T> = std::result::Result<T, MessageError>;

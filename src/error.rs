//! Error types for the translation engine.

use message_types::MessageError;
use record_core::SchemaError;
use thiserror::Error;

/// Errors raised while resolving converters or translating values.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No converter is registered for a column's type-kind.
    #[error("No converter registered for type kind '{kind}' (field '{field}')")]
    UnsupportedTypeKind { kind: String, field: String },

    /// A value has no counterpart in the other value universe.
    #[error("Value of type {value_type} in field '{field}' cannot be represented on the {target} side")]
    Unrepresentable {
        field: String,
        value_type: String,
        target: &'static str,
    },

    /// A value does not have the shape its converter expects.
    #[error("Malformed value in field '{field}': {reason}")]
    MalformedValue { field: String, reason: String },

    /// `compose` was called without any message type.
    #[error("Cannot compose an empty list of message types")]
    EmptyComposition,

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

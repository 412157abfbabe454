//! Message-side types for schema-bridge.
//!
//! This crate models the RPC message framework the translation engine
//! produces and consumes:
//!
//! - [`MessageType`] - Shared handle to an immutable message schema
//! - [`MessageSchemaBuilder`] - Validates field names and numbers and
//!   produces a [`MessageType`]
//! - [`MessageInstance`] / [`MessageValue`] - Mutable, kind-checked values
//! - [`date_message`] / [`time_message`] - The fixed calendar message types
//!
//! Serialization helpers render types as `.proto` source ([`render_proto`])
//! and instances as JSON ([`message_to_json`], [`message_from_json`]).
//!
//! # Example
//!
//! ```rust
//! use message_types::{FieldKind, MessageFieldDescriptor, MessageType, MessageValue};
//!
//! let user = MessageType::builder("User")
//!     .field(MessageFieldDescriptor::new("id", 1, FieldKind::Int64).required(true))
//!     .field(MessageFieldDescriptor::new("name", 2, FieldKind::String))
//!     .build()
//!     .unwrap();
//!
//! let mut instance = user.instantiate();
//! instance.set("id", MessageValue::Int64(7)).unwrap();
//! assert!(instance.set("id", MessageValue::from("seven")).is_err());
//! ```

pub mod error;
pub mod json;
pub mod message;
pub mod proto;
pub mod render;
pub mod well_known;

pub use error::{MessageError, Result};
pub use json::{message_from_json, message_to_json};
pub use message::{MessageInstance, MessageValue};
pub use proto::{
    FieldKind, MessageFieldDescriptor, MessageSchema, MessageSchemaBuilder, MessageType,
    MAX_FIELD_NUMBER,
};
pub use render::{render_message, render_proto};
pub use well_known::{date_message, time_message, DATE_MESSAGE, TIME_MESSAGE};

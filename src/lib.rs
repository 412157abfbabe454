//! Schema Bridge Library
//!
//! Bidirectional translation between persistent-record schemas (named, typed
//! columns with nullability) and RPC message schemas (named, numbered, typed
//! fields).
//!
//! # Features
//!
//! - Converter registry: column type-kind to converter, with per-call overrides
//! - Field resolution: which fields a translation copies, with `only`/`exclude`
//! - Forward and reverse translation of instances (`to_message`, `to_entity`)
//! - Message type synthesis from a record schema (`model_message`)
//! - Collection wrappers and composition of message types
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use record_core::{ColumnDefinition, ColumnType, Record, RecordSchema, RecordValue};
//! use schema_bridge::{model_message, to_entity, to_message, ConversionOptions};
//!
//! let schema = Arc::new(RecordSchema::new(
//!     "User",
//!     vec![
//!         ColumnDefinition::required("id", ColumnType::BigInteger),
//!         ColumnDefinition::nullable("name", ColumnType::Text),
//!     ],
//! ));
//! let options = ConversionOptions::default();
//! let message_type = model_message(&schema, &options).unwrap();
//!
//! let user = Record::with_values(
//!     schema.clone(),
//!     [("id", RecordValue::Integer(7)), ("name", RecordValue::from("Ada"))],
//! );
//! let message = to_message(&user, message_type.into(), &options).unwrap();
//! let back = to_entity(&message, schema.into(), &options).unwrap();
//! assert_eq!(back.get("name"), Some(&RecordValue::from("Ada")));
//! ```

pub mod compose;
pub mod config;
pub mod converter;
pub mod error;
pub mod fields;
pub mod forward;
pub mod options;
pub mod registry;
pub mod reverse;
pub mod synthesize;

pub use compose::{collection_message, compose, list_message};
pub use converter::{
    Converter, DateConverter, FieldContext, IdentityConverter, ScalarConverter, TimeConverter,
};
pub use error::{BridgeError, Result};
pub use fields::{resolve_fields, FieldSelection, RecordRef};
pub use forward::{to_message, MessageTarget};
pub use options::ConversionOptions;
pub use registry::{converter_by_name, ConverterOverrides, ConverterRef, ConverterRegistry};
pub use reverse::{to_entity, EntityTarget};
pub use synthesize::model_message;

//! Record-side types for schema-bridge.
//!
//! This crate models the persistent-record collaborator that the translation
//! engine consumes:
//!
//! - [`ColumnType`] - The storage type of a column; its [`ColumnType::kind`]
//!   is the converter lookup key
//! - [`ColumnDefinition`] / [`RecordSchema`] - Named, ordered columns with
//!   nullability
//! - [`SchemaCatalog`] - Record schemas loaded from YAML
//! - [`RecordValue`] - Native column values, including dates and
//!   time-of-day values with optional zones
//! - [`Record`] - A record instance bound to its schema
//!
//! # Architecture
//!
//! ```text
//! record-core (this crate)      message-types
//!        │                            │
//!        └──────── schema-bridge ─────┘
//!                (converters, resolver,
//!                 translators, synthesizer)
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use record_core::{ColumnDefinition, ColumnType, Record, RecordSchema, RecordValue};
//!
//! let schema = Arc::new(RecordSchema::new(
//!     "User",
//!     vec![
//!         ColumnDefinition::required("id", ColumnType::BigInteger),
//!         ColumnDefinition::nullable("name", ColumnType::Text),
//!     ],
//! ));
//!
//! let mut user = Record::new(schema);
//! user.set("id", RecordValue::Integer(7));
//! assert_eq!(user.get("id"), Some(&RecordValue::Integer(7)));
//! ```

pub mod json;
pub mod record;
pub mod schema;
pub mod types;
pub mod values;

pub use json::{record_from_json, record_to_json, value_from_json, value_to_json, ValueError};
pub use record::Record;
pub use schema::{ColumnDefinition, RecordSchema, SchemaCatalog, SchemaError};
pub use types::ColumnType;
pub use values::{RecordValue, TimeOfDay, TimeZoneInfo};

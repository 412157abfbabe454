//! Message schema definitions.
//!
//! A message schema is an ordered list of named, numbered, typed fields. Field
//! numbers are the wire identity of a field: positive and unique within one
//! schema.
//!
//! Schemas are assembled with [`MessageSchemaBuilder`] and shared through the
//! cheap-to-clone [`MessageType`] handle.

use crate::error::{MessageError, Result};
use crate::message::{MessageInstance, MessageValue};
use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::Arc;

/// Largest field number the wire format allows.
pub const MAX_FIELD_NUMBER: u32 = 536_870_911;

/// Kind of value a message field carries.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Bool,
    Int64,
    Double,
    String,
    Bytes,
    /// Point in time (`google.protobuf.Timestamp`)
    Timestamp,
    /// Nested message of the given type
    Message(MessageType),
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FieldKind {
    /// Get the human-readable type name.
    pub fn type_name(&self) -> String {
        match self {
            FieldKind::Bool => "bool".to_string(),
            FieldKind::Int64 => "int64".to_string(),
            FieldKind::Double => "double".to_string(),
            FieldKind::String => "string".to_string(),
            FieldKind::Bytes => "bytes".to_string(),
            FieldKind::Timestamp => "timestamp".to_string(),
            FieldKind::Message(ty) => format!("message:{}", ty.name()),
        }
    }

    /// Type name as written in a `.proto` file.
    pub fn proto_type_name(&self) -> &str {
        match self {
            FieldKind::Bool => "bool",
            FieldKind::Int64 => "int64",
            FieldKind::Double => "double",
            FieldKind::String => "string",
            FieldKind::Bytes => "bytes",
            FieldKind::Timestamp => "google.protobuf.Timestamp",
            FieldKind::Message(ty) => ty.name(),
        }
    }

    /// Whether a single (non-repeated) value fits this kind.
    pub fn accepts(&self, value: &MessageValue) -> bool {
        match (self, value) {
            (_, MessageValue::Null) => true,
            (FieldKind::Bool, MessageValue::Bool(_))
            | (FieldKind::Int64, MessageValue::Int64(_))
            | (FieldKind::Double, MessageValue::Double(_))
            | (FieldKind::String, MessageValue::String(_))
            | (FieldKind::Bytes, MessageValue::Bytes(_))
            | (FieldKind::Timestamp, MessageValue::Timestamp(_)) => true,
            (FieldKind::Message(ty), MessageValue::Message(instance)) => {
                instance.message_type() == ty
            }
            _ => false,
        }
    }
}

/// Describes a single field in a message schema.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFieldDescriptor {
    /// Field name
    pub name: String,
    /// Field number (tag)
    pub number: u32,
    /// Field kind
    pub kind: FieldKind,
    /// Whether the field holds a list of values
    pub repeated: bool,
    /// Whether a value must be present
    pub required: bool,
}

impl MessageFieldDescriptor {
    /// Create an optional, non-repeated field.
    pub fn new(name: impl Into<String>, number: u32, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            number,
            kind,
            repeated: false,
            required: false,
        }
    }

    /// Mark the field as repeated.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Set whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Copy of this descriptor carrying a different field number.
    pub fn with_number(&self, number: u32) -> Self {
        Self {
            number,
            ..self.clone()
        }
    }

    /// Whether `value` may be stored in this field.
    pub fn accepts(&self, value: &MessageValue) -> bool {
        match value {
            MessageValue::Null => true,
            MessageValue::Repeated(items) if self.repeated => {
                items.iter().all(|item| self.kind.accepts(item))
            }
            _ if self.repeated => false,
            single => self.kind.accepts(single),
        }
    }
}

/// Describes a message type (schema).
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSchema {
    name: String,
    fields: Vec<MessageFieldDescriptor>,
    index: HashMap<String, usize>,
}

impl MessageSchema {
    /// Message type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fields in definition order.
    pub fn all_fields(&self) -> &[MessageFieldDescriptor] {
        &self.fields
    }

    /// Get a field descriptor by name.
    pub fn field_by_name(&self, name: &str) -> Option<&MessageFieldDescriptor> {
        self.index.get(name).and_then(|&idx| self.fields.get(idx))
    }

    /// Get a field descriptor by number.
    pub fn field_by_number(&self, number: u32) -> Option<&MessageFieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// Field names in definition order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// Shared handle to an immutable message schema.
///
/// Two handles compare equal when they point at the same schema or at schemas
/// with the same name and fields.
#[derive(Debug, Clone)]
pub struct MessageType(Arc<MessageSchema>);

impl MessageType {
    /// Start building a new message type.
    pub fn builder(name: impl Into<String>) -> MessageSchemaBuilder {
        MessageSchemaBuilder::new(name)
    }

    /// Create an empty instance of this type.
    pub fn instantiate(&self) -> MessageInstance {
        MessageInstance::new(self.clone())
    }

    /// Create an instance populated with the given values.
    pub fn new_instance<I, K>(&self, values: I) -> Result<MessageInstance>
    where
        I: IntoIterator<Item = (K, MessageValue)>,
        K: Into<String>,
    {
        let mut instance = self.instantiate();
        for (name, value) in values {
            instance.set(name, value)?;
        }
        Ok(instance)
    }

    /// Assemble a schema whose fields are known to be valid.
    pub(crate) fn from_trusted(name: &str, fields: Vec<MessageFieldDescriptor>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.name.clone(), idx))
            .collect();
        Self(Arc::new(MessageSchema {
            name: name.to_string(),
            fields,
            index,
        }))
    }
}

impl Deref for MessageType {
    type Target = MessageSchema;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for MessageType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

/// Builder that validates and assembles a message type.
#[derive(Debug, Clone)]
pub struct MessageSchemaBuilder {
    name: String,
    fields: Vec<MessageFieldDescriptor>,
}

impl MessageSchemaBuilder {
    /// Start a message type with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: MessageFieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = MessageFieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Validate field names and numbers and produce the message type.
    pub fn build(self) -> Result<MessageType> {
        let mut names = HashSet::new();
        let mut numbers = HashSet::new();

        for field in &self.fields {
            if field.number == 0 || field.number > MAX_FIELD_NUMBER {
                return Err(MessageError::InvalidNumber {
                    message: self.name.clone(),
                    field: field.name.clone(),
                    number: field.number,
                });
            }
            if !names.insert(field.name.as_str()) {
                return Err(MessageError::DuplicateField {
                    message: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if !numbers.insert(field.number) {
                return Err(MessageError::DuplicateNumber {
                    message: self.name.clone(),
                    number: field.number,
                });
            }
        }

        Ok(MessageType::from_trusted(&self.name, self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> MessageType {
        MessageType::builder("Point")
            .field(MessageFieldDescriptor::new("x", 1, FieldKind::Double))
            .field(MessageFieldDescriptor::new("y", 2, FieldKind::Double))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_and_lookup() {
        let ty = point();
        assert_eq!(ty.name(), "Point");
        assert_eq!(ty.field_names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(ty.field_by_name("y").unwrap().number, 2);
        assert_eq!(ty.field_by_number(1).unwrap().name, "x");
        assert!(ty.field_by_name("z").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = MessageType::builder("Bad")
            .field(MessageFieldDescriptor::new("a", 1, FieldKind::Bool))
            .field(MessageFieldDescriptor::new("a", 2, FieldKind::Bool))
            .build();
        assert!(matches!(result, Err(MessageError::DuplicateField { .. })));
    }

    #[test]
    fn test_duplicate_number_rejected() {
        let result = MessageType::builder("Bad")
            .field(MessageFieldDescriptor::new("a", 3, FieldKind::Bool))
            .field(MessageFieldDescriptor::new("b", 3, FieldKind::Bool))
            .build();
        assert!(matches!(result, Err(MessageError::DuplicateNumber { number: 3, .. })));
    }

    #[test]
    fn test_zero_number_rejected() {
        let result = MessageType::builder("Bad")
            .field(MessageFieldDescriptor::new("a", 0, FieldKind::Bool))
            .build();
        assert!(matches!(result, Err(MessageError::InvalidNumber { .. })));
    }

    #[test]
    fn test_handle_equality() {
        let a = point();
        let b = point();
        assert_eq!(a, a.clone());
        assert_eq!(a, b);

        let other = MessageType::builder("Point").build().unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_with_number_copies() {
        let ty = point();
        let original = ty.field_by_name("y").unwrap();
        let renumbered = original.with_number(7);
        assert_eq!(renumbered.number, 7);
        assert_eq!(original.number, 2);
    }

    #[test]
    fn test_repeated_accepts() {
        let tags = MessageFieldDescriptor::new("tags", 1, FieldKind::String).repeated();
        assert!(tags.accepts(&MessageValue::Repeated(vec![MessageValue::String(
            "a".to_string()
        )])));
        assert!(!tags.accepts(&MessageValue::String("a".to_string())));
        assert!(!tags.accepts(&MessageValue::Repeated(vec![MessageValue::Int64(1)])));
        assert!(tags.accepts(&MessageValue::Null));
    }

    #[test]
    fn test_nested_message_kind() {
        let ty = point();
        let field = MessageFieldDescriptor::new("origin", 1, FieldKind::Message(ty.clone()));
        assert!(field.accepts(&MessageValue::Message(Box::new(ty.instantiate()))));

        let other = MessageType::builder("Other").build().unwrap();
        assert!(!field.accepts(&MessageValue::Message(Box::new(other.instantiate()))));
        assert_eq!(field.kind.proto_type_name(), "Point");
    }
}

//! Message instances and field values.
//!
//! A [`MessageInstance`] is a mutable value of some [`MessageType`]. Every
//! assignment is checked against the field's descriptor, so an instance can
//! never hold a value its schema does not allow.

use crate::error::{MessageError, Result};
use crate::proto::{MessageFieldDescriptor, MessageType};
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;

/// Value stored in a message field.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageValue {
    Bool(bool),
    Int64(i64),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<FixedOffset>),
    Message(Box<MessageInstance>),
    Repeated(Vec<MessageValue>),
    /// Field present but unset
    Null,
}

impl MessageValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, MessageValue::Null)
    }

    /// Short name of the value's variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            MessageValue::Bool(_) => "bool",
            MessageValue::Int64(_) => "int64",
            MessageValue::Double(_) => "double",
            MessageValue::String(_) => "string",
            MessageValue::Bytes(_) => "bytes",
            MessageValue::Timestamp(_) => "timestamp",
            MessageValue::Message(_) => "message",
            MessageValue::Repeated(_) => "repeated",
            MessageValue::Null => "null",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MessageValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MessageValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MessageValue::Double(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MessageValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            MessageValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageInstance> {
        match self {
            MessageValue::Message(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for MessageValue {
    fn from(v: bool) -> Self {
        MessageValue::Bool(v)
    }
}

impl From<i64> for MessageValue {
    fn from(v: i64) -> Self {
        MessageValue::Int64(v)
    }
}

impl From<f64> for MessageValue {
    fn from(v: f64) -> Self {
        MessageValue::Double(v)
    }
}

impl From<&str> for MessageValue {
    fn from(v: &str) -> Self {
        MessageValue::String(v.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(v: String) -> Self {
        MessageValue::String(v)
    }
}

impl From<MessageInstance> for MessageValue {
    fn from(v: MessageInstance) -> Self {
        MessageValue::Message(Box::new(v))
    }
}

/// A value of some message type.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageInstance {
    message_type: MessageType,
    values: HashMap<String, MessageValue>,
}

impl MessageInstance {
    /// Create an empty instance of the given type.
    pub fn new(message_type: MessageType) -> Self {
        Self {
            message_type,
            values: HashMap::new(),
        }
    }

    /// Type of this instance.
    pub fn message_type(&self) -> &MessageType {
        &self.message_type
    }

    /// Descriptors of all fields of this instance's type.
    pub fn all_fields(&self) -> &[MessageFieldDescriptor] {
        self.message_type.all_fields()
    }

    /// Get a field value; unset fields read as `None`.
    pub fn get(&self, name: &str) -> Option<&MessageValue> {
        self.values.get(name)
    }

    /// Assign a field value after checking it against the field descriptor.
    pub fn set(&mut self, name: impl Into<String>, value: MessageValue) -> Result<()> {
        let name = name.into();
        let field = self.message_type.field_by_name(&name).ok_or_else(|| {
            MessageError::UnknownField {
                message: self.message_type.name().to_string(),
                field: name.clone(),
            }
        })?;

        if !field.accepts(&value) {
            let expected = if field.repeated {
                format!("repeated {}", field.kind)
            } else {
                field.kind.to_string()
            };
            return Err(MessageError::KindMismatch {
                message: self.message_type.name().to_string(),
                field: name,
                expected,
                found: value.type_name().to_string(),
            });
        }

        self.values.insert(name, value);
        Ok(())
    }

    /// All set values.
    pub fn values(&self) -> &HashMap<String, MessageValue> {
        &self.values
    }

    /// Names of required fields that are unset or null.
    pub fn missing_required(&self) -> Vec<&str> {
        self.all_fields()
            .iter()
            .filter(|f| f.required)
            .filter(|f| self.get(&f.name).map_or(true, MessageValue::is_null))
            .map(|f| f.name.as_str())
            .collect()
    }
}

//! Record to message translation.

use crate::converter::FieldContext;
use crate::error::Result;
use crate::fields::{resolve_fields, RecordRef};
use crate::options::ConversionOptions;
use message_types::{MessageInstance, MessageType, MessageValue};
use record_core::{Record, RecordValue};
use tracing::{debug, trace};

/// Message side of a forward translation.
#[derive(Debug, Clone)]
pub enum MessageTarget {
    /// Build a new instance of this type
    Type(MessageType),
    /// Overwrite the translated fields of this instance and return it
    Instance(MessageInstance),
}

impl MessageTarget {
    pub fn message_type(&self) -> &MessageType {
        match self {
            MessageTarget::Type(ty) => ty,
            MessageTarget::Instance(instance) => instance.message_type(),
        }
    }
}

impl From<MessageType> for MessageTarget {
    fn from(ty: MessageType) -> Self {
        MessageTarget::Type(ty)
    }
}

impl From<MessageInstance> for MessageTarget {
    fn from(instance: MessageInstance) -> Self {
        MessageTarget::Instance(instance)
    }
}

/// Translate `record` into a message.
///
/// Every translatable field that is also a column of the record is converted
/// with the converter registered for the column's kind. Null and unset
/// values are copied as null without touching the converter. Fields whose
/// kind is mapped to no converter are left alone.
///
/// Fails on the first field that cannot be converted; nothing is returned
/// partially filled.
pub fn to_message(
    record: &Record,
    target: MessageTarget,
    options: &ConversionOptions,
) -> Result<MessageInstance> {
    let registry = options.registry();
    let schema = record.schema();
    let selection = resolve_fields(
        RecordRef::Instance(record),
        target.message_type(),
        &options.only,
        &options.exclude,
    );

    let mut values = Vec::with_capacity(selection.translatable.len());
    for name in selection.translatable {
        let Some(column) = schema.get_column(&name) else {
            trace!("Field '{}' is not a column of '{}', skipping", name, schema.name);
            continue;
        };
        let Some(converter) = registry.resolve(column.kind(), &name)? else {
            debug!("No converter for {}.{} ({}), skipping", schema.name, name, column.kind());
            continue;
        };

        let value = match record.get(&name) {
            None | Some(RecordValue::Null) => {
                trace!("{}.{} is null", schema.name, name);
                MessageValue::Null
            }
            Some(value) => {
                let ctx = FieldContext::new(&schema.name, &name, column.is_required());
                converter.to_message(&ctx, value)?
            }
        };
        values.push((name, value));
    }

    let mut instance = match target {
        MessageTarget::Type(ty) => ty.instantiate(),
        MessageTarget::Instance(instance) => instance,
    };
    for (name, value) in values {
        instance.set(name, value)?;
    }
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::registry::ConverterOverrides;
    use message_types::{FieldKind, MessageFieldDescriptor};
    use record_core::{ColumnDefinition, ColumnType, RecordSchema};
    use std::sync::Arc;

    fn schema() -> Arc<RecordSchema> {
        Arc::new(RecordSchema::new(
            "User",
            vec![
                ColumnDefinition::required("id", ColumnType::BigInteger),
                ColumnDefinition::nullable("name", ColumnType::Text),
                ColumnDefinition::nullable("score", ColumnType::Float),
                ColumnDefinition::nullable("shape", ColumnType::other("Geometry")),
            ],
        ))
    }

    fn message_type() -> MessageType {
        MessageType::builder("UserMessage")
            .field(MessageFieldDescriptor::new("id", 1, FieldKind::Int64))
            .field(MessageFieldDescriptor::new("name", 2, FieldKind::String))
            .field(MessageFieldDescriptor::new("score", 3, FieldKind::Double))
            .field(MessageFieldDescriptor::new("note", 4, FieldKind::String))
            .build()
            .unwrap()
    }

    fn user() -> Record {
        Record::with_values(
            schema(),
            [
                ("id", RecordValue::Integer(1)),
                ("name", RecordValue::from("Ada")),
                ("score", RecordValue::Float(9.5)),
            ],
        )
    }

    #[test]
    fn test_new_instance() {
        let message =
            to_message(&user(), message_type().into(), &ConversionOptions::new()).unwrap();
        assert_eq!(message.get("id"), Some(&MessageValue::Int64(1)));
        assert_eq!(message.get("name"), Some(&MessageValue::from("Ada")));
        assert_eq!(message.get("score"), Some(&MessageValue::Double(9.5)));
        assert_eq!(message.get("note"), None);
    }

    #[test]
    fn test_existing_instance_keeps_other_fields() {
        let existing = message_type()
            .new_instance([
                ("note", MessageValue::from("keep")),
                ("name", MessageValue::from("old")),
            ])
            .unwrap();
        let options = ConversionOptions::new().only(["name"]);

        let message = to_message(&user(), existing.into(), &options).unwrap();
        assert_eq!(message.get("note"), Some(&MessageValue::from("keep")));
        assert_eq!(message.get("name"), Some(&MessageValue::from("Ada")));
        assert_eq!(message.get("id"), None);
    }

    #[test]
    fn test_null_copied_as_null() {
        let mut record = user();
        record.set("name", RecordValue::Null);
        let message =
            to_message(&record, message_type().into(), &ConversionOptions::new()).unwrap();
        assert_eq!(message.get("name"), Some(&MessageValue::Null));
    }

    #[test]
    fn test_disabled_kind_skipped() {
        let options =
            ConversionOptions::new().converters(ConverterOverrides::new().without("Float"));
        let message = to_message(&user(), message_type().into(), &options).unwrap();
        assert_eq!(message.get("score"), None);
        assert_eq!(message.get("id"), Some(&MessageValue::Int64(1)));
    }

    #[test]
    fn test_unmapped_kind_fails() {
        let ty = MessageType::builder("Shapes")
            .field(MessageFieldDescriptor::new("shape", 1, FieldKind::Bytes))
            .build()
            .unwrap();
        let err = to_message(&user(), ty.into(), &ConversionOptions::new()).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::UnsupportedTypeKind { ref kind, .. } if kind == "Geometry"
        ));
    }
}

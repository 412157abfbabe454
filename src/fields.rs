//! Field intersection between a record and a message schema.

use message_types::MessageSchema;
use record_core::{Record, RecordSchema};
use std::collections::HashSet;

/// Record side of a translation: a schema, or a concrete record.
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Type(&'a RecordSchema),
    Instance(&'a Record),
}

impl<'a> RecordRef<'a> {
    /// Schema of the record side.
    pub fn schema(&self) -> &'a RecordSchema {
        match *self {
            RecordRef::Type(schema) => schema,
            RecordRef::Instance(record) => record.schema(),
        }
    }
}

/// Result of [`resolve_fields`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    /// All message field names in definition order
    pub message_fields: Vec<String>,
    /// Names to translate, in message field order
    pub translatable: Vec<String>,
}

/// Compute the fields a translation copies.
///
/// Starts from the message's field names. When `record` is a schema they are
/// intersected with its column names; when it is an instance they are not,
/// and the translators drop non-column names themselves. `only` then
/// restricts and `exclude` removes; an empty list disables its filter.
pub fn resolve_fields(
    record: RecordRef<'_>,
    message: &MessageSchema,
    only: &[String],
    exclude: &[String],
) -> FieldSelection {
    let message_fields: Vec<String> = message.field_names().map(str::to_string).collect();

    let columns: Option<HashSet<&str>> = match record {
        RecordRef::Type(schema) => Some(schema.columns.iter().map(|c| c.name.as_str()).collect()),
        RecordRef::Instance(_) => None,
    };
    let only: HashSet<&str> = only.iter().map(String::as_str).collect();
    let exclude: HashSet<&str> = exclude.iter().map(String::as_str).collect();

    let translatable = message_fields
        .iter()
        .filter(|name| columns.as_ref().map_or(true, |c| c.contains(name.as_str())))
        .filter(|name| only.is_empty() || only.contains(name.as_str()))
        .filter(|name| !exclude.contains(name.as_str()))
        .cloned()
        .collect();

    FieldSelection {
        message_fields,
        translatable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use message_types::{FieldKind, MessageFieldDescriptor, MessageType};
    use record_core::{ColumnDefinition, ColumnType};
    use std::sync::Arc;

    fn record_schema() -> RecordSchema {
        RecordSchema::new(
            "User",
            vec![
                ColumnDefinition::nullable("a", ColumnType::Text),
                ColumnDefinition::nullable("b", ColumnType::Text),
                ColumnDefinition::nullable("c", ColumnType::Text),
            ],
        )
    }

    fn message() -> MessageType {
        MessageType::builder("UserMessage")
            .field(MessageFieldDescriptor::new("c", 1, FieldKind::String))
            .field(MessageFieldDescriptor::new("b", 2, FieldKind::String))
            .field(MessageFieldDescriptor::new("a", 3, FieldKind::String))
            .field(MessageFieldDescriptor::new("extra", 4, FieldKind::String))
            .build()
            .unwrap()
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_intersection_in_message_order() {
        let schema = record_schema();
        let selection = resolve_fields(RecordRef::Type(&schema), &message(), &[], &[]);
        assert_eq!(selection.message_fields, names(&["c", "b", "a", "extra"]));
        assert_eq!(selection.translatable, names(&["c", "b", "a"]));
    }

    #[test]
    fn test_only_and_exclude() {
        let schema = record_schema();
        let only = names(&["a", "b", "extra", "missing"]);
        let selection = resolve_fields(RecordRef::Type(&schema), &message(), &only, &[]);
        assert_eq!(selection.translatable, names(&["b", "a"]));

        let selection = resolve_fields(RecordRef::Type(&schema), &message(), &[], &names(&["a"]));
        assert_eq!(selection.translatable, names(&["c", "b"]));

        let selection = resolve_fields(RecordRef::Type(&schema), &message(), &only, &names(&["a"]));
        assert_eq!(selection.translatable, names(&["b"]));
    }

    #[test]
    fn test_instance_skips_column_intersection() {
        let record = Record::new(Arc::new(record_schema()));
        let selection = resolve_fields(RecordRef::Instance(&record), &message(), &[], &[]);
        assert_eq!(selection.translatable, names(&["c", "b", "a", "extra"]));
    }
}

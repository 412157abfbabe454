//! Message to record translation.

use crate::converter::FieldContext;
use crate::error::Result;
use crate::fields::{resolve_fields, RecordRef};
use crate::options::ConversionOptions;
use message_types::{MessageInstance, MessageValue};
use record_core::{Record, RecordSchema, RecordValue};
use std::sync::Arc;
use tracing::{debug, trace};

/// Record side of a reverse translation.
#[derive(Debug, Clone)]
pub enum EntityTarget {
    /// Build a new record of this schema
    Type(Arc<RecordSchema>),
    /// Populate the translated columns of this record and return it
    Instance(Record),
}

impl From<Arc<RecordSchema>> for EntityTarget {
    fn from(schema: Arc<RecordSchema>) -> Self {
        EntityTarget::Type(schema)
    }
}

impl From<Record> for EntityTarget {
    fn from(record: Record) -> Self {
        EntityTarget::Instance(record)
    }
}

/// Translate `message` into a record.
///
/// Mirror of [`to_message`](crate::to_message): values are read from the
/// message and converted with `to_model`.
pub fn to_entity(
    message: &MessageInstance,
    target: EntityTarget,
    options: &ConversionOptions,
) -> Result<Record> {
    let registry = options.registry();
    let (schema, selection) = match &target {
        EntityTarget::Type(schema) => (
            schema.clone(),
            resolve_fields(
                RecordRef::Type(schema),
                message.message_type(),
                &options.only,
                &options.exclude,
            ),
        ),
        EntityTarget::Instance(record) => (
            record.schema().clone(),
            resolve_fields(
                RecordRef::Instance(record),
                message.message_type(),
                &options.only,
                &options.exclude,
            ),
        ),
    };

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

        let value = match message.get(&name) {
            None | Some(MessageValue::Null) => {
                trace!("{}.{} is null", message.message_type().name(), name);
                RecordValue::Null
            }
            Some(value) => {
                let ctx = FieldContext::new(&schema.name, &name, column.is_required());
                converter.to_model(&ctx, value)?
            }
        };
        values.push((name, value));
    }

    Ok(match target {
        EntityTarget::Type(schema) => Record::with_values(schema, values),
        EntityTarget::Instance(mut record) => {
            record.populate(values);
            record
        }
    })
}

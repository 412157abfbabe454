//! Message type synthesis from a record schema.

use crate::converter::FieldContext;
use crate::error::Result;
use crate::options::ConversionOptions;
use message_types::{MessageSchemaBuilder, MessageType};
use record_core::RecordSchema;
use tracing::debug;

/// Derive the message type `<Name>Message` from `schema`.
///
/// Columns are filtered by `exclude` then `only` in declaration order and
/// numbered from 1. Each column's converter declares the field at its number.
/// Columns without a converter, or whose converter declares no field, leave a
/// gap in the numbering.
pub fn model_message(schema: &RecordSchema, options: &ConversionOptions) -> Result<MessageType> {
    let registry = options.registry();

    let columns = schema
        .columns
        .iter()
        .filter(|c| !options.exclude.contains(&c.name))
        .filter(|c| options.only.is_empty() || options.only.contains(&c.name));

    let mut builder = MessageSchemaBuilder::new(format!("{}Message", schema.name));
    for (position, column) in (1u32..).zip(columns) {
        let Some(converter) = registry.lookup(column.kind()) else {
            debug!(
                "No converter for {}.{} ({}), leaving field {} unused",
                schema.name,
                column.name,
                column.kind(),
                position
            );
            continue;
        };

        let ctx = FieldContext::new(&schema.name, &column.name, column.is_required());
        match converter.to_field(&ctx, position) {
            Some(field) => builder = builder.field(field),
            None => debug!(
                "Converter '{}' declares no field for {}.{}",
                converter.name(),
                schema.name,
                column.name
            ),
        }
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::IdentityConverter;
    use crate::registry::ConverterOverrides;
    use message_types::{date_message, FieldKind};
    use record_core::{ColumnDefinition, ColumnType};
    use std::sync::Arc;

    fn schema() -> RecordSchema {
        RecordSchema::new(
            "Person",
            vec![
                ColumnDefinition::required("id", ColumnType::BigInteger),
                ColumnDefinition::required("name", ColumnType::string()),
                ColumnDefinition::nullable("born", ColumnType::Date),
                ColumnDefinition::nullable("area", ColumnType::other("Geometry")),
                ColumnDefinition::nullable("bio", ColumnType::Text),
            ],
        )
    }

    fn numbering(ty: &MessageType) -> Vec<(&str, u32)> {
        ty.all_fields().iter().map(|f| (f.name.as_str(), f.number)).collect()
    }

    #[test]
    fn test_fields_in_column_order() {
        let ty = model_message(&schema(), &ConversionOptions::new()).unwrap();
        assert_eq!(ty.name(), "PersonMessage");
        assert_eq!(
            numbering(&ty),
            vec![("id", 1), ("name", 2), ("born", 3), ("bio", 5)]
        );
        assert_eq!(ty.field_by_name("born").unwrap().kind, FieldKind::Message(date_message()));
    }

    #[test]
    fn test_required_follows_nullability() {
        let ty = model_message(&schema(), &ConversionOptions::new()).unwrap();
        assert!(ty.field_by_name("name").unwrap().required);
        assert!(ty.field_by_name("id").unwrap().required);
        assert!(!ty.field_by_name("bio").unwrap().required);
    }

    #[test]
    fn test_only_and_exclude_renumber() {
        let options = ConversionOptions::new().only(["name", "bio", "id"]).exclude(["id"]);
        let ty = model_message(&schema(), &options).unwrap();
        assert_eq!(numbering(&ty), vec![("name", 1), ("bio", 2)]);
    }

    #[test]
    fn test_declining_converter_leaves_gap() {
        let options = ConversionOptions::new().converters(
            ConverterOverrides::new()
                .with("String", Arc::new(IdentityConverter))
                .without("Date"),
        );
        let ty = model_message(&schema(), &options).unwrap();
        assert_eq!(numbering(&ty), vec![("id", 1), ("bio", 5)]);
    }
}

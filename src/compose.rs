//! Collection wrappers and message type composition.

use crate::error::{BridgeError, Result};
use message_types::{FieldKind, MessageFieldDescriptor, MessageSchemaBuilder, MessageType};
use std::collections::HashSet;

/// `<Name>Collection { repeated <Name> items = 1; string nextPageToken = 2; }`
pub fn list_message(message_type: &MessageType) -> Result<MessageType> {
    let wrapper = MessageSchemaBuilder::new(format!("{}Collection", message_type.name()))
        .field(
            MessageFieldDescriptor::new("items", 1, FieldKind::Message(message_type.clone()))
                .repeated(),
        )
        .field(MessageFieldDescriptor::new("nextPageToken", 2, FieldKind::String))
        .build()?;
    Ok(wrapper)
}

/// Alias of [`list_message`].
pub fn collection_message(message_type: &MessageType) -> Result<MessageType> {
    list_message(message_type)
}

/// Merge the fields of `types` into `Composed<Name1><Name2>...`.
///
/// Fields are merged by name; the first definition of a name wins. The merged
/// fields are renumbered 1..N in first-seen order. Inputs are not modified.
pub fn compose(types: &[MessageType]) -> Result<MessageType> {
    if types.is_empty() {
        return Err(BridgeError::EmptyComposition);
    }

    let mut name = String::from("Composed");
    let mut seen = HashSet::new();
    let mut fields = Vec::new();
    for ty in types {
        name.push_str(ty.name());
        for field in ty.all_fields() {
            if seen.insert(field.name.as_str()) {
                fields.push(field);
            }
        }
    }

    let renumbered = (1u32..).zip(fields).map(|(number, field)| field.with_number(number));
    Ok(MessageSchemaBuilder::new(name).fields(renumbered).build()?)
}

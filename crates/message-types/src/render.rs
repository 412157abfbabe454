//! Render message types as `.proto` (proto2) source.

use crate::proto::{FieldKind, MessageType};
use std::collections::HashSet;

const TIMESTAMP_IMPORT: &str = "google/protobuf/timestamp.proto";

/// Render one `.proto` file holding the given message types.
///
/// Nested message types are emitted before the messages that use them, each
/// exactly once.
pub fn render_proto(types: &[MessageType]) -> String {
    let mut ordered = Vec::new();
    let mut seen = HashSet::new();
    for ty in types {
        collect(ty, &mut seen, &mut ordered);
    }

    let uses_timestamp = ordered.iter().any(|ty| {
        ty.all_fields()
            .iter()
            .any(|f| matches!(f.kind, FieldKind::Timestamp))
    });

    let mut out = String::from("syntax = \"proto2\";\n");
    if uses_timestamp {
        out.push_str(&format!("\nimport \"{TIMESTAMP_IMPORT}\";\n"));
    }
    for ty in &ordered {
        out.push('\n');
        out.push_str(&render_message(ty));
    }
    out
}

/// Render a single `message` block without its dependencies.
pub fn render_message(ty: &MessageType) -> String {
    let mut out = format!("message {} {{\n", ty.name());
    for field in ty.all_fields() {
        let label = if field.repeated {
            "repeated"
        } else if field.required {
            "required"
        } else {
            "optional"
        };
        out.push_str(&format!(
            "  {label} {} {} = {};\n",
            field.kind.proto_type_name(),
            field.name,
            field.number
        ));
    }
    out.push_str("}\n");
    out
}

fn collect(ty: &MessageType, seen: &mut HashSet<String>, ordered: &mut Vec<MessageType>) {
    if !seen.insert(ty.name().to_string()) {
        return;
    }
    for field in ty.all_fields() {
        if let FieldKind::Message(nested) = &field.kind {
            collect(nested, seen, ordered);
        }
    }
    ordered.push(ty.clone());
}

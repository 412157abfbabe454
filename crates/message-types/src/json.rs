//! JSON codec for message instances.
//!
//! | Field kind | JSON form |
//! |------------|-----------|
//! | bool / int64 / double / string | native JSON value |
//! | bytes | base64 string |
//! | timestamp | RFC 3339 string |
//! | message | nested object |
//! | repeated | array |

use crate::error::{MessageError, Result};
use crate::message::{MessageInstance, MessageValue};
use crate::proto::{FieldKind, MessageFieldDescriptor, MessageType};
use base64::Engine;
use chrono::DateTime;
use serde_json::{Map, Number, Value};

/// Encode a message instance as a JSON object holding its set fields.
pub fn message_to_json(instance: &MessageInstance) -> Value {
    let mut map = Map::new();
    for field in instance.all_fields() {
        if let Some(value) = instance.get(&field.name) {
            map.insert(field.name.clone(), value_to_json(value));
        }
    }
    Value::Object(map)
}

/// Encode a single message value.
pub fn value_to_json(value: &MessageValue) -> Value {
    match value {
        MessageValue::Bool(b) => Value::Bool(*b),
        MessageValue::Int64(i) => Value::Number((*i).into()),
        MessageValue::Double(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        MessageValue::String(s) => Value::String(s.clone()),
        MessageValue::Bytes(b) => {
            Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
        MessageValue::Timestamp(ts) => Value::String(ts.to_rfc3339()),
        MessageValue::Message(m) => message_to_json(m),
        MessageValue::Repeated(items) => Value::Array(items.iter().map(value_to_json).collect()),
        MessageValue::Null => Value::Null,
    }
}

/// Decode a JSON object into an instance of `message_type`.
pub fn message_from_json(message_type: &MessageType, json: &Value) -> Result<MessageInstance> {
    let object = json.as_object().ok_or_else(|| MessageError::JsonDecode {
        field: message_type.name().to_string(),
        reason: "expected an object".to_string(),
    })?;

    let mut instance = message_type.instantiate();
    for (name, raw) in object {
        let field = message_type
            .field_by_name(name)
            .ok_or_else(|| MessageError::UnknownField {
                message: message_type.name().to_string(),
                field: name.clone(),
            })?;
        let value = field_from_json(field, raw)?;
        instance.set(name.clone(), value)?;
    }
    Ok(instance)
}

fn field_from_json(field: &MessageFieldDescriptor, json: &Value) -> Result<MessageValue> {
    match json {
        Value::Null => Ok(MessageValue::Null),
        Value::Array(items) if field.repeated => items
            .iter()
            .map(|item| single_from_json(field, item))
            .collect::<Result<Vec<_>>>()
            .map(MessageValue::Repeated),
        _ if field.repeated => Err(decode_error(field, "expected an array")),
        single => single_from_json(field, single),
    }
}

fn single_from_json(field: &MessageFieldDescriptor, json: &Value) -> Result<MessageValue> {
    match (&field.kind, json) {
        (_, Value::Null) => Ok(MessageValue::Null),
        (FieldKind::Bool, Value::Bool(b)) => Ok(MessageValue::Bool(*b)),
        (FieldKind::Int64, Value::Number(n)) => n
            .as_i64()
            .map(MessageValue::Int64)
            .ok_or_else(|| decode_error(field, "expected a 64-bit integer")),
        (FieldKind::Double, Value::Number(n)) => n
            .as_f64()
            .map(MessageValue::Double)
            .ok_or_else(|| decode_error(field, "expected a number")),
        (FieldKind::String, Value::String(s)) => Ok(MessageValue::String(s.clone())),
        (FieldKind::Bytes, Value::String(s)) => base64::engine::general_purpose::STANDARD
            .decode(s)
            .map(MessageValue::Bytes)
            .map_err(|e| decode_error(field, &format!("invalid base64: {e}"))),
        (FieldKind::Timestamp, Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .map(MessageValue::Timestamp)
            .map_err(|e| decode_error(field, &format!("invalid RFC 3339 timestamp: {e}"))),
        (FieldKind::Message(ty), Value::Object(_)) => {
            message_from_json(ty, json).map(MessageValue::from)
        }
        (kind, _) => Err(decode_error(field, &format!("expected {kind}"))),
    }
}

fn decode_error(field: &MessageFieldDescriptor, reason: &str) -> MessageError {
    MessageError::JsonDecode {
        field: field.name.clone(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well_known::date_message;
    use serde_json::json;

    fn event_type() -> MessageType {
        MessageType::builder("Event")
            .field(MessageFieldDescriptor::new("id", 1, FieldKind::Int64))
            .field(MessageFieldDescriptor::new("payload", 2, FieldKind::Bytes))
            .field(MessageFieldDescriptor::new("at", 3, FieldKind::Timestamp))
            .field(MessageFieldDescriptor::new("on", 4, FieldKind::Message(date_message())))
            .field(MessageFieldDescriptor::new("tags", 5, FieldKind::String).repeated())
            .build()
            .unwrap()
    }

    #[test]
    fn test_decode_all_kinds() {
        let json = json!({
            "id": 9,
            "payload": "AQID",
            "at": "2024-01-02T03:04:05+02:00",
            "on": {"year": 2024, "month": 1, "day": 2},
            "tags": ["a", "b"]
        });

        let event = message_from_json(&event_type(), &json).unwrap();
        assert_eq!(event.get("id"), Some(&MessageValue::Int64(9)));
        assert_eq!(event.get("payload"), Some(&MessageValue::Bytes(vec![1, 2, 3])));
        let on = event.get("on").and_then(MessageValue::as_message).unwrap();
        assert_eq!(on.get("month"), Some(&MessageValue::Int64(1)));
        assert_eq!(
            event.get("tags"),
            Some(&MessageValue::Repeated(vec!["a".into(), "b".into()]))
        );

        assert_eq!(message_to_json(&event), json);
    }

    #[test]
    fn test_unknown_field() {
        let err = message_from_json(&event_type(), &json!({"nope": 1})).unwrap_err();
        assert!(matches!(err, MessageError::UnknownField { .. }));
    }

    #[test]
    fn test_wrong_shape() {
        let err = message_from_json(&event_type(), &json!({"id": "nine"})).unwrap_err();
        assert!(matches!(err, MessageError::JsonDecode { .. }));

        let err = message_from_json(&event_type(), &json!({"tags": "a"})).unwrap_err();
        assert!(matches!(err, MessageError::JsonDecode { .. }));

        let err = message_from_json(&event_type(), &json!([1])).unwrap_err();
        assert!(matches!(err, MessageError::JsonDecode { .. }));
    }

    #[test]
    fn test_null_fields() {
        let event = message_from_json(&event_type(), &json!({"id": null})).unwrap();
        assert_eq!(event.get("id"), Some(&MessageValue::Null));
        assert_eq!(message_to_json(&event), json!({"id": null}));
    }
}

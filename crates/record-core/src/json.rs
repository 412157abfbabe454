//! JSON codec for record values.
//!
//! Conversion is driven by the column type:
//!
//! | Column type | JSON form |
//! |---|---|
//! | string kinds | string |
//! | binary kinds | base64 string |
//! | Boolean | bool (or 0/1) |
//! | integer kinds | number (or numeric string) |
//! | Float | number |
//! | Date | `"YYYY-MM-DD"` |
//! | Time | `"HH:MM:SS[.ffffff]"`, with `Z`, `±HH:MM` or ` Area/City` suffix |
//! | DateTime | RFC 3339 |

use crate::record::Record;
use crate::schema::{ColumnDefinition, RecordSchema};
use crate::types::ColumnType;
use crate::values::{RecordValue, TimeOfDay, TimeZoneInfo};
use base64::Engine;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde_json::Value;
use std::sync::Arc;

/// Errors that can occur converting between JSON and record values.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// JSON value has the wrong shape for the column
    #[error("Column '{column}': expected {expected}, got {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: String,
    },

    /// String value could not be parsed
    #[error("Column '{column}': invalid {expected} '{value}'")]
    InvalidFormat {
        column: String,
        expected: &'static str,
        value: String,
    },

    /// Column type has no JSON mapping
    #[error("Column '{column}': unsupported column type {kind}")]
    UnsupportedColumnType { column: String, kind: String },

    /// Record JSON names a column the schema does not have
    #[error("Column '{column}' not found in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// Record JSON is not an object
    #[error("Record for table '{table}' must be a JSON object")]
    NotAnObject { table: String },
}

fn mismatch(column: &ColumnDefinition, expected: &'static str, found: &Value) -> ValueError {
    ValueError::TypeMismatch {
        column: column.name.clone(),
        expected,
        found: found.to_string(),
    }
}

fn invalid(column: &ColumnDefinition, expected: &'static str, value: &str) -> ValueError {
    ValueError::InvalidFormat {
        column: column.name.clone(),
        expected,
        value: value.to_string(),
    }
}

/// Convert a JSON value to a record value for the given column.
pub fn value_from_json(column: &ColumnDefinition, json: &Value) -> Result<RecordValue, ValueError> {
    if json.is_null() {
        return Ok(RecordValue::Null);
    }

    let ty = &column.column_type;
    match ty {
        _ if ty.is_string() => json
            .as_str()
            .map(|s| RecordValue::String(s.to_string()))
            .ok_or_else(|| mismatch(column, "string", json)),

        _ if ty.is_binary() => {
            let encoded = json.as_str().ok_or_else(|| mismatch(column, "base64 string", json))?;
            base64::engine::general_purpose::STANDARD
                .decode(encoded)
                .map(RecordValue::Bytes)
                .map_err(|_| invalid(column, "base64", encoded))
        }

        ColumnType::Boolean => match json {
            Value::Bool(b) => Ok(RecordValue::Boolean(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(|i| RecordValue::Boolean(i != 0))
                .ok_or_else(|| mismatch(column, "bool", json)),
            _ => Err(mismatch(column, "bool", json)),
        },

        _ if ty.is_integer() => match json {
            Value::Number(n) => n
                .as_i64()
                .map(RecordValue::Integer)
                .ok_or_else(|| mismatch(column, "integer", json)),
            Value::String(s) => s
                .trim()
                .parse()
                .map(RecordValue::Integer)
                .map_err(|_| invalid(column, "integer", s)),
            _ => Err(mismatch(column, "integer", json)),
        },

        ColumnType::Float => json
            .as_f64()
            .map(RecordValue::Float)
            .ok_or_else(|| mismatch(column, "number", json)),

        ColumnType::Date => {
            let s = json.as_str().ok_or_else(|| mismatch(column, "date string", json))?;
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(RecordValue::Date)
                .map_err(|_| invalid(column, "date", s))
        }

        ColumnType::Time => {
            let s = json.as_str().ok_or_else(|| mismatch(column, "time string", json))?;
            parse_time_of_day(s)
                .map(RecordValue::Time)
                .ok_or_else(|| invalid(column, "time", s))
        }

        ColumnType::DateTime => {
            let s = json.as_str().ok_or_else(|| mismatch(column, "RFC 3339 string", json))?;
            DateTime::parse_from_rfc3339(s)
                .map(RecordValue::DateTime)
                .map_err(|_| invalid(column, "datetime", s))
        }

        other => Err(ValueError::UnsupportedColumnType {
            column: column.name.clone(),
            kind: other.kind().to_string(),
        }),
    }
}

/// Convert a record value to JSON.
pub fn value_to_json(value: &RecordValue) -> Value {
    match value {
        RecordValue::Null => Value::Null,
        RecordValue::Boolean(b) => Value::Bool(*b),
        RecordValue::Integer(i) => serde_json::json!(*i),
        RecordValue::Float(f) => serde_json::json!(*f),
        RecordValue::String(s) => Value::String(s.clone()),
        RecordValue::Bytes(b) => {
            Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
        RecordValue::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        RecordValue::Time(t) => Value::String(format_time_of_day(t)),
        RecordValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
    }
}

/// Build a record of `schema` from a JSON object.
pub fn record_from_json(schema: Arc<RecordSchema>, json: &Value) -> Result<Record, ValueError> {
    let object = json.as_object().ok_or_else(|| ValueError::NotAnObject {
        table: schema.name.clone(),
    })?;

    let mut values = Vec::with_capacity(object.len());
    for (name, raw) in object {
        let column = schema
            .get_column(name)
            .ok_or_else(|| ValueError::UnknownColumn {
                table: schema.name.clone(),
                column: name.clone(),
            })?;
        values.push((name.clone(), value_from_json(column, raw)?));
    }

    Ok(Record::with_values(schema, values))
}

/// Render the set values of a record as a JSON object.
pub fn record_to_json(record: &Record) -> Value {
    let mut object = serde_json::Map::new();
    for column in &record.schema().columns {
        if let Some(value) = record.get(&column.name) {
            object.insert(column.name.clone(), value_to_json(value));
        }
    }
    Value::Object(object)
}

fn parse_naive_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M:%S%.f").ok()
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let seconds = hours
        .parse::<i32>()
        .ok()?
        .checked_mul(3600)?
        .checked_add(minutes.parse::<i32>().ok()?.checked_mul(60)?)?;
    FixedOffset::east_opt(sign * seconds)
}

/// Parse a time of day, optionally zoned.
///
/// Accepts `14:30:00`, `14:30:00.250`, `14:30:00Z`, `14:30:00+02:00` and
/// `14:30:00 Europe/Berlin`.
pub fn parse_time_of_day(s: &str) -> Option<TimeOfDay> {
    let s = s.trim();

    if let Some((time, zone)) = s.split_once(' ') {
        let tz: Tz = zone.trim().parse().ok()?;
        return Some(TimeOfDay::in_zone(parse_naive_time(time)?, tz));
    }
    if let Some(time) = s.strip_suffix('Z') {
        return Some(TimeOfDay::with_offset(
            parse_naive_time(time)?,
            FixedOffset::east_opt(0)?,
        ));
    }
    if let Some(idx) = s.rfind(['+', '-']) {
        let (time, offset) = s.split_at(idx);
        return Some(TimeOfDay::with_offset(
            parse_naive_time(time)?,
            parse_offset(offset)?,
        ));
    }

    parse_naive_time(s).map(TimeOfDay::naive)
}

/// Format a time of day in the form accepted by [`parse_time_of_day`].
pub fn format_time_of_day(t: &TimeOfDay) -> String {
    let time = t.time.format("%H:%M:%S%.f");
    match t.zone {
        None => time.to_string(),
        Some(TimeZoneInfo::Fixed(offset)) => format!("{time}{offset}"),
        Some(TimeZoneInfo::Named(tz)) => format!("{time} {}", tz.name()),
    }
}

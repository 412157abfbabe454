//! Per-kind value and field converters.
//!
//! A [`Converter`] knows how to move one column's value onto a message field
//! (`to_message`), back again (`to_model`), and how to declare the message
//! field for a column when a message type is synthesized (`to_field`).
//!
//! The defaults are the identity lift between the two value universes:
//!
//! ```text
//! RecordValue::Boolean   <-> MessageValue::Bool
//! RecordValue::Integer   <-> MessageValue::Int64
//! RecordValue::Float     <-> MessageValue::Double
//! RecordValue::String    <-> MessageValue::String
//! RecordValue::Bytes     <-> MessageValue::Bytes
//! RecordValue::DateTime  <-> MessageValue::Timestamp
//! ```
//!
//! Dates and times have no scalar counterpart and need the structured
//! [`DateConverter`] / [`TimeConverter`].

use crate::error::{BridgeError, Result};
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike};
use message_types::{
    date_message, time_message, FieldKind, MessageFieldDescriptor, MessageInstance, MessageValue,
};
use record_core::{RecordValue, TimeOfDay};
use std::fmt;
use tracing::debug;

/// Per-field information handed to a converter.
///
/// `required` is derived from the column's nullability for this call only.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Record schema name
    pub table: &'a str,
    /// Column / field name
    pub column: &'a str,
    /// Whether the column is non-nullable
    pub required: bool,
}

impl<'a> FieldContext<'a> {
    pub fn new(table: &'a str, column: &'a str, required: bool) -> Self {
        Self {
            table,
            column,
            required,
        }
    }
}

/// Strategy for one column type-kind.
pub trait Converter: Send + Sync + fmt::Debug {
    /// Registry name of this converter.
    fn name(&self) -> &'static str;

    /// Convert a non-null record value into a message value.
    fn to_message(&self, ctx: &FieldContext<'_>, value: &RecordValue) -> Result<MessageValue> {
        lift_to_message(ctx, value)
    }

    /// Convert a non-null message value into a record value.
    fn to_model(&self, ctx: &FieldContext<'_>, value: &MessageValue) -> Result<RecordValue> {
        lift_to_model(ctx, value)
    }

    /// Declare the message field for this column at `position`.
    fn to_field(&self, _ctx: &FieldContext<'_>, _position: u32) -> Option<MessageFieldDescriptor> {
        None
    }
}

/// Lift a record value onto the message side unchanged.
pub fn lift_to_message(ctx: &FieldContext<'_>, value: &RecordValue) -> Result<MessageValue> {
    match value {
        RecordValue::Boolean(b) => Ok(MessageValue::Bool(*b)),
        RecordValue::Integer(i) => Ok(MessageValue::Int64(*i)),
        RecordValue::Float(f) => Ok(MessageValue::Double(*f)),
        RecordValue::String(s) => Ok(MessageValue::String(s.clone())),
        RecordValue::Bytes(b) => Ok(MessageValue::Bytes(b.clone())),
        RecordValue::DateTime(dt) => Ok(MessageValue::Timestamp(*dt)),
        RecordValue::Null => Ok(MessageValue::Null),
        RecordValue::Date(_) | RecordValue::Time(_) => Err(BridgeError::Unrepresentable {
            field: ctx.column.to_string(),
            value_type: value.type_name().to_string(),
            target: "message",
        }),
    }
}

/// Lift a message value onto the record side unchanged.
pub fn lift_to_model(ctx: &FieldContext<'_>, value: &MessageValue) -> Result<RecordValue> {
    match value {
        MessageValue::Bool(b) => Ok(RecordValue::Boolean(*b)),
        MessageValue::Int64(i) => Ok(RecordValue::Integer(*i)),
        MessageValue::Double(f) => Ok(RecordValue::Float(*f)),
        MessageValue::String(s) => Ok(RecordValue::String(s.clone())),
        MessageValue::Bytes(b) => Ok(RecordValue::Bytes(b.clone())),
        MessageValue::Timestamp(ts) => Ok(RecordValue::DateTime(*ts)),
        MessageValue::Null => Ok(RecordValue::Null),
        MessageValue::Message(_) | MessageValue::Repeated(_) => {
            Err(BridgeError::Unrepresentable {
                field: ctx.column.to_string(),
                value_type: value.type_name().to_string(),
                target: "record",
            })
        }
    }
}

// ============================================================================
// Identity and scalar converters
// ============================================================================

/// Passes values through and declares no field.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityConverter;

impl Converter for IdentityConverter {
    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Passes values through and declares a scalar field of a fixed kind.
#[derive(Debug, Clone)]
pub struct ScalarConverter {
    name: &'static str,
    kind: FieldKind,
}

impl ScalarConverter {
    pub fn string() -> Self {
        Self {
            name: "string",
            kind: FieldKind::String,
        }
    }

    pub fn bytes() -> Self {
        Self {
            name: "bytes",
            kind: FieldKind::Bytes,
        }
    }

    pub fn boolean() -> Self {
        Self {
            name: "boolean",
            kind: FieldKind::Bool,
        }
    }

    pub fn integer() -> Self {
        Self {
            name: "integer",
            kind: FieldKind::Int64,
        }
    }

    pub fn float() -> Self {
        Self {
            name: "float",
            kind: FieldKind::Double,
        }
    }

    /// Point-in-time values pass through as message timestamps.
    pub fn timestamp() -> Self {
        Self {
            name: "timestamp",
            kind: FieldKind::Timestamp,
        }
    }
}

impl Converter for ScalarConverter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn to_field(&self, ctx: &FieldContext<'_>, position: u32) -> Option<MessageFieldDescriptor> {
        Some(
            MessageFieldDescriptor::new(ctx.column, position, self.kind.clone())
                .required(ctx.required),
        )
    }
}

// ============================================================================
// Structured converters
// ============================================================================

fn malformed(ctx: &FieldContext<'_>, reason: impl Into<String>) -> BridgeError {
    BridgeError::MalformedValue {
        field: ctx.column.to_string(),
        reason: reason.into(),
    }
}

fn nested<'v>(
    ctx: &FieldContext<'_>,
    value: &'v MessageValue,
    expected: &str,
) -> Result<&'v MessageInstance> {
    match value {
        MessageValue::Message(instance) if instance.message_type().name() == expected => {
            Ok(instance)
        }
        other => Err(malformed(
            ctx,
            format!("expected {expected}, got {}", other.type_name()),
        )),
    }
}

fn int_part(ctx: &FieldContext<'_>, instance: &MessageInstance, part: &str) -> Result<i64> {
    instance
        .get(part)
        .and_then(MessageValue::as_i64)
        .ok_or_else(|| malformed(ctx, format!("missing '{part}'")))
}

fn narrow<T: TryFrom<i64>>(ctx: &FieldContext<'_>, part: &str, value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| malformed(ctx, format!("'{part}' out of range: {value}")))
}

/// Calendar date as a nested `DateMessage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateConverter;

impl Converter for DateConverter {
    fn name(&self) -> &'static str {
        "date"
    }

    fn to_message(&self, ctx: &FieldContext<'_>, value: &RecordValue) -> Result<MessageValue> {
        let RecordValue::Date(date) = value else {
            return Err(malformed(ctx, format!("expected date, got {}", value.type_name())));
        };

        let instance = date_message().new_instance([
            ("year", MessageValue::Int64(i64::from(date.year()))),
            ("month", MessageValue::Int64(i64::from(date.month()))),
            ("day", MessageValue::Int64(i64::from(date.day()))),
        ])?;
        Ok(MessageValue::from(instance))
    }

    fn to_model(&self, ctx: &FieldContext<'_>, value: &MessageValue) -> Result<RecordValue> {
        let instance = nested(ctx, value, message_types::DATE_MESSAGE)?;
        let year = narrow::<i32>(ctx, "year", int_part(ctx, instance, "year")?)?;
        let month = narrow::<u32>(ctx, "month", int_part(ctx, instance, "month")?)?;
        let day = narrow::<u32>(ctx, "day", int_part(ctx, instance, "day")?)?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(RecordValue::Date)
            .ok_or_else(|| malformed(ctx, format!("invalid date {year}-{month}-{day}")))
    }

    fn to_field(&self, ctx: &FieldContext<'_>, position: u32) -> Option<MessageFieldDescriptor> {
        Some(
            MessageFieldDescriptor::new(ctx.column, position, FieldKind::Message(date_message()))
                .required(ctx.required),
        )
    }
}

/// Time of day as a nested `TimeMessage`.
///
/// The zone travels as a UTC offset in whole minutes; naive times and zones
/// whose offset cannot be determined travel as 0. On the way back a nonzero
/// offset becomes a fixed-offset zone and 0 becomes a naive time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeConverter;

impl TimeConverter {
    fn offset_minutes(ctx: &FieldContext<'_>, time: &TimeOfDay) -> i64 {
        match (time.zone, time.utc_offset_seconds()) {
            (None, _) => 0,
            (Some(_), Some(seconds)) => i64::from(seconds / 60),
            (Some(zone), None) => {
                debug!(
                    "Zone {:?} of {}.{} has no fixed offset, using 0",
                    zone, ctx.table, ctx.column
                );
                0
            }
        }
    }
}

impl Converter for TimeConverter {
    fn name(&self) -> &'static str {
        "time"
    }

    fn to_message(&self, ctx: &FieldContext<'_>, value: &RecordValue) -> Result<MessageValue> {
        let RecordValue::Time(time) = value else {
            return Err(malformed(ctx, format!("expected time, got {}", value.type_name())));
        };

        let instance = time_message().new_instance([
            ("hour", MessageValue::Int64(i64::from(time.time.hour()))),
            ("minute", MessageValue::Int64(i64::from(time.time.minute()))),
            ("second", MessageValue::Int64(i64::from(time.time.second()))),
            ("microsecond", MessageValue::Int64(i64::from(time.microsecond()))),
            (
                "time_zone_offset",
                MessageValue::Int64(Self::offset_minutes(ctx, time)),
            ),
        ])?;
        Ok(MessageValue::from(instance))
    }

    fn to_model(&self, ctx: &FieldContext<'_>, value: &MessageValue) -> Result<RecordValue> {
        let instance = nested(ctx, value, message_types::TIME_MESSAGE)?;
        let hour = narrow::<u32>(ctx, "hour", int_part(ctx, instance, "hour")?)?;
        let minute = narrow::<u32>(ctx, "minute", int_part(ctx, instance, "minute")?)?;
        let second = narrow::<u32>(ctx, "second", int_part(ctx, instance, "second")?)?;
        let micro = narrow::<u32>(ctx, "microsecond", int_part(ctx, instance, "microsecond")?)?;

        let time = NaiveTime::from_hms_micro_opt(hour, minute, second, micro).ok_or_else(|| {
            malformed(
                ctx,
                format!("invalid time {hour}:{minute}:{second}.{micro:06}"),
            )
        })?;

        // Unset offset reads as 0.
        let offset = instance
            .get("time_zone_offset")
            .and_then(MessageValue::as_i64)
            .unwrap_or(0);
        if offset == 0 {
            return Ok(RecordValue::Time(TimeOfDay::naive(time)));
        }

        let zone = narrow::<i32>(ctx, "time_zone_offset", offset)?
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| malformed(ctx, format!("offset out of range: {offset} minutes")))?;
        Ok(RecordValue::Time(TimeOfDay::with_offset(time, zone)))
    }

    fn to_field(&self, ctx: &FieldContext<'_>, position: u32) -> Option<MessageFieldDescriptor> {
        Some(
            MessageFieldDescriptor::new(ctx.column, position, FieldKind::Message(time_message()))
                .required(ctx.required),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use chrono_tz::Tz;

    fn ctx(required: bool) -> FieldContext<'static> {
        FieldContext::new("Event", "field", required)
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_identity_lift() {
        let c = IdentityConverter;
        let ts = DateTime::parse_from_rfc3339("2024-05-06T07:08:09+01:00").unwrap();
        let pairs = [
            (RecordValue::Boolean(true), MessageValue::Bool(true)),
            (RecordValue::Integer(-3), MessageValue::Int64(-3)),
            (RecordValue::Float(1.5), MessageValue::Double(1.5)),
            (RecordValue::from("x"), MessageValue::from("x")),
            (RecordValue::Bytes(vec![0, 1]), MessageValue::Bytes(vec![0, 1])),
            (RecordValue::DateTime(ts), MessageValue::Timestamp(ts)),
        ];
        for (record, message) in pairs {
            assert_eq!(c.to_message(&ctx(false), &record).unwrap(), message);
            assert_eq!(c.to_model(&ctx(false), &message).unwrap(), record);
        }
        assert!(c.to_field(&ctx(false), 1).is_none());
    }

    #[test]
    fn test_identity_rejects_unliftable() {
        let date = RecordValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert!(matches!(
            IdentityConverter.to_message(&ctx(false), &date),
            Err(BridgeError::Unrepresentable { .. })
        ));

        let repeated = MessageValue::Repeated(vec![]);
        assert!(matches!(
            IdentityConverter.to_model(&ctx(false), &repeated),
            Err(BridgeError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_scalar_fields_carry_required() {
        let field = ScalarConverter::string().to_field(&ctx(true), 4).unwrap();
        assert_eq!(field.name, "field");
        assert_eq!(field.number, 4);
        assert_eq!(field.kind, FieldKind::String);
        assert!(field.required);

        let field = ScalarConverter::float().to_field(&ctx(false), 2).unwrap();
        assert_eq!(field.kind, FieldKind::Double);
        assert!(!field.required);

        assert_eq!(
            ScalarConverter::timestamp().to_field(&ctx(false), 1).unwrap().kind,
            FieldKind::Timestamp
        );
    }

    #[test]
    fn test_date_round_trip() {
        let date = RecordValue::Date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        let message = DateConverter.to_message(&ctx(false), &date).unwrap();

        let nested = message.as_message().unwrap();
        assert_eq!(nested.get("year"), Some(&MessageValue::Int64(1999)));
        assert_eq!(nested.get("month"), Some(&MessageValue::Int64(12)));
        assert_eq!(nested.get("day"), Some(&MessageValue::Int64(31)));

        assert_eq!(DateConverter.to_model(&ctx(false), &message).unwrap(), date);
    }

    #[test]
    fn test_date_field_references_date_message() {
        let field = DateConverter.to_field(&ctx(true), 3).unwrap();
        assert_eq!(field.kind, FieldKind::Message(date_message()));
        assert!(field.required);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let bad = date_message()
            .new_instance([
                ("year", MessageValue::Int64(2023)),
                ("month", MessageValue::Int64(2)),
                ("day", MessageValue::Int64(30)),
            ])
            .unwrap();
        assert!(matches!(
            DateConverter.to_model(&ctx(false), &MessageValue::from(bad)),
            Err(BridgeError::MalformedValue { .. })
        ));
    }

    #[test]
    fn test_time_with_offset() {
        let offset = FixedOffset::east_opt(120 * 60).unwrap();
        let time = RecordValue::Time(TimeOfDay::with_offset(hm(14, 30), offset));

        let message = TimeConverter.to_message(&ctx(false), &time).unwrap();
        let nested = message.as_message().unwrap();
        let parts: Vec<_> = ["hour", "minute", "second", "microsecond", "time_zone_offset"]
            .iter()
            .map(|p| nested.get(p).and_then(MessageValue::as_i64).unwrap())
            .collect();
        assert_eq!(parts, vec![14, 30, 0, 0, 120]);

        assert_eq!(TimeConverter.to_model(&ctx(false), &message).unwrap(), time);
    }

    #[test]
    fn test_naive_time_round_trip() {
        let time = RecordValue::Time(TimeOfDay::naive(
            NaiveTime::from_hms_micro_opt(8, 1, 2, 345_678).unwrap(),
        ));
        let message = TimeConverter.to_message(&ctx(false), &time).unwrap();
        let nested = message.as_message().unwrap();
        assert_eq!(nested.get("microsecond"), Some(&MessageValue::Int64(345_678)));
        assert_eq!(nested.get("time_zone_offset"), Some(&MessageValue::Int64(0)));

        assert_eq!(TimeConverter.to_model(&ctx(false), &message).unwrap(), time);
    }

    #[test]
    fn test_negative_offset_truncates_toward_zero() {
        let offset = FixedOffset::west_opt(5 * 3600 + 30 * 60 + 30).unwrap();
        let time = RecordValue::Time(TimeOfDay::with_offset(hm(9, 0), offset));
        let message = TimeConverter.to_message(&ctx(false), &time).unwrap();
        assert_eq!(
            message.as_message().unwrap().get("time_zone_offset"),
            Some(&MessageValue::Int64(-330))
        );
    }

    #[test]
    fn test_named_zone_counts_as_zero() {
        let time = RecordValue::Time(TimeOfDay::in_zone(hm(9, 0), Tz::Europe__Berlin));
        let message = TimeConverter.to_message(&ctx(false), &time).unwrap();
        assert_eq!(
            message.as_message().unwrap().get("time_zone_offset"),
            Some(&MessageValue::Int64(0))
        );
    }

    #[test]
    fn test_zero_offset_becomes_naive() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let time = RecordValue::Time(TimeOfDay::with_offset(hm(12, 0), utc));
        let message = TimeConverter.to_message(&ctx(false), &time).unwrap();
        assert_eq!(
            TimeConverter.to_model(&ctx(false), &message).unwrap(),
            RecordValue::Time(TimeOfDay::naive(hm(12, 0)))
        );
    }

    #[test]
    fn test_structured_rejects_wrong_value() {
        assert!(matches!(
            DateConverter.to_message(&ctx(false), &RecordValue::Integer(1)),
            Err(BridgeError::MalformedValue { .. })
        ));
        let date = DateConverter
            .to_message(
                &ctx(false),
                &RecordValue::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()),
            )
            .unwrap();
        assert!(matches!(
            TimeConverter.to_model(&ctx(false), &date),
            Err(BridgeError::MalformedValue { .. })
        ));
    }
}

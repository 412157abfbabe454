//! Native column values.
//!
//! `RecordValue` is what a record instance holds for each column. Temporal
//! values keep their full structure: calendar dates, time-of-day values with an
//! optional zone, and offset-aware timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;

/// Zone attached to a time-of-day value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneInfo {
    /// Fixed UTC offset
    Fixed(FixedOffset),

    /// Named IANA zone.
    ///
    /// A bare time of day carries no date, so a named zone with daylight
    /// saving rules cannot report its offset for it.
    Named(Tz),
}

impl TimeZoneInfo {
    /// UTC offset of this zone, if it can be determined without a date.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        match self {
            Self::Fixed(offset) => Some(*offset),
            Self::Named(_) => None,
        }
    }
}

/// Time of day with an optional zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    /// Wall-clock time
    pub time: NaiveTime,
    /// Zone, or `None` for a naive time
    pub zone: Option<TimeZoneInfo>,
}

impl TimeOfDay {
    /// Create a naive time of day.
    pub fn naive(time: NaiveTime) -> Self {
        Self { time, zone: None }
    }

    /// Create a time of day at a fixed UTC offset.
    pub fn with_offset(time: NaiveTime, offset: FixedOffset) -> Self {
        Self {
            time,
            zone: Some(TimeZoneInfo::Fixed(offset)),
        }
    }

    /// Create a time of day in a named zone.
    pub fn in_zone(time: NaiveTime, tz: Tz) -> Self {
        Self {
            time,
            zone: Some(TimeZoneInfo::Named(tz)),
        }
    }

    /// Microseconds past the second.
    pub fn microsecond(&self) -> u32 {
        self.time.nanosecond() / 1_000
    }

    /// UTC offset in seconds; `None` when naive or undeterminable.
    pub fn utc_offset_seconds(&self) -> Option<i32> {
        self.zone
            .and_then(|zone| zone.utc_offset())
            .map(|offset| offset.local_minus_utc())
    }
}

/// Value of a single record column.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// Boolean value
    Boolean(bool),

    /// Integral value (all integer widths and numerics)
    Integer(i64),

    /// Floating point value
    Float(f64),

    /// Character data
    String(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(TimeOfDay),

    /// Offset-aware date and time
    DateTime(DateTime<FixedOffset>),

    /// Null value
    Null,
}

impl RecordValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the value's variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
            Self::Null => "null",
        }
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get this value as a time of day.
    pub fn as_time(&self) -> Option<&TimeOfDay> {
        match self {
            Self::Time(t) => Some(t),
            _ => None,
        }
    }

    /// Try to get this value as a datetime.
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl From<bool> for RecordValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for RecordValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for RecordValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for RecordValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<NaiveDate> for RecordValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<TimeOfDay> for RecordValue {
    fn from(t: TimeOfDay) -> Self {
        Self::Time(t)
    }
}

impl From<DateTime<FixedOffset>> for RecordValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl<T: Into<RecordValue>> From<Option<T>> for RecordValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

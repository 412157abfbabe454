//! Message types shared by every translation: calendar dates and times of day.

use crate::proto::{FieldKind, MessageFieldDescriptor, MessageType};
use std::sync::OnceLock;

/// Name of the calendar date message type.
pub const DATE_MESSAGE: &str = "DateMessage";

/// Name of the time-of-day message type.
pub const TIME_MESSAGE: &str = "TimeMessage";

/// `DateMessage { year = 1; month = 2; day = 3; }`, all int64.
pub fn date_message() -> MessageType {
    static DATE: OnceLock<MessageType> = OnceLock::new();
    DATE.get_or_init(|| {
        MessageType::from_trusted(
            DATE_MESSAGE,
            vec![
                MessageFieldDescriptor::new("year", 1, FieldKind::Int64),
                MessageFieldDescriptor::new("month", 2, FieldKind::Int64),
                MessageFieldDescriptor::new("day", 3, FieldKind::Int64),
            ],
        )
    })
    .clone()
}

/// `TimeMessage { hour = 1; minute = 2; second = 3; microsecond = 4;
/// time_zone_offset = 5; }`, all int64. The offset is in minutes.
pub fn time_message() -> MessageType {
    static TIME: OnceLock<MessageType> = OnceLock::new();
    TIME.get_or_init(|| {
        MessageType::from_trusted(
            TIME_MESSAGE,
            vec![
                MessageFieldDescriptor::new("hour", 1, FieldKind::Int64),
                MessageFieldDescriptor::new("minute", 2, FieldKind::Int64),
                MessageFieldDescriptor::new("second", 3, FieldKind::Int64),
                MessageFieldDescriptor::new("microsecond", 4, FieldKind::Int64),
                MessageFieldDescriptor::new("time_zone_offset", 5, FieldKind::Int64),
            ],
        )
    })
    .clone()
}

use almanac_core::constants::DEFAULT_TIMEZONE;
use almanac_core::types::{EventType, RecurrenceKind};
use almanac_core::util::date::{parse_calendar_date, parse_datetime};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::flag::{flag, non_blank};
use crate::error::CalendarError;
use crate::model::{BaseEvent, RecurrenceRule, WeekdaySet};

/// Event row as stored, camelCase JSON.
///
/// Fields not listed here are kept in `classification` and passed through to
/// every occurrence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "flag")]
    pub all_day: bool,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub recurrence: Option<String>,
    #[serde(default)]
    pub recurrence_interval: Option<i64>,
    /// JSON-encoded token array, or a native array.
    #[serde(default)]
    pub recurrence_days: Option<JsonValue>,
    #[serde(default)]
    pub recurrence_until: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub virtual_url: Option<String>,
    #[serde(default)]
    pub organizer_id: Option<String>,
    #[serde(default)]
    pub participant_ids: Vec<String>,
    #[serde(default, deserialize_with = "flag")]
    pub deleted: bool,
    #[serde(flatten)]
    pub classification: Map<String, JsonValue>,
}

impl TryFrom<EventRecord> for BaseEvent {
    type Error = CalendarError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        if record.id.trim().is_empty() {
            return Err(CalendarError::validation("event id is empty"));
        }
        let invalid = |field: &str, err: &dyn std::fmt::Display| {
            CalendarError::validation(format!("event {}: {field}: {err}", record.id))
        };

        let start_time =
            parse_datetime(&record.start_time).map_err(|err| invalid("startTime", &err))?;
        let end_time = parse_datetime(&record.end_time).map_err(|err| invalid("endTime", &err))?;

        let interval = match record.recurrence_interval {
            None => 1,
            Some(value) => u32::try_from(value)
                .map_err(|err| invalid("recurrenceInterval", &err))?,
        };
        let until = non_blank(record.recurrence_until.clone())
            .map(|until| parse_calendar_date(&until))
            .transpose()
            .map_err(|err| invalid("recurrenceUntil", &err))?;

        let kind = record
            .recurrence
            .as_deref()
            .map_or(RecurrenceKind::None, RecurrenceKind::from);
        let mut recurrence = RecurrenceRule::new(kind).with_interval(interval);
        recurrence.weekdays = decode_weekdays(&record.id, record.recurrence_days.as_ref());
        recurrence.until = until;

        Ok(Self {
            id: record.id,
            title: record.title,
            description: record.description,
            start_time,
            end_time,
            all_day: record.all_day,
            event_type: record
                .event_type
                .as_deref()
                .map_or(EventType::Meeting, EventType::from),
            recurrence,
            timezone: non_blank(record.timezone).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            location: record.location,
            virtual_url: record.virtual_url,
            organizer_id: record.organizer_id,
            participant_ids: record.participant_ids,
            deleted: record.deleted,
            classification: record.classification,
        })
    }
}

/// Weekday sets never reject a record; anything unreadable means "start weekday".
fn decode_weekdays(event_id: &str, raw: Option<&JsonValue>) -> WeekdaySet {
    match raw {
        None | Some(JsonValue::Null) => WeekdaySet::EMPTY,
        Some(JsonValue::String(encoded)) => WeekdaySet::from_json_lenient(encoded),
        Some(JsonValue::Array(items)) => {
            let tokens: Option<Vec<&str>> = items.iter().map(JsonValue::as_str).collect();
            tokens.and_then(WeekdaySet::parse_tokens).unwrap_or_else(|| {
                tracing::debug!(
                    event_id = %event_id,
                    "Malformed weekday array, using start weekday"
                );
                WeekdaySet::EMPTY
            })
        }
        Some(other) => {
            tracing::debug!(
                event_id = %event_id,
                value = %other,
                "Unexpected weekday value, using start weekday"
            );
            WeekdaySet::EMPTY
        }
    }
}

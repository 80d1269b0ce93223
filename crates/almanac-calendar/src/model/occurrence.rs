use almanac_core::types::{EventType, RecurrenceKind};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use super::event::BaseEvent;
use super::recurrence::WeekdaySet;

/// One concrete instance of an event on a calendar date.
///
/// Occurrences are derived on every query and never stored.
#[expect(
    clippy::struct_excessive_bools,
    reason = "Flat wire record consumed by calendar views"
)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub all_day: bool,
    pub event_type: EventType,
    pub recurrence: RecurrenceKind,
    pub recurrence_interval: u32,
    pub recurrence_days: WeekdaySet,
    pub recurrence_until: Option<NaiveDate>,
    pub timezone: String,
    pub location: Option<String>,
    pub virtual_url: Option<String>,
    pub organizer_id: Option<String>,
    pub participant_ids: Vec<String>,
    #[serde(flatten)]
    pub classification: Map<String, JsonValue>,
    pub instance_date: NaiveDate,
    pub is_recurring: bool,
    pub has_deviation: bool,
    pub is_unanchored: bool,
}

impl Occurrence {
    /// Copies the series fields of `event` onto an instance at `instance_date`.
    #[must_use]
    pub fn from_event(event: &BaseEvent, instance_date: NaiveDate, is_recurring: bool) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            all_day: event.all_day,
            event_type: event.event_type.clone(),
            recurrence: event.recurrence.kind.clone(),
            recurrence_interval: event.recurrence.interval.get(),
            recurrence_days: event.recurrence.weekdays,
            recurrence_until: event.recurrence.until,
            timezone: event.timezone.clone(),
            location: event.location.clone(),
            virtual_url: event.virtual_url.clone(),
            organizer_id: event.organizer_id.clone(),
            participant_ids: event.participant_ids.clone(),
            classification: event.classification.clone(),
            instance_date,
            is_recurring,
            has_deviation: false,
            is_unanchored: false,
        }
    }
}

/// Orders occurrences from several events into one timeline.
///
/// Stable: instances on the same date keep their expansion order.
pub fn sort_chronologically(occurrences: &mut [Occurrence]) {
    occurrences.sort_by_key(|occurrence| occurrence.instance_date);
}

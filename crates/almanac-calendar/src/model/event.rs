use almanac_core::constants::DEFAULT_TIMEZONE;
use almanac_core::types::EventType;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde_json::{Map, Value as JsonValue};

use super::recurrence::RecurrenceRule;

/// A stored calendar event, possibly the head of a recurring series.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    /// Start of the first instance, in the offset it was stored with.
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub all_day: bool,
    pub event_type: EventType,
    pub recurrence: RecurrenceRule,
    /// IANA timezone name. Carried through, never used for arithmetic.
    pub timezone: String,
    pub location: Option<String>,
    pub virtual_url: Option<String>,
    pub organizer_id: Option<String>,
    pub participant_ids: Vec<String>,
    /// Soft delete of the whole series.
    pub deleted: bool,
    /// Classification and other store fields passed through untouched.
    pub classification: Map<String, JsonValue>,
}

impl BaseEvent {
    /// Create a non-recurring meeting.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: DateTime<FixedOffset>,
        end_time: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start_time,
            end_time,
            all_day: false,
            event_type: EventType::Meeting,
            recurrence: RecurrenceRule::none(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            location: None,
            virtual_url: None,
            organizer_id: None,
            participant_ids: Vec::new(),
            deleted: false,
            classification: Map::new(),
        }
    }

    #[must_use]
    pub fn with_recurrence(mut self, recurrence: RecurrenceRule) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Calendar date of the first instance, in the stored offset.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_time.date_naive()
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }
}

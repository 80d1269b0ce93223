//! Store-shaped records and their conversion into the typed model.
//!
//! ## Summary
//! This is the only place malformed store data turns into errors. Each record
//! is validated on its own; a bad record is reported in
//! [`Ingested::rejected`] and the rest of the batch still goes through.

mod deviation;
mod event;
mod flag;

pub use deviation::DeviationRecord;
pub use event::EventRecord;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{CalendarError, CalendarResult};
use crate::model::{BaseEvent, Deviation, DeviationsByEvent};

/// Events and deviations as read from the store in one query.
///
/// Rows stay raw JSON until [`ingest`], so a row with a mistyped field is
/// rejected on its own instead of failing the whole snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<JsonValue>,
    #[serde(default)]
    pub deviations: Vec<JsonValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Event,
    Deviation,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Event => "event",
            Self::Deviation => "deviation",
        })
    }
}

/// A record that failed validation, with the event id it belongs to.
#[derive(Debug)]
pub struct RejectedRecord {
    pub kind: RecordKind,
    pub event_id: String,
    pub error: CalendarError,
}

/// Result of ingesting a [`Snapshot`].
#[derive(Debug, Default)]
pub struct Ingested {
    pub events: Vec<BaseEvent>,
    pub deviations: DeviationsByEvent,
    pub rejected: Vec<RejectedRecord>,
}

impl Ingested {
    /// ## Summary
    /// Returns the events and deviations, failing if any record was rejected.
    ///
    /// ## Errors
    /// Returns the error of the first rejected record.
    pub fn into_strict(self) -> CalendarResult<(Vec<BaseEvent>, DeviationsByEvent)> {
        if let Some(rejected) = self.rejected.into_iter().next() {
            return Err(rejected.error);
        }
        Ok((self.events, self.deviations))
    }
}

/// ## Summary
/// Converts a store snapshot into the typed model.
///
/// Events keep their snapshot order; deviations are grouped by event id and
/// keep their relative order within each event.
#[must_use]
pub fn ingest(snapshot: Snapshot) -> Ingested {
    let mut ingested = Ingested::default();

    for raw in snapshot.events {
        let event_id = raw_event_id(&raw, "id");
        match decode::<EventRecord>(raw).and_then(BaseEvent::try_from) {
            Ok(event) => ingested.events.push(event),
            Err(error) => {
                tracing::warn!(event_id = %event_id, error = %error, "Rejected event record");
                ingested.rejected.push(RejectedRecord {
                    kind: RecordKind::Event,
                    event_id,
                    error,
                });
            }
        }
    }

    let mut accepted = Vec::with_capacity(snapshot.deviations.len());
    for raw in snapshot.deviations {
        let event_id = raw_event_id(&raw, "eventId");
        match decode::<DeviationRecord>(raw).and_then(DeviationRecord::into_deviation) {
            Ok(pair) => accepted.push(pair),
            Err(error) => {
                tracing::warn!(event_id = %event_id, error = %error, "Rejected deviation record");
                ingested.rejected.push(RejectedRecord {
                    kind: RecordKind::Deviation,
                    event_id,
                    error,
                });
            }
        }
    }
    ingested.deviations = group_by_event(accepted);

    tracing::debug!(
        events = ingested.events.len(),
        deviations = ingested.deviations.values().map(Vec::len).sum::<usize>(),
        rejected = ingested.rejected.len(),
        "Snapshot ingested"
    );
    ingested
}

fn decode<T: DeserializeOwned>(raw: JsonValue) -> CalendarResult<T> {
    serde_json::from_value(raw)
        .map_err(|err| CalendarError::validation(format!("malformed record: {err}")))
}

/// Event id of a raw row, empty when the row has none.
fn raw_event_id(raw: &JsonValue, field: &str) -> String {
    raw.get(field)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Groups `(event id, deviation)` pairs, preserving order within each event.
#[must_use]
pub fn group_by_event(pairs: impl IntoIterator<Item = (String, Deviation)>) -> DeviationsByEvent {
    let mut grouped = DeviationsByEvent::new();
    for (event_id, deviation) in pairs {
        grouped.entry(event_id).or_default().push(deviation);
    }
    grouped
}

//! Walks the requested window and emits occurrences for each event.

use almanac_core::config::ExpansionConfig;
use almanac_core::types::RecurrenceKind;
use chrono::NaiveDate;

use super::index::{DeviationIndex, anchored_occurrence, unanchored_occurrence};
use super::predicate::should_occur_on;
use super::window::DateWindow;
use crate::model::{BaseEvent, Deviation, DeviationsByEvent, Occurrence};

/// Caller-selectable behaviour of the materializer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// Drop a non-recurring event whose date lies outside the window.
    ///
    /// Off by default: the single occurrence is emitted wherever it falls.
    pub clamp_single_occurrences: bool,
}

impl From<&ExpansionConfig> for ExpansionOptions {
    fn from(config: &ExpansionConfig) -> Self {
        Self {
            clamp_single_occurrences: config.clamp_single_occurrences,
        }
    }
}

/// ## Summary
/// Expands `events` over `window`, overlaying their deviations.
///
/// Output order: events in input order; for each event, pattern instances in
/// ascending date order followed by its moved instances in deviation-list
/// order. Use [`crate::model::sort_chronologically`] for a single timeline.
#[must_use]
pub fn expand_recurring_events(
    events: &[BaseEvent],
    window: DateWindow,
    deviations: &DeviationsByEvent,
) -> Vec<Occurrence> {
    expand_recurring_events_with_options(events, window, deviations, ExpansionOptions::default())
}

/// ## Summary
/// [`expand_recurring_events`] with explicit [`ExpansionOptions`].
#[must_use]
pub fn expand_recurring_events_with_options(
    events: &[BaseEvent],
    window: DateWindow,
    deviations: &DeviationsByEvent,
    options: ExpansionOptions,
) -> Vec<Occurrence> {
    tracing::debug!(
        event_count = events.len(),
        start = %window.start(),
        end = %window.end(),
        "Expanding events"
    );

    let mut occurrences = Vec::new();
    for event in events {
        let event_deviations = deviations.get(&event.id).map_or(&[][..], Vec::as_slice);
        expand_event_into(event, window, event_deviations, options, &mut occurrences);
    }

    tracing::debug!(occurrence_count = occurrences.len(), "Expansion complete");
    occurrences
}

/// ## Summary
/// Expands a single event with its own deviations.
///
/// Events are independent of one another, so callers with very large sets
/// may run this per event on separate workers and concatenate the results in
/// input order.
#[must_use]
pub fn expand_event(
    event: &BaseEvent,
    window: DateWindow,
    deviations: &[Deviation],
    options: ExpansionOptions,
) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    expand_event_into(event, window, deviations, options, &mut occurrences);
    occurrences
}

fn expand_event_into(
    event: &BaseEvent,
    window: DateWindow,
    deviations: &[Deviation],
    options: ExpansionOptions,
    out: &mut Vec<Occurrence>,
) {
    if event.deleted {
        tracing::trace!(event_id = %event.id, "Skipping deleted event");
        return;
    }

    if !event.is_recurring() {
        let start = event.start_date();
        if options.clamp_single_occurrences && !window.contains(start) {
            return;
        }
        out.push(Occurrence::from_event(event, start, false));
        return;
    }

    let index = DeviationIndex::new(deviations);

    if let RecurrenceKind::Unrecognized(kind) = &event.recurrence.kind {
        tracing::debug!(
            event_id = %event.id,
            kind = %kind,
            "Unrecognized recurrence kind, emitting moved instances only"
        );
    } else {
        let effective_end = event
            .recurrence
            .until
            .map_or(window.end(), |until| until.min(window.end()));
        // Dates before the series start can never match.
        let first = window.start().max(event.start_date());

        for date in first.iter_days().take_while(|date| *date <= effective_end) {
            if index.has_unanchored_on(date) {
                continue;
            }
            if should_occur_on(event, date, &index) {
                out.push(anchored_occurrence(event, date, index.anchored_on(date)));
            }
        }
    }

    out.extend(
        index
            .unanchored()
            .filter(|deviation| window.contains(deviation.new_date))
            .map(|deviation| unanchored_occurrence(event, deviation)),
    );
}

/// ## Summary
/// The occurrence of `event` on `date`, if any.
///
/// Applies the same rules as the window expansion. When several moved
/// instances share `date`, the first in list order is returned.
#[must_use]
pub fn occurrence_on(
    event: &BaseEvent,
    date: NaiveDate,
    deviations: &[Deviation],
) -> Option<Occurrence> {
    if event.deleted {
        return None;
    }
    if !event.is_recurring() {
        return (event.start_date() == date).then(|| Occurrence::from_event(event, date, false));
    }

    let index = DeviationIndex::new(deviations);
    if let Some(moved) = index.unanchored().find(|deviation| deviation.new_date == date) {
        return Some(unanchored_occurrence(event, moved));
    }
    if event.recurrence.until.is_some_and(|until| date > until) {
        return None;
    }
    should_occur_on(event, date, &index)
        .then(|| anchored_occurrence(event, date, index.anchored_on(date)))
}

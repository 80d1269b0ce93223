//! Detection of deviations stranded by a recurrence rule edit.
//!
//! ## Summary
//! When a series' rule changes (new weekday, new interval, earlier `until`),
//! anchored deviations may point at dates the rule no longer produces. Those
//! deviations never surface in an expansion again; this module lists them so
//! the store can clean them up or ask the organizer what to do.

use chrono::NaiveDate;
use serde::Serialize;

use crate::expand::would_occur_on;
use crate::model::{BaseEvent, Deviation, DeviationsByEvent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedDeviation {
    pub event_id: String,
    pub original_date: NaiveDate,
    pub cancelled: bool,
}

/// ## Summary
/// Lists the anchored deviations of `event` whose date its rule no longer produces.
///
/// Moved instances are never orphaned: they do not depend on the pattern.
#[must_use]
pub fn find_orphaned_deviations(
    event: &BaseEvent,
    deviations: &[Deviation],
) -> Vec<OrphanedDeviation> {
    deviations
        .iter()
        .filter_map(|deviation| match deviation {
            Deviation::Anchored(anchored) => Some(anchored),
            Deviation::Unanchored(_) => None,
        })
        .filter(|anchored| !would_occur_on(event, anchored.original_date))
        .map(|anchored| OrphanedDeviation {
            event_id: event.id.clone(),
            original_date: anchored.original_date,
            cancelled: anchored.cancelled,
        })
        .collect()
}

/// Runs [`find_orphaned_deviations`] for every event, in input order.
#[must_use]
pub fn find_orphans(events: &[BaseEvent], deviations: &DeviationsByEvent) -> Vec<OrphanedDeviation> {
    let orphans: Vec<OrphanedDeviation> = events
        .iter()
        .filter_map(|event| {
            deviations
                .get(&event.id)
                .map(|list| find_orphaned_deviations(event, list))
        })
        .flatten()
        .collect();
    tracing::debug!(
        events = events.len(),
        orphans = orphans.len(),
        "Orphaned deviation scan complete"
    );
    orphans
}

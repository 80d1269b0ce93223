//! Explicit memoization of expanded occurrences.

use std::collections::HashMap;

use crate::expand::{DateWindow, ExpansionOptions, expand_event};
use crate::model::{BaseEvent, Deviation, DeviationsByEvent, Occurrence};

/// Cache of per-event expansions keyed by event id and window.
///
/// Expansion is deterministic, so an entry stays valid until the event or
/// one of its deviations changes. The owner must call
/// [`OccurrenceCache::invalidate_event`] when that happens.
#[derive(Debug, Default)]
pub struct OccurrenceCache {
    options: ExpansionOptions,
    entries: HashMap<(String, DateWindow), Vec<Occurrence>>,
}

impl OccurrenceCache {
    #[must_use]
    pub fn new(options: ExpansionOptions) -> Self {
        Self {
            options,
            entries: HashMap::new(),
        }
    }

    /// ## Summary
    /// Returns the cached expansion of `event` over `window`, expanding on a miss.
    pub fn get_or_expand(
        &mut self,
        event: &BaseEvent,
        window: DateWindow,
        deviations: &[Deviation],
    ) -> &[Occurrence] {
        let options = self.options;
        self.entries
            .entry((event.id.clone(), window))
            .or_insert_with(|| {
                tracing::trace!(event_id = %event.id, "Occurrence cache miss");
                expand_event(event, window, deviations, options)
            })
    }

    /// ## Summary
    /// Cached equivalent of [`crate::expand::expand_recurring_events_with_options`].
    pub fn expand_all(
        &mut self,
        events: &[BaseEvent],
        window: DateWindow,
        deviations: &DeviationsByEvent,
    ) -> Vec<Occurrence> {
        let mut occurrences = Vec::new();
        for event in events {
            let event_deviations = deviations.get(&event.id).map_or(&[][..], Vec::as_slice);
            occurrences.extend_from_slice(self.get_or_expand(event, window, event_deviations));
        }
        occurrences
    }

    /// Drops every window cached for `event_id`, returning how many were removed.
    pub fn invalidate_event(&mut self, event_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(id, _), _| id != event_id);
        let removed = before - self.entries.len();
        tracing::trace!(event_id = %event_id, removed, "Invalidated cached occurrences");
        removed
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Recurring calendar events materialized into concrete occurrences.
//!
//! The crate reads base events and their per-instance deviations (as produced
//! by an external store), and expands them over a date window. Expansion is a
//! pure function of its inputs: no I/O, no clock, no shared state.

pub mod cache;
pub mod error;
pub mod expand;
pub mod model;
pub mod orphan;
pub mod record;

pub use error::{CalendarError, CalendarResult};
pub use expand::{
    DateWindow, ExpansionOptions, expand_recurring_events, expand_recurring_events_with_options,
    occurrence_on, should_occur_on, would_occur_on,
};
pub use model::{BaseEvent, Deviation, DeviationsByEvent, Occurrence, RecurrenceRule};

//! Typed calendar model consumed and produced by the expansion engine.

pub mod deviation;
pub mod event;
pub mod occurrence;
pub mod recurrence;

pub use deviation::{
    AnchoredDeviation, Deviation, DeviationsByEvent, Overrides, UnanchoredDeviation,
};
pub use event::BaseEvent;
pub use occurrence::{Occurrence, sort_chronologically};
pub use recurrence::{RecurrenceRule, WeekdaySet};

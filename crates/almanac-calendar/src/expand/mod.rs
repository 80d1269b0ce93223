//! Recurrence evaluation and occurrence materialization.

pub mod index;
pub mod materialize;
pub mod predicate;
pub mod window;


pub use index::DeviationIndex;
pub use materialize::{
    ExpansionOptions, expand_event, expand_recurring_events, expand_recurring_events_with_options,
    occurrence_on,
};
pub use predicate::{should_occur_on, would_occur_on, would_occur_on_str};
pub use window::DateWindow;

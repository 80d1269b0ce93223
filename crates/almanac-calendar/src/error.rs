use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced to callers of the expansion engine.
///
/// Only ingestion problems and caller contract violations end up here.
/// Malformed patterns inside a stored event degrade that event's output instead.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid range: start {start} is after end {end}")]
    RangeContractViolation { start: NaiveDate, end: NaiveDate },

    #[error("Window of {days} days exceeds the maximum of {max_days} days")]
    WindowTooLarge { days: i64, max_days: u32 },
}

impl CalendarError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;

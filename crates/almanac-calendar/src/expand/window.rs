//! Requested expansion range.

use chrono::NaiveDate;

use crate::error::{CalendarError, CalendarResult};

/// Inclusive `[start, end]` range of calendar dates.
///
/// Constructing one is where caller contract violations are caught, so the
/// materializer itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// ## Summary
    /// Creates a window covering `start..=end`.
    ///
    /// ## Errors
    /// Returns `CalendarError::RangeContractViolation` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> CalendarResult<Self> {
        if start > end {
            return Err(CalendarError::RangeContractViolation { start, end });
        }
        Ok(Self { start, end })
    }

    /// ## Summary
    /// Creates a window no longer than `max_days` days.
    ///
    /// Expansion cost grows with the number of days per recurring event, so
    /// request handlers should construct windows through this.
    ///
    /// ## Errors
    /// Returns `CalendarError::RangeContractViolation` if `start > end`, or
    /// `CalendarError::WindowTooLarge` if the window spans more than `max_days`.
    pub fn bounded(start: NaiveDate, end: NaiveDate, max_days: u32) -> CalendarResult<Self> {
        let window = Self::new(start, end)?;
        let days = window.len_days();
        if days > i64::from(max_days) {
            return Err(CalendarError::WindowTooLarge { days, max_days });
        }
        Ok(window)
    }

    /// A window covering a single date.
    #[must_use]
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of dates in the window, both ends included.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

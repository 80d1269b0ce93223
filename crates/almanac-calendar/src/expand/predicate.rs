//! Decides whether a recurrence pattern produces an instance on a date.
//!
//! All offsets are computed on `NaiveDate`, so daylight-saving transitions
//! never shift a day boundary.

use almanac_core::types::RecurrenceKind;
use almanac_core::util::date::parse_calendar_date;
use chrono::{Datelike, NaiveDate};

use super::index::DeviationIndex;
use crate::error::{CalendarError, CalendarResult};
use crate::model::{BaseEvent, RecurrenceRule};

/// ## Summary
/// Checks whether `event` has a live instance on `date`.
///
/// Evaluated in order: series deletion, cancellation by an anchored
/// deviation, dates before the series start, then the pattern itself.
/// The rule's `until` bound is not consulted here; the materializer already
/// stops its walk there.
#[must_use]
pub fn should_occur_on(event: &BaseEvent, date: NaiveDate, anchored: &DeviationIndex<'_>) -> bool {
    if event.deleted {
        return false;
    }
    if anchored.is_cancelled(date) {
        return false;
    }
    let start = event.start_date();
    if date < start {
        return false;
    }
    matches_pattern(&event.recurrence, start, date)
}

/// ## Summary
/// Checks whether the pattern alone produces `date`, ignoring every deviation.
///
/// Used to find deviations anchored to dates an edited rule no longer
/// produces. Unlike [`should_occur_on`] this honours `until`.
#[must_use]
pub fn would_occur_on(event: &BaseEvent, date: NaiveDate) -> bool {
    if event.deleted || !event.is_recurring() {
        return false;
    }
    if event.recurrence.until.is_some_and(|until| date > until) {
        return false;
    }
    let start = event.start_date();
    if date < start {
        return false;
    }
    matches_pattern(&event.recurrence, start, date)
}

/// ## Summary
/// [`would_occur_on`] for a `YYYY-MM-DD` date key.
///
/// ## Errors
/// Returns a validation error if `date` is not a calendar date.
pub fn would_occur_on_str(event: &BaseEvent, date: &str) -> CalendarResult<bool> {
    let date =
        parse_calendar_date(date).map_err(|err| CalendarError::validation(err.to_string()))?;
    Ok(would_occur_on(event, date))
}

fn matches_pattern(rule: &RecurrenceRule, start: NaiveDate, date: NaiveDate) -> bool {
    let interval = i64::from(rule.interval.get());
    let day_offset = (date - start).num_days();
    if day_offset < 0 {
        return false;
    }

    match &rule.kind {
        RecurrenceKind::Daily => day_offset % interval == 0,
        RecurrenceKind::Weekly => {
            let on_weekday = if rule.weekdays.is_empty() {
                date.weekday() == start.weekday()
            } else {
                rule.weekdays.contains(date.weekday())
            };
            on_weekday && (day_offset / 7) % interval == 0
        }
        RecurrenceKind::Monthly => {
            // Months without the start day (Feb 30, Apr 31) are skipped.
            let month_offset = months_between(start, date);
            date.day() == start.day() && month_offset >= 0 && month_offset % interval == 0
        }
        RecurrenceKind::Yearly => {
            let year_offset = i64::from(date.year()) - i64::from(start.year());
            date.month() == start.month()
                && date.day() == start.day()
                && year_offset >= 0
                && year_offset % interval == 0
        }
        RecurrenceKind::None => false,
        RecurrenceKind::Unrecognized(token) => {
            tracing::trace!(kind = %token, "Unrecognized recurrence kind never occurs");
            false
        }
    }
}

/// Calendar months from `start` to `date`, ignoring the day of month.
fn months_between(start: NaiveDate, date: NaiveDate) -> i64 {
    let index = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month());
    index(date) - index(start)
}

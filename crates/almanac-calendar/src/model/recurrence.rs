//! Recurrence rules and weekday sets.

use std::num::NonZeroU32;
use std::str::FromStr;

use almanac_core::types::RecurrenceKind;
use chrono::{NaiveDate, Weekday};
use serde::{Serialize, Serializer};

/// Weekday tokens in the order they are written back out.
const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Three-letter token for a weekday (`"Mon"`).
#[must_use]
pub const fn weekday_token(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Parses a weekday token, case-insensitively. Full names are accepted too.
#[must_use]
pub fn parse_weekday_token(token: &str) -> Option<Weekday> {
    Weekday::from_str(token.trim()).ok()
}

/// Set of weekdays a weekly rule fires on.
///
/// An empty set means "the weekday of the series start".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub fn from_weekdays(weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        let mut set = Self::EMPTY;
        for weekday in weekdays {
            set.insert(weekday);
        }
        set
    }

    pub fn insert(&mut self, weekday: Weekday) {
        self.0 |= 1 << weekday.num_days_from_monday();
    }

    #[must_use]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_monday()) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates Sunday first, matching the store's token order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        WEEK_ORDER.into_iter().filter(move |day| self.contains(*day))
    }

    #[must_use]
    pub fn tokens(self) -> Vec<&'static str> {
        self.iter().map(weekday_token).collect()
    }

    /// ## Summary
    /// Builds a set from weekday tokens.
    ///
    /// Returns `None` if any token is not a weekday, so callers can treat the
    /// whole encoding as malformed.
    #[must_use]
    pub fn parse_tokens<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::EMPTY;
        for token in tokens {
            set.insert(parse_weekday_token(token.as_ref())?);
        }
        Some(set)
    }

    /// ## Summary
    /// Decodes the store's JSON-encoded token array (`["Mon","Wed"]`).
    ///
    /// Malformed input degrades to the empty set, which falls back to the
    /// weekday of the series start.
    #[must_use]
    pub fn from_json_lenient(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::EMPTY;
        }
        let decoded = serde_json::from_str::<Vec<String>>(raw)
            .ok()
            .and_then(|tokens| Self::parse_tokens(&tokens));
        if let Some(set) = decoded {
            set
        } else {
            tracing::debug!(raw = %raw, "Malformed weekday set, using start weekday");
            Self::EMPTY
        }
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.tokens())
    }
}

/// Recurrence pattern of a base event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRule {
    pub kind: RecurrenceKind,
    pub interval: NonZeroU32,
    /// Only consulted for weekly rules.
    pub weekdays: WeekdaySet,
    /// Last date (inclusive) the pattern may produce.
    pub until: Option<NaiveDate>,
}

impl RecurrenceRule {
    #[must_use]
    pub const fn new(kind: RecurrenceKind) -> Self {
        Self {
            kind,
            interval: NonZeroU32::MIN,
            weekdays: WeekdaySet::EMPTY,
            until: None,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self::new(RecurrenceKind::None)
    }

    /// Sets the interval; `0` is stored as `1`.
    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = NonZeroU32::new(interval).unwrap_or(NonZeroU32::MIN);
        self
    }

    #[must_use]
    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = WeekdaySet::from_weekdays(weekdays);
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: NaiveDate) -> Self {
        self.until = Some(until);
        self
    }

    #[must_use]
    pub const fn is_recurring(&self) -> bool {
        self.kind.is_recurring()
    }
}

impl Default for RecurrenceRule {
    fn default() -> Self {
        Self::none()
    }
}

//! Per-instance exceptions to a recurring series.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Field values replacing the series' values for one instance.
///
/// `None` means "keep the series value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub title: Option<String>,
    pub start_time: Option<DateTime<FixedOffset>>,
    pub end_time: Option<DateTime<FixedOffset>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub timezone: Option<String>,
}

impl Overrides {
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// Edit or cancellation of an instance the pattern produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredDeviation {
    pub original_date: NaiveDate,
    pub cancelled: bool,
    pub overrides: Overrides,
}

/// Instance detached from the pattern, living on its own date.
///
/// Removing it is the only way to cancel it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnanchoredDeviation {
    pub new_date: NaiveDate,
    pub overrides: Overrides,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deviation {
    Anchored(AnchoredDeviation),
    Unanchored(UnanchoredDeviation),
}

impl Deviation {
    /// Cancels the instance on `date`.
    #[must_use]
    pub fn cancelled(date: NaiveDate) -> Self {
        Self::Anchored(AnchoredDeviation {
            original_date: date,
            cancelled: true,
            overrides: Overrides::default(),
        })
    }

    /// Edits the instance on `date` in place.
    #[must_use]
    pub const fn modified(date: NaiveDate, overrides: Overrides) -> Self {
        Self::Anchored(AnchoredDeviation {
            original_date: date,
            cancelled: false,
            overrides,
        })
    }

    /// Adds a standalone instance on `date`.
    #[must_use]
    pub const fn moved(date: NaiveDate, overrides: Overrides) -> Self {
        Self::Unanchored(UnanchoredDeviation {
            new_date: date,
            overrides,
        })
    }

    /// The date this deviation lives on: `original_date` or `new_date`.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        match self {
            Self::Anchored(anchored) => anchored.original_date,
            Self::Unanchored(unanchored) => unanchored.new_date,
        }
    }

    #[must_use]
    pub const fn overrides(&self) -> &Overrides {
        match self {
            Self::Anchored(anchored) => &anchored.overrides,
            Self::Unanchored(unanchored) => &unanchored.overrides,
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Anchored(AnchoredDeviation { cancelled: true, .. }))
    }
}

/// Deviations grouped by the id of the event they belong to.
pub type DeviationsByEvent = HashMap<String, Vec<Deviation>>;

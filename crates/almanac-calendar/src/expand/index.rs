//! Per-event deviation lookup and the field overlay rule.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::{
    AnchoredDeviation, BaseEvent, Deviation, Occurrence, Overrides, UnanchoredDeviation,
};

/// Deviations of one event, split by kind for constant-time lookups.
#[derive(Debug, Default)]
pub struct DeviationIndex<'a> {
    /// First anchored deviation recorded for each date; supplies the overlay.
    anchored: HashMap<NaiveDate, &'a AnchoredDeviation>,
    /// Every date any anchored deviation cancels.
    cancelled_dates: HashSet<NaiveDate>,
    /// In list order.
    unanchored: Vec<&'a UnanchoredDeviation>,
    unanchored_dates: HashSet<NaiveDate>,
}

impl<'a> DeviationIndex<'a> {
    #[must_use]
    pub fn new(deviations: &'a [Deviation]) -> Self {
        let mut index = Self::default();
        for deviation in deviations {
            match deviation {
                Deviation::Anchored(anchored) => {
                    if anchored.cancelled {
                        index.cancelled_dates.insert(anchored.original_date);
                    }
                    index
                        .anchored
                        .entry(anchored.original_date)
                        .or_insert(anchored);
                }
                Deviation::Unanchored(unanchored) => {
                    index.unanchored_dates.insert(unanchored.new_date);
                    index.unanchored.push(unanchored);
                }
            }
        }
        index
    }

    #[must_use]
    pub fn anchored_on(&self, date: NaiveDate) -> Option<&'a AnchoredDeviation> {
        self.anchored.get(&date).copied()
    }

    /// Whether any anchored deviation cancels the instance on `date`.
    #[must_use]
    pub fn is_cancelled(&self, date: NaiveDate) -> bool {
        self.cancelled_dates.contains(&date)
    }

    /// Whether a moved instance occupies `date`.
    #[must_use]
    pub fn has_unanchored_on(&self, date: NaiveDate) -> bool {
        self.unanchored_dates.contains(&date)
    }

    pub fn unanchored(&self) -> impl Iterator<Item = &'a UnanchoredDeviation> + '_ {
        self.unanchored.iter().copied()
    }
}

/// ## Summary
/// Replaces each field of `occurrence` the deviation overrides.
///
/// Fields left as `None` keep the series value already on the occurrence.
pub fn apply_overrides(occurrence: &mut Occurrence, overrides: &Overrides) {
    if let Some(title) = &overrides.title {
        occurrence.title.clone_from(title);
    }
    if let Some(start_time) = overrides.start_time {
        occurrence.start_time = start_time;
    }
    if let Some(end_time) = overrides.end_time {
        occurrence.end_time = end_time;
    }
    if let Some(location) = &overrides.location {
        occurrence.location = Some(location.clone());
    }
    if let Some(description) = &overrides.description {
        occurrence.description = Some(description.clone());
    }
    if let Some(timezone) = &overrides.timezone {
        occurrence.timezone.clone_from(timezone);
    }
}

/// Builds the instance the pattern produced on `date`, overlaid with its
/// anchored deviation if there is one.
pub(crate) fn anchored_occurrence(
    event: &BaseEvent,
    date: NaiveDate,
    deviation: Option<&AnchoredDeviation>,
) -> Occurrence {
    let mut occurrence = Occurrence::from_event(event, date, true);
    if let Some(deviation) = deviation {
        apply_overrides(&mut occurrence, &deviation.overrides);
        occurrence.has_deviation = !deviation.cancelled;
    }
    occurrence
}

/// Builds the standalone instance of a moved deviation.
pub(crate) fn unanchored_occurrence(
    event: &BaseEvent,
    deviation: &UnanchoredDeviation,
) -> Occurrence {
    let mut occurrence = Occurrence::from_event(event, deviation.new_date, true);
    apply_overrides(&mut occurrence, &deviation.overrides);
    occurrence.has_deviation = true;
    occurrence.is_unanchored = true;
    occurrence
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(value: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(value).unwrap()
    }

    fn event() -> BaseEvent {
        let mut event = BaseEvent::new(
            "evt-1",
            "Standup",
            at("2024-01-01T09:00:00Z"),
            at("2024-01-01T09:15:00Z"),
        );
        event.location = Some("Room 1".to_string());
        event.description = Some("Daily sync".to_string());
        event
    }

    #[test]
    fn test_partition_by_kind() {
        let deviations = vec![
            Deviation::cancelled(date(2024, 1, 3)),
            Deviation::moved(date(2024, 1, 5), Overrides::title("Moved")),
            Deviation::modified(date(2024, 1, 8), Overrides::title("Edited")),
        ];
        let index = DeviationIndex::new(&deviations);

        assert!(index.is_cancelled(date(2024, 1, 3)));
        assert!(!index.is_cancelled(date(2024, 1, 8)));
        assert!(index.anchored_on(date(2024, 1, 8)).is_some());
        assert!(index.anchored_on(date(2024, 1, 5)).is_none());
        assert!(index.has_unanchored_on(date(2024, 1, 5)));
        assert!(!index.has_unanchored_on(date(2024, 1, 3)));
        assert_eq!(index.unanchored().count(), 1);
    }

    #[test]
    fn test_first_anchored_deviation_supplies_the_overlay() {
        let deviations = vec![
            Deviation::modified(date(2024, 1, 3), Overrides::title("First")),
            Deviation::modified(date(2024, 1, 3), Overrides::title("Second")),
        ];
        let index = DeviationIndex::new(&deviations);

        let found = index.anchored_on(date(2024, 1, 3)).unwrap();
        assert_eq!(found.overrides.title.as_deref(), Some("First"));
        assert!(!index.is_cancelled(date(2024, 1, 3)));
    }

    #[test]
    fn test_cancellation_wins_over_an_earlier_edit() {
        let deviations = vec![
            Deviation::modified(date(2024, 1, 3), Overrides::title("Edited")),
            Deviation::cancelled(date(2024, 1, 3)),
        ];
        let index = DeviationIndex::new(&deviations);

        assert!(index.is_cancelled(date(2024, 1, 3)));
        let found = index.anchored_on(date(2024, 1, 3)).unwrap();
        assert_eq!(found.overrides.title.as_deref(), Some("Edited"));
    }

    #[test]
    fn test_overlay_falls_back_to_series_values() {
        let overrides = Overrides {
            title: Some("Standup (remote)".to_string()),
            location: Some("Zoom".to_string()),
            ..Overrides::default()
        };
        let deviation = AnchoredDeviation {
            original_date: date(2024, 1, 8),
            cancelled: false,
            overrides,
        };

        let occurrence = anchored_occurrence(&event(), date(2024, 1, 8), Some(&deviation));

        assert_eq!(occurrence.title, "Standup (remote)");
        assert_eq!(occurrence.location.as_deref(), Some("Zoom"));
        assert_eq!(occurrence.description.as_deref(), Some("Daily sync"));
        assert_eq!(occurrence.start_time, at("2024-01-01T09:00:00Z"));
        assert_eq!(occurrence.timezone, "America/New_York");
        assert!(occurrence.has_deviation);
        assert!(!occurrence.is_unanchored);
    }

    #[test]
    fn test_plain_instance_has_no_deviation() {
        let occurrence = anchored_occurrence(&event(), date(2024, 1, 8), None);
        assert!(!occurrence.has_deviation);
        assert!(occurrence.is_recurring);
        assert_eq!(occurrence.title, "Standup");
    }

    #[test]
    fn test_unanchored_instance_flags() {
        let deviation = UnanchoredDeviation {
            new_date: date(2024, 1, 6),
            overrides: Overrides {
                start_time: Some(at("2024-01-06T11:00:00Z")),
                timezone: Some("Europe/Berlin".to_string()),
                ..Overrides::default()
            },
        };

        let occurrence = unanchored_occurrence(&event(), &deviation);

        assert_eq!(occurrence.instance_date, date(2024, 1, 6));
        assert_eq!(occurrence.start_time, at("2024-01-06T11:00:00Z"));
        assert_eq!(occurrence.end_time, at("2024-01-01T09:15:00Z"));
        assert_eq!(occurrence.timezone, "Europe/Berlin");
        assert!(occurrence.is_recurring);
        assert!(occurrence.has_deviation);
        assert!(occurrence.is_unanchored);
    }
}

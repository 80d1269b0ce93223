use almanac_calendar::expand::{DateWindow, expand_recurring_events};
use almanac_calendar::model::sort_chronologically;
use almanac_calendar::record::{Snapshot, ingest};
use chrono::NaiveDate;

pub struct ExpansionCase {
    pub name: &'static str,
    /// Store snapshot, camelCase JSON.
    pub snapshot: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    /// `(event id, instance date, title)` in output order.
    pub expected: &'static [(&'static str, &'static str, &'static str)],
    pub sorted: bool,
}

#[expect(clippy::too_many_lines)]
pub fn expansion_cases() -> Vec<ExpansionCase> {
    vec![
        ExpansionCase {
            name: "weekly_mon_wed_fri",
            snapshot: r#"{"events": [{"id": "standup", "title": "Standup",
                "startTime": "2024-01-01T09:00:00-05:00", "endTime": "2024-01-01T09:15:00-05:00",
                "recurrence": "weekly", "recurrenceDays": "[\"Mon\",\"Wed\",\"Fri\"]"}]}"#,
            start: "2024-01-01",
            end: "2024-01-07",
            expected: &[
                ("standup", "2024-01-01", "Standup"),
                ("standup", "2024-01-03", "Standup"),
                ("standup", "2024-01-05", "Standup"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "cancelled_instance",
            snapshot: r#"{"events": [{"id": "standup", "title": "Standup",
                "startTime": "2024-01-01T09:00:00-05:00", "endTime": "2024-01-01T09:15:00-05:00",
                "recurrence": "weekly", "recurrenceDays": "[\"Mon\",\"Wed\",\"Fri\"]"}],
                "deviations": [{"eventId": "standup", "originalDate": "2024-01-03", "cancelled": true}]}"#,
            start: "2024-01-01",
            end: "2024-01-07",
            expected: &[
                ("standup", "2024-01-01", "Standup"),
                ("standup", "2024-01-05", "Standup"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "move_onto_pattern_date_suppresses_it",
            snapshot: r#"{"events": [{"id": "standup", "title": "Standup",
                "startTime": "2024-01-01T09:00:00-05:00", "endTime": "2024-01-01T09:15:00-05:00",
                "recurrence": "weekly", "recurrenceDays": "[\"Mon\",\"Wed\",\"Fri\"]"}],
                "deviations": [
                    {"eventId": "standup", "originalDate": "2024-01-03", "cancelled": true},
                    {"eventId": "standup", "newDate": "2024-01-05", "overrideTitle": "Standup (moved)"}
                ]}"#,
            start: "2024-01-01",
            end: "2024-01-07",
            expected: &[
                ("standup", "2024-01-01", "Standup"),
                ("standup", "2024-01-05", "Standup (moved)"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "move_to_off_pattern_date_sorted",
            snapshot: r#"{"events": [{"id": "review", "title": "Review",
                "startTime": "2024-03-04T14:00:00Z", "endTime": "2024-03-04T15:00:00Z",
                "recurrence": "weekly"}],
                "deviations": [
                    {"eventId": "review", "originalDate": "2024-03-11", "cancelled": true},
                    {"eventId": "review", "newDate": "2024-03-13", "overrideTitle": "Review (Wed)"}
                ]}"#,
            start: "2024-03-01",
            end: "2024-03-20",
            expected: &[
                ("review", "2024-03-04", "Review"),
                ("review", "2024-03-13", "Review (Wed)"),
                ("review", "2024-03-18", "Review"),
            ],
            sorted: true,
        },
        ExpansionCase {
            name: "biweekly_interval",
            snapshot: r#"{"events": [{"id": "sync", "title": "Sync",
                "startTime": "2024-01-02T10:00:00Z", "endTime": "2024-01-02T10:30:00Z",
                "recurrence": "Weekly", "recurrenceInterval": 2}]}"#,
            start: "2024-01-01",
            end: "2024-01-31",
            expected: &[
                ("sync", "2024-01-02", "Sync"),
                ("sync", "2024-01-16", "Sync"),
                ("sync", "2024-01-30", "Sync"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "monthly_on_the_31st",
            snapshot: r#"{"events": [{"id": "close", "title": "Month close",
                "startTime": "2024-01-31T16:00:00Z", "endTime": "2024-01-31T17:00:00Z",
                "recurrence": "monthly"}]}"#,
            start: "2024-01-01",
            end: "2024-06-30",
            expected: &[
                ("close", "2024-01-31", "Month close"),
                ("close", "2024-03-31", "Month close"),
                ("close", "2024-05-31", "Month close"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "yearly_until_bound",
            snapshot: r#"{"events": [{"id": "offsite", "title": "Offsite",
                "startTime": "2020-06-15T09:00:00Z", "endTime": "2020-06-15T17:00:00Z",
                "recurrence": "yearly", "recurrenceUntil": "2023-01-01"}]}"#,
            start: "2019-01-01",
            end: "2025-12-31",
            expected: &[
                ("offsite", "2020-06-15", "Offsite"),
                ("offsite", "2021-06-15", "Offsite"),
                ("offsite", "2022-06-15", "Offsite"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "modified_instance_overlay",
            snapshot: r#"{"events": [{"id": "daily", "title": "Daily",
                "startTime": "2024-05-01T08:00:00Z", "endTime": "2024-05-01T08:10:00Z",
                "recurrence": "daily", "recurrenceInterval": 2}],
                "deviations": [{"eventId": "daily", "originalDate": "2024-05-03", "overrideTitle": "Daily (demo)"}]}"#,
            start: "2024-05-01",
            end: "2024-05-06",
            expected: &[
                ("daily", "2024-05-01", "Daily"),
                ("daily", "2024-05-03", "Daily (demo)"),
                ("daily", "2024-05-05", "Daily"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "mixed_events_keep_input_order",
            snapshot: r#"{"events": [
                {"id": "lunch", "title": "Lunch", "startTime": "2024-02-10T12:00:00Z",
                 "endTime": "2024-02-10T13:00:00Z"},
                {"id": "gone", "title": "Gone", "startTime": "2024-02-01T09:00:00Z",
                 "endTime": "2024-02-01T10:00:00Z", "recurrence": "daily", "deleted": true},
                {"id": "weekly", "title": "Weekly", "startTime": "2024-02-05T09:00:00Z",
                 "endTime": "2024-02-05T10:00:00Z", "recurrence": "weekly"}
            ]}"#,
            start: "2024-02-01",
            end: "2024-02-14",
            expected: &[
                ("lunch", "2024-02-10", "Lunch"),
                ("weekly", "2024-02-05", "Weekly"),
                ("weekly", "2024-02-12", "Weekly"),
            ],
            sorted: false,
        },
        ExpansionCase {
            name: "unrecognized_kind_keeps_moved_instances",
            snapshot: r#"{"events": [{"id": "odd", "title": "Odd",
                "startTime": "2024-01-01T09:00:00Z", "endTime": "2024-01-01T10:00:00Z",
                "recurrence": "fortnightly"}],
                "deviations": [{"eventId": "odd", "newDate": "2024-01-09"}]}"#,
            start: "2024-01-01",
            end: "2024-01-31",
            expected: &[("odd", "2024-01-09", "Odd")],
            sorted: false,
        },
    ]
}

pub fn assert_case(case: &ExpansionCase) {
    let snapshot: Snapshot = serde_json::from_str(case.snapshot)
        .unwrap_or_else(|err| panic!("Case {} has an invalid snapshot: {err}", case.name));
    let (events, deviations) = ingest(snapshot)
        .into_strict()
        .unwrap_or_else(|err| panic!("Case {} rejected a record: {err}", case.name));

    let window = DateWindow::new(parse_date(case.start), parse_date(case.end))
        .unwrap_or_else(|err| panic!("Case {} has an invalid window: {err}", case.name));
    let mut occurrences = expand_recurring_events(&events, window, &deviations);
    if case.sorted {
        sort_chronologically(&mut occurrences);
    }

    let actual: Vec<(String, NaiveDate, String)> = occurrences
        .into_iter()
        .map(|occurrence| (occurrence.id, occurrence.instance_date, occurrence.title))
        .collect();
    let expected: Vec<(String, NaiveDate, String)> = case
        .expected
        .iter()
        .map(|(id, date, title)| ((*id).to_string(), parse_date(date), (*title).to_string()))
        .collect();
    assert_eq!(actual, expected, "Case {} did not match", case.name);
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Failed to parse date {value}: {err}"))
}

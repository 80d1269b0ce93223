use almanac_core::error::CoreResult;
use almanac_core::util::date::{parse_calendar_date, parse_datetime};
use serde::Deserialize;

use super::flag::{flag, non_blank};
use crate::error::{CalendarError, CalendarResult};
use crate::model::{AnchoredDeviation, Deviation, Overrides, UnanchoredDeviation};

/// Deviation row as stored, camelCase JSON.
///
/// Exactly one of `original_date` and `new_date` must be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviationRecord {
    pub event_id: String,
    #[serde(default)]
    pub original_date: Option<String>,
    #[serde(default)]
    pub new_date: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub cancelled: bool,
    #[serde(default)]
    pub override_title: Option<String>,
    #[serde(default)]
    pub override_start_time: Option<String>,
    #[serde(default)]
    pub override_end_time: Option<String>,
    #[serde(default)]
    pub override_location: Option<String>,
    #[serde(default)]
    pub override_description: Option<String>,
    #[serde(default)]
    pub override_timezone: Option<String>,
}

impl DeviationRecord {
    /// ## Summary
    /// Validates the record and returns it with the id of its event.
    ///
    /// ## Errors
    /// Returns `CalendarError::ValidationError` if the record carries both or
    /// neither of `originalDate`/`newDate`, or if a date field does not parse.
    pub fn into_deviation(self) -> CalendarResult<(String, Deviation)> {
        let event_id = self.event_id.clone();
        let invalid = |field: &str, err: &dyn std::fmt::Display| {
            CalendarError::validation(format!("deviation of event {event_id}: {field}: {err}"))
        };

        let original_date = non_blank(self.original_date.clone())
            .map(|value| parse_calendar_date(&value))
            .transpose()
            .map_err(|err| invalid("originalDate", &err))?;
        let new_date = non_blank(self.new_date.clone())
            .map(|value| parse_calendar_date(&value))
            .transpose()
            .map_err(|err| invalid("newDate", &err))?;
        let overrides = self.overrides().map_err(|err| invalid("override", &err))?;

        let deviation = match (original_date, new_date) {
            (Some(original_date), None) => Deviation::Anchored(AnchoredDeviation {
                original_date,
                cancelled: self.cancelled,
                overrides,
            }),
            (None, Some(new_date)) => {
                if self.cancelled {
                    tracing::debug!(
                        event_id = %event_id,
                        new_date = %new_date,
                        "Ignoring cancelled flag on a moved instance"
                    );
                }
                Deviation::Unanchored(UnanchoredDeviation { new_date, overrides })
            }
            (Some(_), Some(_)) => {
                return Err(invalid("dates", &"both originalDate and newDate are set"));
            }
            (None, None) => {
                return Err(invalid("dates", &"neither originalDate nor newDate is set"));
            }
        };

        Ok((self.event_id, deviation))
    }

    fn overrides(&self) -> CoreResult<Overrides> {
        let datetime = |value: Option<&str>| {
            value
                .filter(|text| !text.trim().is_empty())
                .map(parse_datetime)
                .transpose()
        };
        Ok(Overrides {
            title: self.override_title.clone(),
            start_time: datetime(self.override_start_time.as_deref())?,
            end_time: datetime(self.override_end_time.as_deref())?,
            location: self.override_location.clone(),
            description: self.override_description.clone(),
            timezone: non_blank(self.override_timezone.clone()),
        })
    }
}

//! Cut-off schedule for a request record from the system of record.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::config::PilaConfig;
use crate::nit::TextOrNumber;
use crate::{
    CutoffDate, CutoffError, DEFAULT_WARNING_WINDOW_DAYS, DatasetError, LaborCalendar, LimitTable,
    PilaDate, compute_cutoff_dates, load_calendar, load_limits, refresh_statuses,
};

/// The fields of an external request ("solicitud") that drive its PILA
/// schedule. Any of them may be missing in the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SolicitudRecord {
    #[serde(rename = "NIT_CED", default, deserialize_with = "optional_text")]
    pub nit:         Option<String>,
    #[serde(rename = "Fechainicio", default)]
    pub visit_start: Option<String>,
    #[serde(rename = "Fechafin", default)]
    pub visit_end:   Option<String>,
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(TextOrNumber::into_text))
}

/// Error type for building a request's schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The record lacks the NIT or one of the visit dates.
    #[error("Request record is missing {field}")]
    IncompleteRecord { field: &'static str },

    #[error(transparent)]
    Cutoff(#[from] CutoffError),
}

/// Loaded datasets plus the warning window, ready to schedule requests.
#[derive(Debug, Clone)]
pub struct PilaSchedule {
    calendar:            LaborCalendar,
    limits:              LimitTable,
    warning_window_days: u32,
}

impl PilaSchedule {
    pub fn new(calendar: LaborCalendar, limits: LimitTable) -> Self {
        Self {
            calendar,
            limits,
            warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
        }
    }

    #[must_use]
    pub fn with_warning_window(mut self, days: u32) -> Self {
        self.warning_window_days = days;
        self
    }

    /// Loads both datasets from the configured paths.
    ///
    /// # Errors
    /// Returns `DatasetError` if either dataset cannot be read.
    pub fn from_config(config: &PilaConfig) -> Result<Self, DatasetError> {
        let calendar = load_calendar(&config.calendar_path)?;
        let limits = load_limits(&config.limits_path)?;
        info!(
            calendar_days = calendar.len(),
            limit_rows = limits.len(),
            "PILA datasets loaded"
        );
        Ok(Self::new(calendar, limits).with_warning_window(config.warning_window_days))
    }

    pub const fn calendar(&self) -> &LaborCalendar {
        &self.calendar
    }

    pub const fn limits(&self) -> &LimitTable {
        &self.limits
    }

    pub const fn warning_window_days(&self) -> u32 {
        self.warning_window_days
    }

    /// Cut-off dates with their positional status, as computed.
    ///
    /// # Errors
    /// Returns `ScheduleError::IncompleteRecord` for a record without NIT or
    /// dates, and `ScheduleError::Cutoff` when the calculation fails.
    pub fn cutoffs(&self, record: &SolicitudRecord) -> Result<Vec<CutoffDate>, ScheduleError> {
        let nit = required(record.nit.as_deref(), "NIT_CED")?;
        let start = required(record.visit_start.as_deref(), "Fechainicio")?;
        let end = required(record.visit_end.as_deref(), "Fechafin")?;
        Ok(compute_cutoff_dates(nit, start, end, &self.calendar, &self.limits)?)
    }

    /// Cut-off dates with statuses relative to `today`, before any document
    /// is known: a warning inside the window, normal otherwise.
    ///
    /// # Errors
    /// See [`PilaSchedule::cutoffs`].
    pub fn for_record(
        &self,
        record: &SolicitudRecord,
        today: &PilaDate,
    ) -> Result<Vec<CutoffDate>, ScheduleError> {
        self.with_documents(record, today, &HashSet::new())
    }

    /// Cut-off dates with statuses relative to `today` and to the dates that
    /// already have an uploaded PILA document.
    ///
    /// # Errors
    /// See [`PilaSchedule::cutoffs`].
    pub fn with_documents(
        &self,
        record: &SolicitudRecord,
        today: &PilaDate,
        uploaded: &HashSet<PilaDate>,
    ) -> Result<Vec<CutoffDate>, ScheduleError> {
        let mut dates = self.cutoffs(record)?;
        refresh_statuses(&mut dates, today, uploaded, self.warning_window_days);
        info!(
            dates = dates.len(),
            uploaded = uploaded.len(),
            %today,
            "PILA schedule computed"
        );
        Ok(dates)
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, ScheduleError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ScheduleError::IncompleteRecord { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CutoffStatus;
    use crate::test_utils::{calendar, date, limits};

    fn schedule() -> PilaSchedule {
        PilaSchedule::new(
            calendar(date(1, 7, 2025), date(31, 12, 2025), &[date(7, 8, 2025)]),
            limits(&[("45", 4)]),
        )
    }

    fn record(json: &str) -> SolicitudRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_record_accepts_numeric_nit() {
        let rec = record(r#"{"NIT_CED": 900123445, "Fechainicio": "2025-07-01", "Fechafin": "2025-09-30", "OTRO": 1}"#);
        assert_eq!(rec.nit.as_deref(), Some("900123445"));
        assert_eq!(rec.visit_end.as_deref(), Some("2025-09-30"));
    }

    #[test]
    fn test_incomplete_record() {
        struct TestCase {
            json:  &'static str,
            field: &'static str,
        }

        let cases = [
            TestCase {
                json:  r#"{"Fechainicio": "2025-07-01", "Fechafin": "2025-09-30"}"#,
                field: "NIT_CED",
            },
            TestCase {
                json:  r#"{"NIT_CED": "900123445", "Fechainicio": " ", "Fechafin": "2025-09-30"}"#,
                field: "Fechainicio",
            },
            TestCase {
                json:  r#"{"NIT_CED": "900123445", "Fechainicio": "2025-07-01", "Fechafin": null}"#,
                field: "Fechafin",
            },
        ];

        for case in &cases {
            let result = schedule().cutoffs(&record(case.json));
            assert_eq!(
                result,
                Err(ScheduleError::IncompleteRecord { field: case.field }),
                "{}",
                case.json
            );
        }
    }

    #[test]
    fn test_for_record_refreshes_by_date() {
        let rec = record(r#"{"NIT_CED": "900123445", "Fechainicio": "2025-07-01", "Fechafin": "2025-09-30"}"#);

        let positional: Vec<_> = schedule()
            .cutoffs(&rec)
            .unwrap()
            .iter()
            .map(|c| c.status)
            .collect();
        assert_eq!(
            positional,
            vec![
                CutoffStatus::Success,
                CutoffStatus::Warning,
                CutoffStatus::Normal
            ]
        );

        // 06/08 is 9 days after 28/07; 04/07 has passed, 04/09 is far
        let refreshed: Vec<_> = schedule()
            .for_record(&rec, &date(28, 7, 2025))
            .unwrap()
            .iter()
            .map(|c| (c.id, c.status))
            .collect();
        assert_eq!(
            refreshed,
            vec![
                (1, CutoffStatus::Normal),
                (2, CutoffStatus::Warning),
                (3, CutoffStatus::Normal)
            ]
        );
    }

    #[test]
    fn test_with_documents_and_custom_window() {
        let rec = record(r#"{"NIT_CED": "900123445", "Fechainicio": "2025-07-01", "Fechafin": "2025-09-30"}"#);
        let uploaded = HashSet::from([date(4, 7, 2025)]);
        let statuses: Vec<_> = schedule()
            .with_warning_window(40)
            .with_documents(&rec, &date(28, 7, 2025), &uploaded)
            .unwrap()
            .iter()
            .map(|c| c.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                CutoffStatus::Success,
                CutoffStatus::Warning,
                CutoffStatus::Warning
            ]
        );
    }

    #[test]
    fn test_cutoff_errors_propagate() {
        let rec = record(r#"{"NIT_CED": "900123446", "Fechainicio": "2025-07-01", "Fechafin": "2025-09-30"}"#);
        let result = schedule().cutoffs(&rec);
        assert!(matches!(
            result,
            Err(ScheduleError::Cutoff(CutoffError::Configuration { .. }))
        ));
    }
}

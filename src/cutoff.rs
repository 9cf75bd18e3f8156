//! Monthly PILA cut-off dates for a visit window.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{LaborCalendar, LimitTable, Nit, NitSuffix, ParseError, PilaDate, VisitWindow, prelude::*};

/// Display status attached to a cut-off date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoffStatus {
    #[display(fmt = "success")]
    Success,
    #[display(fmt = "warning")]
    Warning,
    #[display(fmt = "normal")]
    Normal,
}

impl CutoffStatus {
    /// Status by position in a freshly computed list: the first date is a
    /// success, the second a warning, the rest normal.
    pub const fn for_position(position: usize) -> Self {
        match position {
            0 => Self::Success,
            1 => Self::Warning,
            _ => Self::Normal,
        }
    }
}

/// A computed payment due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffDate {
    /// 1-based position in the returned list
    pub id:          usize,
    #[serde(rename = "fecha")]
    pub date:        PilaDate,
    #[serde(rename = "estado")]
    pub status:      CutoffStatus,
    #[serde(rename = "mesTexto")]
    pub month_label: String,
}

/// Error type for cut-off calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CutoffError {
    /// The limit table has no row for the NIT's suffix.
    #[error("No social-security limit configured for NIT suffix {suffix}")]
    Configuration { suffix: NitSuffix },

    /// Malformed NIT or date.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Computes the cut-off dates for raw request values.
///
/// `nit` is the taxpayer ID as digits; `visit_start` and `visit_end` accept
/// `YYYY-MM-DD` (optionally followed by a time, which is ignored) or
/// `DD/MM/YYYY`.
///
/// # Errors
/// Returns `CutoffError::Parse` for a malformed NIT or date and
/// `CutoffError::Configuration` when the NIT suffix is missing from `limits`.
pub fn compute_cutoff_dates(
    nit: &str,
    visit_start: &str,
    visit_end: &str,
    calendar: &LaborCalendar,
    limits: &LimitTable,
) -> Result<Vec<CutoffDate>, CutoffError> {
    let nit: Nit = nit.parse()?;
    let window = VisitWindow::parse(visit_start, visit_end)?;
    cutoff_dates(&nit, window, calendar, limits)
}

/// Computes the cut-off dates for already parsed values.
///
/// For each month touched by `window`, the cut-off is the day on which the
/// month accumulates the business days required for the NIT's suffix. Only
/// cut-offs inside the window are returned, in month order.
///
/// # Errors
/// Returns `CutoffError::Configuration` when the NIT suffix is missing from `limits`.
pub fn cutoff_dates(
    nit: &Nit,
    window: VisitWindow,
    calendar: &LaborCalendar,
    limits: &LimitTable,
) -> Result<Vec<CutoffDate>, CutoffError> {
    let suffix = nit.suffix();
    let Some(limit) = limits.get(&suffix) else {
        warn!(%suffix, "no social-security limit for NIT suffix");
        return Err(CutoffError::Configuration { suffix });
    };
    let Some(required) = limit.required_business_days else {
        debug!(%suffix, "limit row has no business-day count");
        return Ok(Vec::new());
    };

    let retained = window.months().filter_map(|month| {
        let Some(candidate) = calendar.nth_business_day(&month, required) else {
            debug!(
                month = %month.month_label(),
                required = required.get(),
                "month never reaches required business days"
            );
            return None;
        };
        if !window.admits(&candidate) {
            debug!(%candidate, %window, "cut-off outside visit window");
            return None;
        }
        Some(candidate)
    });

    Ok(retained
        .enumerate()
        .map(|(position, date)| CutoffDate {
            id: position + 1,
            date,
            status: CutoffStatus::for_position(position),
            month_label: date.month_label(),
        })
        .collect())
}

//! Status of cut-off dates relative to today and to uploaded documents.
//!
//! Kept apart from [`CutoffStatus::for_position`]: that rule ranks a freshly
//! computed list, this one re-evaluates dates as time passes.

use std::collections::HashSet;

use crate::{CutoffDate, CutoffStatus, PilaDate};

/// Calendar days from `today` until `date`; negative once it has passed.
pub const fn days_until(date: &PilaDate, today: &PilaDate) -> i64 {
    today.days_to(date)
}

/// `Success` when a document exists; otherwise `Warning` while the date is
/// between today and `warning_window_days` ahead (both inclusive), else
/// `Normal`.
pub fn status_for(
    date: &PilaDate,
    today: &PilaDate,
    has_document: bool,
    warning_window_days: u32,
) -> CutoffStatus {
    if has_document {
        return CutoffStatus::Success;
    }
    let remaining = days_until(date, today);
    if (0..=i64::from(warning_window_days)).contains(&remaining) {
        CutoffStatus::Warning
    } else {
        CutoffStatus::Normal
    }
}

/// Re-evaluates every status in place. `uploaded` holds the cut-off dates
/// that already have a PILA document.
pub fn refresh_statuses(
    dates: &mut [CutoffDate],
    today: &PilaDate,
    uploaded: &HashSet<PilaDate>,
    warning_window_days: u32,
) {
    for cutoff in dates {
        cutoff.status = status_for(
            &cutoff.date,
            today,
            uploaded.contains(&cutoff.date),
            warning_window_days,
        );
    }
}

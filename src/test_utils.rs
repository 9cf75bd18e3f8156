use std::iter;

use chrono::{Datelike, NaiveDate};

use crate::{BusinessDays, CalendarDay, DayKind, LaborCalendar, LimitTable, PilaDate, SocialSecurityLimit};

const WEEKDAY_TITLES: [&str; 7] = [
    "LUNES",
    "MARTES",
    "MIÉRCOLES",
    "JUEVES",
    "VIERNES",
    "SÁBADO",
    "DOMINGO",
];

/// Shorthand for a known-valid date in tests
pub fn date(day: u8, month: u8, year: u16) -> PilaDate {
    PilaDate::from_ymd(year, month, day).unwrap()
}

/// Calendar rows for every day in `first..=last`, titled with the Spanish
/// weekday and marked `NORMAL`, except `holidays` which are `FESTIVO`.
pub fn calendar_days(first: PilaDate, last: PilaDate, holidays: &[PilaDate]) -> Vec<CalendarDay> {
    iter::successors(Some(first), PilaDate::next_day)
        .take_while(|day| *day <= last)
        .map(|day| {
            if holidays.contains(&day) {
                CalendarDay::new(day, "Festivo", DayKind::Festivo)
            } else {
                let weekday = naive(day).weekday().num_days_from_monday() as usize;
                CalendarDay::new(day, WEEKDAY_TITLES[weekday], DayKind::Normal)
            }
        })
        .collect()
}

/// The same date as a chrono value
pub fn naive(day: PilaDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(
        i32::from(day.year().get()),
        u32::from(day.month().get()),
        u32::from(day.day().get()),
    )
    .unwrap()
}

pub fn calendar(first: PilaDate, last: PilaDate, holidays: &[PilaDate]) -> LaborCalendar {
    calendar_days(first, last, holidays).into_iter().collect()
}

pub fn limits(rows: &[(&str, u8)]) -> LimitTable {
    rows.iter()
        .map(|(suffix, days)| {
            SocialSecurityLimit::new(suffix.parse().unwrap(), BusinessDays::new(*days).unwrap())
        })
        .collect()
}

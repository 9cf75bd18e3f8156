/// Maximum valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Spanish month names as rendered in cut-off labels (index 0 is unused)
pub const MONTH_NAMES_ES: [&str; 13] = [
    "",
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Day-first format separator, also used on the wire for cut-off dates
pub const DAY_FIRST_SEPARATOR: char = '/';
/// Separators that start a time component after an ISO date
pub const TIME_SEPARATORS: [char; 2] = ['T', ' '];

/// Number of digits taken from the end of a NIT
pub const NIT_SUFFIX_LEN: usize = 2;

/// Upper bound for the required business-day count of a limit entry
pub const MAX_BUSINESS_DAYS: u8 = 31;

/// Calendar kind that marks a holiday
pub const KIND_HOLIDAY: &str = "FESTIVO";
/// Calendar kind for ordinary days
pub const KIND_NORMAL: &str = "NORMAL";
/// Day titles that mark a weekend under the `NORMAL` kind (compared upper-cased)
pub const WEEKEND_TITLES: [&str; 2] = ["SÁBADO", "DOMINGO"];

/// Days before a cut-off at which an undocumented date turns into a warning
pub const DEFAULT_WARNING_WINDOW_DAYS: u32 = 10;

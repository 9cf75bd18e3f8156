use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BusinessDays, KIND_HOLIDAY, KIND_NORMAL, Month, PilaDate, WEEKEND_TITLES, Year};

/// Classification of a labor-calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DayKind {
    /// Ordinary day; a weekend only when its title says so.
    Normal,
    /// Public holiday.
    Festivo,
    /// Any other label found in the dataset, including a missing one.
    Unclassified(String),
}

impl DayKind {
    fn from_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            KIND_NORMAL => Self::Normal,
            KIND_HOLIDAY => Self::Festivo,
            _ => Self::Unclassified(label.to_owned()),
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Normal => KIND_NORMAL,
            Self::Festivo => KIND_HOLIDAY,
            Self::Unclassified(label) => label,
        }
    }
}

impl Default for DayKind {
    fn default() -> Self {
        Self::Unclassified(String::new())
    }
}

impl Serialize for DayKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for DayKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map_or_else(Self::default, Self::from_label))
    }
}

/// One day of the labor calendar dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    #[serde(rename = "FECHA")]
    pub date:  PilaDate,
    #[serde(rename = "Título", default)]
    pub title: Option<String>,
    #[serde(rename = "TIPO", default)]
    pub kind:  DayKind,
}

impl CalendarDay {
    pub fn new(date: PilaDate, title: impl Into<String>, kind: DayKind) -> Self {
        Self {
            date,
            title: Some(title.into()),
            kind,
        }
    }

    /// Only explicit markers exclude a day: a holiday, or a `NORMAL` day
    /// titled SÁBADO or DOMINGO. The title is matched literally after
    /// upper-casing, without checking the actual weekday.
    pub fn is_business_day(&self) -> bool {
        match self.kind {
            DayKind::Festivo => false,
            DayKind::Normal => !self.title.as_deref().is_some_and(is_weekend_title),
            DayKind::Unclassified(_) => true,
        }
    }
}

fn is_weekend_title(title: &str) -> bool {
    let upper = title.to_uppercase();
    WEEKEND_TITLES.contains(&upper.as_str())
}

/// Labor calendar grouped by month, each month sorted by date.
///
/// Months that the dataset does not cover are simply empty; a partially
/// covered month just has fewer business days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaborCalendar {
    months: BTreeMap<(Year, Month), Vec<CalendarDay>>,
}

impl LaborCalendar {
    pub fn new(days: impl IntoIterator<Item = CalendarDay>) -> Self {
        let mut months: BTreeMap<(Year, Month), Vec<CalendarDay>> = BTreeMap::new();
        for day in days {
            months
                .entry((day.date.year(), day.date.month()))
                .or_default()
                .push(day);
        }
        for days in months.values_mut() {
            days.sort_by_key(|day| day.date);
        }
        Self { months }
    }

    /// All known days of the month containing `date`, in ascending order.
    pub fn month_of(&self, date: &PilaDate) -> &[CalendarDay] {
        self.months
            .get(&(date.year(), date.month()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The date on which the month containing `date` accumulates `required`
    /// business days, if it ever does.
    pub fn nth_business_day(&self, date: &PilaDate, required: BusinessDays) -> Option<PilaDate> {
        self.month_of(date)
            .iter()
            .filter(|day| day.is_business_day())
            .nth(usize::from(required.get()) - 1)
            .map(|day| day.date)
    }

    /// Total number of calendar entries
    pub fn len(&self) -> usize {
        self.months.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

impl FromIterator<CalendarDay> for LaborCalendar {
    fn from_iter<I: IntoIterator<Item = CalendarDay>>(iter: I) -> Self {
        Self::new(iter)
    }
}

//! Loading of the labor calendar and social-security limit datasets.
//!
//! Both are JSON arrays exported from the system of record and read once
//! per calculation. Irregular rows are skipped with a warning so that the
//! rest of the dataset stays usable.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{CalendarDay, LaborCalendar, LimitTable, SocialSecurityLimit};

/// Error type for dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("Cannot read dataset {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not a JSON array.
    #[error("Malformed {dataset} dataset: {source}")]
    Json {
        dataset: &'static str,
        #[source]
        source:  serde_json::Error,
    },
}

/// Reads a labor calendar from any JSON source.
///
/// # Errors
/// Returns `DatasetError::Json` if the input is not a JSON array.
pub fn read_calendar(reader: impl Read) -> Result<LaborCalendar, DatasetError> {
    let days: Vec<CalendarDay> = read_rows(reader, "calendar")?;
    debug!(rows = days.len(), "calendar dataset loaded");
    Ok(days.into_iter().collect())
}

/// Reads the social-security limit table from any JSON source.
///
/// # Errors
/// Returns `DatasetError::Json` if the input is not a JSON array.
pub fn read_limits(reader: impl Read) -> Result<LimitTable, DatasetError> {
    let rows: Vec<SocialSecurityLimit> = read_rows(reader, "limits")?;
    debug!(rows = rows.len(), "limits dataset loaded");
    Ok(rows.into_iter().collect())
}

/// # Errors
/// Returns `DatasetError` if the file cannot be opened or parsed.
pub fn load_calendar(path: impl AsRef<Path>) -> Result<LaborCalendar, DatasetError> {
    read_calendar(open(path.as_ref())?)
}

/// # Errors
/// Returns `DatasetError` if the file cannot be opened or parsed.
pub fn load_limits(path: impl AsRef<Path>) -> Result<LimitTable, DatasetError> {
    read_limits(open(path.as_ref())?)
}

fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Only the outer array is mandatory; a row that does not fit `T` is dropped.
fn read_rows<T: DeserializeOwned>(
    reader: impl Read,
    dataset: &'static str,
) -> Result<Vec<T>, DatasetError> {
    let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)
        .map_err(|source| DatasetError::Json { dataset, source })?;

    Ok(rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(row) => Some(row),
            Err(error) => {
                warn!(dataset, row = index, %error, "skipping malformed dataset row");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{calendar, date, limits};
    use crate::{BusinessDays, CutoffError, NitSuffix, compute_cutoff_dates};
    use std::io::Write;

    const CALENDAR_JSON: &str = r#"[
        {"FECHA": "02/07/2025", "Título": "MIÉRCOLES", "TIPO": "NORMAL"},
        {"FECHA": "01/07/2025", "Título": "MARTES", "TIPO": "NORMAL"},
        {"FECHA": "05/07/2025", "Título": "SÁBADO", "TIPO": "NORMAL"}
    ]"#;

    #[test]
    fn test_read_calendar() {
        let calendar = read_calendar(CALENDAR_JSON.as_bytes()).unwrap();
        assert_eq!(calendar.len(), 3);
        let july = calendar.month_of(&date(1, 7, 2025));
        assert_eq!(july[0].date, date(1, 7, 2025));
        assert_eq!(july[2].date, date(5, 7, 2025));
    }

    #[test]
    fn test_read_limits() {
        let table = read_limits(r#"[{"DIGITOS_NIT": "45", "DIAS_HABILES": 4}]"#.as_bytes()).unwrap();
        let suffix: NitSuffix = "45".parse().unwrap();
        assert_eq!(
            table.get(&suffix).unwrap().required_business_days,
            Some(BusinessDays::new(4).unwrap())
        );
    }

    #[test]
    fn test_malformed_json() {
        let err = read_calendar(r#"{"FECHA": "01/07/2025"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Json { dataset: "calendar", .. }));

        let err = read_limits(r#"[{"DIGITOS_NIT": "45""#.as_bytes()).unwrap_err();
        assert!(err.to_string().starts_with("Malformed limits dataset"));
    }

    #[test]
    fn test_irregular_limit_rows_keep_the_rest() {
        struct TestCase {
            row:         &'static str,
            suffix_kept: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                row:         r#"{"DIGITOS_NIT": "45", "DIAS_HABILES": ""}"#,
                suffix_kept: true,
                description: "blank day count",
            },
            TestCase {
                row:         r#"{"DIGITOS_NIT": "45", "DIAS_HABILES": 0}"#,
                suffix_kept: true,
                description: "zero day count",
            },
            TestCase {
                row:         r#"{"DIGITOS_NIT": "", "DIAS_HABILES": 4}"#,
                suffix_kept: false,
                description: "blank suffix",
            },
            TestCase {
                row:         r#"{"DIGITOS_NIT": "4X", "DIAS_HABILES": 4}"#,
                suffix_kept: false,
                description: "non-numeric suffix",
            },
            TestCase {
                row:         r#"{"DIAS_HABILES": 4}"#,
                suffix_kept: false,
                description: "missing suffix",
            },
            TestCase {
                row:         r#""45""#,
                suffix_kept: false,
                description: "not an object",
            },
        ];

        let calendar = calendar(date(1, 7, 2025), date(31, 7, 2025), &[]);
        for case in &cases {
            let json = format!(r#"[{}, {{"DIGITOS_NIT": "46", "DIAS_HABILES": 4}}]"#, case.row);
            let table = read_limits(json.as_bytes())
                .unwrap_or_else(|e| panic!("{}: {e}", case.description));

            let dates =
                compute_cutoff_dates("900123446", "2025-07-01", "2025-07-31", &calendar, &table)
                    .unwrap_or_else(|e| panic!("{}: {e}", case.description));
            assert_eq!(dates.len(), 1, "{}", case.description);
            assert_eq!(dates[0].date, date(4, 7, 2025), "{}", case.description);

            // A kept row without a usable count yields no dates; a dropped row
            // leaves suffix 45 unconfigured
            let irregular =
                compute_cutoff_dates("900123445", "2025-07-01", "2025-07-31", &calendar, &table);
            if case.suffix_kept {
                assert_eq!(irregular, Ok(Vec::new()), "{}", case.description);
            } else {
                assert!(
                    matches!(irregular, Err(CutoffError::Configuration { .. })),
                    "{}",
                    case.description
                );
            }
        }
    }

    #[test]
    fn test_irregular_calendar_rows_keep_the_rest() {
        struct TestCase {
            row:         &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase {
                row:         r#"{"FECHA": "", "Título": "LUNES", "TIPO": "NORMAL"}"#,
                description: "blank date",
            },
            TestCase {
                row:         r#"{"FECHA": null, "Título": "LUNES", "TIPO": "NORMAL"}"#,
                description: "null date",
            },
            TestCase {
                row:         r#"{"Título": "LUNES", "TIPO": "NORMAL"}"#,
                description: "missing date",
            },
            TestCase {
                row:         r#"{"FECHA": "31/06/2025", "Título": "LUNES", "TIPO": "NORMAL"}"#,
                description: "impossible date",
            },
            TestCase {
                row:         r#"{"FECHA": "2025/07/01", "TIPO": "NORMAL"}"#,
                description: "year-first with slashes",
            },
        ];

        let table = limits(&[("45", 4)]);
        let rows = CALENDAR_JSON.trim().trim_start_matches('[').trim_end_matches(']');
        for case in &cases {
            let json = format!("[{}, {rows}]", case.row);
            let calendar = read_calendar(json.as_bytes())
                .unwrap_or_else(|e| panic!("{}: {e}", case.description));
            assert_eq!(calendar.len(), 3, "{}", case.description);

            // 01/07 and 02/07 are the only business days: July never reaches 4
            let dates =
                compute_cutoff_dates("900123445", "2025-06-15", "2025-07-31", &calendar, &table)
                    .unwrap_or_else(|e| panic!("{}: {e}", case.description));
            assert!(dates.is_empty(), "{}", case.description);

            let short = limits(&[("45", 2)]);
            let dates =
                compute_cutoff_dates("900123445", "2025-06-15", "2025-07-31", &calendar, &short)
                    .unwrap_or_else(|e| panic!("{}: {e}", case.description));
            assert_eq!(dates.len(), 1, "{}", case.description);
            assert_eq!(dates[0].date, date(2, 7, 2025), "{}", case.description);
        }
    }

    #[test]
    fn test_load_from_files() {
        let mut calendar_file = tempfile::NamedTempFile::new().unwrap();
        calendar_file.write_all(CALENDAR_JSON.as_bytes()).unwrap();
        let calendar = load_calendar(calendar_file.path()).unwrap();
        assert_eq!(calendar.len(), 3);

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("CAC_LIMITE_SEG_SOCIAL.json");
        let err = load_limits(&missing).unwrap_err();
        assert!(matches!(err, DatasetError::Io { ref path, .. } if *path == missing));
    }
}

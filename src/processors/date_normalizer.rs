use crate::error::{ProcessingError, Result};
use crate::utils::constants::{TIMESTAMP_FORMAT, TIMESTAMP_LEN};
use chrono::{NaiveDate, NaiveDateTime};

/// Date-time layouts tried in order
const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y%m%d%H%M%S",
    "%Y%m%d%H%M",
];

/// Date-only layouts, read as midnight
const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Normalise a date/time string to `YYYYMMDDHHMMSS`.
///
/// # Examples
/// ```
/// use little_r_converter::processors::normalize_date;
///
/// assert_eq!(normalize_date("2024-03-01T12:00").unwrap(), "20240301120000");
/// assert!(normalize_date("not-a-date").is_err());
/// ```
pub fn normalize_date(input: &str) -> Result<String> {
    parse_datetime(input).map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

/// Parse a date/time string from any known layout
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime> {
    let candidate = split_underscore(input.trim());
    let candidate = candidate.trim();

    if let Some(dt) = parse_known_layouts(candidate) {
        return Ok(dt);
    }

    // Last resort: the first 14 digits as a compact timestamp
    let digits: String = candidate.chars().filter(char::is_ascii_digit).collect();
    if digits.len() >= TIMESTAMP_LEN {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&digits[..TIMESTAMP_LEN], TIMESTAMP_FORMAT) {
            return Ok(dt);
        }
    }

    Err(ProcessingError::UnparsableDate {
        input: input.to_string(),
    })
}

/// `date_time` becomes `date time` when the part after the last underscore is a
/// clock time; otherwise everything from the first underscore on is an offset
/// annotation and is dropped.
fn split_underscore(input: &str) -> String {
    match input.rsplit_once('_') {
        Some((head, tail)) if tail.contains(':') => format!("{} {}", head, tail),
        Some(_) => input.split('_').next().unwrap_or_default().to_string(),
        None => input.to_string(),
    }
}

fn parse_known_layouts(candidate: &str) -> Option<NaiveDateTime> {
    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(candidate, layout).ok())
        .or_else(|| {
            DATE_LAYOUTS.iter().find_map(|layout| {
                NaiveDate::parse_from_str(candidate, layout)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_layouts_agree() {
        for input in [
            "2024-03-01 12:00:00",
            "2024-03-01 12:00",
            "2024-03-01T12:00",
            "2024-03-01T12:00:00",
            "2024-03-01T12:00:00Z",
            "2024/03/01 12:00:00",
            "20240301120000",
            "202403011200",
            "  2024-03-01 12:00:00  ",
        ] {
            assert_eq!(normalize_date(input).unwrap(), "20240301120000", "input {:?}", input);
        }
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(normalize_date("2024-03-01").unwrap(), "20240301000000");
        assert_eq!(normalize_date("2024/03/01").unwrap(), "20240301000000");
        assert_eq!(normalize_date("20240301").unwrap(), "20240301000000");
    }

    #[test]
    fn test_underscore_joined_date_and_time() {
        assert_eq!(normalize_date("2024-03-01_12:00:00").unwrap(), "20240301120000");
        assert_eq!(normalize_date("2024-03-01_06:30").unwrap(), "20240301063000");
    }

    #[test]
    fn test_underscore_offset_suffix() {
        assert_eq!(
            normalize_date("2024-03-01 12:00:00_00:00:00").unwrap(),
            "20240301120000"
        );
        assert_eq!(normalize_date("2024-03-01 12:00:00_UTC").unwrap(), "20240301120000");
        assert_eq!(normalize_date("2024-03-01_+0000").unwrap(), "20240301000000");
    }

    #[test]
    fn test_digit_fallback() {
        assert_eq!(normalize_date("2024.03.01 12h00m00s").unwrap(), "20240301120000");
        assert_eq!(normalize_date("obs 20240301120000 Z").unwrap(), "20240301120000");
    }

    #[test]
    fn test_failures() {
        for input in ["not-a-date", "", "2024-13-45 12:00:00", "12345"] {
            match normalize_date(input) {
                Err(ProcessingError::UnparsableDate { input: reported }) => {
                    assert_eq!(reported, input)
                }
                other => panic!("expected UnparsableDate for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let a = normalize_date("2024/03/01 12:00:00").unwrap();
        let b = normalize_date("2024/03/01 12:00:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), TIMESTAMP_LEN);
    }
}

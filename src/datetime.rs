//! Date/time parsing and site timezone localization.
//!
//! NWIS reports local wall-clock times plus a timezone abbreviation per row.
//! Known abbreviations are localized through a fixed lookup table; unknown
//! ones leave the timestamp naive rather than dropping the row.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use tracing::debug;

use crate::constants::{NWIS_DATE_FORMAT, TIMEZONE_ABBREVIATIONS};
use crate::error::{NwisError, Result};
use crate::models::Timestamp;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse an NWIS date or date-time, including partial dates.
///
/// `1950-06` resolves to the first of the month and `1950` to January 1.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    parse_partial_date(s).and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_partial_date(s: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = s.split('-').collect();
    match parts.as_slice() {
        [year, month] if year.len() == 4 => {
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        [year] if year.len() == 4 => NaiveDate::from_ymd_opt(year.parse().ok()?, 1, 1),
        _ => None,
    }
}

/// Look up the IANA zone and UTC offset for a site timezone abbreviation
pub fn lookup_timezone(abbreviation: &str) -> Option<(&'static str, FixedOffset)> {
    let abbreviation = abbreviation.trim();
    TIMEZONE_ABBREVIATIONS
        .iter()
        .find(|(abbr, _, _)| *abbr == abbreviation)
        .and_then(|(_, zone, secs)| FixedOffset::east_opt(*secs).map(|offset| (*zone, offset)))
}

/// Attach a site timezone to a wall-clock time; unknown abbreviations stay naive
pub fn localize(naive: NaiveDateTime, abbreviation: Option<&str>) -> Timestamp {
    let Some(abbr) = abbreviation else {
        return Timestamp::Naive(naive);
    };

    match lookup_timezone(abbr) {
        Some((zone, offset)) => match offset.from_local_datetime(&naive).single() {
            Some(datetime) => Timestamp::Localized { datetime, zone },
            None => Timestamp::Naive(naive),
        },
        None => {
            debug!("Unrecognized timezone '{}', leaving {} naive", abbr, naive);
            Timestamp::Naive(naive)
        }
    }
}

/// Normalize a user-supplied request date to `YYYY-MM-DD`
pub fn normalize_request_date(param: &str, raw: &str) -> Result<String> {
    parse_datetime(raw)
        .map(|dt| dt.format(NWIS_DATE_FORMAT).to_string())
        .ok_or_else(|| NwisError::InvalidDateTime {
            column: param.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_and_partial_dates() {
        let dt = parse_datetime("2023-06-01 12:15").unwrap();
        assert_eq!(dt.to_string(), "2023-06-01 12:15:00");

        let month = parse_datetime("1954-09").unwrap();
        assert_eq!(month.date(), NaiveDate::from_ymd_opt(1954, 9, 1).unwrap());

        let year = parse_datetime("1936").unwrap();
        assert_eq!(year.date(), NaiveDate::from_ymd_opt(1936, 1, 1).unwrap());

        assert!(parse_datetime("1936-00-00").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn test_localize_known_abbreviation() {
        let naive = parse_datetime("2023-07-04 08:00").unwrap();
        let ts = localize(naive, Some("EDT"));

        assert_eq!(ts.zone(), Some("America/New_York"));
        assert_eq!(ts.local(), naive);
        assert_eq!(ts.to_string(), "2023-07-04 08:00:00-04:00");
    }

    #[test]
    fn test_localize_unknown_abbreviation_fails_open() {
        let naive = parse_datetime("2023-07-04 08:00").unwrap();
        let ts = localize(naive, Some("XYZ"));

        assert!(ts.is_naive());
        assert_eq!(ts.local(), naive);
    }

    #[test]
    fn test_all_abbreviations_map_to_zones() {
        for (abbr, zone, _) in TIMEZONE_ABBREVIATIONS {
            let (found, _) = lookup_timezone(abbr).unwrap();
            assert_eq!(found, *zone);
        }
    }

    #[test]
    fn test_normalize_request_date() {
        assert_eq!(
            normalize_request_date("startDT", "2020/01/05").unwrap(),
            "2020-01-05"
        );
        assert_eq!(
            normalize_request_date("endDT", "2020-01-05T10:00").unwrap(),
            "2020-01-05"
        );
        assert!(matches!(
            normalize_request_date("startDT", "yesterday"),
            Err(NwisError::InvalidDateTime { .. })
        ));
    }
}

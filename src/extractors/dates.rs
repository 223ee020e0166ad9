//! Date token normalization.
//!
//! Registration documents print dates as `MM/DD/YYYY`; the standardized table
//! stores ISO `YYYY-MM-DD`. Dates that do not exist on the calendar
//! (`02/30/1994`, `13/01/1994`) normalize to `None` instead of rolling over.

use super::patterns::RE_DATE;
use chrono::NaiveDate;

/// ISO output format.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format printed on the source documents.
pub const DOCUMENT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse a `MM/DD/YYYY` token into a calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let caps = RE_DATE.captures(text.trim())?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalize a `MM/DD/YYYY` token to `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use rh_standardize::extractors::dates::normalize_date;
///
/// assert_eq!(normalize_date("09/05/1991").as_deref(), Some("1991-09-05"));
/// assert_eq!(normalize_date("02/30/1994"), None);
/// assert_eq!(normalize_date("NC"), None);
/// ```
pub fn normalize_date(text: &str) -> Option<String> {
    parse_date(text).map(|date| date.format(ISO_DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pads_single_digits() {
        assert_eq!(normalize_date("7/4/1996").as_deref(), Some("1996-07-04"));
    }

    #[test]
    fn test_normalize_month_not_shifted() {
        // January and December stay where they are
        assert_eq!(normalize_date("01/31/2000").as_deref(), Some("2000-01-31"));
        assert_eq!(normalize_date("12/01/2000").as_deref(), Some("2000-12-01"));
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(normalize_date("02/29/1996").as_deref(), Some("1996-02-29"));
        assert_eq!(normalize_date("02/29/1997"), None);
        assert_eq!(normalize_date("02/29/2000").as_deref(), Some("2000-02-29"));
    }

    #[test]
    fn test_invalid_components() {
        assert_eq!(normalize_date("00/10/1995"), None);
        assert_eq!(normalize_date("13/10/1995"), None);
        assert_eq!(normalize_date("10/32/1995"), None);
        assert_eq!(normalize_date("10/00/1995"), None);
    }

    #[test]
    fn test_round_trip_through_document_format() {
        let date = parse_date("08/31/1992").unwrap();
        assert_eq!(date.format(DOCUMENT_DATE_FORMAT).to_string(), "08/31/1992");
        let iso = normalize_date("08/31/1992").unwrap();
        assert_eq!(NaiveDate::parse_from_str(&iso, ISO_DATE_FORMAT).unwrap(), date);
    }
}

//! Parse-or-default helpers for scalar fields
//!
//! A bad scalar never fails the whole parse; the caller gets the zero value
//! (or keeps the value it already had) instead.

use chrono::{NaiveDateTime, Weekday};
use log::debug;

/// Date layout after the weekday token, e.g. `Jan 2 15:04:05 2006`
const DATE_LAYOUT: &str = "%b %e %H:%M:%S %Y";

/// Parse a daemon timestamp such as `Thu Jun 18 04:23:03 2015`.
///
/// The leading weekday must be a valid three-letter name but is not checked
/// against the date itself. Returns `None` for anything unparsable.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let (weekday, rest) = text.split_once(' ')?;
    // abbreviated name only, as in `Mon`
    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        debug!("Ignoring timestamp with bad weekday: {text:?}");
        return None;
    }

    match NaiveDateTime::parse_from_str(rest.trim_start(), DATE_LAYOUT) {
        Ok(ts) => Some(ts),
        Err(e) => {
            debug!("Ignoring unparsable timestamp {text:?}: {e}");
            None
        }
    }
}

/// Parse an integer, keeping `previous` when the text is not one
pub fn parse_int_or(text: &str, previous: i64) -> i64 {
    match text.parse() {
        Ok(value) => value,
        Err(e) => {
            debug!("Ignoring non-numeric value {text:?}: {e}");
            previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[test]
    fn test_reference_layout() {
        assert_eq!(
            parse_timestamp("Mon Jan 2 15:04:05 2006"),
            Some(at(2006, 1, 2, 15, 4, 5))
        );
        assert_eq!(
            parse_timestamp("Thu Jun 18 04:23:03 2015"),
            Some(at(2015, 6, 18, 4, 23, 3))
        );
    }

    #[test]
    fn test_space_padded_day() {
        assert_eq!(
            parse_timestamp("Mon Jun  8 10:00:00 2015"),
            Some(at(2015, 6, 8, 10, 0, 0))
        );
    }

    #[test]
    fn test_weekday_not_cross_checked() {
        // 2015-06-18 was a Thursday
        assert_eq!(
            parse_timestamp("Sun Jun 18 04:23:03 2015"),
            Some(at(2015, 6, 18, 4, 23, 3))
        );
    }

    #[test]
    fn test_weekday_must_be_abbreviated() {
        assert_eq!(parse_timestamp("Monday Jun 18 04:23:03 2015"), None);
        assert_eq!(parse_timestamp("Th Jun 18 04:23:03 2015"), None);
        assert_eq!(
            parse_timestamp("thu Jun 18 04:23:03 2015"),
            Some(at(2015, 6, 18, 4, 23, 3))
        );
    }

    #[test]
    fn test_bad_timestamps() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("Xyz Jun 18 04:23:03 2015"), None);
        assert_eq!(parse_timestamp("Thu Jun 18 2015"), None);
        assert_eq!(parse_timestamp("2015-06-18 04:23:03"), None);
        assert_eq!(parse_timestamp("Thu Jun 31 04:23:03 2015"), None);
    }

    #[test]
    fn test_parse_int_or() {
        assert_eq!(parse_int_or("42", 0), 42);
        assert_eq!(parse_int_or("-3", 0), -3);
        assert_eq!(parse_int_or("many", 7), 7);
        assert_eq!(parse_int_or("", 0), 0);
        assert_eq!(parse_int_or(" 42", 5), 5);
    }
}

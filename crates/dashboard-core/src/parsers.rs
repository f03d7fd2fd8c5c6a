use chrono::{NaiveDate, NaiveDateTime};

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses calendar dates from the formats spreadsheet exports produce.
///
/// Unparseable input becomes a missing value, never an error; the cleaning
/// passes decide whether a missing date drops the row.
pub struct DateParser;

impl DateParser {
    /// Parse a date cell into a [`NaiveDate`].
    ///
    /// Tries ISO dates first, then the US-style forms the Superstore export
    /// uses, then datetime forms (typically midnight timestamps) whose time
    /// component is discarded. Blank and unrecognised values yield `None`.
    pub fn parse(value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        // %y must come before %Y: chrono's %Y also accepts two digits, and
        // would read "1/15/16" as the year 16.
        const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y"];

        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Some(date);
            }
        }

        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%m/%d/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M",
        ];

        for format in DATETIME_FORMATS {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Some(datetime.date());
            }
        }

        None
    }
}

// ── NumberParser ──────────────────────────────────────────────────────────────

/// Coerces free-form numeric cells into finite `f64` values.
pub struct NumberParser;

impl NumberParser {
    /// Parse a numeric cell.
    ///
    /// Trims whitespace and strips thousands separators before parsing.
    /// Anything that does not parse, or parses to a non-finite number,
    /// yields `None`.
    pub fn parse(value: &str) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        let cleaned = trimmed.replace(',', "");
        match cleaned.parse::<f64>() {
            Ok(number) if number.is_finite() => Some(number),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    // ── DateParser ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(DateParser::parse("2016-01-15"), Some(ymd(2016, 1, 15)));
    }

    #[test]
    fn test_parse_us_date() {
        assert_eq!(DateParser::parse("1/15/2016"), Some(ymd(2016, 1, 15)));
        assert_eq!(DateParser::parse("11/02/2016"), Some(ymd(2016, 11, 2)));
    }

    #[test]
    fn test_parse_us_date_two_digit_year() {
        assert_eq!(DateParser::parse("1/15/16"), Some(ymd(2016, 1, 15)));
    }

    #[test]
    fn test_parse_datetime_discards_time() {
        assert_eq!(
            DateParser::parse("2016-01-15 00:00:00"),
            Some(ymd(2016, 1, 15))
        );
        assert_eq!(
            DateParser::parse("2016-01-15T08:30:00"),
            Some(ymd(2016, 1, 15))
        );
        assert_eq!(
            DateParser::parse("1/15/2016 10:30"),
            Some(ymd(2016, 1, 15))
        );
    }

    #[test]
    fn test_parse_date_trims_whitespace() {
        assert_eq!(DateParser::parse("  2016-01-15  "), Some(ymd(2016, 1, 15)));
    }

    #[test]
    fn test_parse_date_blank_is_none() {
        assert_eq!(DateParser::parse(""), None);
        assert_eq!(DateParser::parse("   "), None);
    }

    #[test]
    fn test_parse_date_garbage_is_none() {
        assert_eq!(DateParser::parse("not-a-date"), None);
    }

    #[test]
    fn test_parse_date_invalid_calendar_day_is_none() {
        assert_eq!(DateParser::parse("2016-13-40"), None);
    }

    // ── NumberParser ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(NumberParser::parse("261.96"), Some(261.96));
    }

    #[test]
    fn test_parse_negative_number() {
        assert_eq!(NumberParser::parse("-383.03"), Some(-383.03));
    }

    #[test]
    fn test_parse_number_with_thousands_separators() {
        assert_eq!(NumberParser::parse("1,234.56"), Some(1234.56));
    }

    #[test]
    fn test_parse_number_trims_whitespace() {
        assert_eq!(NumberParser::parse("  42  "), Some(42.0));
    }

    #[test]
    fn test_parse_number_accepts_scientific_notation() {
        assert_eq!(NumberParser::parse("1.5e2"), Some(150.0));
    }

    #[test]
    fn test_parse_number_text_is_none() {
        assert_eq!(NumberParser::parse("N/A"), None);
        assert_eq!(NumberParser::parse("missing"), None);
    }

    #[test]
    fn test_parse_number_non_finite_is_none() {
        assert_eq!(NumberParser::parse("NaN"), None);
        assert_eq!(NumberParser::parse("inf"), None);
    }

    #[test]
    fn test_parse_number_blank_is_none() {
        assert_eq!(NumberParser::parse(""), None);
        assert_eq!(NumberParser::parse("   "), None);
    }
}

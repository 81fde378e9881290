//! Date parsing, formatting and range checks
//!
//! Leave records carry their dates as strings straight from Notion, so every
//! helper here accepts either text or a chrono value and works at calendar-day
//! granularity. Nothing in this module fails: text that is not a date becomes
//! an invalid date, which formats as [`INVALID_DATE_LABEL`] and is never inside
//! any range.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, Weekday};
use crate::error::{Error, Result};

/// Label produced when formatting something that is not a date
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Naive date-time layouts accepted after plain dates and RFC 3339
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Display labels, so formatted dates parse back ("Jan 5, 2024", "January 5, 2024")
const LABEL_FORMATS: &[&str] = &["%b %d, %Y", "%B %d, %Y"];

/// A date given either as text or as an already parsed value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateInput<'a> {
    Text(&'a str),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(s: &'a str) -> Self {
        DateInput::Text(s)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(s: &'a String) -> Self {
        DateInput::Text(s.as_str())
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&NaiveDate> for DateInput<'_> {
    fn from(date: &NaiveDate) -> Self {
        DateInput::Date(*date)
    }
}

impl From<NaiveDateTime> for DateInput<'_> {
    fn from(datetime: NaiveDateTime) -> Self {
        DateInput::DateTime(datetime)
    }
}

impl DateInput<'_> {
    /// The calendar day this input names, with any time of day dropped
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        match self {
            DateInput::Text(s) => parse_calendar_date(s),
            DateInput::Date(date) => Some(*date),
            DateInput::DateTime(datetime) => Some(datetime.date()),
        }
    }
}

/// Parse text into a calendar date
///
/// Supported formats:
/// - `"2024-01-05"` (ISO date)
/// - `"2024-01-05T09:30:00.000+02:00"` (RFC 3339, day taken in the written offset)
/// - `"2024-01-05T23:59:59"` / `"2024-01-05 23:59"` (naive date-time)
/// - `"01/05/2024"` (US format)
/// - `"Jan 5, 2024"` (the label [`format_date`] produces)
///
/// Returns `None` for anything else, including the empty string.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.date_naive());
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
            return Some(datetime.date());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(date);
    }

    LABEL_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

/// Format a date as a short label: "Mon day, year"
/// Example: "Jan 5, 2024"
pub fn format_date<'a>(date: impl Into<DateInput<'a>>) -> String {
    match date.into().calendar_date() {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

/// Check whether `check` falls within `start..=end`, comparing whole days
///
/// An unparsable input on any side makes the answer `false`.
pub fn is_date_in_range<'a>(
    check: impl Into<DateInput<'a>>,
    start: impl Into<DateInput<'a>>,
    end: impl Into<DateInput<'a>>,
) -> bool {
    let (Some(check), Some(start), Some(end)) = (
        check.into().calendar_date(),
        start.into().calendar_date(),
        end.into().calendar_date(),
    ) else {
        return false;
    };

    start <= check && check <= end
}

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Which day the board should be computed for
#[derive(Debug, Clone, PartialEq)]
pub enum DateExpression {
    /// Use today's date
    Today,
    /// Use an explicit date
    Explicit(NaiveDate),
    /// Use next occurrence of a day of week with optional week offset
    DayOfWeek { day: Weekday, offset: u32 },
}

/// Parse an as-of expression
///
/// Supported formats:
/// - `""` / `"today"` → Today
/// - any date accepted by [`parse_calendar_date`] → Explicit
/// - `"friday"` → next Friday (or today if today is Friday)
/// - `"fri+1"` → the Friday after that
pub fn parse_date_expression(expr: &str) -> Result<DateExpression> {
    let expr = expr.trim();

    if expr.is_empty() || expr.eq_ignore_ascii_case("today") {
        return Ok(DateExpression::Today);
    }

    if let Some(date) = parse_calendar_date(expr) {
        return Ok(DateExpression::Explicit(date));
    }

    let (day_str, offset) = match expr.split_once('+') {
        Some((day_str, offset_str)) => {
            let offset = offset_str.trim().parse().map_err(|_| {
                Error::InvalidDateExpression(format!("Invalid offset: {}", offset_str))
            })?;
            (day_str, offset)
        }
        None => (expr, 0),
    };

    let day = parse_weekday(day_str)?;
    Ok(DateExpression::DayOfWeek { day, offset })
}

/// Parse a weekday name (case-insensitive), full or three-letter
///
/// # Errors
/// `InvalidDateExpression` when `s` names no weekday.
fn parse_weekday(s: &str) -> Result<Weekday> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        "sunday" | "sun" => Ok(Weekday::Sun),
        _ => Err(Error::InvalidDateExpression(format!(
            "Unable to parse date expression: {}",
            s
        ))),
    }
}

/// Resolve an expression against a reference day
///
/// # Errors
/// `InvalidDateExpression` when a week offset lands past the last
/// representable date.
pub fn resolve_date(expr: &DateExpression, today: NaiveDate) -> Result<NaiveDate> {
    match expr {
        DateExpression::Today => Ok(today),
        DateExpression::Explicit(date) => Ok(*date),
        DateExpression::DayOfWeek { day, offset } => next_weekday(today, *day, *offset)
            .ok_or_else(|| {
                Error::InvalidDateExpression(format!("Week offset out of range: {}", offset))
            }),
    }
}

/// Next occurrence of `target` on or after `from`, pushed `offset` weeks later
fn next_weekday(from: NaiveDate, target: Weekday, offset: u32) -> Option<NaiveDate> {
    let from_num = from.weekday().num_days_from_monday();
    let target_num = target.num_days_from_monday();
    let days_until = u64::from((target_num + 7 - from_num) % 7);

    let days = u64::from(offset).checked_mul(7)?.checked_add(days_until)?;
    from.checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_date("2023-12-25"), "Dec 25, 2023");
    }

    #[test]
    fn test_format_date_value() {
        assert_eq!(format_date(ymd(2026, 10, 19)), "Oct 19, 2026");
        let datetime = ymd(2024, 3, 1).and_hms_opt(18, 45, 0).unwrap();
        assert_eq!(format_date(datetime), "Mar 1, 2024");
    }

    #[test]
    fn test_format_invalid() {
        assert_eq!(format_date(""), INVALID_DATE_LABEL);
        assert_eq!(format_date("soon"), INVALID_DATE_LABEL);
        assert_eq!(format_date("2024-13-01"), INVALID_DATE_LABEL);
    }

    #[test]
    fn test_parse_formats() {
        let expected = Some(ymd(2024, 1, 5));
        assert_eq!(parse_calendar_date("2024-01-05"), expected);
        assert_eq!(parse_calendar_date("  2024-01-05 "), expected);
        assert_eq!(parse_calendar_date("2024-01-05T23:59:59"), expected);
        assert_eq!(parse_calendar_date("2024-01-05T23:59:59.250"), expected);
        assert_eq!(parse_calendar_date("2024-01-05 08:00"), expected);
        assert_eq!(parse_calendar_date("2024-01-05T09:30:00.000+02:00"), expected);
        assert_eq!(parse_calendar_date("2024-01-05T23:30:00Z"), expected);
        assert_eq!(parse_calendar_date("01/05/2024"), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("   "), None);
        assert_eq!(parse_calendar_date("tomorrow"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
    }

    #[test]
    fn test_range_inclusive_bounds() {
        assert!(is_date_in_range("2024-01-05", "2024-01-05", "2024-01-05"));
        assert!(is_date_in_range("2024-01-01", "2024-01-01", "2024-01-10"));
        assert!(is_date_in_range("2024-01-10", "2024-01-01", "2024-01-10"));
        assert!(is_date_in_range("2024-01-06", "2024-01-01", "2024-01-10"));
        assert!(!is_date_in_range("2023-12-31", "2024-01-01", "2024-01-10"));
        assert!(!is_date_in_range("2024-01-11", "2024-01-01", "2024-01-10"));
    }

    #[test]
    fn test_range_ignores_time_of_day() {
        assert!(is_date_in_range("2024-01-05T23:59:59", "2024-01-05", "2024-01-05"));
        assert!(is_date_in_range("2024-01-05", "2024-01-05T12:00:00", "2024-01-05T08:00:00"));
    }

    #[test]
    fn test_range_with_invalid_bounds() {
        assert!(!is_date_in_range("2024-01-05", "", "2024-01-05"));
        assert!(!is_date_in_range("2024-01-05", "2024-01-05", ""));
        assert!(!is_date_in_range("", "2024-01-01", "2024-01-10"));
    }

    #[test]
    fn test_range_inverted_is_never_true() {
        assert!(!is_date_in_range("2024-01-05", "2024-01-10", "2024-01-01"));
    }

    #[test]
    fn test_range_mixed_inputs() {
        let today = ymd(2024, 1, 5);
        let start = String::from("2024-01-04");
        assert!(is_date_in_range(today, &start, "2024-01-06"));
    }

    #[test]
    fn test_parse_expression() {
        assert_eq!(parse_date_expression("").unwrap(), DateExpression::Today);
        assert_eq!(parse_date_expression("TODAY").unwrap(), DateExpression::Today);
        assert_eq!(
            parse_date_expression("2024-11-20").unwrap(),
            DateExpression::Explicit(ymd(2024, 11, 20))
        );
        assert_eq!(
            parse_date_expression("Friday").unwrap(),
            DateExpression::DayOfWeek { day: Weekday::Fri, offset: 0 }
        );
        assert_eq!(
            parse_date_expression("mon + 2").unwrap(),
            DateExpression::DayOfWeek { day: Weekday::Mon, offset: 2 }
        );
    }

    #[test]
    fn test_parse_expression_invalid() {
        assert!(parse_date_expression("NotADay").is_err());
        assert!(parse_date_expression("Tuesday+abc").is_err());
    }

    #[test]
    fn test_resolve_weekday() {
        // 2024-01-05 is a Friday
        let friday = ymd(2024, 1, 5);
        let same = DateExpression::DayOfWeek { day: Weekday::Fri, offset: 0 };
        assert_eq!(resolve_date(&same, friday).unwrap(), friday);

        let monday = DateExpression::DayOfWeek { day: Weekday::Mon, offset: 0 };
        assert_eq!(resolve_date(&monday, friday).unwrap(), ymd(2024, 1, 8));

        let thursday_later = DateExpression::DayOfWeek { day: Weekday::Thu, offset: 1 };
        assert_eq!(resolve_date(&thursday_later, friday).unwrap(), ymd(2024, 1, 18));
    }

    #[test]
    fn test_resolve_today_and_explicit() {
        let today = ymd(2026, 10, 19);
        assert_eq!(resolve_date(&DateExpression::Today, today).unwrap(), today);
        let explicit = DateExpression::Explicit(ymd(2025, 2, 1));
        assert_eq!(resolve_date(&explicit, today).unwrap(), ymd(2025, 2, 1));
    }

    #[test]
    fn test_resolve_huge_offset_is_an_error() {
        let friday = ymd(2024, 1, 5);
        let expr = parse_date_expression("mon+1000000000").unwrap();
        assert!(matches!(
            resolve_date(&expr, friday),
            Err(Error::InvalidDateExpression(_))
        ));

        let max = DateExpression::DayOfWeek { day: Weekday::Mon, offset: u32::MAX };
        assert!(resolve_date(&max, friday).is_err());
    }

    #[test]
    fn test_labels_parse_back() {
        let label = format_date("2024-01-05");
        assert_eq!(parse_calendar_date(&label), Some(ymd(2024, 1, 5)));
        assert_eq!(format_date(&label), label);
        assert_eq!(parse_calendar_date("Dec 25, 2023"), Some(ymd(2023, 12, 25)));
        assert_eq!(parse_calendar_date("November 20, 2024"), Some(ymd(2024, 11, 20)));
        assert_eq!(parse_calendar_date("Feb 30, 2024"), None);
    }

    #[test]
    fn test_range_with_label_check_date() {
        let today = format_date(ymd(2024, 1, 5));
        assert!(is_date_in_range(&today, "2024-01-05", "2024-01-05"));
        assert!(is_date_in_range(&today, "2024-01-01", "2024-01-10"));
        assert!(!is_date_in_range(&today, "2024-01-06", "2024-01-10"));
    }
}

//! Analysis period inputs.
//!
//! The date pickers hold free-form text for each component, so a
//! [`DateRange`] keeps strings and only interprets them when formatting.

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};

/// Earliest year offered by the year pickers.
pub const MIN_YEAR: i32 = 1959;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const NON_LEAP_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// From/to date components as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRange {
    /// Start year (e.g. `"2024"`).
    pub from_year: String,
    /// Start month, 1-based.
    pub from_month: String,
    /// Start day of month.
    pub from_day: String,
    /// End year.
    pub to_year: String,
    /// End month, 1-based.
    pub to_month: String,
    /// End day of month.
    pub to_day: String,
}

impl DateRange {
    /// Formats the start date, or `"Not set"` if any component is blank.
    #[must_use]
    pub fn format_from(&self) -> String {
        format_date(&self.from_year, &self.from_month, &self.from_day)
    }

    /// Formats the end date, or `"Not set"` if any component is blank.
    #[must_use]
    pub fn format_to(&self) -> String {
        format_date(&self.to_year, &self.to_month, &self.to_day)
    }
}

/// Formats a date as `"January 5, 2024"`.
///
/// Returns `"Not set"` if any component is empty. An unparseable month is
/// echoed verbatim in place of the month name.
#[must_use]
pub fn format_date(year: &str, month: &str, day: &str) -> String {
    if year.is_empty() || month.is_empty() || day.is_empty() {
        return "Not set".to_owned();
    }

    let month_name = month
        .parse::<usize>()
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|idx| MONTH_NAMES.get(idx).copied())
        .unwrap_or(month);

    format!("{month_name} {day}, {year}")
}

/// Number of days in the given month.
///
/// Returns 31 when the month is missing or out of range, and falls back to
/// a non-leap calendar when the year is missing.
#[must_use]
pub fn days_in_month(year: &str, month: &str) -> u32 {
    let Some(month) = month.parse::<u32>().ok().filter(|m| (1..=12).contains(m)) else {
        return 31;
    };

    let Some(year) = year.parse::<i32>().ok().filter(|y| *y != 0) else {
        return NON_LEAP_DAYS[(month - 1) as usize];
    };

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(NON_LEAP_DAYS[(month - 1) as usize], |last| last.day())
}

/// Keeps only ASCII digits, truncated to four characters.
#[must_use]
pub fn sanitize_year_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(4).collect()
}

/// The current calendar year in local time.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_complete_dates() {
        assert_eq!(format_date("2024", "1", "5"), "January 5, 2024");
        assert_eq!(format_date("2023", "12", "31"), "December 31, 2023");
    }

    #[test]
    fn incomplete_dates_are_not_set() {
        assert_eq!(format_date("", "1", "5"), "Not set");
        assert_eq!(format_date("2024", "", "5"), "Not set");
        assert_eq!(format_date("2024", "1", ""), "Not set");
    }

    #[test]
    fn unknown_month_is_echoed() {
        assert_eq!(format_date("2024", "13", "1"), "13 1, 2024");
    }

    #[test]
    fn range_formats_both_ends() {
        let range = DateRange {
            from_year: "2023".to_owned(),
            from_month: "3".to_owned(),
            from_day: "1".to_owned(),
            ..DateRange::default()
        };
        assert_eq!(range.format_from(), "March 1, 2023");
        assert_eq!(range.format_to(), "Not set");
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month("2024", "2"), 29);
        assert_eq!(days_in_month("2023", "2"), 28);
        assert_eq!(days_in_month("1900", "2"), 28);
        assert_eq!(days_in_month("2000", "2"), 29);
        assert_eq!(days_in_month("2024", "12"), 31);
        assert_eq!(days_in_month("2024", "4"), 30);
    }

    #[test]
    fn days_in_month_fallbacks() {
        assert_eq!(days_in_month("2024", ""), 31);
        assert_eq!(days_in_month("2024", "13"), 31);
        assert_eq!(days_in_month("", "2"), 28);
        assert_eq!(days_in_month("", "6"), 30);
    }

    #[test]
    fn sanitizes_year_input() {
        assert_eq!(sanitize_year_input("20a2-45"), "2024");
        assert_eq!(sanitize_year_input("abc"), "");
        assert_eq!(sanitize_year_input("19"), "19");
    }

    #[test]
    fn current_year_is_after_min_year() {
        assert!(current_year() >= MIN_YEAR);
    }
}

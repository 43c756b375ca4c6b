//! Due-date resolution from a date of birth and a milestone age label.
//!
//! Age labels look like `"Birth"`, `"6 Weeks"`, `"6-9 Months"` or
//! `"4-6 Years"`. Ranges resolve to their lower bound. Labels without a
//! recognised unit resolve to the date of birth itself.

use chrono::{Datelike, Days, NaiveDate};

/// Offset described by an age label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeOffset {
    Weeks(u64),
    Months(u64),
    Years(u64),
    None,
}

impl AgeOffset {
    pub fn parse(age_label: &str) -> Self {
        let mut parts = age_label.split_whitespace();

        let Some(number) = parts.next() else {
            return AgeOffset::None;
        };
        let unit = parts.next().unwrap_or("").to_lowercase();

        // "6-9" -> "6"
        let number = number.split('-').next().unwrap_or("");
        let n = leading_number(number);

        if unit.starts_with("week") {
            AgeOffset::Weeks(n)
        } else if unit.starts_with("month") {
            AgeOffset::Months(n)
        } else if unit.contains("year") {
            AgeOffset::Years(n)
        } else {
            AgeOffset::None
        }
    }

    /// Apply the offset to `date`, or `None` if the result is out of range.
    pub fn apply(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            AgeOffset::Weeks(n) => date.checked_add_days(Days::new(n.checked_mul(7)?)),
            AgeOffset::Months(n) => add_months_rolling(date, i64::try_from(n).ok()?),
            AgeOffset::Years(n) => add_years_rolling(date, i64::try_from(n).ok()?),
            AgeOffset::None => Some(date),
        }
    }
}

/// Resolve the due date for `age_label` given a date of birth.
///
/// Never fails: unparseable labels and out-of-range results fall back to `dob`.
pub fn resolve_due_date(dob: NaiveDate, age_label: &str) -> NaiveDate {
    AgeOffset::parse(age_label).apply(dob).unwrap_or(dob)
}

/// Parse the leading ASCII digits of `s`; 0 if there are none.
fn leading_number(s: &str) -> u64 {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Add calendar months, letting a day-of-month that doesn't exist in the
/// target month roll over into the next one (Jan 31 + 1 month = Mar 3).
fn add_months_rolling(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let month0 = i64::from(date.month0()).checked_add(months)?;
    let year = i64::from(date.year()).checked_add(month0.div_euclid(12))?;
    let month = u32::try_from(month0.rem_euclid(12)).ok()? + 1;

    with_rolling_day(i32::try_from(year).ok()?, month, date.day())
}

fn add_years_rolling(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    let year = i64::from(date.year()).checked_add(years)?;
    with_rolling_day(i32::try_from(year).ok()?, date.month(), date.day())
}

fn with_rolling_day(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(day - 1)))
}

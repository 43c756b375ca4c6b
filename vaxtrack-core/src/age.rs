//! Human-readable child ages.

use chrono::{Datelike, NaiveDate};

/// Format a child's age like "7 months old", "1 year old" or "2y 3m old".
///
/// Whole months are counted from calendar months only; day-of-month is ignored.
pub fn format_age_string(dob: NaiveDate, today: NaiveDate) -> String {
    let total_months = i64::from(today.year() - dob.year()) * 12
        + (i64::from(today.month()) - i64::from(dob.month()));
    let years = total_months.div_euclid(12);
    let months = total_months % 12;

    if years <= 0 {
        return format!("{} months old", months);
    }
    if months == 0 {
        return format!("{} year{} old", years, if years > 1 { "s" } else { "" });
    }
    format!("{}y {}m old", years, months)
}

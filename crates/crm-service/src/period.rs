//! Calendar period helpers for report queries.
//!
//! All ranges are half-open `[start, end)` UTC instants, matching the
//! range predicates the repositories use.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crm_core::error::AppError;
use crm_core::result::AppResult;

/// The UTC instant a calendar month starts.
pub fn first_of_month(year: i32, month: u32) -> AppResult<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::validation(format!("Invalid month: {year}-{month:02}")))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// The `[start, end)` range covering one calendar month.
pub fn month_range(year: i32, month: u32) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let start = first_of_month(year, month)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    Ok((start, first_of_month(next_year, next_month)?))
}

/// The `[start, end)` range covering one calendar year.
pub fn year_range(year: i32) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    Ok((first_of_month(year, 1)?, first_of_month(year + 1, 1)?))
}

/// Midnight UTC of the current day.
pub fn start_of_today() -> DateTime<Utc> {
    Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// The month preceding the given one.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

/// English month name, for report labels.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_is_half_open() {
        let (start, end) = month_range(2026, 8).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-08-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2026-09-01T00:00:00+00:00");
    }

    #[test]
    fn december_rolls_into_next_year() {
        let (_, end) = month_range(2026, 12).unwrap();
        assert_eq!(end.to_rfc3339(), "2027-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(month_range(2026, 13).is_err());
        assert!(month_range(2026, 0).is_err());
    }

    #[test]
    fn previous_month_wraps_january() {
        assert_eq!(previous_month(2026, 1), (2025, 12));
        assert_eq!(previous_month(2026, 8), (2026, 7));
    }
}

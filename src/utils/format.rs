//! Date formatting for `date` output.

/// Format Unix timestamp as ISO date (YYYY-MM-DD).
///
/// Properly calculates year/month/day accounting for leap years.
pub fn format_date_iso(timestamp: u64) -> String {
    let (year, month, day) = civil_date(timestamp);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Format Unix timestamp as `YYYY-MM-DD HH:MM:SS UTC` for `date`.
pub fn format_datetime(timestamp: u64) -> String {
    let hour = (timestamp % 86400) / 3600;
    let min = (timestamp % 3600) / 60;
    let sec = timestamp % 60;
    format!(
        "{} {:02}:{:02}:{:02} UTC",
        format_date_iso(timestamp),
        hour,
        min,
        sec
    )
}

/// Split a Unix timestamp into (year, month, day).
fn civil_date(timestamp: u64) -> (i64, i64, i64) {
    let mut year = 1970i64;
    let mut remaining_days = (timestamp / 86400) as i64;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let days_in_months: [i64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1;
    for days_in_month in days_in_months.iter() {
        if remaining_days < *days_in_month {
            break;
        }
        remaining_days -= days_in_month;
        month += 1;
    }

    (year, month, remaining_days + 1)
}

/// Check if a year is a leap year.
fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

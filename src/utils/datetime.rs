use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// Parses a wall-clock time written as `HH:MM` (a single-digit hour is accepted).
pub fn parse_hhmm(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|_| anyhow!("Invalid time '{}', expected HH:MM", input.trim()))
}

pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date '{}', expected YYYY-MM-DD", input.trim()))
}

pub fn format_hhmm(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Date as the booking site's form expects it (`DD/MM/YYYY`).
pub fn format_site_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Date with weekday, e.g. `Friday 25/04/2025`, for chat replies.
pub fn format_display_date(date: &NaiveDate) -> String {
    date.format("%A %d/%m/%Y").to_string()
}

/// Unix milliseconds for a wall-clock time in the server's local time zone.
///
/// Ambiguous local times (DST fold) resolve to the earlier instant; times that
/// do not exist locally (DST gap) fall back to reading the wall clock as UTC.
pub fn local_timestamp_millis(date: NaiveDate, time: NaiveTime) -> i64 {
    let naive = NaiveDateTime::new(date, time);
    match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.timestamp_millis(),
        None => naive.and_utc().timestamp_millis(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("19:00").unwrap(), NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert_eq!(parse_hhmm(" 8:30 ").unwrap(), NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        assert!(parse_hhmm("25:00").is_err());
        assert!(parse_hhmm("noon").is_err());
    }

    #[test]
    fn test_site_and_display_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 25).unwrap();
        assert_eq!(format_site_date(&date), "25/04/2025");
        assert_eq!(format_display_date(&date), "Friday 25/04/2025");
    }

    #[test]
    fn test_local_timestamp_orders_times() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 25).unwrap();
        let from = local_timestamp_millis(date, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        let to = local_timestamp_millis(date, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        assert_eq!(to - from, 3 * 60 * 60 * 1000);
    }
}

//! Trading-hours gate and clock panel text.

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Whether the market counts as open at `now`.
///
/// Open on weekdays from 09:00 up to, but not including, 15:00, plus the half hour from
/// 08:30 that precedes it.
pub fn is_market_open<T: Datelike + Timelike>(now: &T) -> bool {
    let weekday = now.weekday().num_days_from_monday();
    let hour = now.hour();
    weekday < 5 && ((9..15).contains(&hour) || (hour == 8 && now.minute() >= 30))
}

/// Text of the clock panel, e.g. `Time: 10:04:59 +02:00  (Market closed)`.
///
/// The zone is printed with `%Z`: a name for zones that carry one, such as `UTC`, and the
/// numeric offset for `Local`.
pub fn clock_line<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut line = format!("Time: {} ", now.format("%H:%M:%S %Z"));
    if !is_market_open(now) {
        line.push_str(" (Market closed)");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};

    // 2024-01-01 is a Monday.
    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn weekday_session_is_open() {
        assert!(is_market_open(&at(3, 10, 0)));
        assert!(is_market_open(&at(5, 14, 59)));
        assert!(is_market_open(&at(1, 9, 0)));
    }

    #[test]
    fn weekend_is_closed() {
        assert!(!is_market_open(&at(6, 10, 0)));
        assert!(!is_market_open(&at(7, 10, 0)));
    }

    #[test]
    fn pre_session_band_counts_as_open() {
        assert!(is_market_open(&at(1, 8, 45)));
        assert!(is_market_open(&at(1, 8, 30)));
        assert!(!is_market_open(&at(1, 8, 29)));
        assert!(!is_market_open(&at(1, 8, 15)));
    }

    #[test]
    fn close_is_exclusive() {
        assert!(!is_market_open(&at(1, 15, 0)));
        assert!(!is_market_open(&at(1, 23, 0)));
    }

    #[test]
    fn clock_line_flags_closed_market() {
        let saturday = Utc.from_utc_datetime(&at(6, 10, 0));
        assert_eq!(clock_line(&saturday), "Time: 10:00:00 UTC  (Market closed)");

        let wednesday = Utc.from_utc_datetime(&at(3, 10, 0));
        assert_eq!(clock_line(&wednesday), "Time: 10:00:00 UTC ");
    }

    #[test]
    fn clock_line_prints_numeric_offset_for_unnamed_zones() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let wednesday = offset.from_local_datetime(&at(3, 10, 0)).unwrap();
        assert_eq!(clock_line(&wednesday), "Time: 10:00:00 +02:00 ");
    }
}

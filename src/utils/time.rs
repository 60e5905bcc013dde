use chrono::{DateTime, Local, NaiveDate, Utc};

/// This is the standard way of converting a day key to a string in drillbook.
pub fn day_key_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Calendar-day projection of a timestamp in the local timezone. Day keys are
/// always derived from the timestamp so the two can never disagree.
pub fn day_key(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// First day of an inclusive lookback window ending at `as_of`.
pub fn window_start(as_of: NaiveDate, window_days: u32) -> NaiveDate {
    as_of - chrono::Duration::days(window_days.saturating_sub(1) as i64)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, TimeZone, Utc};

    use super::{day_key, day_key_string, window_start};

    #[test]
    fn day_key_projects_into_the_local_timezone() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 7, 23, 30, 0).unwrap();
        assert_eq!(
            day_key(timestamp),
            timestamp.with_timezone(&Local).date_naive()
        );
    }

    #[test]
    fn day_key_string_is_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(day_key_string(date), "2024-03-07");
    }

    #[test]
    fn window_start_is_inclusive_of_as_of() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(window_start(as_of, 1), as_of);
        assert_eq!(
            window_start(as_of, 7),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn window_start_crosses_leap_day() {
        let as_of = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            window_start(as_of, 3),
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()
        );
    }
}

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

/// Consecutive-day streak ending at `as_of`. Walks backward one calendar day
/// at a time, so leap days and DST shifts can't skew the count. A day with no
/// entry on `as_of` itself breaks the streak immediately instead of falling
/// back to yesterday.
pub fn current_streak(days: impl IntoIterator<Item = NaiveDate>, as_of: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = days.into_iter().collect();

    let mut streak = 0;
    let mut cursor = as_of;
    while days.contains(&cursor) {
        streak += 1;
        let Some(previous) = cursor.pred_opt() else {
            break;
        };
        cursor = previous;
    }
    streak
}

/// Longest historical run of calendar-consecutive days. Duplicate days count
/// once. Ties between runs only report the length.
pub fn longest_streak(days: impl IntoIterator<Item = NaiveDate>) -> u32 {
    let mut days: Vec<NaiveDate> = days.into_iter().collect();
    days.sort_unstable();
    days.dedup();

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for day in days {
        run = match previous {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }
    longest
}

/// Entry counts per day over an inclusive lookback window ending at `as_of`.
/// Every day in the window is present as a key, with 0 for days without
/// entries. Days outside the window are ignored.
pub fn bucket_counts(
    days: impl IntoIterator<Item = NaiveDate>,
    window_days: u32,
    as_of: NaiveDate,
) -> BTreeMap<NaiveDate, usize> {
    let mut buckets = BTreeMap::new();
    let mut cursor = as_of;
    for _ in 0..window_days {
        buckets.insert(cursor, 0);
        let Some(previous) = cursor.pred_opt() else {
            break;
        };
        cursor = previous;
    }

    for day in days {
        if let Some(count) = buckets.get_mut(&day) {
            *count += 1;
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{bucket_counts, current_streak, longest_streak};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_collection_yields_zero() {
        let as_of = day(2024, 1, 5);
        assert_eq!(current_streak([], as_of), 0);
        assert_eq!(longest_streak([]), 0);
    }

    #[test]
    fn gap_on_as_of_breaks_streak_immediately() {
        // Entries yesterday and before, but not today.
        let days = [day(2024, 1, 3), day(2024, 1, 4)];
        assert_eq!(current_streak(days, day(2024, 1, 5)), 0);
        assert_eq!(current_streak(days, day(2024, 1, 4)), 2);
    }

    #[test]
    fn run_then_gap_then_single_day() {
        let days = [
            day(2024, 1, 1),
            day(2024, 1, 2),
            day(2024, 1, 3),
            day(2024, 1, 5),
        ];
        assert_eq!(longest_streak(days), 3);
        assert_eq!(current_streak(days, day(2024, 1, 5)), 1);
    }

    #[test]
    fn multiple_entries_per_day_count_once_for_streaks() {
        let days = [day(2024, 1, 4), day(2024, 1, 4), day(2024, 1, 5)];
        assert_eq!(current_streak(days, day(2024, 1, 5)), 2);
        assert_eq!(longest_streak(days), 2);
    }

    #[test]
    fn leap_day_is_a_consecutive_calendar_day() {
        let days = [day(2024, 2, 28), day(2024, 2, 29), day(2024, 3, 1)];
        assert_eq!(longest_streak(days), 3);
        assert_eq!(current_streak(days, day(2024, 3, 1)), 3);

        // 2023 has no Feb 29, so 02-28 -> 03-01 is consecutive there.
        let days = [day(2023, 2, 28), day(2023, 3, 1)];
        assert_eq!(longest_streak(days), 2);
    }

    #[test]
    fn longest_is_at_least_current() {
        let samples: [&[NaiveDate]; 4] = [
            &[],
            &[day(2024, 1, 5)],
            &[day(2024, 1, 3), day(2024, 1, 4), day(2024, 1, 5)],
            &[day(2024, 1, 1), day(2024, 1, 2), day(2024, 1, 5)],
        ];
        for days in samples {
            assert!(
                longest_streak(days.iter().copied())
                    >= current_streak(days.iter().copied(), day(2024, 1, 5))
            );
        }
    }

    #[test]
    fn tied_runs_report_the_length_only() {
        let days = [
            day(2024, 1, 1),
            day(2024, 1, 2),
            day(2024, 1, 4),
            day(2024, 1, 5),
        ];
        assert_eq!(longest_streak(days), 2);
    }

    #[test]
    fn bucket_counts_covers_the_full_window() {
        let as_of = day(2024, 1, 7);
        let days = [day(2024, 1, 7), day(2024, 1, 7), day(2024, 1, 5)];
        let buckets = bucket_counts(days, 7, as_of);

        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[&day(2024, 1, 7)], 2);
        assert_eq!(buckets[&day(2024, 1, 5)], 1);
        assert_eq!(buckets[&day(2024, 1, 1)], 0);
        // Outside the window.
        assert!(!buckets.contains_key(&day(2023, 12, 31)));
    }

    #[test]
    fn bucket_counts_ignores_days_outside_the_window() {
        let as_of = day(2024, 1, 7);
        let buckets = bucket_counts([day(2023, 12, 1)], 7, as_of);
        assert_eq!(buckets.len(), 7);
        assert!(buckets.values().all(|count| *count == 0));
    }
}

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::{
    store::entities::{DayLog, Drill, DrillCategory, JournalEntry, MoodLevel},
    utils::time::window_start,
};

use super::{
    streak::longest_streak,
    summary::{share_percent, PerformanceTier},
};

/// Everything the intel command displays, computed in one pass so the numbers
/// in a single report always describe the same snapshot.
#[derive(Debug)]
pub struct IntelReport {
    pub window_days: u32,
    pub habits_completed: usize,
    pub journal_entries: usize,
    pub average_mood: f64,
    pub longest_streak: u32,
    /// Last 7 days in chronological order, completion rate per day.
    pub weekly_progress: Vec<(NaiveDate, u8)>,
    /// Count and share of recent journal entries per mood level.
    pub mood_distribution: BTreeMap<MoodLevel, (usize, u8)>,
    pub category_progress: BTreeMap<DrillCategory, u8>,
    pub overall_completion: u8,
    pub tier: PerformanceTier,
}

pub fn build_report(
    drills: &[Drill],
    day_logs: &[DayLog],
    journal: &[JournalEntry],
    window_days: u32,
    today: NaiveDate,
) -> IntelReport {
    let start = window_start(today, window_days);
    let in_window = |date: NaiveDate| date >= start && date <= today;

    let active: Vec<&Drill> = drills.iter().filter(|d| d.active).collect();
    let by_id: HashMap<&str, &Drill> = drills.iter().map(|d| (d.id.as_str(), d)).collect();
    let is_active = |id: &str| by_id.get(id).is_some_and(|d| d.active);

    // Only completions of drills still active count toward rates, so pausing
    // a drill can't push a day over 100%.
    let habits_completed: usize = day_logs
        .iter()
        .filter(|log| in_window(log.date))
        .map(|log| log.completed.iter().filter(|id| is_active(id)).count())
        .sum();

    let recent_journal: Vec<&JournalEntry> =
        journal.iter().filter(|e| in_window(e.day_key())).collect();

    let average_mood = if recent_journal.is_empty() {
        3.0
    } else {
        let total: u32 = recent_journal.iter().map(|e| e.mood.score() as u32).sum();
        total as f64 / recent_journal.len() as f64
    };

    let longest = active
        .iter()
        .map(|drill| {
            longest_streak(
                day_logs
                    .iter()
                    .filter(|log| log.completed.iter().any(|id| *id == drill.id))
                    .map(|log| log.date),
            )
        })
        .max()
        .unwrap_or(0);

    let mut weekly_progress = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - chrono::Duration::days(offset);
        let completed = day_logs
            .iter()
            .filter(|log| log.date == date)
            .map(|log| log.completed.iter().filter(|id| is_active(id)).count())
            .sum::<usize>();
        weekly_progress.push((date, share_percent(completed as u64, active.len() as u64)));
    }

    let mut mood_counts = BTreeMap::<MoodLevel, usize>::new();
    for entry in &recent_journal {
        *mood_counts.entry(entry.mood).or_default() += 1;
    }
    let mood_distribution = mood_counts
        .into_iter()
        .map(|(level, count)| {
            let share = share_percent(count as u64, recent_journal.len() as u64);
            (level, (count, share))
        })
        .collect();

    let mut category_drills = BTreeMap::<DrillCategory, usize>::new();
    for drill in &active {
        *category_drills.entry(drill.category).or_default() += 1;
    }
    let mut category_completions = BTreeMap::<DrillCategory, usize>::new();
    for log in day_logs.iter().filter(|log| in_window(log.date)) {
        for id in &log.completed {
            if let Some(drill) = by_id.get(id.as_str()).filter(|d| d.active) {
                *category_completions.entry(drill.category).or_default() += 1;
            }
        }
    }
    let category_progress = category_completions
        .into_iter()
        .map(|(category, completions)| {
            let possible = category_drills.get(&category).copied().unwrap_or(1) as u64
                * window_days as u64;
            (category, share_percent(completions as u64, possible))
        })
        .collect();

    let possible = active.len() as u64 * window_days as u64;
    let overall_completion = share_percent(habits_completed as u64, possible);
    let ratio = if possible == 0 {
        0.0
    } else {
        habits_completed as f64 / possible as f64
    };

    IntelReport {
        window_days,
        habits_completed,
        journal_entries: recent_journal.len(),
        average_mood,
        longest_streak: longest,
        weekly_progress,
        mood_distribution,
        category_progress,
        overall_completion,
        tier: PerformanceTier::from_ratio(ratio),
    }
}

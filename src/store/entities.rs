use std::fmt::Display;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::utils::time::day_key;

/// Ids follow the original `{prefix}-{millis}` shape. Good enough for a
/// single-user store where two entries never share a millisecond in practice.
pub fn entry_id(prefix: &str, timestamp: DateTime<Utc>) -> String {
    format!("{prefix}-{}", timestamp.timestamp_millis())
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Elite,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Elite => "ELITE",
        }
    }
}

// Display has to match the clap value names so default_value_t round-trips.
impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Elite => write!(f, "elite"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrillCategory {
    Physical,
    Mental,
    Tactical,
    Lifestyle,
}

impl DrillCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DrillCategory::Physical => "PHYSICAL",
            DrillCategory::Mental => "MENTAL",
            DrillCategory::Tactical => "TACTICAL",
            DrillCategory::Lifestyle => "LIFESTYLE",
        }
    }
}

impl Display for DrillCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrillCategory::Physical => write!(f, "physical"),
            DrillCategory::Mental => write!(f, "mental"),
            DrillCategory::Tactical => write!(f, "tactical"),
            DrillCategory::Lifestyle => write!(f, "lifestyle"),
        }
    }
}

/// A recurring daily habit. Completions live in [DayLog]s, not here, so drill
/// metrics stay fully recomputable from the logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    pub id: String,
    pub codename: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub category: DrillCategory,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

/// Drill ids completed on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    pub date: NaiveDate,
    pub completed: Vec<String>,
}

/// 1..=5 status scale shared by mood check-ins and journal entries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoodLevel {
    Critical,
    Damaged,
    Operational,
    Strong,
    Victorious,
}

impl MoodLevel {
    pub const ALL: [MoodLevel; 5] = [
        MoodLevel::Critical,
        MoodLevel::Damaged,
        MoodLevel::Operational,
        MoodLevel::Strong,
        MoodLevel::Victorious,
    ];

    pub fn from_score(score: u8) -> Option<Self> {
        match score {
            1 => Some(MoodLevel::Critical),
            2 => Some(MoodLevel::Damaged),
            3 => Some(MoodLevel::Operational),
            4 => Some(MoodLevel::Strong),
            5 => Some(MoodLevel::Victorious),
            _ => None,
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            MoodLevel::Critical => 1,
            MoodLevel::Damaged => 2,
            MoodLevel::Operational => 3,
            MoodLevel::Strong => 4,
            MoodLevel::Victorious => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodLevel::Critical => "CRITICAL",
            MoodLevel::Damaged => "DAMAGED",
            MoodLevel::Operational => "OPERATIONAL",
            MoodLevel::Strong => "STRONG",
            MoodLevel::Victorious => "VICTORIOUS",
        }
    }
}

impl Display for MoodLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub level: MoodLevel,
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodEntry {
    pub fn day_key(&self) -> NaiveDate {
        day_key(self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub prompt: Option<String>,
    pub tags: Vec<String>,
    pub mood: MoodLevel,
    #[serde(default)]
    pub classified: bool,
    pub timestamp: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

impl JournalEntry {
    pub fn day_key(&self) -> NaiveDate {
        day_key(self.timestamp)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GratitudeCategory {
    Personal,
    People,
    Achievements,
    Experiences,
    Growth,
}

impl GratitudeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GratitudeCategory::Personal => "PERSONAL",
            GratitudeCategory::People => "PEOPLE",
            GratitudeCategory::Achievements => "ACHIEVEMENTS",
            GratitudeCategory::Experiences => "EXPERIENCES",
            GratitudeCategory::Growth => "GROWTH",
        }
    }
}

impl Display for GratitudeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GratitudeCategory::Personal => write!(f, "personal"),
            GratitudeCategory::People => write!(f, "people"),
            GratitudeCategory::Achievements => write!(f, "achievements"),
            GratitudeCategory::Experiences => write!(f, "experiences"),
            GratitudeCategory::Growth => write!(f, "growth"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub id: String,
    pub content: String,
    pub category: GratitudeCategory,
    pub timestamp: DateTime<Utc>,
}

impl GratitudeEntry {
    pub fn day_key(&self) -> NaiveDate {
        day_key(self.timestamp)
    }
}

/// Starter set shipped on first run, matching what a fresh install suggests.
pub fn default_drills(created_at: DateTime<Utc>) -> Vec<Drill> {
    let defaults = [
        (
            "drill-1",
            "MORNING DRILL",
            "Complete morning workout routine",
            Difficulty::Medium,
            DrillCategory::Physical,
        ),
        (
            "drill-2",
            "HYDRATION PROTOCOL",
            "Drink 8 glasses of water",
            Difficulty::Easy,
            DrillCategory::Lifestyle,
        ),
        (
            "drill-3",
            "MENTAL ARMOR",
            "10 minutes meditation/mindfulness",
            Difficulty::Medium,
            DrillCategory::Mental,
        ),
        (
            "drill-4",
            "TACTICAL READING",
            "Read for 30 minutes",
            Difficulty::Easy,
            DrillCategory::Mental,
        ),
    ];

    defaults
        .into_iter()
        .map(|(id, codename, description, difficulty, category)| Drill {
            id: id.to_string(),
            codename: codename.to_string(),
            description: description.to_string(),
            difficulty,
            category,
            active: true,
            created_at,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{entry_id, MoodLevel};

    #[test]
    fn entry_ids_carry_the_millisecond_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap();
        assert_eq!(
            entry_id("gratitude", timestamp),
            format!("gratitude-{}", timestamp.timestamp_millis())
        );
    }

    #[test]
    fn mood_scores_round_trip() {
        for level in MoodLevel::ALL {
            assert_eq!(MoodLevel::from_score(level.score()), Some(level));
        }
        assert_eq!(MoodLevel::from_score(0), None);
        assert_eq!(MoodLevel::from_score(6), None);
    }
}

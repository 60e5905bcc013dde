pub mod entities;
pub mod kv;

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::session::Session;

use entities::{default_drills, DayLog, Drill, GratitudeEntry, JournalEntry, MoodEntry};
use kv::KvStore;

const DRILLS: &str = "drills";
const DAY_LOGS: &str = "day-logs";
const MOOD_ENTRIES: &str = "mood-entries";
const JOURNAL_ENTRIES: &str = "journal-entries";
const GRATITUDE_ENTRIES: &str = "gratitude-entries";
const STRENGTH_FAVORITES: &str = "strength-favorites";
const SESSION: &str = "session";

/// Owner of every stored collection. All aggregation is recomputed from here
/// on demand, nothing downstream caches.
pub struct Vault {
    kv: KvStore,
}

impl Vault {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            kv: KvStore::open(dir)?,
        })
    }

    /// Writes the starter drills on a fresh store. An explicitly emptied
    /// drill list stays empty.
    pub fn ensure_seeded(&self, now: DateTime<Utc>) -> Result<()> {
        if !self.kv.exists(DRILLS) {
            self.kv.save(DRILLS, &default_drills(now))?;
        }
        Ok(())
    }

    pub fn drills(&self) -> Result<Vec<Drill>> {
        self.kv.load(DRILLS)
    }

    pub fn add_drill(&self, drill: Drill) -> Result<()> {
        let mut drills = self.drills()?;
        drills.push(drill);
        self.kv.save(DRILLS, &drills)
    }

    /// Flips the paused state. Returns the new `active` value.
    pub fn toggle_drill_active(&self, drill_id: &str) -> Result<bool> {
        let mut drills = self.drills()?;
        let Some(drill) = drills.iter_mut().find(|d| d.id == drill_id) else {
            bail!("No drill with id {drill_id}");
        };
        drill.active = !drill.active;
        let active = drill.active;
        self.kv.save(DRILLS, &drills)?;
        Ok(active)
    }

    /// Deletes a drill and scrubs its id from every day log.
    pub fn remove_drill(&self, drill_id: &str) -> Result<()> {
        let mut drills = self.drills()?;
        let before = drills.len();
        drills.retain(|d| d.id != drill_id);
        if drills.len() == before {
            bail!("No drill with id {drill_id}");
        }
        self.kv.save(DRILLS, &drills)?;

        let mut logs = self.day_logs()?;
        for log in &mut logs {
            log.completed.retain(|id| id != drill_id);
        }
        logs.retain(|log| !log.completed.is_empty());
        self.kv.save(DAY_LOGS, &logs)
    }

    pub fn day_logs(&self) -> Result<Vec<DayLog>> {
        self.kv.load(DAY_LOGS)
    }

    /// Completion is a toggle: checking an already-checked drill for `day`
    /// unchecks it. Returns true when the drill ends up completed.
    pub fn toggle_completion(&self, drill_id: &str, day: NaiveDate) -> Result<bool> {
        if !self.drills()?.iter().any(|d| d.id == drill_id) {
            bail!("No drill with id {drill_id}");
        }

        let mut logs = self.day_logs()?;
        let completed = match logs.iter_mut().find(|log| log.date == day) {
            Some(log) => {
                if let Some(position) = log.completed.iter().position(|id| id == drill_id) {
                    log.completed.remove(position);
                    false
                } else {
                    log.completed.push(drill_id.to_string());
                    true
                }
            }
            None => {
                logs.push(DayLog {
                    date: day,
                    completed: vec![drill_id.to_string()],
                });
                true
            }
        };
        logs.retain(|log| !log.completed.is_empty());
        self.kv.save(DAY_LOGS, &logs)?;
        Ok(completed)
    }

    /// Days on which the given drill was completed, unordered.
    pub fn completed_days(&self, drill_id: &str) -> Result<Vec<NaiveDate>> {
        Ok(self
            .day_logs()?
            .into_iter()
            .filter(|log| log.completed.iter().any(|id| id == drill_id))
            .map(|log| log.date)
            .collect())
    }

    pub fn mood_entries(&self) -> Result<Vec<MoodEntry>> {
        self.kv.load(MOOD_ENTRIES)
    }

    pub fn add_mood_entry(&self, entry: MoodEntry) -> Result<()> {
        let mut entries = self.mood_entries()?;
        entries.push(entry);
        self.kv.save(MOOD_ENTRIES, &entries)
    }

    pub fn journal_entries(&self) -> Result<Vec<JournalEntry>> {
        self.kv.load(JOURNAL_ENTRIES)
    }

    pub fn add_journal_entry(&self, entry: JournalEntry) -> Result<()> {
        let mut entries = self.journal_entries()?;
        entries.push(entry);
        self.kv.save(JOURNAL_ENTRIES, &entries)
    }

    pub fn replace_journal_entry(&self, entry: JournalEntry) -> Result<()> {
        let mut entries = self.journal_entries()?;
        let Some(slot) = entries.iter_mut().find(|e| e.id == entry.id) else {
            bail!("No journal entry with id {}", entry.id);
        };
        *slot = entry;
        self.kv.save(JOURNAL_ENTRIES, &entries)
    }

    pub fn remove_journal_entry(&self, entry_id: &str) -> Result<()> {
        let mut entries = self.journal_entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != entry_id);
        if entries.len() == before {
            bail!("No journal entry with id {entry_id}");
        }
        self.kv.save(JOURNAL_ENTRIES, &entries)
    }

    pub fn gratitude_entries(&self) -> Result<Vec<GratitudeEntry>> {
        self.kv.load(GRATITUDE_ENTRIES)
    }

    pub fn add_gratitude_entry(&self, entry: GratitudeEntry) -> Result<()> {
        let mut entries = self.gratitude_entries()?;
        entries.push(entry);
        self.kv.save(GRATITUDE_ENTRIES, &entries)
    }

    pub fn strength_favorites(&self) -> Result<Vec<String>> {
        self.kv.load(STRENGTH_FAVORITES)
    }

    /// Flips the favorite state. Returns true when the id ends up favorited.
    pub fn toggle_strength_favorite(&self, id: &str) -> Result<bool> {
        let mut favorites = self.strength_favorites()?;
        let favorited = match favorites.iter().position(|f| f == id) {
            Some(position) => {
                favorites.remove(position);
                false
            }
            None => {
                favorites.push(id.to_string());
                true
            }
        };
        self.kv.save(STRENGTH_FAVORITES, &favorites)?;
        Ok(favorited)
    }

    pub fn session(&self) -> Result<Option<Session>> {
        Ok(self.kv.load::<Session>(SESSION)?.into_iter().next())
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.kv.save(SESSION, std::slice::from_ref(session))
    }

    pub fn clear_session(&self) -> Result<()> {
        self.kv.save::<Session>(SESSION, &[])
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, TimeZone, Utc};
    use tempfile::tempdir;

    use crate::store::entities::{entry_id, JournalEntry, MoodLevel};

    use super::Vault;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn open_seeded() -> Result<(tempfile::TempDir, Vault)> {
        let dir = tempdir()?;
        let vault = Vault::open(dir.path().join("store"))?;
        vault.ensure_seeded(Utc.with_ymd_and_hms(2024, 4, 5, 8, 0, 0).unwrap())?;
        Ok((dir, vault))
    }

    #[test]
    fn seeding_happens_once() -> Result<()> {
        let (_dir, vault) = open_seeded()?;
        let drills = vault.drills()?;
        assert_eq!(drills.len(), 4);
        assert!(drills.iter().all(|d| d.active));

        // Emptying the list is a user decision the seed must not undo.
        vault.remove_drill("drill-1")?;
        vault.remove_drill("drill-2")?;
        vault.remove_drill("drill-3")?;
        vault.remove_drill("drill-4")?;
        vault.ensure_seeded(Utc::now())?;
        assert!(vault.drills()?.is_empty());
        Ok(())
    }

    #[test]
    fn completion_toggles_on_and_off() -> Result<()> {
        let (_dir, vault) = open_seeded()?;
        let today = day(2024, 4, 5);

        assert!(vault.toggle_completion("drill-1", today)?);
        assert_eq!(vault.completed_days("drill-1")?, vec![today]);

        assert!(!vault.toggle_completion("drill-1", today)?);
        assert!(vault.completed_days("drill-1")?.is_empty());
        // Unchecking the only completion drops the empty log entirely.
        assert!(vault.day_logs()?.is_empty());
        Ok(())
    }

    #[test]
    fn toggling_an_unknown_drill_is_an_error() -> Result<()> {
        let (_dir, vault) = open_seeded()?;
        assert!(vault.toggle_completion("drill-99", day(2024, 4, 5)).is_err());
        Ok(())
    }

    #[test]
    fn removing_a_drill_scrubs_day_logs() -> Result<()> {
        let (_dir, vault) = open_seeded()?;
        let today = day(2024, 4, 5);
        vault.toggle_completion("drill-1", today)?;
        vault.toggle_completion("drill-2", today)?;

        vault.remove_drill("drill-1")?;

        assert!(vault.drills()?.iter().all(|d| d.id != "drill-1"));
        let logs = vault.day_logs()?;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].completed, vec!["drill-2".to_string()]);
        Ok(())
    }

    #[test]
    fn pause_flips_the_active_flag() -> Result<()> {
        let (_dir, vault) = open_seeded()?;
        assert!(!vault.toggle_drill_active("drill-1")?);
        assert!(vault.toggle_drill_active("drill-1")?);
        Ok(())
    }

    #[test]
    fn journal_entries_add_and_remove() -> Result<()> {
        let (_dir, vault) = open_seeded()?;
        let timestamp = Utc.with_ymd_and_hms(2024, 4, 5, 21, 0, 0).unwrap();
        let entry = JournalEntry {
            id: entry_id("log", timestamp),
            title: "After action".into(),
            content: "Held the line today".into(),
            prompt: None,
            tags: vec![],
            mood: MoodLevel::Strong,
            classified: false,
            timestamp,
            last_modified: timestamp,
        };

        vault.add_journal_entry(entry.clone())?;
        assert_eq!(vault.journal_entries()?, vec![entry.clone()]);

        vault.remove_journal_entry(&entry.id)?;
        assert!(vault.journal_entries()?.is_empty());
        assert!(vault.remove_journal_entry(&entry.id).is_err());
        Ok(())
    }
}

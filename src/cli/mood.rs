use anyhow::{anyhow, Result};
use clap::Subcommand;

use crate::{
    stats::streak::bucket_counts,
    store::{
        entities::{entry_id, MoodEntry, MoodLevel},
        Vault,
    },
    utils::{clock::Clock, time::day_key_string},
};

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    #[command(about = "Record how you're holding up on a 1-5 scale")]
    Log {
        #[arg(
            value_parser = clap::value_parser!(u8).range(1..=5),
            help = "1 = CRITICAL, 5 = VICTORIOUS"
        )]
        score: u8,
        #[arg(short, long, help = "Optional note about the check-in")]
        note: Option<String>,
    },
    #[command(about = "Show check-ins per day over a lookback window")]
    List {
        #[arg(
            long,
            default_value_t = 7,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Lookback window in days, including today"
        )]
        days: u32,
    },
}

pub fn process_mood_command(command: MoodCommand, vault: &Vault, clock: &dyn Clock) -> Result<()> {
    match command {
        MoodCommand::Log { score, note } => {
            let level = MoodLevel::from_score(score)
                .ok_or_else(|| anyhow!("Mood score {score} is outside 1-5"))?;
            let timestamp = clock.now();
            vault.add_mood_entry(MoodEntry {
                id: entry_id("mood", timestamp),
                level,
                note: note.filter(|n| !n.trim().is_empty()),
                timestamp,
            })?;
            println!("Logged {level}");
            Ok(())
        }
        MoodCommand::List { days } => {
            let entries = vault.mood_entries()?;
            let buckets = bucket_counts(entries.iter().map(MoodEntry::day_key), days, clock.today());

            for (day, count) in &buckets {
                let labels = entries
                    .iter()
                    .filter(|entry| entry.day_key() == *day)
                    .map(|entry| entry.level.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                if *count == 0 {
                    println!("{}\t-", day_key_string(*day));
                } else {
                    println!("{}\t{count}\t{labels}", day_key_string(*day));
                }
            }
            Ok(())
        }
    }
}

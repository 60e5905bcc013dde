use anyhow::{anyhow, Result};
use clap::Subcommand;
use rand::seq::SliceRandom;

use crate::{
    store::{
        entities::{entry_id, JournalEntry, MoodLevel},
        Vault,
    },
    utils::{clock::Clock, time::day_key_string},
};

const JOURNAL_PROMPTS: &[&str] = &[
    "What's one thing that went well today?",
    "How did I handle stress today?",
    "What am I grateful for right now?",
    "What emotions am I feeling, and why?",
    "What would I tell a friend going through what I'm experiencing?",
    "What's one small win I can celebrate today?",
    "How can I be kinder to myself tomorrow?",
    "What lesson did I learn today?",
];

const TAG_KEYWORDS: &[&str] = &[
    "work",
    "stress",
    "anxiety",
    "happy",
    "sad",
    "grateful",
    "angry",
    "tired",
    "motivated",
    "friendship",
    "family",
    "health",
    "exercise",
];

const MAX_TAGS: usize = 5;

#[derive(Subcommand, Debug)]
pub enum JournalCommand {
    #[command(about = "Save a journal entry")]
    Add {
        content: String,
        #[arg(short, long, default_value = "Untitled Entry")]
        title: String,
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(1..=5),
            help = "Mood at writing time, 1-5. Defaults to 3"
        )]
        mood: Option<u8>,
        #[arg(long, help = "Attach a random reflection prompt to the entry")]
        prompt: bool,
        #[arg(long, help = "Mark the entry classified")]
        classified: bool,
    },
    #[command(about = "List entries, newest first")]
    List {
        #[arg(long, help = "Case-insensitive substring match on title and content")]
        search: Option<String>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(1..=5),
            help = "Only entries with this mood"
        )]
        mood: Option<u8>,
    },
    #[command(about = "Edit an entry's title, content or mood")]
    Edit {
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(long, help = "Replacement content. Tags are re-extracted")]
        content: Option<String>,
        #[arg(
            long,
            value_parser = clap::value_parser!(u8).range(1..=5),
            help = "Replacement mood, 1-5"
        )]
        mood: Option<u8>,
    },
    #[command(about = "Print a reflection prompt")]
    Prompt {},
    #[command(about = "Delete an entry by id")]
    Remove { id: String },
}

pub fn process_journal_command(
    command: JournalCommand,
    vault: &Vault,
    clock: &dyn Clock,
) -> Result<()> {
    match command {
        JournalCommand::Add {
            content,
            title,
            mood,
            prompt,
            classified,
        } => {
            let mood = match mood {
                Some(score) => MoodLevel::from_score(score)
                    .ok_or_else(|| anyhow!("Mood score {score} is outside 1-5"))?,
                None => MoodLevel::Operational,
            };
            let prompt = prompt.then(|| random_prompt().to_string());
            if let Some(prompt) = &prompt {
                println!("Prompt: {prompt}");
            }

            let timestamp = clock.now();
            let entry = JournalEntry {
                id: entry_id("log", timestamp),
                title,
                tags: extract_tags(&content),
                content,
                prompt,
                mood,
                classified,
                timestamp,
                last_modified: timestamp,
            };
            vault.add_journal_entry(entry.clone())?;
            println!("Saved {} [{}]", entry.id, entry.mood);
            Ok(())
        }
        JournalCommand::List { search, mood } => {
            let mood = match mood {
                Some(score) => Some(
                    MoodLevel::from_score(score)
                        .ok_or_else(|| anyhow!("Mood score {score} is outside 1-5"))?,
                ),
                None => None,
            };
            let needle = search.map(|s| s.to_lowercase());

            let mut entries = vault.journal_entries()?;
            entries.retain(|entry| {
                let matches_search = needle.as_ref().map_or(true, |needle| {
                    entry.title.to_lowercase().contains(needle)
                        || entry.content.to_lowercase().contains(needle)
                });
                let matches_mood = mood.map_or(true, |mood| entry.mood == mood);
                matches_search && matches_mood
            });
            entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

            for entry in entries {
                let tags = if entry.tags.is_empty() {
                    String::new()
                } else {
                    format!("\t#{}", entry.tags.join(" #"))
                };
                let classified = if entry.classified { "\t[CLASSIFIED]" } else { "" };
                println!(
                    "{}\t{}\t{}\t{}{tags}{classified}",
                    day_key_string(entry.day_key()),
                    entry.id,
                    entry.mood,
                    entry.title,
                );
            }
            Ok(())
        }
        JournalCommand::Edit {
            id,
            title,
            content,
            mood,
        } => {
            let Some(mut entry) = vault
                .journal_entries()?
                .into_iter()
                .find(|entry| entry.id == id)
            else {
                return Err(anyhow!("No journal entry with id {id}"));
            };
            if let Some(title) = title {
                entry.title = title;
            }
            if let Some(content) = content {
                entry.tags = extract_tags(&content);
                entry.content = content;
            }
            if let Some(score) = mood {
                entry.mood = MoodLevel::from_score(score)
                    .ok_or_else(|| anyhow!("Mood score {score} is outside 1-5"))?;
            }
            // The creation timestamp never moves, only last_modified does.
            entry.last_modified = clock.now();
            vault.replace_journal_entry(entry)?;
            println!("Updated {id}");
            Ok(())
        }
        JournalCommand::Prompt {} => {
            println!("{}", random_prompt());
            Ok(())
        }
        JournalCommand::Remove { id } => {
            vault.remove_journal_entry(&id)?;
            println!("Removed {id}");
            Ok(())
        }
    }
}

fn random_prompt() -> &'static str {
    JOURNAL_PROMPTS
        .choose(&mut rand::thread_rng())
        .expect("prompt list is non-empty")
}

/// Keyword scan over the content, capped at five tags.
fn extract_tags(content: &str) -> Vec<String> {
    let lowered = content.to_lowercase();
    TAG_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(**keyword))
        .take(MAX_TAGS)
        .map(|keyword| keyword.to_string())
        .collect()
}

use ansi_term::Colour;
use anyhow::Result;
use chrono::Datelike;
use clap::Subcommand;

use crate::{
    stats::streak::{bucket_counts, current_streak, longest_streak},
    store::{
        entities::{entry_id, GratitudeCategory, GratitudeEntry},
        Vault,
    },
    utils::{clock::Clock, time::day_key_string},
};

const GRATITUDE_PROMPTS: &[&str] = &[
    "What made you smile today, even for just a moment?",
    "Who in your life are you most grateful for right now?",
    "What challenge taught you something valuable recently?",
    "What simple pleasure brought you joy today?",
    "What strength or skill do you appreciate about yourself?",
    "What opportunity are you grateful to have?",
    "What moment of peace or calm did you experience?",
    "What progress, no matter how small, are you proud of?",
    "What act of kindness did you witness or receive?",
    "What aspect of your health are you thankful for?",
];

#[derive(Subcommand, Debug)]
pub enum GratitudeCommand {
    #[command(about = "Record a gratitude entry")]
    Add {
        content: String,
        #[arg(long, value_enum, default_value_t = GratitudeCategory::Personal)]
        category: GratitudeCategory,
    },
    #[command(about = "Show entries per day over a lookback window")]
    List {
        #[arg(
            long,
            default_value_t = 7,
            value_parser = clap::value_parser!(u32).range(1..),
            help = "Lookback window in days, including today"
        )]
        days: u32,
    },
    #[command(about = "Print today's gratitude prompt")]
    Prompt {},
    #[command(about = "Show current and longest gratitude streaks")]
    Streak {},
}

pub fn process_gratitude_command(
    command: GratitudeCommand,
    vault: &Vault,
    clock: &dyn Clock,
) -> Result<()> {
    match command {
        GratitudeCommand::Add { content, category } => {
            let timestamp = clock.now();
            let entry = GratitudeEntry {
                id: entry_id("gratitude", timestamp),
                content,
                category,
                timestamp,
            };
            vault.add_gratitude_entry(entry.clone())?;
            println!("Recorded under {}", entry.category.label());
            Ok(())
        }
        GratitudeCommand::List { days } => {
            let entries = vault.gratitude_entries()?;
            let buckets = bucket_counts(
                entries.iter().map(GratitudeEntry::day_key),
                days,
                clock.today(),
            );

            for (day, count) in &buckets {
                println!("{}\t{count}", day_key_string(*day));
                for entry in entries.iter().filter(|entry| entry.day_key() == *day) {
                    println!("\t{}\t{}", entry.category.label(), entry.content);
                }
            }
            Ok(())
        }
        GratitudeCommand::Prompt {} => {
            println!("{}", daily_prompt(clock));
            Ok(())
        }
        GratitudeCommand::Streak {} => {
            let entries = vault.gratitude_entries()?;
            let current = current_streak(
                entries.iter().map(GratitudeEntry::day_key),
                clock.today(),
            );
            let longest = longest_streak(entries.iter().map(GratitudeEntry::day_key));

            println!(
                "current streak\t{}",
                Colour::Green.paint(current.to_string())
            );
            println!(
                "longest streak\t{}",
                Colour::Blue.paint(longest.to_string())
            );
            println!("total entries\t{}", entries.len());
            Ok(())
        }
    }
}

/// One prompt per weekday, Sunday first, cycling through the list.
fn daily_prompt(clock: &dyn Clock) -> &'static str {
    let index = clock.today().weekday().num_days_from_sunday() as usize;
    GRATITUDE_PROMPTS[index % GRATITUDE_PROMPTS.len()]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::Parser;

    use crate::utils::clock::MockClock;

    use super::{super::Args, daily_prompt, GRATITUDE_PROMPTS};

    #[test]
    fn prompt_is_keyed_on_the_weekday() {
        let mut clock = MockClock::new();
        // 2024-04-05 is a Friday, so 5 days from Sunday.
        clock
            .expect_today()
            .return_const(NaiveDate::from_ymd_opt(2024, 4, 5).unwrap());
        assert_eq!(daily_prompt(&clock), GRATITUDE_PROMPTS[5]);

        let mut clock = MockClock::new();
        // 2024-04-07 is a Sunday.
        clock
            .expect_today()
            .return_const(NaiveDate::from_ymd_opt(2024, 4, 7).unwrap());
        assert_eq!(daily_prompt(&clock), GRATITUDE_PROMPTS[0]);
    }

    #[test]
    fn zero_day_window_is_rejected_at_parse_time() {
        assert!(Args::try_parse_from(["drillbook", "gratitude", "list", "--days", "0"]).is_err());
        assert!(Args::try_parse_from(["drillbook", "gratitude", "list", "--days", "30"]).is_ok());
    }
}

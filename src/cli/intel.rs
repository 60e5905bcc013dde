use std::fmt::Display;

use ansi_term::Colour;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::{
    stats::intel::{build_report, IntelReport},
    store::Vault,
    utils::{clock::Clock, time::day_key_string},
};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct IntelCommand {
    #[arg(long, default_value_t = 30, help = "Lookback window in days, including the as-of day")]
    days: u32,
    #[arg(
        long = "as-of",
        help = "Evaluate the report as of this date. Examples are \"yesterday\", \"15/03/2025\""
    )]
    as_of: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

pub fn process_intel_command(
    IntelCommand {
        days,
        as_of,
        date_style,
    }: IntelCommand,
    vault: &Vault,
    clock: &dyn Clock,
) -> Result<()> {
    if days == 0 {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                "The lookback window must cover at least 1 day",
            )
            .into());
    }

    let as_of = parse_as_of(as_of, date_style, clock)?;
    vault.ensure_seeded(clock.now())?;

    let report = build_report(
        &vault.drills()?,
        &vault.day_logs()?,
        &vault.journal_entries()?,
        days,
        as_of,
    );
    print_report(&report, as_of);
    Ok(())
}

fn parse_as_of(
    as_of: Option<String>,
    date_style: DateStyle,
    clock: &dyn Clock,
) -> Result<NaiveDate> {
    let Some(as_of) = as_of else {
        return Ok(clock.today());
    };
    let dialect: chrono_english::Dialect = date_style.into();
    match parse_date_string(&as_of, clock.now().with_timezone(&Local), dialect) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to parse as-of date {e}"),
            )
            .into()),
    }
}

fn print_report(report: &IntelReport, as_of: NaiveDate) {
    println!(
        "[ INTEL REPORT ]\t{}\tlast {} days",
        day_key_string(as_of),
        report.window_days
    );
    println!();
    println!(
        "overall\t{}%\t{}",
        report.overall_completion,
        report.tier.colour().paint(report.tier.label())
    );
    println!("drills completed\t{}", report.habits_completed);
    println!("journal entries\t{}", report.journal_entries);
    println!("average mood\t{:.1}/5", report.average_mood);
    println!("longest streak\t{} days", report.longest_streak);

    println!();
    println!("[ LAST 7 DAYS ]");
    for (day, rate) in &report.weekly_progress {
        let bar = "#".repeat((*rate as usize) / 10);
        println!(
            "{}\t{}%\t{}",
            day_key_string(*day),
            rate,
            rate_colour(*rate).paint(bar)
        );
    }

    if !report.mood_distribution.is_empty() {
        println!();
        println!("[ MOOD DISTRIBUTION ]");
        for (level, (count, share)) in &report.mood_distribution {
            println!("{level}\t{count}\t{share}%");
        }
    }

    if !report.category_progress.is_empty() {
        println!();
        println!("[ CATEGORY PROGRESS ]");
        for (category, share) in &report.category_progress {
            println!(
                "{}\t{}%\t{}",
                category.label(),
                share,
                rate_colour(*share).paint("#".repeat((*share as usize) / 10))
            );
        }
    }
}

fn rate_colour(rate: u8) -> Colour {
    if rate >= 80 {
        Colour::Green
    } else if rate >= 60 {
        Colour::Yellow
    } else if rate >= 40 {
        Colour::RGB(255, 165, 0)
    } else {
        Colour::Red
    }
}

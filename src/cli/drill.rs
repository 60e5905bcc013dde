use ansi_term::Colour;
use anyhow::{anyhow, Result};
use clap::Subcommand;

use crate::{
    stats::{
        streak::current_streak,
        summary::{share_percent, PerformanceTier},
    },
    store::{
        entities::{entry_id, Difficulty, Drill, DrillCategory},
        Vault,
    },
    utils::clock::Clock,
};

#[derive(Subcommand, Debug)]
pub enum DrillCommand {
    #[command(about = "Add a new drill")]
    Add {
        #[arg(help = "Short name for the drill, e.g. \"MORNING DRILL\"")]
        codename: String,
        #[arg(short, long, help = "What completing the drill means")]
        description: String,
        #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, value_enum, default_value_t = DrillCategory::Lifestyle)]
        category: DrillCategory,
    },
    #[command(about = "List drills with streaks and today's completion")]
    List {
        #[arg(long, help = "Include paused drills")]
        all: bool,
    },
    #[command(about = "Toggle a drill's completion for today")]
    Check {
        #[arg(help = "Drill id or codename")]
        drill: String,
    },
    #[command(about = "Pause or resume a drill")]
    Pause {
        #[arg(help = "Drill id or codename")]
        drill: String,
    },
    #[command(about = "Delete a drill and scrub it from past day logs")]
    Remove {
        #[arg(help = "Drill id or codename")]
        drill: String,
    },
}

pub fn process_drill_command(
    command: DrillCommand,
    vault: &Vault,
    clock: &dyn Clock,
) -> Result<()> {
    vault.ensure_seeded(clock.now())?;

    match command {
        DrillCommand::Add {
            codename,
            description,
            difficulty,
            category,
        } => {
            let now = clock.now();
            let drill = Drill {
                id: entry_id("drill", now),
                codename,
                description,
                difficulty,
                category,
                active: true,
                created_at: now,
            };
            vault.add_drill(drill.clone())?;
            println!(
                "Deployed {} [{}] ({}) as {}",
                drill.codename,
                drill.difficulty.label(),
                drill.category.label(),
                drill.id
            );
            Ok(())
        }
        DrillCommand::List { all } => print_drill_list(vault, clock, all),
        DrillCommand::Check { drill } => {
            let id = resolve_drill(&vault.drills()?, &drill)?;
            let completed = vault.toggle_completion(&id, clock.today())?;
            if completed {
                println!("{} Checked off for today", Colour::Green.paint("✓"));
            } else {
                println!("Unchecked for today");
            }
            Ok(())
        }
        DrillCommand::Pause { drill } => {
            let id = resolve_drill(&vault.drills()?, &drill)?;
            if vault.toggle_drill_active(&id)? {
                println!("Resumed {id}");
            } else {
                println!("Paused {id}");
            }
            Ok(())
        }
        DrillCommand::Remove { drill } => {
            let id = resolve_drill(&vault.drills()?, &drill)?;
            vault.remove_drill(&id)?;
            println!("Removed {id} and scrubbed its day logs");
            Ok(())
        }
    }
}

fn print_drill_list(vault: &Vault, clock: &dyn Clock, include_paused: bool) -> Result<()> {
    let drills = vault.drills()?;
    let logs = vault.day_logs()?;
    let today = clock.today();

    let today_log = logs.iter().find(|log| log.date == today);
    let completed_today = |id: &str| {
        today_log
            .map(|log| log.completed.iter().any(|c| c == id))
            .unwrap_or(false)
    };

    let active_count = drills.iter().filter(|d| d.active).count();
    let done_today = drills
        .iter()
        .filter(|d| d.active && completed_today(&d.id))
        .count();

    for drill in &drills {
        if !drill.active && !include_paused {
            continue;
        }
        let days = logs
            .iter()
            .filter(|log| log.completed.iter().any(|id| *id == drill.id))
            .map(|log| log.date);
        let streak = current_streak(days, today);
        let total = vault.completed_days(&drill.id)?.len();

        let marker = if completed_today(&drill.id) {
            Colour::Green.paint("[x]").to_string()
        } else {
            "[ ]".to_string()
        };
        let paused = if drill.active { "" } else { "\t(paused)" };
        println!(
            "{marker}\t{}\t{}\t{}\tstreak {streak}\ttotal {total}\t{}{paused}",
            drill.codename,
            difficulty_colour(drill.difficulty).paint(drill.difficulty.label()),
            drill.category.label(),
            drill.id,
        );
    }

    let efficiency = share_percent(done_today as u64, active_count as u64);
    let tier = PerformanceTier::from_ratio(done_today as f64 / active_count.max(1) as f64);
    println!();
    println!(
        "{done_today}/{active_count} complete today\t{}% efficiency\t{}",
        efficiency,
        tier.colour().paint(tier.label()),
    );
    Ok(())
}

fn difficulty_colour(difficulty: Difficulty) -> Colour {
    match difficulty {
        Difficulty::Easy => Colour::Green,
        Difficulty::Medium => Colour::Yellow,
        Difficulty::Hard => Colour::RGB(255, 165, 0),
        Difficulty::Elite => Colour::Red,
    }
}

/// Accepts either an exact id or a case-insensitive codename.
fn resolve_drill(drills: &[Drill], needle: &str) -> Result<String> {
    if let Some(drill) = drills.iter().find(|d| d.id == needle) {
        return Ok(drill.id.clone());
    }
    drills
        .iter()
        .find(|d| d.codename.eq_ignore_ascii_case(needle))
        .map(|d| d.id.clone())
        .ok_or_else(|| anyhow!("No drill matching '{needle}'"))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::store::entities::default_drills;

    use super::resolve_drill;

    #[test]
    fn resolves_by_id_and_codename() {
        let drills = default_drills(Utc::now());
        assert_eq!(resolve_drill(&drills, "drill-2").unwrap(), "drill-2");
        assert_eq!(resolve_drill(&drills, "morning drill").unwrap(), "drill-1");
        assert_eq!(resolve_drill(&drills, "MENTAL ARMOR").unwrap(), "drill-3");
        assert!(resolve_drill(&drills, "no such drill").is_err());
    }
}

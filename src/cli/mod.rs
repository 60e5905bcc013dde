pub mod account;
pub mod drill;
pub mod gratitude;
pub mod intel;
pub mod journal;
pub mod mood;
pub mod strength;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;

use crate::{
    store::Vault,
    utils::{clock::DefaultClock, dir::create_application_default_path, logging::enable_logging},
};

use account::LoginCommand;
use drill::DrillCommand;
use gratitude::GratitudeCommand;
use intel::IntelCommand;
use journal::JournalCommand;
use mood::MoodCommand;
use strength::StrengthCommand;

#[derive(Parser, Debug)]
#[command(
    name = "Drillbook",
    version,
    about = "Terminal tracker for daily drills, mood, journal and gratitude",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, help = "Enable logging")]
    log: bool,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Manage daily drills and their completion")]
    Drill {
        #[command(subcommand)]
        command: DrillCommand,
    },
    #[command(about = "Log mood check-ins and review recent days")]
    Mood {
        #[command(subcommand)]
        command: MoodCommand,
    },
    #[command(about = "Write and review journal entries")]
    Journal {
        #[command(subcommand)]
        command: JournalCommand,
    },
    #[command(about = "Record what you're grateful for")]
    Gratitude {
        #[command(subcommand)]
        command: GratitudeCommand,
    },
    #[command(about = "Daily quote, fact and affirmation, with favorites")]
    Strength {
        #[command(subcommand)]
        command: StrengthCommand,
    },
    #[command(about = "Display the analytics report")]
    Intel {
        #[command(flatten)]
        command: IntelCommand,
    },
    #[command(about = "Create a local session")]
    Login {
        #[command(flatten)]
        command: LoginCommand,
    },
    #[command(about = "Show the current session")]
    Whoami {},
    #[command(about = "Destroy the current session")]
    Logout {},
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let dir = match &args.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            dir.clone()
        }
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&dir, logging_level, args.log)?;

    let vault = Vault::open(dir.join("store"))?;
    let clock = DefaultClock;

    match args.commands {
        Commands::Drill { command } => drill::process_drill_command(command, &vault, &clock),
        Commands::Mood { command } => mood::process_mood_command(command, &vault, &clock),
        Commands::Journal { command } => journal::process_journal_command(command, &vault, &clock),
        Commands::Gratitude { command } => {
            gratitude::process_gratitude_command(command, &vault, &clock)
        }
        Commands::Strength { command } => {
            strength::process_strength_command(command, &vault, &clock)
        }
        Commands::Intel { command } => intel::process_intel_command(command, &vault, &clock),
        Commands::Login { command } => account::process_login_command(command, &vault, &clock),
        Commands::Whoami {} => account::process_whoami_command(&vault),
        Commands::Logout {} => account::process_logout_command(&vault),
    }
}

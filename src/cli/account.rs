use anyhow::Result;
use clap::CommandFactory;

use crate::{
    session::{self, Session},
    store::Vault,
    utils::{
        clock::Clock,
        time::{day_key, day_key_string},
    },
};

use super::Args;

#[derive(Debug, clap::Args)]
pub struct LoginCommand {
    #[arg(long, help = "Callsign to display")]
    callsign: Option<String>,
    #[arg(
        long,
        conflicts_with = "callsign",
        help = "Generate a throwaway callsign instead"
    )]
    anonymous: bool,
}

pub fn process_login_command(
    command: LoginCommand,
    vault: &Vault,
    clock: &dyn Clock,
) -> Result<()> {
    let now = clock.now();
    let session = if command.anonymous {
        Session::anonymous(&mut rand::thread_rng(), now)
    } else {
        let Some(callsign) = command.callsign else {
            return Err(Args::command()
                .error(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "Provide --callsign or --anonymous",
                )
                .into());
        };
        Session::named(callsign, now)
    };

    let session = session::login(vault, session)?;
    println!("Deployed as {}", session.display_label);
    Ok(())
}

pub fn process_whoami_command(vault: &Vault) -> Result<()> {
    match vault.session()? {
        Some(session) => {
            let marker = if session.anonymous { "\t(anonymous)" } else { "" };
            println!(
                "{}{marker}\tdeployed {}",
                session.display_label,
                day_key_string(day_key(session.deployed_at)),
            );
        }
        None => println!("No active session"),
    }
    Ok(())
}

pub fn process_logout_command(vault: &Vault) -> Result<()> {
    session::logout(vault)?;
    println!("Session destroyed");
    Ok(())
}

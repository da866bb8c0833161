//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to the [`Action`] the binary executes. Form
//! fields are passed through untouched; validating them is the form's job.

use crate::cli::{
    actions::{login, register, Action},
    commands::{self, auth},
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, time::Duration};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if a global argument is missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = global_args(matches)?;

    match matches.subcommand() {
        Some((auth::CMD_LOGIN, sub)) => Ok(Action::Login(login::Args {
            globals,
            username: text(sub, auth::ARG_USERNAME),
            password: secret(sub, auth::ARG_PASSWORD),
        })),
        Some((auth::CMD_REGISTER, sub)) => Ok(Action::Register(register::Args {
            globals,
            first_name: text(sub, auth::ARG_FIRST_NAME),
            last_name: text(sub, auth::ARG_LAST_NAME),
            username: text(sub, auth::ARG_USERNAME),
            password: secret(sub, auth::ARG_PASSWORD),
            confirm_password: secret(sub, auth::ARG_CONFIRM_PASSWORD),
            role: sub.get_one::<String>(auth::ARG_ROLE).cloned(),
        })),
        Some((commands::CMD_SESSION, _)) => Ok(Action::Session(globals)),
        Some((commands::CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        Some((commands::CMD_ROLES, _)) => Ok(Action::Roles),
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

fn global_args(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(commands::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;
    let storage_path = matches
        .get_one::<PathBuf>(commands::ARG_STORAGE)
        .cloned()
        .context("missing required argument: --storage")?;
    let timeout = matches
        .get_one::<u64>(commands::ARG_TIMEOUT)
        .copied()
        .map_or(crate::auth::DEFAULT_TIMEOUT, Duration::from_secs);

    Ok(GlobalArgs::new(api_url)
        .with_storage_path(storage_path)
        .with_timeout(timeout))
}

fn text(matches: &clap::ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn secret(matches: &clap::ArgMatches, id: &str) -> SecretString {
    SecretString::from(text(matches, id))
}

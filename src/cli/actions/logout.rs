use super::file_session;
use crate::{cli::globals::GlobalArgs, session::SessionPort};
use anyhow::Result;
use tracing::info;

/// Remove the stored session.
/// # Errors
/// Returns an error if the storage file cannot be updated.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    file_session(globals).clear()?;
    info!(storage = %globals.storage_path.display(), "session cleared");
    println!("Signed out.");
    Ok(())
}

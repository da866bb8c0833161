use super::{file_session, ConsoleNavigator};
use crate::{cli::globals::GlobalArgs, redirect::follow_session};
use anyhow::Result;

/// Restore the stored session and print where it lands.
/// # Errors
/// Returns an error if the storage file cannot be read.
pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let session = file_session(globals);
    if !session.restore()? {
        println!("No active session.");
        return Ok(());
    }

    if let Some(state) = session.store().current() {
        let user = &state.user;
        println!(
            "Signed in as {} {} <{}> ({})",
            user.first_name, user.last_name, user.username, state.role
        );
    }

    let mut navigator = ConsoleNavigator;
    follow_session(&session, &mut navigator);
    Ok(())
}

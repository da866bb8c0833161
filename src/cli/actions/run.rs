use crate::cli::actions::{login, logout, register, roles, session, Action};
use anyhow::Result;

/// Execute the provided action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Login(args) => login::execute(args).await,
        Action::Register(args) => register::execute(args).await,
        Action::Session(globals) => session::execute(&globals),
        Action::Logout(globals) => logout::execute(&globals),
        Action::Roles => {
            roles::execute();
            Ok(())
        }
    }
}

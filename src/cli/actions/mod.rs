pub mod login;
pub mod logout;
pub mod register;
pub mod roles;
pub mod session;

// Single dispatch point lives in `run` so this module only holds shared helpers.
mod run;

use crate::{
    auth::HttpAuthService,
    cli::globals::GlobalArgs,
    form::FormController,
    redirect::Navigator,
    session::{FileStorage, SessionStore, StorageSession},
};
use anyhow::{bail, Context, Result};

type Controller = FormController<HttpAuthService, StorageSession<FileStorage>>;

#[derive(Debug)]
pub enum Action {
    Login(login::Args),
    Register(register::Args),
    Session(GlobalArgs),
    Logout(GlobalArgs),
    Roles,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Session backed by the storage file named in the globals.
fn file_session(globals: &GlobalArgs) -> StorageSession<FileStorage> {
    StorageSession::new(
        FileStorage::new(globals.storage_path.clone()),
        SessionStore::new(),
    )
}

fn form_controller(globals: &GlobalArgs) -> Result<Controller> {
    let auth = HttpAuthService::new(&globals.api_url, globals.timeout)
        .with_context(|| format!("invalid API URL: {}", globals.api_url))?;
    Ok(FormController::new(auth, file_session(globals)))
}

/// Prints every field error of the current mode and fails if there is one.
fn ensure_valid(controller: &Controller) -> Result<()> {
    let errors = controller.errors();
    if errors.is_empty() {
        return Ok(());
    }

    for field in controller.state().mode().fields() {
        if let Some(message) = errors.get(*field) {
            eprintln!("  {}: {message}", field.as_str());
        }
    }
    bail!(
        "{} form has {} field(s) that need attention",
        controller.state().mode(),
        errors.len()
    )
}

/// Terminal stand-in for browser navigation.
#[derive(Debug, Default)]
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn replace(&mut self, path: &str) {
        println!("Redirecting to {path}");
    }
}

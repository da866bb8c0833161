use super::{ensure_valid, form_controller, ConsoleNavigator};
use crate::{
    cli::globals::GlobalArgs,
    form::{Field, Mode},
    redirect::follow_session,
};
use anyhow::{anyhow, bail, Result};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub username: String,
    pub password: SecretString,
}

/// Sign in, persist the session and print the landing page.
/// # Errors
/// Returns an error if the form is invalid, the sign-in fails or no session was stored.
pub async fn execute(args: Args) -> Result<()> {
    debug!(api_url = %args.globals.api_url, storage = %args.globals.storage_path.display(), "login");

    let mut controller = form_controller(&args.globals)?;
    controller.switch_mode(Mode::Login);
    controller.set_field(Field::Username, args.username);
    controller.set_field(Field::Password, args.password.expose_secret());
    controller.touch_all();
    ensure_valid(&controller)?;

    controller.submit_login().await;
    if let Some(message) = controller.state().status().error() {
        bail!("{message}");
    }

    let mut navigator = ConsoleNavigator;
    follow_session(controller.session(), &mut navigator)
        .map(|_| ())
        .ok_or_else(|| anyhow!("sign-in finished without a session"))
}

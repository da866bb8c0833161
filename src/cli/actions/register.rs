use super::{ensure_valid, form_controller};
use crate::{
    cli::globals::GlobalArgs,
    form::{Field, Mode},
};
use anyhow::{bail, Result};
use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    /// Role name in any case; validated by the form.
    pub role: Option<String>,
}

/// Create an account and print the confirmation.
/// # Errors
/// Returns an error if the form is invalid or the service rejects the registration.
pub async fn execute(args: Args) -> Result<()> {
    let mut controller = form_controller(&args.globals)?;
    controller.switch_mode(Mode::Register);
    controller.set_field(Field::FirstName, args.first_name);
    controller.set_field(Field::LastName, args.last_name);
    controller.set_field(Field::Username, args.username);
    controller.set_field(Field::Password, args.password.expose_secret());
    controller.set_field(
        Field::ConfirmPassword,
        args.confirm_password.expose_secret(),
    );
    if let Some(role) = args.role {
        controller.set_field(Field::SelectedRole, role);
    }
    controller.touch_all();
    ensure_valid(&controller)?;

    let content = controller.state().content();
    println!("{}", content.title);

    controller.submit_register().await;

    let status = controller.state().status();
    if let Some(message) = status.error() {
        bail!("{message}");
    }
    if let Some(message) = status.success() {
        println!("{message}");
    }
    Ok(())
}

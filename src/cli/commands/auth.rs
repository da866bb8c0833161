use crate::role::Role;
use clap::{builder::PossibleValuesParser, Arg, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_REGISTER: &str = "register";

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_FIRST_NAME: &str = "first-name";
pub const ARG_LAST_NAME: &str = "last-name";
pub const ARG_ROLE: &str = "role";

// Fields are optional at the clap level so the form validator reports
// missing values with the same messages as the web form.

fn username() -> Arg {
    Arg::new(ARG_USERNAME)
        .short('u')
        .long("username")
        .help("Username or e-mail address")
        .env("IEODP_USERNAME")
}

fn password() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long("password")
        .help("Account password")
        .env("IEODP_PASSWORD")
        .hide_env_values(true)
}

#[must_use]
pub fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Sign in and store the session")
        .arg(username())
        .arg(password())
}

#[must_use]
pub fn register() -> Command {
    Command::new(CMD_REGISTER)
        .about("Create an account")
        .arg(
            Arg::new(ARG_FIRST_NAME)
                .long("first-name")
                .help("First name (letters only)"),
        )
        .arg(
            Arg::new(ARG_LAST_NAME)
                .long("last-name")
                .help("Last name (letters only)"),
        )
        .arg(username().help("E-mail address used as username"))
        .arg(password())
        .arg(
            Arg::new(ARG_CONFIRM_PASSWORD)
                .long("confirm-password")
                .help("Repeat the password")
                .env("IEODP_CONFIRM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_ROLE)
                .short('r')
                .long("role")
                .help("Platform role")
                .ignore_case(true)
                .value_parser(PossibleValuesParser::new(Role::ALL.map(Role::as_str))),
        )
}

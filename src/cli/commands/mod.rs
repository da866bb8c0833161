pub mod auth;
pub mod logging;

use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_STORAGE: &str = "storage";
pub const ARG_TIMEOUT: &str = "timeout";

pub const CMD_SESSION: &str = "session";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_ROLES: &str = "roles";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_STORAGE_PATH: &str = ".ieodp-session.json";

/// Accepts only absolute `http`/`https` URLs.
#[must_use]
pub fn validator_api_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<String, String> {
        let url = Url::parse(value.trim()).map_err(|err| format!("invalid URL: {err}"))?;
        match url.scheme() {
            "http" | "https" => Ok(value.trim().to_string()),
            scheme => Err(format!("unsupported scheme: {scheme}")),
        }
    })
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("ieodp-auth")
        .about("Sign in to the IEODP enterprise platform")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the authentication API")
                .default_value(DEFAULT_API_URL)
                .env("IEODP_API_URL")
                .global(true)
                .value_parser(validator_api_url()),
        )
        .arg(
            Arg::new(ARG_STORAGE)
                .long("storage")
                .help("File holding the stored session")
                .default_value(DEFAULT_STORAGE_PATH)
                .env("IEODP_STORAGE_PATH")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("IEODP_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..=300)),
        )
        .subcommand(auth::login())
        .subcommand(auth::register())
        .subcommand(Command::new(CMD_SESSION).about("Show the stored session and its landing page"))
        .subcommand(Command::new(CMD_LOGOUT).about("Remove the stored session"))
        .subcommand(Command::new(CMD_ROLES).about("List platform roles"));

    logging::with_args(command)
}

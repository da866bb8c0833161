//! # ieodp-auth (Credential Form Controller)
//!
//! `ieodp-auth` holds the sign-in and registration form logic of the IEODP
//! enterprise platform: field state, client-side validation, the submit flow
//! against the authentication API and the role-based redirect that follows a
//! successful sign-in.
//!
//! ## Flow Overview
//!
//! 1. **Edit:** Field values and touched flags live in [`form::FormState`]. Errors are
//!    recomputed from the state by [`form::validate`] every time they are needed.
//! 2. **Submit:** [`form::FormController`] guards the submit, calls the
//!    [`auth::AuthService`] and turns every failure into a status message.
//! 3. **Persist:** A successful sign-in is written through the [`session::SessionPort`]
//!    (client storage plus the in-memory session store) as one logical step.
//! 4. **Redirect:** [`redirect::follow_session`] reads the persisted role and hands the
//!    dashboard path to a [`redirect::Navigator`].
//!
//! Passwords and tokens pass through this crate but are never logged.

pub mod auth;
pub mod cli;
pub mod form;
pub mod redirect;
pub mod role;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

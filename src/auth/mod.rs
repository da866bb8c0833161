//! Authentication API access. The controller only sees the [`AuthService`]
//! trait; [`HttpAuthService`] is the REST implementation used by the CLI.
//!
//! Payloads in this module carry passwords and tokens, so they must never be
//! logged. Secret fields are wrapped in `SecretString` and redact themselves
//! in `Debug` output.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{AuthService, HttpAuthService, DEFAULT_TIMEOUT};
pub use errors::ServiceError;
pub use types::{LoginPayload, LoginRequest, RegisterRequest};

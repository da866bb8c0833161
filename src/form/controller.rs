//! Submit flow for the credential form.
//!
//! Every submit is guarded twice: the form must validate, and no other submit
//! may be in flight. The in-flight flag and the loading status are released by
//! a drop guard, so both are cleared on every exit path including a dropped
//! future. Service failures never escape a submit; they become the form's
//! error status.

use super::{validate, Field, FormState, Mode, Status, ValidationErrors};
use crate::{
    auth::{AuthService, LoginRequest, RegisterRequest, ServiceError},
    role::Role,
    session::{SessionPort, SessionRecord},
};
use secrecy::SecretString;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, instrument, warn};

/// Shown for every failed sign-in, whatever the cause.
pub const LOGIN_FAILED: &str = "Invalid username or password";
pub const REGISTRATION_SUCCEEDED: &str = "Registration successful. Please sign in.";
pub const USERNAME_EXISTS: &str = "Username already exists";
pub const REGISTRATION_FAILED: &str = "Registration failed.";

/// Whether a submit reached the authentication service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blocked by validation errors or a submit already in flight.
    Skipped,
    /// The service was called; the result is in the form status.
    Completed,
}

/// Holds the in-flight flag and the loading status for one submit.
///
/// The submit's final status is written through [`InFlight::finish`]; a guard
/// dropped while still loading puts the form back to idle.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    status: &'a mut Status,
}

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool, status: &'a mut Status) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        *status = Status::Loading;
        Some(Self { flag, status })
    }

    fn finish(&mut self, status: Status) {
        *self.status = status;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if matches!(*self.status, Status::Loading) {
            *self.status = Status::Idle;
        }
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Debug)]
pub struct FormController<A, S> {
    state: FormState,
    auth: A,
    session: S,
    in_flight: AtomicBool,
}

impl<A, S> FormController<A, S>
where
    A: AuthService,
    S: SessionPort,
{
    pub fn new(auth: A, session: S) -> Self {
        Self {
            state: FormState::new(),
            auth,
            session,
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        validate(self.state.mode, &self.state.fields)
    }

    #[must_use]
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        self.state.visible_error(field)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submit is enabled only for a valid form with nothing in flight.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.errors().is_empty()
    }

    /// Updates a field value. The role field accepts a role name in any case;
    /// anything else clears the selection.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let fields = &mut self.state.fields;
        match field {
            Field::FirstName => fields.first_name = value,
            Field::LastName => fields.last_name = value,
            Field::Username => fields.username = value,
            Field::Password => fields.password = value,
            Field::ConfirmPassword => fields.confirm_password = value,
            Field::SelectedRole => fields.selected_role = value.parse().ok(),
        }
        self.clear_status();
    }

    pub fn select_role(&mut self, role: Option<Role>) {
        self.state.fields.selected_role = role;
        self.clear_status();
    }

    /// Marks a field as visited so its error becomes visible.
    pub fn touch(&mut self, field: Field) {
        self.state.touched.insert(field);
    }

    /// Marks every field of the current mode as visited.
    pub fn touch_all(&mut self) {
        let fields = self.state.mode.fields();
        self.state.touched.extend(fields.iter().copied());
    }

    /// Switches between sign-in and registration, keeping typed values.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.state.touched.clear();
        self.state.status = Status::Idle;
    }

    /// Submits in the current mode.
    #[instrument(skip(self), fields(mode = %self.state.mode))]
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.state.mode {
            Mode::Login => self.submit_login().await,
            Mode::Register => self.submit_register().await,
        }
    }

    #[instrument(skip(self))]
    pub async fn submit_login(&mut self) -> SubmitOutcome {
        if !self.errors().is_empty() {
            debug!("login blocked by validation errors");
            return SubmitOutcome::Skipped;
        }
        let Some(mut in_flight) = InFlight::acquire(&self.in_flight, &mut self.state.status)
        else {
            debug!("login already in flight");
            return SubmitOutcome::Skipped;
        };

        let request = LoginRequest {
            username: self.state.fields.username.clone(),
            password: SecretString::from(self.state.fields.password.clone()),
        };

        let outcome = match self.auth.login(&request).await {
            Ok(payload) => {
                let record = SessionRecord::from_login(payload);
                self.session
                    .persist(&record)
                    .map(|()| record.role)
                    .map_err(|err| err.to_string())
            }
            Err(err) => Err(err.to_string()),
        };

        in_flight.finish(match outcome {
            Ok(role) => {
                info!(%role, "login succeeded");
                Status::Idle
            }
            Err(err) => {
                warn!("login failed: {err}");
                Status::Error(LOGIN_FAILED.to_string())
            }
        });

        SubmitOutcome::Completed
    }

    #[instrument(skip(self))]
    pub async fn submit_register(&mut self) -> SubmitOutcome {
        if !self.errors().is_empty() {
            debug!("registration blocked by validation errors");
            return SubmitOutcome::Skipped;
        }
        // validation guarantees a role, but the type does not
        let Some(role) = self.state.fields.selected_role else {
            return SubmitOutcome::Skipped;
        };
        let Some(mut in_flight) = InFlight::acquire(&self.in_flight, &mut self.state.status)
        else {
            debug!("registration already in flight");
            return SubmitOutcome::Skipped;
        };

        let fields = &self.state.fields;
        let request = RegisterRequest {
            first_name: fields.first_name.clone(),
            last_name: fields.last_name.clone(),
            username: fields.username.clone(),
            email: fields.username.clone(),
            password: SecretString::from(fields.password.clone()),
            role,
        };

        match self.auth.register(&request).await {
            Ok(()) => {
                info!(%role, "registration succeeded");
                self.state.mode = Mode::Login;
                self.state.touched.clear();
                self.state.fields.password.clear();
                self.state.fields.confirm_password.clear();
                in_flight.finish(Status::Success(REGISTRATION_SUCCEEDED.to_string()));
            }
            Err(err) => {
                warn!("registration failed: {err}");
                in_flight.finish(Status::Error(registration_error_message(&err)));
            }
        }

        SubmitOutcome::Completed
    }

    /// Leaves a finished submit's message behind once the user edits again.
    fn clear_status(&mut self) {
        let stale_loading = matches!(self.state.status, Status::Loading) && !self.is_loading();
        if stale_loading || matches!(self.state.status, Status::Error(_) | Status::Success(_)) {
            self.state.status = Status::Idle;
        }
    }
}

/// User-facing message for a failed registration.
#[must_use]
pub fn registration_error_message(err: &ServiceError) -> String {
    let message = err.service_message();
    let duplicate = err.status() == Some(409)
        || message.is_some_and(|m| m.to_lowercase().contains("exist"));

    if duplicate {
        USERNAME_EXISTS.to_string()
    } else {
        message.unwrap_or(REGISTRATION_FAILED).to_string()
    }
}

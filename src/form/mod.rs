//! Sign-in / registration form state.
//!
//! The form keeps raw field values exactly as typed. Errors are never stored:
//! [`validate`] derives them from the current values whenever they are needed,
//! so they can never go stale.

pub mod controller;
pub mod validator;

pub use controller::{FormController, SubmitOutcome};
pub use validator::{validate, ValidationErrors};

use crate::role::{Role, RoleContent, PLATFORM_CONTENT};
use std::{collections::BTreeSet, fmt};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Login,
    Register,
}

impl Mode {
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::Login => &[Field::Username, Field::Password],
            Self::Register => &Field::ALL,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "login",
            Self::Register => "register",
        })
    }
}

/// Form inputs, in the order they are rendered on the registration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Username,
    Password,
    ConfirmPassword,
    SelectedRole,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::FirstName,
        Self::LastName,
        Self::Username,
        Self::Password,
        Self::ConfirmPassword,
        Self::SelectedRole,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Username => "username",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::SelectedRole => "selectedRole",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw field values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub confirm_password: String,
    pub selected_role: Option<Role>,
}

/// Submit status shown above the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(String),
}

impl Status {
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn success(&self) -> Option<&str> {
        match self {
            Self::Success(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub(crate) mode: Mode,
    pub(crate) fields: Fields,
    pub(crate) touched: BTreeSet<Field>,
    pub(crate) status: Status,
}

impl FormState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    #[must_use]
    pub const fn status(&self) -> &Status {
        &self.status
    }

    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        validate(self.mode, &self.fields)
    }

    /// Error for `field`, shown only once the user has left the field.
    #[must_use]
    pub fn visible_error(&self, field: Field) -> Option<&'static str> {
        if self.is_touched(field) {
            self.errors().get(field)
        } else {
            None
        }
    }

    /// Copy for the side panel: the selected role's while registering.
    #[must_use]
    pub fn content(&self) -> RoleContent {
        match (self.mode, self.fields.selected_role) {
            (Mode::Register, Some(role)) => role.content(),
            _ => PLATFORM_CONTENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_form_starts_empty_in_login_mode() {
        let form = FormState::new();
        assert_eq!(form.mode(), Mode::Login);
        assert_eq!(form.status(), &Status::Idle);
        assert_eq!(form.fields(), &Fields::default());
        assert!(Field::ALL.iter().all(|f| !form.is_touched(*f)));
    }

    #[test]
    fn mode_displays_lowercase() {
        assert_eq!(Mode::Login.to_string(), "login");
        assert_eq!(Mode::Register.to_string(), "register");
    }

    #[test]
    fn errors_hidden_until_touched() {
        let mut form = FormState::new();
        assert_eq!(form.visible_error(Field::Username), None);
        form.touched.insert(Field::Username);
        assert_eq!(
            form.visible_error(Field::Username),
            Some(validator::USERNAME_REQUIRED)
        );
    }

    #[test]
    fn content_follows_selected_role_only_when_registering() {
        let mut form = FormState::new();
        form.fields.selected_role = Some(Role::Reviewer);
        assert_eq!(form.content(), PLATFORM_CONTENT);

        form.mode = Mode::Register;
        assert_eq!(form.content().title, "Workflow Review & Quality Assurance");
    }

    #[test]
    fn login_mode_only_lists_shared_fields() {
        assert_eq!(Mode::Login.fields(), &[Field::Username, Field::Password]);
        assert_eq!(Mode::Register.fields().len(), 6);
    }
}

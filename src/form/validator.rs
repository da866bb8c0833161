//! Field validation. [`validate`] is pure: the same mode and values always
//! produce the same errors, and only the first failing rule of each field is
//! reported.

use super::{Field, Fields, Mode};
use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const USERNAME_SPACES: &str = "Username cannot contain spaces";
pub const USERNAME_TOO_SHORT_LOGIN: &str = "Username must be at least 3 characters";
pub const USERNAME_TOO_SHORT_REGISTER: &str = "Username must be at least 5 characters";
pub const USERNAME_TOO_LONG: &str = "Username too long";
pub const INVALID_EMAIL: &str = "Enter a valid email address";

pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORD_TOO_LONG: &str = "Password too long";
pub const PASSWORD_EDGE_SPACES: &str = "Password cannot have leading or trailing spaces";
pub const PASSWORD_SPACES: &str = "Password cannot contain spaces";
pub const PASSWORD_COMPLEXITY: &str = "Password must meet complexity requirements";

pub const CONFIRM_REQUIRED: &str = "Confirm Password is required";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match";

pub const ROLE_REQUIRED: &str = "Please select a role";

pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
pub const FIRST_NAME_ALPHA: &str = "First Name must contain only alphabets";
pub const FIRST_NAME_TOO_SHORT: &str = "First Name must be at least 2 characters";
pub const FIRST_NAME_TOO_LONG: &str = "First Name too long";

pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
pub const LAST_NAME_ALPHA: &str = "Last Name must contain only alphabets";
pub const LAST_NAME_TOO_SHORT: &str = "Last Name must be at least 2 characters";
pub const LAST_NAME_TOO_LONG: &str = "Last Name too long";

/// Characters that satisfy the "special character" complexity rule.
pub const PASSWORD_SPECIALS: &str = "@#$%&*";

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Field errors for one validation pass, ordered like the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, &'static str>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn check(&mut self, field: Field, result: Result<(), &'static str>) {
        if let Err(message) = result {
            self.0.insert(field, message);
        }
    }
}

/// Validates the fields that `mode` renders.
#[must_use]
pub fn validate(mode: Mode, fields: &Fields) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    match mode {
        Mode::Login => {
            errors.check(Field::Username, login_username(&fields.username));
            errors.check(Field::Password, login_password(&fields.password));
        }
        Mode::Register => {
            errors.check(
                Field::FirstName,
                name(
                    &fields.first_name,
                    [
                        FIRST_NAME_REQUIRED,
                        FIRST_NAME_ALPHA,
                        FIRST_NAME_TOO_SHORT,
                        FIRST_NAME_TOO_LONG,
                    ],
                ),
            );
            errors.check(
                Field::LastName,
                name(
                    &fields.last_name,
                    [
                        LAST_NAME_REQUIRED,
                        LAST_NAME_ALPHA,
                        LAST_NAME_TOO_SHORT,
                        LAST_NAME_TOO_LONG,
                    ],
                ),
            );
            errors.check(Field::Username, register_username(&fields.username));
            errors.check(Field::Password, register_password(&fields.password));
            errors.check(
                Field::ConfirmPassword,
                confirm_password(&fields.password, &fields.confirm_password),
            );
            if fields.selected_role.is_none() {
                errors.check(Field::SelectedRole, Err(ROLE_REQUIRED));
            }
        }
    }

    errors
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value))
}

fn has_whitespace(value: &str) -> bool {
    value.chars().any(char::is_whitespace)
}

fn length(value: &str) -> usize {
    value.chars().count()
}

fn login_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        Err(USERNAME_REQUIRED)
    } else if has_whitespace(username) {
        Err(USERNAME_SPACES)
    } else if length(username) < 3 {
        Err(USERNAME_TOO_SHORT_LOGIN)
    } else if length(username) > 100 {
        Err(USERNAME_TOO_LONG)
    } else if username.contains('@') && !is_email(username) {
        Err(INVALID_EMAIL)
    } else {
        Ok(())
    }
}

fn register_username(username: &str) -> Result<(), &'static str> {
    if username.is_empty() {
        Err(USERNAME_REQUIRED)
    } else if has_whitespace(username) {
        Err(USERNAME_SPACES)
    } else if !is_email(username) {
        Err(INVALID_EMAIL)
    } else if length(username) < 5 {
        Err(USERNAME_TOO_SHORT_REGISTER)
    } else if length(username) > 100 {
        Err(USERNAME_TOO_LONG)
    } else {
        Ok(())
    }
}

/// Required, 8..=64 characters; shared prefix of both password rule sets.
fn password_length(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        Err(PASSWORD_REQUIRED)
    } else if length(password) < 8 {
        Err(PASSWORD_TOO_SHORT)
    } else if length(password) > 64 {
        Err(PASSWORD_TOO_LONG)
    } else {
        Ok(())
    }
}

fn login_password(password: &str) -> Result<(), &'static str> {
    password_length(password)?;
    let starts = password.chars().next().is_some_and(char::is_whitespace);
    let ends = password.chars().next_back().is_some_and(char::is_whitespace);
    if starts || ends {
        Err(PASSWORD_EDGE_SPACES)
    } else {
        Ok(())
    }
}

fn register_password(password: &str) -> Result<(), &'static str> {
    password_length(password)?;
    if has_whitespace(password) {
        return Err(PASSWORD_SPACES);
    }

    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| PASSWORD_SPECIALS.contains(c));

    if upper && lower && digit && special {
        Ok(())
    } else {
        Err(PASSWORD_COMPLEXITY)
    }
}

fn confirm_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if confirm.is_empty() {
        Err(CONFIRM_REQUIRED)
    } else if confirm != password {
        Err(PASSWORDS_MISMATCH)
    } else {
        Ok(())
    }
}

/// `messages`: required, alphabetic, too short, too long.
fn name(value: &str, messages: [&'static str; 4]) -> Result<(), &'static str> {
    let [required, alpha, too_short, too_long] = messages;
    if value.is_empty() {
        Err(required)
    } else if !value.chars().all(|c| c.is_ascii_alphabetic()) {
        Err(alpha)
    } else if length(value) < 2 {
        Err(too_short)
    } else if length(value) > 50 {
        Err(too_long)
    } else {
        Ok(())
    }
}

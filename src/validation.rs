//! Form checks that run before anything is sent to the backend.

use validator::{Validate, ValidationErrors};

use crate::entities::SignupFields;
use crate::error::{validation_error, Error};

pub const MIN_PASSWORD_LEN: usize = 6;

const SIGNUP_ORDER: [&str; 4] = ["name", "email", "phone", "password"];

#[derive(Validate)]
struct EmailField {
    #[validate(email(message = "Please enter a valid email address"))]
    email: String,
}

#[derive(Validate)]
struct PasswordField {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    password: String,
}

/// First failing rule, taking fields in the order the form shows them.
fn first_failure(errors: ValidationErrors, order: &[&str]) -> Error {
    let fields = errors.field_errors();

    let message = order
        .iter()
        .filter_map(|field| fields.get(*field))
        .flat_map(|failures| failures.iter())
        .find_map(|failure| failure.message.as_ref())
        .map(|message| message.to_string());

    validation_error(message.unwrap_or_else(|| errors.to_string()))
}

pub fn email(email: &str) -> Result<(), Error> {
    let field = EmailField {
        email: email.trim().to_string(),
    };

    field
        .validate()
        .map_err(|errors| first_failure(errors, &["email"]))
}

pub fn password(password: &str) -> Result<(), Error> {
    let field = PasswordField {
        password: password.to_string(),
    };

    field
        .validate()
        .map_err(|errors| first_failure(errors, &["password"]))
}

pub fn password_confirmation(password: &str, confirmation: &str) -> Result<(), Error> {
    if password != confirmation {
        return Err(validation_error("Passwords do not match"));
    }

    Ok(())
}

pub fn required(label: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(validation_error(format!("{} is required", label)));
    }

    Ok(())
}

pub fn signup(fields: &SignupFields) -> Result<(), Error> {
    fields
        .validate()
        .map_err(|errors| first_failure(errors, &SIGNUP_ORDER))
}

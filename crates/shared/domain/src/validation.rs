//! Sign-up and sign-in validation rules.
//!
//! Each request type carries its rule table as `validator` attributes: one
//! entry per field, each with a predicate and the message shown next to that
//! field. Validation is eager and collects every violation of a submission.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::constants::{
    MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH, MSG_INVALID_EMAIL, MSG_PASSWORD_DIGIT,
    MSG_PASSWORD_LOWERCASE, MSG_PASSWORD_UPPERCASE,
};

/// Form fields that validation errors can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    /// Wire name of the field (matches the JSON request body).
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    /// Resolve a field from either its Rust or its wire name.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "first_name" | "firstName" => Some(Field::FirstName),
            "last_name" | "lastName" => Some(Field::LastName),
            "email" => Some(Field::Email),
            "password" => Some(Field::Password),
            "confirm_password" | "confirmPassword" => Some(Field::ConfirmPassword),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-scoped validation errors, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute a message to a field.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages attributed to `field` (empty if the field is valid).
    pub fn get(&self, field: Field) -> &[String] {
        self.0.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Fields with at least one error, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self
            .0
            .values()
            .flat_map(|messages| messages.iter().map(String::as_str))
            .collect();
        f.write_str(&messages.join(", "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors = FieldErrors::new();
        for (key, errs) in errors.field_errors() {
            let key = key.to_string();
            let Some(field) = Field::from_key(&key) else {
                continue;
            };
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                field_errors.add(field, message);
            }
        }
        field_errors
    }
}

/// Account creation request as submitted by the sign-up form.
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(length(min = MIN_NAME_LENGTH, message = "first name is required"))]
    pub first_name: String,

    #[validate(length(min = MIN_NAME_LENGTH, message = "last name is required"))]
    pub last_name: String,

    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    #[validate(
        length(min = MIN_PASSWORD_LENGTH, message = "password must be at least 8 characters"),
        custom(function = "validate_password_complexity")
    )]
    pub password: String,

    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub confirm_password: String,
}

// Passwords never reach logs.
impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

/// A sign-up request that passed every rule, with normalized fields.
#[derive(Clone)]
pub struct ValidSignUp {
    pub first_name: String,
    pub last_name: String,
    /// Trimmed and lower-cased
    pub email: String,
    pub password: String,
}

impl fmt::Debug for ValidSignUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidSignUp")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl SignUpRequest {
    /// Run every sign-up rule, returning the normalized request or all
    /// field errors of this submission.
    pub fn validated(self) -> Result<ValidSignUp, FieldErrors> {
        let trimmed = SignUpRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            confirm_password: self.confirm_password,
        };

        trimmed.validate().map_err(FieldErrors::from)?;

        Ok(ValidSignUp {
            first_name: trimmed.first_name,
            last_name: trimmed.last_name,
            email: normalize_email(&trimmed.email),
            password: trimmed.password,
        })
    }
}

/// Email/password pair submitted by the sign-in form.
///
/// Only the shape is checked here: a syntactically valid email and a
/// non-empty password. Complexity rules apply to sign-up only.
#[derive(Clone, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Credentials {
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the sign-in shape and normalize the email.
    pub fn validated(self) -> Result<Credentials, FieldErrors> {
        let trimmed = Credentials {
            email: self.email.trim().to_string(),
            password: self.password,
        };

        trimmed.validate().map_err(FieldErrors::from)?;

        Ok(Credentials {
            email: normalize_email(&trimmed.email),
            password: trimmed.password,
        })
    }
}

/// Canonical form used for lookups and storage.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Email shape check: a well-formed address whose domain is a dotted host
/// name. Single-label hosts and address literals are rejected.
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let dotted_domain = email.rsplit_once('@').is_some_and(|(_, domain)| {
        !domain.starts_with('[')
            && domain.contains('.')
            && domain.split('.').all(|label| !label.is_empty())
    });

    if dotted_domain && email.validate_email() {
        Ok(())
    } else {
        Err(rule_violation("email", MSG_INVALID_EMAIL))
    }
}

/// Complexity half of the password policy: one uppercase letter, one
/// lowercase letter and one digit, all ASCII. Reports the first rule that
/// fails.
pub fn validate_password_complexity(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(rule_violation("password_uppercase", MSG_PASSWORD_UPPERCASE));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(rule_violation("password_lowercase", MSG_PASSWORD_LOWERCASE));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(rule_violation("password_digit", MSG_PASSWORD_DIGIT));
    }
    Ok(())
}

fn rule_violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

//! User account types for the write paths and profile reads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for first and last names
const MAX_NAME_LEN: usize = 100;

/// Maximum length for an email address (RFC 5321 path limit)
const MAX_EMAIL_LEN: usize = 254;

/// One `@`, no whitespace, a dot somewhere in the domain.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// Validated person name (trimmed, non-empty)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        if s.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated, lowercased email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// # Example
    /// ```
    /// use famctl_server::models::Email;
    ///
    /// assert!(Email::new("Parent@Example.com").is_ok());
    /// assert!(Email::new("no-at-sign").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if s.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }
        if !EMAIL_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain.tld",
            });
        }
        Ok(Self(s.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Trim optional free text, folding blank input to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Full `users` row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    /// Credential digest produced by the authentication service; never serialized.
    #[serde(skip)]
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub is_admin: bool,
}

/// Fields a user sees on their own profile page.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

/// Input for a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: Name,
    pub lastname: Name,
    pub email: Email,
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

/// Replacement values for an existing account's profile fields.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub id: i64,
    pub firstname: Name,
    pub lastname: Name,
    pub email: Email,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

//! Player records and the details entered before a game.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::errors::domain::{DomainError, ValidationKind};

pub const MAX_NAME_CHARS: usize = 64;
pub const MAX_EMAIL_CHARS: usize = 254;

/// A leaderboard row. `attempts` is the best (lowest) count ever saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub attempts: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Name and email as typed on the start form, trimmed and checked.
/// Emails are lowercased so the unique key is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerDetails {
    name: String,
    email: String,
}

impl PlayerDetails {
    pub fn new(name: &str, email: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidName,
                "Name must not be empty",
            ));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(DomainError::validation(
                ValidationKind::InvalidName,
                format!("Name must be at most {MAX_NAME_CHARS} characters"),
            ));
        }

        let email = normalize_email(email)?;
        Ok(Self {
            name: name.to_string(),
            email,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Trim, lowercase and shape-check an email: `local@domain.tld`.
pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    let invalid = || {
        DomainError::validation(
            ValidationKind::InvalidEmail,
            "Email must look like name@example.com",
        )
    };

    if email.len() > MAX_EMAIL_CHARS || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let well_formed_domain = domain
        .split_once('.')
        .is_some_and(|(head, _)| !head.is_empty())
        && !domain.ends_with('.');
    if !well_formed_domain {
        return Err(invalid());
    }
    Ok(email)
}

//! User aggregate and its validated value types.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::UserId;

/// Maximum number of characters accepted for an email address.
pub const EMAIL_MAX: usize = 256;
/// Maximum number of characters accepted for a full name.
pub const FULL_NAME_MAX: usize = 128;

/// Validation errors raised while building user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    #[error("email must be a valid email address")]
    InvalidEmail,
    #[error("full name must not be empty")]
    EmptyFullName,
    #[error("full name must be at most {max} characters")]
    FullNameTooLong { max: usize },
}

impl UserValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
            Self::EmptyFullName | Self::FullNameTooLong { .. } => "fullName",
        }
    }
}

// One `@` with a non-empty local part and domain; no whitespace.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+$";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(compile_email_regex);

#[expect(
    clippy::expect_used,
    reason = "EMAIL_PATTERN is a constant literal exercised by the unit tests"
)]
fn compile_email_regex() -> Regex {
    Regex::new(EMAIL_PATTERN).expect("email pattern compiles")
}

/// Email address, compared case-sensitively exactly as stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`] from trimmed input.
    ///
    /// # Examples
    /// ```
    /// use training_tracker::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("alice@example.com").is_ok());
    /// assert!(EmailAddress::new("alice").is_err());
    /// assert_eq!(
    ///     EmailAddress::new(" alice@example.com ").map(|e| e.to_string()).ok(),
    ///     Some("alice@example.com".to_owned())
    /// );
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = email.into();
        let email = raw.trim();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !EMAIL_RE.is_match(email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A person's name stored as first and last parts.
///
/// Full names are trimmed and split once on the first space; everything after
/// it is the last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName {
    first: String,
    last: String,
}

impl PersonName {
    /// Parse a full name supplied by a client.
    ///
    /// # Examples
    /// ```
    /// use training_tracker::domain::PersonName;
    ///
    /// let name = PersonName::parse("  Ada King Lovelace ").expect("valid name");
    /// assert_eq!(name.first_name(), "Ada");
    /// assert_eq!(name.last_name(), "King Lovelace");
    /// assert_eq!(name.full_name(), "Ada King Lovelace");
    /// ```
    pub fn parse(full_name: &str) -> Result<Self, UserValidationError> {
        let trimmed = full_name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        if trimmed.chars().count() > FULL_NAME_MAX {
            return Err(UserValidationError::FullNameTooLong { max: FULL_NAME_MAX });
        }
        let (first, last) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        Ok(Self {
            first: first.to_owned(),
            last: last.to_owned(),
        })
    }

    /// Rebuild a name from stored parts without validation.
    pub fn from_parts(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first
    }

    pub fn last_name(&self) -> &str {
        &self.last
    }

    /// `"{first} {last}"` with surrounding whitespace removed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_owned()
    }
}

/// Mutable part of a user record; replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: EmailAddress,
    pub name: PersonName,
    pub is_active: bool,
}

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    profile: UserProfile,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, profile: UserProfile, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            profile,
            created_at,
        }
    }

    /// Replace the profile, keeping identity and creation time.
    #[must_use]
    pub fn with_profile(self, profile: UserProfile) -> Self {
        Self { profile, ..self }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &EmailAddress {
        &self.profile.email
    }

    pub fn name(&self) -> &PersonName {
        &self.profile.name
    }

    pub fn is_active(&self) -> bool {
        self.profile.is_active
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// User awaiting persistence. Missing identity and creation time are
/// assigned by the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: Option<UserId>,
    pub profile: UserProfile,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewUser {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            id: None,
            profile,
            created_at: None,
        }
    }

    /// Materialise the user, generating any missing identity or timestamp.
    pub fn into_user(self, now: DateTime<Utc>) -> User {
        User::new(
            self.id.unwrap_or_else(UserId::random),
            self.profile,
            self.created_at.unwrap_or(now),
        )
    }
}

#[cfg(test)]
mod tests;

//! User entity and related types

use serde::{Deserialize, Serialize};

use super::validation::{is_valid_email, is_valid_name, sanitize_input, UserValidationError};

/// Server-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: String,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// A sanitized, validated registration waiting to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
}

impl NewUser {
    /// Build a registration from raw form input
    ///
    /// Checks run presence, then sanitization, then shape, with the name
    /// checked before the email at each step. An empty string counts as
    /// absent.
    pub fn parse(name: Option<&str>, email: Option<&str>) -> Result<Self, UserValidationError> {
        let name = name
            .filter(|n| !n.is_empty())
            .ok_or(UserValidationError::InvalidName)?;
        let email = email
            .filter(|e| !e.is_empty())
            .ok_or(UserValidationError::InvalidEmail)?;

        let name = sanitize_input(name);
        let email = sanitize_input(email);

        if !is_valid_name(&name) {
            return Err(UserValidationError::InvalidName);
        }

        if !is_valid_email(&email) {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self { name, email })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Attach the identifier assigned by storage
    pub fn into_user(self, id: UserId) -> User {
        User::new(id, self.name, self.email)
    }
}

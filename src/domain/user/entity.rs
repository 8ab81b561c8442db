//! User entity

use serde::Serialize;

use super::validation::{validate_details, validate_user, UserValidationError};

/// User aggregate, identified by an externally supplied `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique identifier, immutable once created
    id: String,
    /// Lower-cased first name
    name: String,
    /// Lower-cased last name
    last_name: String,
    /// Lower-cased email address
    email: String,
}

impl User {
    /// Create a validated user; see [`validate_user`]
    pub fn new(
        id: &str,
        name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Self, UserValidationError> {
        validate_user(id, name, last_name, email)
    }

    /// Assemble a user from already-validated parts
    pub(crate) fn from_parts(
        id: impl Into<String>,
        name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    // Getters

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Apply a partial update.
    ///
    /// Empty inputs keep the current value as stored. Only supplied values
    /// are validated and lower-cased, and `id` is never touched.
    pub fn merge_details(
        &self,
        name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Self, UserValidationError> {
        validate_details(name, last_name, email)?;

        Ok(Self::from_parts(
            self.id.clone(),
            pick(name, &self.name),
            pick(last_name, &self.last_name),
            pick(email, &self.email),
        ))
    }
}

fn pick(candidate: &str, current: &str) -> String {
    if candidate.is_empty() {
        current.to_string()
    } else {
        candidate.to_lowercase()
    }
}

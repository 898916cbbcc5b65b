//! Full Name Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

pub const FULL_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName(String);

impl FullName {
    pub fn new(full_name: impl AsRef<str>) -> AuthResult<Self> {
        let full_name = full_name.as_ref().trim();

        if full_name.is_empty() {
            return Err(AuthError::invalid_field(
                "fullName",
                "Full name cannot be empty",
            ));
        }

        if full_name.chars().count() > FULL_NAME_MAX_LENGTH {
            return Err(AuthError::invalid_field(
                "fullName",
                format!("Full name must be at most {} characters", FULL_NAME_MAX_LENGTH),
            ));
        }

        if full_name.chars().any(char::is_control) {
            return Err(AuthError::invalid_field(
                "fullName",
                "Full name contains invalid characters",
            ));
        }

        Ok(Self(full_name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(full_name: impl Into<String>) -> Self {
        Self(full_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

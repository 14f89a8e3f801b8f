//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided ID cannot be used in a request path.
    InvalidId(String),

    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The object slug is not one the bridge syncs.
    UnknownObject(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::InvalidId(id) => write!(f, "Invalid record ID: {}", id),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::UnknownObject(slug) => write!(f, "Unknown object type: {}", slug),
        }
    }
}

impl std::error::Error for ValidationError {}

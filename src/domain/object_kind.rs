//! ObjectKind value object.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The Attio objects the bridge knows how to sync, and their Apollo counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    People,
    Companies,
    Deals,
}

impl ObjectKind {
    /// Attio object slug used in API paths.
    pub fn attio_slug(&self) -> &'static str {
        match self {
            ObjectKind::People => "people",
            ObjectKind::Companies => "companies",
            ObjectKind::Deals => "deals",
        }
    }

    /// Singular noun used in status messages.
    pub fn singular(&self) -> &'static str {
        match self {
            ObjectKind::People => "person",
            ObjectKind::Companies => "company",
            ObjectKind::Deals => "deal",
        }
    }

    /// Name of the matching Apollo entity.
    pub fn apollo_entity(&self) -> &'static str {
        match self {
            ObjectKind::People => "contact",
            ObjectKind::Companies => "account",
            ObjectKind::Deals => "opportunity",
        }
    }

    /// Path fragment of the Apollo web app for this entity.
    pub fn apollo_app_path(&self) -> &'static str {
        match self {
            ObjectKind::People => "contacts",
            ObjectKind::Companies => "accounts",
            ObjectKind::Deals => "opportunities",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "people" | "person" => Ok(ObjectKind::People),
            "companies" | "company" => Ok(ObjectKind::Companies),
            "deals" | "deal" => Ok(ObjectKind::Deals),
            other => Err(ValidationError::UnknownObject(other.to_string())),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attio_slug())
    }
}

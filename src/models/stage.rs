//! Pipeline stage models shared by both platforms.

use serde::{Deserialize, Serialize};

/// A stage record: Apollo contact/opportunity stage or Attio status option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stage {
    pub id: String,
    pub name: String,
}

impl Stage {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// How a stage name was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Via the manual mapping table
    Manual,
    /// Case-insensitive exact name match
    Exact,
    /// Case-insensitive substring match
    Substring,
    /// Nothing matched; the input text was passed through
    PassThrough,
}

/// Result of reconciling a stage name against the other system's stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMatch {
    /// Identifier in the other system; `None` on pass-through.
    pub id: Option<String>,
    pub name: String,
    pub method: MatchMethod,
}

impl StageMatch {
    pub fn matched(stage: &Stage, method: MatchMethod) -> Self {
        Self {
            id: Some(stage.id.clone()),
            name: stage.name.clone(),
            method,
        }
    }

    pub fn pass_through(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            method: MatchMethod::PassThrough,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

/// Apollo `GET /contact_stages` response.
#[derive(Debug, Deserialize)]
pub struct ContactStagesResponse {
    #[serde(default)]
    pub contact_stages: Vec<Stage>,
}

/// Apollo `GET /opportunity_stages` response.
#[derive(Debug, Deserialize)]
pub struct OpportunityStagesResponse {
    #[serde(default)]
    pub opportunity_stages: Vec<Stage>,
}

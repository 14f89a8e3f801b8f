//! Results of sync invocations.

use crate::domain::ObjectKind;
use crate::models::StageMatch;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Whether the target record was created or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncAction {
    Created,
    Updated,
}

/// Summary of one completed sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncOutcome {
    pub object: ObjectKind,
    /// Record id on the side that was read
    pub record_id: String,
    pub apollo_id: String,
    pub action: SyncAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageMatch>,
    pub synced_at: DateTime<Utc>,
}

impl SyncOutcome {
    pub fn new(
        object: ObjectKind,
        record_id: impl Into<String>,
        apollo_id: impl Into<String>,
        action: SyncAction,
        stage: Option<StageMatch>,
    ) -> Self {
        Self {
            object,
            record_id: record_id.into(),
            apollo_id: apollo_id.into(),
            action,
            stage,
            synced_at: Utc::now(),
        }
    }

    /// Human-readable status line shown to the user.
    pub fn status_message(&self) -> String {
        let verb = match self.action {
            SyncAction::Created => "Created",
            SyncAction::Updated => "Updated",
        };
        let mut message = format!(
            "{} Apollo {} {} from {} {}",
            verb,
            self.object.apollo_entity(),
            self.apollo_id,
            self.object.singular(),
            self.record_id
        );
        if let Some(stage) = &self.stage {
            if stage.is_resolved() {
                message.push_str(&format!(" (stage: {})", stage.name));
            } else {
                message.push_str(&format!(" (stage \"{}\" not found in Apollo)", stage.name));
            }
        }
        message
    }
}

/// Where an Attio record lives in Apollo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApolloLink {
    pub object: ObjectKind,
    pub apollo_id: String,
    pub url: String,
}

impl ApolloLink {
    pub fn new(object: ObjectKind, apollo_id: impl Into<String>, app_url: &str) -> Self {
        let apollo_id = apollo_id.into();
        let url = format!(
            "{}/#/{}/{}",
            app_url.trim_end_matches('/'),
            object.apollo_app_path(),
            apollo_id
        );
        Self {
            object,
            apollo_id,
            url,
        }
    }
}

/// Result of pulling an Apollo opportunity stage back into Attio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StagePullOutcome {
    pub record_id: String,
    pub opportunity_id: String,
    pub stage: StageMatch,
}

impl StagePullOutcome {
    pub fn status_message(&self) -> String {
        format!(
            "Set deal {} stage to \"{}\" from Apollo opportunity {}",
            self.record_id, self.stage.name, self.opportunity_id
        )
    }
}

//! Event-triggered sync.
//!
//! Runs a push when an Attio record changes. A failed sync must never block
//! the record update that triggered it, so every error is logged and
//! swallowed here.

use crate::domain::ObjectKind;
use crate::models::SyncOutcome;
use crate::services::SyncService;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// An Attio "record updated" notification.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RecordUpdatedEvent {
    /// Attio object slug, e.g. `people`
    pub object: String,
    pub record_id: String,
}

#[async_trait]
pub trait EventService: Send + Sync {
    /// Sync the updated record. Returns `None` when the object is not synced
    /// or the sync failed.
    async fn handle_record_updated(&self, event: &RecordUpdatedEvent) -> Option<SyncOutcome>;
}

pub struct EventServiceImpl {
    sync_service: Arc<dyn SyncService>,
}

impl EventServiceImpl {
    pub fn new(sync_service: Arc<dyn SyncService>) -> Self {
        Self { sync_service }
    }
}

#[async_trait]
impl EventService for EventServiceImpl {
    async fn handle_record_updated(&self, event: &RecordUpdatedEvent) -> Option<SyncOutcome> {
        if event.object.parse::<ObjectKind>().is_err() {
            tracing::debug!("Ignoring update to unsynced object {}", event.object);
            return None;
        }

        match self.sync_service.push(&event.object, &event.record_id).await {
            Ok(outcome) => {
                tracing::info!("{}", outcome.status_message());
                Some(outcome)
            }
            Err(e) => {
                tracing::error!(
                    "Sync of {} {} after update failed: {}",
                    event.object,
                    event.record_id,
                    e
                );
                None
            }
        }
    }
}

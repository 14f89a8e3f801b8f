//! Attio person -> Apollo contact.

use crate::domain::ObjectKind;
use crate::error::{SyncError, SyncResult};
use crate::matching::find_exact;
use crate::metrics::Metrics;
use crate::models::{ContactPayload, PersonAttributes, SyncAction, SyncOutcome};
use crate::repositories::{SourceRepository, TargetRepository};
use crate::tools::{company_name, write_back_apollo_id, StageResolver, SyncSettings};
use std::sync::Arc;
use tracing::{info, warn};

/// Syncs Attio people to Apollo contacts, matched by email.
pub struct PersonSyncTools {
    source: Arc<dyn SourceRepository>,
    target: Arc<dyn TargetRepository>,
    stages: Arc<StageResolver>,
    settings: Arc<SyncSettings>,
    metrics: Metrics,
}

impl PersonSyncTools {
    pub fn new(
        source: Arc<dyn SourceRepository>,
        target: Arc<dyn TargetRepository>,
        stages: Arc<StageResolver>,
        settings: Arc<SyncSettings>,
        metrics: Metrics,
    ) -> Self {
        Self {
            source,
            target,
            stages,
            settings,
            metrics,
        }
    }

    /// Push one Attio person to Apollo.
    ///
    /// Fails with `SyncError::MissingField` before any Apollo request when the
    /// person has no usable email.
    pub async fn sync_person(&self, record_id: &str) -> SyncResult<SyncOutcome> {
        let record = self
            .source
            .get_record(ObjectKind::People, record_id)
            .await
            .map_err(SyncError::Attio)?;

        let mut person = PersonAttributes::from_record(
            &record,
            self.settings.person_stage_attribute.as_deref(),
            self.settings.apollo_id_attribute.as_deref(),
        )?;

        if let Some(company_id) = person.company_record_id.as_deref() {
            person.company_name = company_name(self.source.as_ref(), company_id).await?;
        }

        let stage = match person.stage.as_deref() {
            Some(name) => Some(self.stages.contact_stage(name).await?),
            None => None,
        };
        let stage_id = stage.as_ref().and_then(|s| s.id.clone());
        let payload = ContactPayload::from_attributes(&person, stage_id);

        let candidates = self
            .target
            .search_contacts(person.email.as_str())
            .await
            .map_err(SyncError::Apollo)?;
        let existing = find_exact(&candidates, |c| c.email.clone(), person.email.as_str());

        let (contact, action) = match existing {
            Some(found) => {
                let contact = self
                    .target
                    .update_contact(&found.id, &payload)
                    .await
                    .map_err(SyncError::Apollo)?;
                self.metrics.record_updated();
                (contact, SyncAction::Updated)
            }
            None => {
                let contact = self
                    .target
                    .create_contact(&payload)
                    .await
                    .map_err(SyncError::Apollo)?;
                self.metrics.record_created();
                (contact, SyncAction::Created)
            }
        };

        if self.settings.verify_writes {
            let stored = self
                .target
                .get_contact(&contact.id)
                .await
                .map_err(SyncError::Apollo)?;
            let stored_email = stored.email.as_deref().map(str::to_lowercase);
            if stored_email.as_deref() != Some(person.email.normalized().as_str()) {
                warn!(
                    "Apollo contact {} has email {:?} after sync, expected {}",
                    contact.id, stored.email, person.email
                );
            }
        }

        write_back_apollo_id(
            self.source.as_ref(),
            &self.settings,
            ObjectKind::People,
            &record,
            &contact.id,
        )
        .await?;

        info!(
            "Synced person {} ({}) to Apollo contact {}",
            person.record_id,
            person.display_name(),
            contact.id
        );
        Ok(SyncOutcome::new(
            ObjectKind::People,
            person.record_id,
            contact.id,
            action,
            stage,
        ))
    }
}

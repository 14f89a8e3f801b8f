//! Attio deal <-> Apollo opportunity.

use crate::domain::ObjectKind;
use crate::error::{SyncError, SyncResult};
use crate::matching::find_exact;
use crate::metrics::Metrics;
use crate::models::{
    AttributeWrite, DealAttributes, OpportunityPayload, StagePullOutcome, SyncAction, SyncOutcome,
};
use crate::repositories::{SourceRepository, TargetRepository};
use crate::tools::{company_name, write_back_apollo_id, StageResolver, SyncSettings};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Syncs Attio deals to Apollo opportunities (matched by name) and pulls
/// opportunity stages back into Attio.
pub struct DealSyncTools {
    source: Arc<dyn SourceRepository>,
    target: Arc<dyn TargetRepository>,
    stages: Arc<StageResolver>,
    settings: Arc<SyncSettings>,
    metrics: Metrics,
}

impl DealSyncTools {
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

    /// Apollo account for the deal's company, matched by exact name.
    /// Accounts are never created here.
    async fn resolve_account(&self, deal: &DealAttributes) -> SyncResult<Option<String>> {
        let Some(company_id) = deal.company_record_id.as_deref() else {
            return Ok(None);
        };
        let Some(name) = company_name(self.source.as_ref(), company_id).await? else {
            return Ok(None);
        };

        let accounts = self
            .target
            .search_accounts(&name)
            .await
            .map_err(SyncError::Apollo)?;
        let account_id = find_exact(&accounts, |a| a.name.clone(), &name).map(|a| a.id.clone());
        if account_id.is_none() {
            debug!("No Apollo account named \"{}\"; deal {} left unlinked", name, deal.record_id);
        }
        Ok(account_id)
    }

    /// Push one Attio deal to Apollo.
    pub async fn sync_deal(&self, record_id: &str) -> SyncResult<SyncOutcome> {
        let record = self
            .source
            .get_record(ObjectKind::Deals, record_id)
            .await
            .map_err(SyncError::Attio)?;
        let deal = DealAttributes::from_record(
            &record,
            &self.settings.deal_stage_attribute,
            self.settings.apollo_id_attribute.as_deref(),
        )?;

        let stage = match deal.stage.as_deref() {
            Some(name) => Some(self.stages.opportunity_stage(name).await?),
            None => None,
        };
        let stage_id = stage.as_ref().and_then(|s| s.id.clone());
        let account_id = self.resolve_account(&deal).await?;
        let payload = OpportunityPayload::from_attributes(&deal, stage_id, account_id);

        let candidates = self
            .target
            .search_opportunities(&deal.name)
            .await
            .map_err(SyncError::Apollo)?;
        let existing = find_exact(&candidates, |o| o.name.clone(), &deal.name);

        let (opportunity, action) = match existing {
            Some(found) => {
                let opportunity = self
                    .target
                    .update_opportunity(&found.id, &payload)
                    .await
                    .map_err(SyncError::Apollo)?;
                self.metrics.record_updated();
                (opportunity, SyncAction::Updated)
            }
            None => {
                let opportunity = self
                    .target
                    .create_opportunity(&payload)
                    .await
                    .map_err(SyncError::Apollo)?;
                self.metrics.record_created();
                (opportunity, SyncAction::Created)
            }
        };

        if self.settings.verify_writes {
            let stored = self
                .target
                .get_opportunity(&opportunity.id)
                .await
                .map_err(SyncError::Apollo)?;
            if payload.opportunity_stage_id.is_some()
                && stored.opportunity_stage_id != payload.opportunity_stage_id
            {
                warn!(
                    "Apollo opportunity {} has stage {:?} after sync, expected {:?}",
                    opportunity.id, stored.opportunity_stage_id, payload.opportunity_stage_id
                );
            }
        }

        write_back_apollo_id(
            self.source.as_ref(),
            &self.settings,
            ObjectKind::Deals,
            &record,
            &opportunity.id,
        )
        .await?;

        info!("Synced deal {} ({}) to Apollo opportunity {}", deal.record_id, deal.name, opportunity.id);
        Ok(SyncOutcome::new(
            ObjectKind::Deals,
            deal.record_id,
            opportunity.id,
            action,
            stage,
        ))
    }

    /// Attio deal linked to an Apollo opportunity through the Apollo-id attribute.
    async fn linked_deal(&self, opportunity_id: &str) -> SyncResult<String> {
        let slug = self.settings.apollo_id_attribute.as_deref().ok_or_else(|| {
            SyncError::InvalidInput(
                "record_id is required when APOLLO_ID_ATTRIBUTE is not configured".to_string(),
            )
        })?;
        let deals = self
            .source
            .find_by_attribute(ObjectKind::Deals, slug, opportunity_id)
            .await
            .map_err(SyncError::Attio)?;
        if deals.len() > 1 {
            warn!(
                "{} Attio deals are linked to Apollo opportunity {}; using the first",
                deals.len(),
                opportunity_id
            );
        }
        deals
            .into_iter()
            .next()
            .map(|deal| deal.id.record_id)
            .ok_or_else(|| {
                SyncError::InvalidInput(format!(
                    "No Attio deal is linked to Apollo opportunity {}",
                    opportunity_id
                ))
            })
    }

    /// Copy an Apollo opportunity's stage onto its Attio deal.
    ///
    /// The deal is `record_id` when given, otherwise the deal whose Apollo-id
    /// attribute equals `opportunity_id`.
    pub async fn pull_deal_stage(
        &self,
        opportunity_id: &str,
        record_id: Option<&str>,
    ) -> SyncResult<StagePullOutcome> {
        let opportunity = self
            .target
            .get_opportunity(opportunity_id)
            .await
            .map_err(SyncError::Apollo)?;
        let apollo_stage = opportunity.opportunity_stage_id.as_deref().ok_or_else(|| {
            SyncError::InvalidInput(format!("Apollo opportunity {} has no stage", opportunity_id))
        })?;

        let record_id = match record_id {
            Some(id) => id.to_string(),
            None => self.linked_deal(opportunity_id).await?,
        };

        let attribute = &self.settings.deal_stage_attribute;
        let stage = self.stages.deal_stage(apollo_stage, attribute).await?;
        if !stage.is_resolved() {
            return Err(SyncError::InvalidInput(format!(
                "Apollo stage \"{}\" has no matching Attio deal stage",
                stage.name
            )));
        }

        let writes = [(attribute.clone(), AttributeWrite::Status(stage.name.clone()))];
        self.source
            .update_attributes(ObjectKind::Deals, &record_id, &writes)
            .await
            .map_err(SyncError::Attio)?;

        info!(
            "Pulled stage \"{}\" from Apollo opportunity {} onto deal {}",
            stage.name, opportunity_id, record_id
        );
        Ok(StagePullOutcome {
            record_id,
            opportunity_id: opportunity_id.to_string(),
            stage,
        })
    }
}

//! Sync service layer.
//!
//! Validation and dispatch for the user-triggered actions. Errors are
//! returned to the caller unchanged; nothing is retried.

use crate::config::Config;
use crate::domain::{ObjectKind, RecordId};
use crate::error::SyncResult;
use crate::matching::StageMatcher;
use crate::metrics::Metrics;
use crate::models::{ApolloLink, StagePullOutcome, SyncOutcome};
use crate::repositories::{SourceRepository, TargetRepository};
use crate::tools::{
    ApolloLookupTools, CompanySyncTools, DealSyncTools, PersonSyncTools, StageResolver,
    SyncSettings,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Sync operations exposed to the action boundary.
#[async_trait]
pub trait SyncService: Send + Sync {
    /// Push an Attio record (`object` is an Attio object slug) to Apollo.
    async fn push(&self, object: &str, record_id: &str) -> SyncResult<SyncOutcome>;

    /// Apollo link for an Attio record; `None` when not yet synced.
    async fn find(&self, object: &str, record_id: &str) -> SyncResult<Option<ApolloLink>>;

    /// Copy an Apollo opportunity's stage onto its Attio deal.
    async fn pull_deal_stage(
        &self,
        opportunity_id: &str,
        record_id: Option<&str>,
    ) -> SyncResult<StagePullOutcome>;
}

/// Default implementation of SyncService.
pub struct SyncServiceImpl {
    person_tools: PersonSyncTools,
    company_tools: CompanySyncTools,
    deal_tools: DealSyncTools,
    lookup_tools: ApolloLookupTools,
}

impl SyncServiceImpl {
    /// Wire the sync tools over a pair of repositories.
    pub fn new(
        source: Arc<dyn SourceRepository>,
        target: Arc<dyn TargetRepository>,
        settings: SyncSettings,
        matcher: StageMatcher,
        apollo_app_url: String,
        metrics: Metrics,
    ) -> Self {
        let settings = Arc::new(settings);
        let stages = Arc::new(StageResolver::new(
            source.clone(),
            target.clone(),
            matcher,
            metrics.clone(),
        ));

        Self {
            person_tools: PersonSyncTools::new(
                source.clone(),
                target.clone(),
                stages.clone(),
                settings.clone(),
                metrics.clone(),
            ),
            company_tools: CompanySyncTools::new(
                source.clone(),
                target.clone(),
                settings.clone(),
                metrics.clone(),
            ),
            deal_tools: DealSyncTools::new(
                source.clone(),
                target.clone(),
                stages,
                settings.clone(),
                metrics,
            ),
            lookup_tools: ApolloLookupTools::new(source, target, settings, apollo_app_url),
        }
    }

    /// Build from configuration.
    pub fn from_config(
        source: Arc<dyn SourceRepository>,
        target: Arc<dyn TargetRepository>,
        config: &Config,
        metrics: Metrics,
    ) -> Self {
        Self::new(
            source,
            target,
            SyncSettings::from_config(config),
            StageMatcher::new(&config.stage_overrides),
            config.apollo_app_url.clone(),
            metrics,
        )
    }

    fn parse_target(object: &str, record_id: &str) -> SyncResult<(ObjectKind, RecordId)> {
        let object: ObjectKind = object.parse()?;
        let record_id = RecordId::new(record_id)?;
        Ok((object, record_id))
    }
}

#[async_trait]
impl SyncService for SyncServiceImpl {
    async fn push(&self, object: &str, record_id: &str) -> SyncResult<SyncOutcome> {
        let (object, record_id) = Self::parse_target(object, record_id)?;
        tracing::debug!("Pushing {} {} to Apollo", object.singular(), record_id);

        match object {
            ObjectKind::People => self.person_tools.sync_person(record_id.as_str()).await,
            ObjectKind::Companies => self.company_tools.sync_company(record_id.as_str()).await,
            ObjectKind::Deals => self.deal_tools.sync_deal(record_id.as_str()).await,
        }
    }

    async fn find(&self, object: &str, record_id: &str) -> SyncResult<Option<ApolloLink>> {
        let (object, record_id) = Self::parse_target(object, record_id)?;
        self.lookup_tools
            .find_in_apollo(object, record_id.as_str())
            .await
    }

    async fn pull_deal_stage(
        &self,
        opportunity_id: &str,
        record_id: Option<&str>,
    ) -> SyncResult<StagePullOutcome> {
        let opportunity_id = RecordId::new(opportunity_id)?;
        let record_id = record_id.map(RecordId::new).transpose()?;
        self.deal_tools
            .pull_deal_stage(
                opportunity_id.as_str(),
                record_id.as_ref().map(RecordId::as_str),
            )
            .await
    }
}

//! Stage lookups backed by the process-lifetime stage cache.

use crate::cache::{StageCache, StageList};
use crate::error::{SyncError, SyncResult};
use crate::matching::StageMatcher;
use crate::metrics::Metrics;
use crate::models::{Stage, StageMatch};
use crate::repositories::{SourceRepository, TargetRepository};
use std::sync::Arc;

/// Resolves stage names against cached stage lists from both platforms.
pub struct StageResolver {
    source: Arc<dyn SourceRepository>,
    target: Arc<dyn TargetRepository>,
    cache: StageCache,
    matcher: StageMatcher,
    metrics: Metrics,
}

impl StageResolver {
    pub fn new(
        source: Arc<dyn SourceRepository>,
        target: Arc<dyn TargetRepository>,
        matcher: StageMatcher,
        metrics: Metrics,
    ) -> Self {
        Self {
            source,
            target,
            cache: StageCache::new(),
            matcher,
            metrics,
        }
    }

    async fn apollo_contact_stages(&self) -> SyncResult<Vec<Stage>> {
        self.cache
            .get_or_try_insert_with(StageList::ApolloContact, || async {
                self.target.contact_stages().await.map_err(SyncError::Apollo)
            })
            .await
    }

    async fn apollo_opportunity_stages(&self) -> SyncResult<Vec<Stage>> {
        self.cache
            .get_or_try_insert_with(StageList::ApolloOpportunity, || async {
                self.target
                    .opportunity_stages()
                    .await
                    .map_err(SyncError::Apollo)
            })
            .await
    }

    async fn attio_deal_stages(&self, stage_attribute: &str) -> SyncResult<Vec<Stage>> {
        let key = StageList::AttioDeal(stage_attribute.to_string());
        self.cache
            .get_or_try_insert_with(key, || async {
                self.source
                    .deal_stages(stage_attribute)
                    .await
                    .map_err(SyncError::Attio)
            })
            .await
    }

    fn observe(&self, stage: StageMatch) -> StageMatch {
        if !stage.is_resolved() {
            self.metrics.record_stage_passthrough();
        }
        stage
    }

    /// Attio person stage -> Apollo contact stage.
    pub async fn contact_stage(&self, name: &str) -> SyncResult<StageMatch> {
        let stages = self.apollo_contact_stages().await?;
        Ok(self.observe(self.matcher.match_forward(name, &stages)))
    }

    /// Attio deal stage -> Apollo opportunity stage.
    pub async fn opportunity_stage(&self, name: &str) -> SyncResult<StageMatch> {
        let stages = self.apollo_opportunity_stages().await?;
        Ok(self.observe(self.matcher.match_forward(name, &stages)))
    }

    /// Apollo opportunity stage (id or name) -> Attio deal status.
    pub async fn deal_stage(&self, apollo_value: &str, stage_attribute: &str) -> SyncResult<StageMatch> {
        let apollo_stages = self.apollo_opportunity_stages().await?;
        let attio_stages = self.attio_deal_stages(stage_attribute).await?;
        Ok(self.observe(
            self.matcher
                .match_reverse(apollo_value, &apollo_stages, &attio_stages),
        ))
    }

    /// Number of stage lists loaded so far.
    pub fn cached_lists(&self) -> usize {
        self.cache.len()
    }
}

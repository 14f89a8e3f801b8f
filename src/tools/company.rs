//! Attio company -> Apollo account.

use crate::domain::ObjectKind;
use crate::error::{SyncError, SyncResult};
use crate::matching::{find_exact, normalize_domain};
use crate::metrics::Metrics;
use crate::models::{AccountPayload, ApolloAccount, CompanyAttributes, SyncAction, SyncOutcome};
use crate::repositories::{SourceRepository, TargetRepository};
use crate::tools::{write_back_apollo_id, SyncSettings};
use std::sync::Arc;
use tracing::{info, warn};

/// Syncs Attio companies to Apollo accounts, matched by name or domain.
pub struct CompanySyncTools {
    source: Arc<dyn SourceRepository>,
    target: Arc<dyn TargetRepository>,
    settings: Arc<SyncSettings>,
    metrics: Metrics,
}

/// Account in `candidates` with the same name, or failing that the same domain.
pub(crate) fn match_account<'a>(
    candidates: &'a [ApolloAccount],
    name: &str,
    domain: Option<&str>,
) -> Option<&'a ApolloAccount> {
    find_exact(candidates, |a| a.name.clone(), name).or_else(|| {
        let domain = domain.and_then(normalize_domain)?;
        find_exact(
            candidates,
            |a| {
                a.domain
                    .as_deref()
                    .or(a.website_url.as_deref())
                    .and_then(normalize_domain)
            },
            &domain,
        )
    })
}

impl CompanySyncTools {
    pub fn new(
        source: Arc<dyn SourceRepository>,
        target: Arc<dyn TargetRepository>,
        settings: Arc<SyncSettings>,
        metrics: Metrics,
    ) -> Self {
        Self {
            source,
            target,
            settings,
            metrics,
        }
    }

    /// Push one Attio company to Apollo.
    pub async fn sync_company(&self, record_id: &str) -> SyncResult<SyncOutcome> {
        let record = self
            .source
            .get_record(ObjectKind::Companies, record_id)
            .await
            .map_err(SyncError::Attio)?;
        let company =
            CompanyAttributes::from_record(&record, self.settings.apollo_id_attribute.as_deref())?;
        let payload = AccountPayload::from(&company);

        let candidates = self
            .target
            .search_accounts(&company.name)
            .await
            .map_err(SyncError::Apollo)?;
        let existing = match_account(&candidates, &company.name, company.domain.as_deref());

        let (account, action) = match existing {
            Some(found) => {
                let account = self
                    .target
                    .update_account(&found.id, &payload)
                    .await
                    .map_err(SyncError::Apollo)?;
                self.metrics.record_updated();
                (account, SyncAction::Updated)
            }
            None => {
                let account = self
                    .target
                    .create_account(&payload)
                    .await
                    .map_err(SyncError::Apollo)?;
                self.metrics.record_created();
                (account, SyncAction::Created)
            }
        };

        if self.settings.verify_writes {
            let stored = self
                .target
                .get_account(&account.id)
                .await
                .map_err(SyncError::Apollo)?;
            if stored.name.as_deref().map(str::trim) != Some(company.name.trim()) {
                warn!(
                    "Apollo account {} is named {:?} after sync, expected {}",
                    account.id, stored.name, company.name
                );
            }
        }

        write_back_apollo_id(
            self.source.as_ref(),
            &self.settings,
            ObjectKind::Companies,
            &record,
            &account.id,
        )
        .await?;

        info!("Synced company {} ({}) to Apollo account {}", company.record_id, company.name, account.id);
        Ok(SyncOutcome::new(
            ObjectKind::Companies,
            company.record_id,
            account.id,
            action,
            None,
        ))
    }
}

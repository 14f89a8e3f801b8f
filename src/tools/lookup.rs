//! Locate the Apollo counterpart of an Attio record without writing anything.

use crate::domain::ObjectKind;
use crate::error::{SyncError, SyncResult};
use crate::matching::find_exact;
use crate::models::{ApolloLink, AttioRecord};
use crate::repositories::{SourceRepository, TargetRepository};
use crate::tools::company::match_account;
use crate::tools::SyncSettings;
use std::sync::Arc;

/// Finds Apollo records for Attio records and builds their web URLs.
pub struct ApolloLookupTools {
    source: Arc<dyn SourceRepository>,
    target: Arc<dyn TargetRepository>,
    settings: Arc<SyncSettings>,
    app_url: String,
}

impl ApolloLookupTools {
    pub fn new(
        source: Arc<dyn SourceRepository>,
        target: Arc<dyn TargetRepository>,
        settings: Arc<SyncSettings>,
        app_url: String,
    ) -> Self {
        Self {
            source,
            target,
            settings,
            app_url,
        }
    }

    /// Apollo link for an Attio record, or `None` if it has not been synced.
    ///
    /// A stored Apollo id wins; otherwise Apollo is searched by natural key.
    pub async fn find_in_apollo(
        &self,
        object: ObjectKind,
        record_id: &str,
    ) -> SyncResult<Option<ApolloLink>> {
        let record = self
            .source
            .get_record(object, record_id)
            .await
            .map_err(SyncError::Attio)?;

        if let Some(slug) = self.settings.apollo_id_attribute.as_deref() {
            if let Some(apollo_id) = record.attribute(slug) {
                return Ok(Some(ApolloLink::new(object, apollo_id, &self.app_url)));
            }
        }

        let apollo_id = self.search_by_natural_key(object, &record).await?;
        Ok(apollo_id.map(|id| ApolloLink::new(object, id, &self.app_url)))
    }

    async fn search_by_natural_key(
        &self,
        object: ObjectKind,
        record: &AttioRecord,
    ) -> SyncResult<Option<String>> {
        match object {
            ObjectKind::People => {
                let Some(email) = record.first_attribute(&["email_addresses", "email"]) else {
                    return Ok(None);
                };
                let contacts = self
                    .target
                    .search_contacts(&email)
                    .await
                    .map_err(SyncError::Apollo)?;
                Ok(find_exact(&contacts, |c| c.email.clone(), &email).map(|c| c.id.clone()))
            }
            ObjectKind::Companies => {
                let Some(name) = record.attribute("name") else {
                    return Ok(None);
                };
                let domain = record.first_attribute(&["domains", "domain", "website"]);
                let accounts = self
                    .target
                    .search_accounts(&name)
                    .await
                    .map_err(SyncError::Apollo)?;
                Ok(match_account(&accounts, &name, domain.as_deref()).map(|a| a.id.clone()))
            }
            ObjectKind::Deals => {
                let Some(name) = record.attribute("name") else {
                    return Ok(None);
                };
                let opportunities = self
                    .target
                    .search_opportunities(&name)
                    .await
                    .map_err(SyncError::Apollo)?;
                Ok(find_exact(&opportunities, |o| o.name.clone(), &name).map(|o| o.id.clone()))
            }
        }
    }
}

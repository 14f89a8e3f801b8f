//! Per-entity sync orchestration.
//!
//! Each tool reads one Attio record, flattens it, reconciles stages, finds
//! or creates the matching Apollo record, and optionally verifies and writes
//! the Apollo id back to Attio.
//! - **Person**: Attio people -> Apollo contacts (keyed by email)
//! - **Company**: Attio companies -> Apollo accounts (keyed by name or domain)
//! - **Deal**: Attio deals <-> Apollo opportunities (keyed by name)
//! - **Lookup**: Apollo id and web URL of an already-synced record

pub mod company;
pub mod deal;
pub mod lookup;
pub mod person;
pub mod stage;

pub use company::CompanySyncTools;
pub use deal::DealSyncTools;
pub use lookup::ApolloLookupTools;
pub use person::PersonSyncTools;
pub use stage::StageResolver;

use crate::config::Config;
use crate::domain::ObjectKind;
use crate::error::{ApiError, SyncError, SyncResult};
use crate::models::{AttioRecord, AttributeWrite};
use crate::repositories::SourceRepository;

/// Behaviour switches shared by every sync tool.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    /// GET the Apollo record after each write
    pub verify_writes: bool,
    /// Attio attribute that stores the Apollo id; write-back is off when unset
    pub apollo_id_attribute: Option<String>,
    /// Attio attribute holding a person's lifecycle stage
    pub person_stage_attribute: Option<String>,
    /// Attio status attribute holding a deal's stage
    pub deal_stage_attribute: String,
}

impl SyncSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            verify_writes: config.verify_writes,
            apollo_id_attribute: config.apollo_id_attribute.clone(),
            person_stage_attribute: config.person_stage_attribute.clone(),
            deal_stage_attribute: config.deal_stage_attribute.clone(),
        }
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Name of a related Attio company, or `None` if the reference is dangling.
pub(crate) async fn company_name(
    source: &dyn SourceRepository,
    company_record_id: &str,
) -> SyncResult<Option<String>> {
    match source.get_record(ObjectKind::Companies, company_record_id).await {
        Ok(record) => Ok(record.attribute("name")),
        Err(ApiError::NotFound(_)) => {
            tracing::warn!("Referenced company {} no longer exists", company_record_id);
            Ok(None)
        }
        Err(e) => Err(SyncError::Attio(e)),
    }
}

/// Store the Apollo id on the Attio record, unless write-back is disabled or
/// the record already holds that id.
pub(crate) async fn write_back_apollo_id(
    source: &dyn SourceRepository,
    settings: &SyncSettings,
    object: ObjectKind,
    record: &AttioRecord,
    apollo_id: &str,
) -> SyncResult<()> {
    let Some(slug) = settings.apollo_id_attribute.as_deref() else {
        return Ok(());
    };
    if record.attribute(slug).as_deref() == Some(apollo_id) {
        tracing::debug!("{} {} already linked to {}", object.singular(), record.record_id(), apollo_id);
        return Ok(());
    }

    let writes = [(slug.to_string(), AttributeWrite::Text(apollo_id.to_string()))];
    source
        .update_attributes(object, record.record_id(), &writes)
        .await
        .map_err(SyncError::Attio)?;
    tracing::info!(
        "Stored Apollo id {} on {} {}",
        apollo_id,
        object.singular(),
        record.record_id()
    );
    Ok(())
}

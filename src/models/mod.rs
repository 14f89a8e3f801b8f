//! Data models for both platforms.
//!
//! Attio records stay loosely typed; Apollo entities are typed DTOs with
//! lenient deserialization (`#[serde(default)]`) since only a handful of
//! fields matter to the bridge.

pub mod company;
pub mod deal;
pub mod outcome;
pub mod person;
pub mod record;
pub mod stage;

pub use company::{AccountEnvelope, AccountPayload, AccountsResponse, ApolloAccount, CompanyAttributes};
pub use deal::{
    ApolloOpportunity, DealAttributes, OpportunitiesResponse, OpportunityEnvelope,
    OpportunityPayload,
};
pub use outcome::{ApolloLink, StagePullOutcome, SyncAction, SyncOutcome};
pub use person::{ApolloContact, ContactEnvelope, ContactPayload, ContactsResponse, PersonAttributes};
pub use record::{
    AttioRecord, AttioRecordId, AttioStatus, AttributeWrite, DataEnvelope, RecordQuery,
    UpdateRecordRequest,
};
pub use stage::{
    ContactStagesResponse, MatchMethod, OpportunityStagesResponse, Stage, StageMatch,
};

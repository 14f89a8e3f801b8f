//! Application service layer.
//!
//! Services validate caller input and dispatch to the per-entity sync tools.
//! They sit between the MCP handlers and the tools.

mod event_service;
mod sync_service;

pub use event_service::{EventService, EventServiceImpl, RecordUpdatedEvent};
pub use sync_service::{SyncService, SyncServiceImpl};

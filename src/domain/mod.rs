//! Domain value objects and types.
//!
//! Type-safe wrappers for record ids, email addresses and the synced object
//! kinds. They validate at construction time so invalid input is rejected
//! before any request is made.

pub mod email;
pub mod errors;
pub mod object_kind;
pub mod record_id;

pub use email::EmailAddress;
pub use errors::ValidationError;
pub use object_kind::ObjectKind;
pub use record_id::RecordId;

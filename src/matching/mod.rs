//! Matching between Attio and Apollo.
//!
//! Stage names are reconciled by [`StageMatcher`]; records are paired by
//! natural key (email, name, domain) with [`find_exact`].

pub mod natural_key;
pub mod stage_matcher;

pub use natural_key::{find_exact, normalize_domain};
pub use stage_matcher::{looks_like_apollo_id, StageMatcher};

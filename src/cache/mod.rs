//! Caching utilities for the sync bridge.
//!
//! Stage lists from both platforms are fetched on first use and memoized
//! for the lifetime of the process.

pub mod memo_cache;

pub use memo_cache::MemoCache;

use crate::models::Stage;

/// Which stage list a cache entry holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StageList {
    ApolloContact,
    ApolloOpportunity,
    /// Statuses of the named Attio deal attribute
    AttioDeal(String),
}

/// Cache of stage lists shared by every sync.
pub type StageCache = MemoCache<StageList, Vec<Stage>>;

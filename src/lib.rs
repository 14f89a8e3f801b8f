//! attio-apollo-sync - a record-sync bridge from Attio to Apollo.
//!
//! Reads Attio people, companies and deals, flattens their attribute values,
//! reconciles pipeline stage names, and creates or updates the matching
//! Apollo contacts, accounts and opportunities. Deal stages can also be
//! pulled back from Apollo into Attio.
//!
//! # Architecture
//!
//! - **mapping**: Value extraction from Attio's nested attribute JSON
//! - **matching**: Stage reconciliation and natural-key matching
//! - **models**: Attio records, Apollo DTOs and sync results
//! - **cache**: Process-lifetime stage list cache
//! - **client**: HTTP clients for both APIs
//! - **repositories**: Source/target abstractions over the clients
//! - **tools**: Per-entity sync orchestration
//! - **services**: Validation, dispatch and the event path
//! - **server**: MCP protocol server

pub mod cache;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod mapping;
pub mod matching;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod tools;

pub use cache::{MemoCache, StageCache, StageList};
pub use client::{ApolloClient, AttioClient};
pub use config::Config;
pub use error::{ApiError, ConfigError, SyncError};
pub use mapping::extract_value;
pub use matching::{find_exact, StageMatcher};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{ApolloLink, Stage, StageMatch, SyncAction, SyncOutcome};
pub use server::SyncMcpServer;
pub use services::{EventService, SyncService};
pub use tools::SyncSettings;

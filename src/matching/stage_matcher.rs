//! Stage reconciliation between Attio and Apollo.
//!
//! Forward: Attio stage name -> Apollo stage. Reverse: Apollo stage id or
//! name -> Attio status. Both directions try, in order, a configured
//! override, a case-insensitive exact match on the input, the built-in
//! default table, a case-insensitive substring match, and finally pass the
//! input text through unchanged.

use crate::models::{MatchMethod, Stage, StageMatch};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

/// Apollo ids are 24-character lowercase hex strings (Mongo ObjectIds).
static APOLLO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-f]{24}$").unwrap_or_else(|e| panic!("invalid Apollo id regex: {e}"))
});

/// Attio's default deal stages mapped to Apollo's default opportunity stages.
const DEFAULT_STAGE_MAP: &[(&str, &str)] = &[
    ("Lead", "Qualify"),
    ("In Progress", "Negotiation/Review"),
    ("Won 🎉", "Closed Won"),
    ("Lost", "Closed Lost"),
];

/// Whether `value` has the shape of an Apollo record id.
pub fn looks_like_apollo_id(value: &str) -> bool {
    APOLLO_ID_RE.is_match(value)
}

/// Comparison key for stage names: trimmed, Unicode-lowercased.
fn stage_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Which way a lookup goes through a (Attio name, Apollo name) table.
#[derive(Debug, Clone, Copy)]
enum Direction {
    AttioToApollo,
    ApolloToAttio,
}

fn lookup<'a>(table: &'a [(String, String)], name: &str, direction: Direction) -> Option<&'a str> {
    let key = stage_key(name);
    table
        .iter()
        .find(|(attio, apollo)| match direction {
            Direction::AttioToApollo => stage_key(attio) == key,
            Direction::ApolloToAttio => stage_key(apollo) == key,
        })
        .map(|(attio, apollo)| match direction {
            Direction::AttioToApollo => apollo.as_str(),
            Direction::ApolloToAttio => attio.as_str(),
        })
}

/// Maps stage names between the two systems.
///
/// The matcher itself holds only the mapping tables; stage lists are passed
/// in by the caller (usually from the stage cache), so matching is a pure
/// function of its inputs.
#[derive(Debug, Clone)]
pub struct StageMatcher {
    /// (Attio name, Apollo name) pairs from configuration
    overrides: Vec<(String, String)>,
    /// Built-in (Attio name, Apollo name) pairs
    defaults: Vec<(String, String)>,
}

impl StageMatcher {
    /// Create a matcher with the default table plus `overrides`.
    ///
    /// An override wins over everything, including an exact name match.
    /// A default entry only applies when the input has no exact match.
    pub fn new(overrides: &[(String, String)]) -> Self {
        Self {
            overrides: overrides.to_vec(),
            defaults: DEFAULT_STAGE_MAP
                .iter()
                .map(|(attio, apollo)| (attio.to_string(), apollo.to_string()))
                .collect(),
        }
    }

    fn resolve<'a>(
        &self,
        name: &str,
        stages: &'a [Stage],
        direction: Direction,
    ) -> Option<(&'a Stage, MatchMethod)> {
        let via_table = |table: &[(String, String)]| {
            lookup(table, name, direction)
                .and_then(|target| find_stage(target, stages))
                .map(|(stage, method)| match method {
                    MatchMethod::Exact => (stage, MatchMethod::Manual),
                    other => (stage, other),
                })
        };

        via_table(&self.overrides)
            .or_else(|| find_exact(name, stages).map(|stage| (stage, MatchMethod::Exact)))
            .or_else(|| via_table(&self.defaults))
            .or_else(|| find_substring(name, stages).map(|stage| (stage, MatchMethod::Substring)))
    }

    /// Map an Attio stage name to an Apollo stage.
    ///
    /// Returns a pass-through match (no id) when nothing fits, so the caller
    /// can still report the stage text.
    pub fn match_forward(&self, name: &str, apollo_stages: &[Stage]) -> StageMatch {
        let name = name.trim();

        match self.resolve(name, apollo_stages, Direction::AttioToApollo) {
            Some((stage, method)) => {
                debug!("Stage \"{}\" matched Apollo stage {} ({:?})", name, stage.id, method);
                StageMatch::matched(stage, method)
            }
            None => {
                warn!("No Apollo stage matches \"{}\"; passing it through", name);
                StageMatch::pass_through(name)
            }
        }
    }

    /// Map an Apollo stage (id or name) to an Attio status.
    ///
    /// `apollo_stages` resolves ids to names; `attio_stages` is the list
    /// of candidate Attio statuses.
    pub fn match_reverse(
        &self,
        value: &str,
        apollo_stages: &[Stage],
        attio_stages: &[Stage],
    ) -> StageMatch {
        let value = value.trim();

        let name = match apollo_stages.iter().find(|stage| stage.id == value) {
            Some(stage) => stage.name.trim(),
            None if looks_like_apollo_id(value) => {
                warn!("Unknown Apollo stage id {}; passing it through", value);
                return StageMatch::pass_through(value);
            }
            None => value,
        };

        match self.resolve(name, attio_stages, Direction::ApolloToAttio) {
            Some((stage, method)) => {
                debug!("Apollo stage \"{}\" matched Attio status {} ({:?})", name, stage.id, method);
                StageMatch::matched(stage, method)
            }
            None => {
                warn!("No Attio status matches Apollo stage \"{}\"; passing it through", name);
                StageMatch::pass_through(name)
            }
        }
    }
}

impl Default for StageMatcher {
    fn default() -> Self {
        Self::new(&[])
    }
}

fn find_exact<'a>(query: &str, stages: &'a [Stage]) -> Option<&'a Stage> {
    let needle = stage_key(query);
    if needle.is_empty() {
        return None;
    }
    stages.iter().find(|stage| stage_key(&stage.name) == needle)
}

/// First stage whose name contains the query or is contained in it.
fn find_substring<'a>(query: &str, stages: &'a [Stage]) -> Option<&'a Stage> {
    let needle = stage_key(query);
    if needle.is_empty() {
        return None;
    }
    stages.iter().find(|stage| {
        let candidate = stage_key(&stage.name);
        !candidate.is_empty() && (candidate.contains(&needle) || needle.contains(&candidate))
    })
}

/// Exact match over the whole list first, then the first substring match.
fn find_stage<'a>(query: &str, stages: &'a [Stage]) -> Option<(&'a Stage, MatchMethod)> {
    find_exact(query, stages)
        .map(|stage| (stage, MatchMethod::Exact))
        .or_else(|| find_substring(query, stages).map(|stage| (stage, MatchMethod::Substring)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apollo_stages() -> Vec<Stage> {
        vec![
            Stage::new("5f0000000000000000000001", "Qualify"),
            Stage::new("5f0000000000000000000002", "Negotiation/Review"),
            Stage::new("5f0000000000000000000003", "Closed Won"),
            Stage::new("5f0000000000000000000004", "Closed Lost"),
        ]
    }

    fn attio_stages() -> Vec<Stage> {
        vec![
            Stage::new("a-1", "Lead"),
            Stage::new("a-2", "In Progress"),
            Stage::new("a-3", "Won 🎉"),
            Stage::new("a-4", "Lost"),
        ]
    }

    #[test]
    fn test_exact_case_insensitive() {
        let matcher = StageMatcher::new(&[]);
        let stages = vec![Stage::new("1", "Closed Won")];
        let result = matcher.match_forward("closed won", &stages);
        assert_eq!(result.id.as_deref(), Some("1"));
        assert_eq!(result.method, MatchMethod::Exact);
    }

    #[test]
    fn test_exact_beats_earlier_substring() {
        let matcher = StageMatcher::new(&[]);
        let stages = vec![
            Stage::new("0", "Closed Won - Expansion"),
            Stage::new("1", "Closed Won"),
        ];
        let result = matcher.match_forward("closed won", &stages);
        assert_eq!(result.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_substring_either_direction() {
        let matcher = StageMatcher::new(&[]);
        let stages = vec![Stage::new("d", "Demo Scheduled"), Stage::new("p", "Proposal")];

        let result = matcher.match_forward("demo", &stages);
        assert_eq!(result.id.as_deref(), Some("d"));
        assert_eq!(result.method, MatchMethod::Substring);

        let result = matcher.match_forward("Proposal Sent", &stages);
        assert_eq!(result.id.as_deref(), Some("p"));
    }

    #[test]
    fn test_manual_mapping() {
        let matcher = StageMatcher::default();
        let result = matcher.match_forward("Won 🎉", &apollo_stages());
        assert_eq!(result.id.as_deref(), Some("5f0000000000000000000003"));
        assert_eq!(result.name, "Closed Won");
        assert_eq!(result.method, MatchMethod::Manual);
    }

    #[test]
    fn test_exact_name_beats_default_table() {
        let matcher = StageMatcher::default();
        let stages = vec![Stage::new("1", "Lead"), Stage::new("2", "In Progress")];

        let result = matcher.match_forward("lead", &stages);
        assert_eq!(result.id.as_deref(), Some("1"));
        assert_eq!(result.method, MatchMethod::Exact);

        let result = matcher.match_forward("In Progress", &stages);
        assert_eq!(result.id.as_deref(), Some("2"));
        assert_eq!(result.method, MatchMethod::Exact);
    }

    #[test]
    fn test_default_target_missing_falls_back_to_name() {
        let matcher = StageMatcher::default();
        let stages = vec![Stage::new("1", "Qualified Lead")];
        let result = matcher.match_forward("Lead", &stages);
        assert_eq!(result.id.as_deref(), Some("1"));
        assert_eq!(result.method, MatchMethod::Substring);
    }

    #[test]
    fn test_override_beats_exact_name() {
        let matcher = StageMatcher::new(&[("Lead".to_string(), "Qualify".to_string())]);
        let stages = vec![Stage::new("1", "Lead"), Stage::new("2", "Qualify")];
        let result = matcher.match_forward("Lead", &stages);
        assert_eq!(result.id.as_deref(), Some("2"));
        assert_eq!(result.method, MatchMethod::Manual);
    }

    #[test]
    fn test_override_key_non_ascii() {
        let matcher =
            StageMatcher::new(&[("Négociation".to_string(), "Negotiation/Review".to_string())]);
        let result = matcher.match_forward("NÉGOCIATION", &apollo_stages());
        assert_eq!(result.id.as_deref(), Some("5f0000000000000000000002"));
        assert_eq!(result.method, MatchMethod::Manual);

        let attio = vec![Stage::new("a-9", "Négociation")];
        let result = matcher.match_reverse("NEGOTIATION/REVIEW", &apollo_stages(), &attio);
        assert_eq!(result.id.as_deref(), Some("a-9"));
    }

    #[test]
    fn test_reverse_exact_name_beats_default_table() {
        let matcher = StageMatcher::default();
        let apollo = vec![Stage::new("5f0000000000000000000003", "Closed Won")];
        let attio = vec![Stage::new("a-3", "Won 🎉"), Stage::new("a-5", "Closed Won")];
        let result = matcher.match_reverse("5f0000000000000000000003", &apollo, &attio);
        assert_eq!(result.id.as_deref(), Some("a-5"));
        assert_eq!(result.method, MatchMethod::Exact);
    }

    #[test]
    fn test_override_takes_precedence() {
        let matcher =
            StageMatcher::new(&[("Lead".to_string(), "Closed Lost".to_string())]);
        let result = matcher.match_forward("lead", &apollo_stages());
        assert_eq!(result.name, "Closed Lost");
    }

    #[test]
    fn test_pass_through() {
        let matcher = StageMatcher::default();
        let result = matcher.match_forward("  Nurture ", &apollo_stages());
        assert_eq!(result, StageMatch::pass_through("Nurture"));

        let result = matcher.match_forward("anything", &[]);
        assert!(!result.is_resolved());
    }

    #[test]
    fn test_forward_is_idempotent() {
        let matcher = StageMatcher::default();
        let stages = apollo_stages();
        let first = matcher.match_forward("In Progress", &stages);
        let second = matcher.match_forward("In Progress", &stages);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reverse_by_id() {
        let matcher = StageMatcher::default();
        let result =
            matcher.match_reverse("5f0000000000000000000003", &apollo_stages(), &attio_stages());
        assert_eq!(result.id.as_deref(), Some("a-3"));
        assert_eq!(result.name, "Won 🎉");
        assert_eq!(result.method, MatchMethod::Manual);
    }

    #[test]
    fn test_reverse_by_name() {
        let matcher = StageMatcher::default();
        let result = matcher.match_reverse("in progress", &apollo_stages(), &attio_stages());
        assert_eq!(result.id.as_deref(), Some("a-2"));
        assert_eq!(result.method, MatchMethod::Exact);
    }

    #[test]
    fn test_reverse_unknown_id_passes_through() {
        let matcher = StageMatcher::default();
        let result =
            matcher.match_reverse("5f00000000000000000000ff", &apollo_stages(), &attio_stages());
        assert_eq!(result, StageMatch::pass_through("5f00000000000000000000ff"));
    }

    #[test]
    fn test_looks_like_apollo_id() {
        assert!(looks_like_apollo_id("5f0000000000000000000001"));
        assert!(!looks_like_apollo_id("5F0000000000000000000001"));
        assert!(!looks_like_apollo_id("Closed Won"));
        assert!(!looks_like_apollo_id("5f00"));
    }
}

//! Computes which valid domains are new since the previous run.

use std::collections::BTreeSet;

use serde::Serialize;

/// Result of comparing the current valid domains with the previous run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub new_domains: BTreeSet<String>,
    /// Whether a non-empty previous state was available for comparison.
    pub had_previous: bool,
}

/// The three reportable outcomes of a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome<'a> {
    NoPreviousState,
    NoNewDomains,
    NewDomains(&'a BTreeSet<String>),
}

impl Delta {
    pub fn outcome(&self) -> DeltaOutcome<'_> {
        match (self.had_previous, self.new_domains.is_empty()) {
            (false, _) => DeltaOutcome::NoPreviousState,
            (true, true) => DeltaOutcome::NoNewDomains,
            (true, false) => DeltaOutcome::NewDomains(&self.new_domains),
        }
    }
}

/// Why a run could not produce a trustworthy delta. The previous valid domains stay in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaUnavailable {
    /// The active resolver failed on a non-empty wordlist.
    ResolverFailed,
    /// No source produced an artifact, so there was nothing to validate.
    SourcesUnavailable,
}

impl DeltaUnavailable {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ResolverFailed => "active resolution failed",
            Self::SourcesUnavailable => "every discovery source was unavailable",
        }
    }
}

/// `current - previous`. An absent or empty `previous` yields an empty delta without a baseline.
pub fn delta(previous: Option<&BTreeSet<String>>, current: &BTreeSet<String>) -> Delta {
    match previous {
        Some(previous) if !previous.is_empty() => Delta {
            new_domains: current.difference(previous).cloned().collect(),
            had_previous: true,
        },
        _ => Delta::default(),
    }
}

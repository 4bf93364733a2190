//! Unions every available source into the canonical wordlist.

use serde::Serialize;
use subsweep_common::collaborator::SourceSpec;
use subsweep_common::domain::CanonicalWordlist;
use tracing::{info, warn};

use crate::source::read_source;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    Read { count: usize },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub outcome: SourceOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub wordlist: CanonicalWordlist,
    pub reports: Vec<SourceReport>,
}

impl Aggregation {
    pub fn unavailable(&self) -> impl Iterator<Item = &SourceReport> {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, SourceOutcome::Unavailable { .. }))
    }

    /// At least one source was expected and none of them could be read.
    pub fn total_outage(&self) -> bool {
        !self.reports.is_empty() && self.unavailable().count() == self.reports.len()
    }
}

/// Reads all `sources` and unions their candidates.
///
/// An unavailable source contributes nothing and is reported. If every source is
/// unavailable the wordlist is simply empty.
pub async fn aggregate(sources: &[SourceSpec]) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for spec in sources {
        let outcome = match read_source(spec).await {
            Ok(candidates) => {
                let count = candidates.len();
                if candidates.is_empty() {
                    warn!("{} produced no candidates", candidates.source());
                } else {
                    info!(
                        "{}: {count} candidates from {}",
                        candidates.source(),
                        candidates.location().display()
                    );
                }
                aggregation.wordlist.merge(candidates);
                SourceOutcome::Read { count }
            }
            Err(e) => {
                warn!("Skipping source: {e}");
                SourceOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        };

        aggregation.reports.push(SourceReport {
            name: spec.name.clone(),
            outcome,
        });
    }

    if aggregation.wordlist.is_empty() {
        warn!("No candidate domains were collected from any source");
    }

    aggregation
}

//! Narrows the canonical wordlist to domains the active resolver confirms.

use std::path::Path;

use subsweep_common::collaborator::ActiveResolver;
use subsweep_common::domain::{CanonicalWordlist, ValidDomainSet};
use subsweep_common::error::ToolError;
use tracing::{error, info, warn};

#[derive(Debug, Default)]
pub struct Validity {
    pub domains: ValidDomainSet,
    /// Set when the collaborator failed. `domains` is then empty.
    pub failure: Option<ToolError>,
}

/// Runs `resolver` over the wordlist artifact at `wordlist_path`.
///
/// The returned lines are normalized, deduplicated and sorted. A collaborator failure is
/// reported and yields an empty set. An empty wordlist is not handed to the resolver at all.
pub async fn resolve_valid(
    wordlist_path: &Path,
    wordlist: &CanonicalWordlist,
    resolver: &dyn ActiveResolver,
) -> Validity {
    if wordlist.is_empty() {
        warn!("Canonical wordlist is empty, skipping {}", resolver.name());
        return Validity::default();
    }

    match resolver.resolve(wordlist_path).await {
        Ok(lines) => {
            let domains = ValidDomainSet::from_lines(lines);
            info!("Number of resolved valid domains: {}", domains.len());
            Validity {
                domains,
                failure: None,
            }
        }
        Err(e) => {
            error!("Error running {}: {e}", resolver.name());
            Validity {
                domains: ValidDomainSet::default(),
                failure: Some(e),
            }
        }
    }
}

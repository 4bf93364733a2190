//! Per-target persistence: run artifacts and the state read back by the next run.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use subsweep_common::config::ArtifactLayout;
use subsweep_common::domain::{CanonicalWordlist, ResolvedIpMap, ValidDomainSet};
use subsweep_common::error::PersistError;
use tracing::{debug, warn};

use crate::aggregate::SourceReport;
use crate::delta::DeltaUnavailable;

/// Summary counts persisted next to the artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub target: String,
    pub elapsed_secs: u64,
    pub identified_domains: usize,
    pub valid_domains: usize,
    pub resolved_domains: usize,
    pub resolved_addresses: usize,
    pub lookup_failures: Vec<String>,
    pub had_previous: bool,
    pub new_domains: Vec<String>,
    pub delta_unavailable: Option<DeltaUnavailable>,
    pub sources: Vec<SourceReport>,
    pub tool_failures: Vec<ToolFailureReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolFailureReport {
    pub tool: String,
    pub reason: String,
}

pub struct RunStore {
    layout: ArtifactLayout,
}

impl RunStore {
    pub fn new(layout: ArtifactLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// Creates the target directory.
    pub async fn prepare(&self) -> Result<(), PersistError> {
        tokio::fs::create_dir_all(&self.layout.dir)
            .await
            .map_err(|e| PersistError::new("create directory", &self.layout.dir, e))
    }

    /// The valid domains of the previous run, or `None` on a first run.
    ///
    /// An unreadable history is treated like a missing one.
    pub async fn load_previous(&self) -> Option<BTreeSet<String>> {
        let path = &self.layout.valid_domains;
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Some(ValidDomainSet::from_lines(contents.lines()).domains().clone()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No previous state at {}", path.display());
                None
            }
            Err(e) => {
                warn!("Ignoring unreadable previous state {}: {e}", path.display());
                None
            }
        }
    }

    /// Removes artifacts left behind by earlier runs so a failing tool cannot replay stale output.
    pub async fn clear_stale<'a>(&self, paths: impl IntoIterator<Item = &'a Path>) {
        for path in paths {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!("Removed stale artifact {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("Cannot remove stale artifact {}: {e}", path.display()),
            }
        }
    }

    pub async fn write_wordlist(&self, wordlist: &CanonicalWordlist) -> Result<(), PersistError> {
        write_atomic(&self.layout.wordlist, wordlist.to_artifact()).await
    }

    /// Keeps a copy of the canonical wordlist as the last full output.
    pub async fn persist_all_output(&self) -> Result<(), PersistError> {
        tokio::fs::copy(&self.layout.wordlist, &self.layout.all_output)
            .await
            .map(|_| ())
            .map_err(|e| PersistError::new("copy wordlist to", &self.layout.all_output, e))
    }

    pub async fn persist_valid(&self, valid: &ValidDomainSet) -> Result<(), PersistError> {
        write_atomic(&self.layout.valid_domains, valid.to_artifact()).await
    }

    pub async fn write_ip_report(&self, resolved: &ResolvedIpMap) -> Result<(), PersistError> {
        write_atomic(&self.layout.resolved_ips, resolved.to_report()).await
    }

    pub async fn write_summary(&self, summary: &RunSummary) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(summary).map_err(|e| {
            PersistError::new("serialize summary for", &self.layout.summary, e.into())
        })?;
        write_atomic(&self.layout.summary, json).await
    }
}

/// Writes through a sibling temp file so readers never see a partial artifact.
async fn write_atomic(path: &Path, contents: String) -> Result<(), PersistError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    tokio::fs::write(&tmp, contents)
        .await
        .map_err(|e| PersistError::new("write", path, e))?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            debug!("Cannot remove {}: {cleanup}", Path::new(&tmp).display());
        }
        return Err(PersistError::new("replace", path, e));
    }
    Ok(())
}

//! Reads one tool artifact into a [`CandidateSet`].

use std::io::ErrorKind;

use subsweep_common::collaborator::SourceSpec;
use subsweep_common::domain::CandidateSet;
use subsweep_common::error::SourceError;

/// Reads `spec` and normalizes every candidate in it.
///
/// Structured artifacts are consumed line by line like plain ones: no tag extraction happens,
/// each line is a candidate once `www.` is stripped.
pub async fn read_source(spec: &SourceSpec) -> Result<CandidateSet, SourceError> {
    let bytes: Vec<u8> = tokio::fs::read(&spec.path).await.map_err(|reason| match reason.kind() {
        ErrorKind::NotFound => SourceError::NotFound {
            source_name: spec.name.clone(),
            path: spec.path.clone(),
        },
        _ => SourceError::Unreadable {
            source_name: spec.name.clone(),
            path: spec.path.clone(),
            reason,
        },
    })?;

    let contents = String::from_utf8_lossy(&bytes);
    // structured artifacts also hold one candidate per line; tags are not parsed
    Ok(CandidateSet::from_lines(&spec.name, &spec.path, contents.lines()))
}

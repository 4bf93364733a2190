//! Error taxonomy of a run.
//!
//! Only [`PersistError`] and [`LockError`] are fatal. Everything else is caught at the stage
//! boundary and turned into a report entry.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// One input artifact could not be read. Contributes the empty set.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} artifact not found at {}", .path.display())]
    NotFound { source_name: String, path: PathBuf },
    #[error("{source_name} artifact at {} is unreadable: {reason}", .path.display())]
    Unreadable {
        source_name: String,
        path: PathBuf,
        reason: io::Error,
    },
}

/// An external collaborator did not complete successfully.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {tool}: {reason}")]
    Spawn { tool: String, reason: io::Error },
    #[error("{tool} timed out after {}s", .timeout.as_secs())]
    TimedOut { tool: String, timeout: Duration },
    #[error(
        "{tool} exited with {}: {stderr}",
        .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}"))
    )]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl ToolError {
    pub fn tool(&self) -> &str {
        match self {
            ToolError::Spawn { tool, .. }
            | ToolError::TimedOut { tool, .. }
            | ToolError::Failed { tool, .. } => tool,
        }
    }
}

/// A single domain failed to resolve to any address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup failed: {0}")]
    Resolve(String),
    #[error("lookup timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),
    #[error("no addresses returned")]
    NoAddresses,
}

/// An output artifact could not be written.
#[derive(Debug, Error)]
#[error("cannot {action} {}: {reason}", .path.display())]
pub struct PersistError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub reason: io::Error,
}

impl PersistError {
    pub fn new(action: &'static str, path: impl Into<PathBuf>, reason: io::Error) -> Self {
        Self {
            action,
            path: path.into(),
            reason,
        }
    }
}

/// Another run already owns the target directory.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("another run holds the lock at {}", .path.display())]
    Held { path: PathBuf },
    #[error("cannot create lock {}: {reason}", .path.display())]
    Io { path: PathBuf, reason: io::Error },
}

/// Fatal conditions that stop a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Lock(#[from] LockError),
}

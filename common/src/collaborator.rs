//! # Collaborator Contracts
//!
//! The external recon tools are opaque executables. The engine only depends on these traits;
//! concrete wrappers live in `subsweep-plugins`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::TargetDomain;
use crate::error::ToolError;

/// How a discovery artifact is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// One domain per line.
    PlainLines,
    /// Tagged output such as dnsrecon XML. Still consumed line by line.
    Structured,
}

/// A discovery artifact the aggregator should read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub name: String,
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl SourceSpec {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, format: SourceFormat) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            format,
        }
    }
}

/// A tool that writes candidate domains for a target into its artifact.
#[async_trait]
pub trait DiscoveryTool: Send + Sync {
    fn name(&self) -> &str;

    /// Where the tool writes, and in which format.
    fn source(&self) -> SourceSpec;

    async fn discover(&self, target: &TargetDomain) -> Result<(), ToolError>;
}

/// Confirms which domains of a wordlist resolve. Results come back on stdout, not as a file.
#[async_trait]
pub trait ActiveResolver: Send + Sync {
    fn name(&self) -> &str;

    async fn resolve(&self, wordlist: &Path) -> Result<Vec<String>, ToolError>;
}

/// Produces an HTTP report for a human operator. The engine never reads it back.
#[async_trait]
pub trait HttpProber: Send + Sync {
    fn name(&self) -> &str;

    async fn probe(&self, wordlist: &Path, report: &Path) -> Result<(), ToolError>;
}

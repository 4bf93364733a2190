//! Passive enumeration collaborators. Both write one domain per line.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use subsweep_common::collaborator::{DiscoveryTool, SourceFormat, SourceSpec};
use subsweep_common::config::Config;
use subsweep_common::domain::TargetDomain;
use subsweep_common::error::ToolError;

use crate::runner::ToolCommand;

pub struct Amass {
    program: PathBuf,
    output: PathBuf,
    timeout: Duration,
}

impl Amass {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            program: cfg.tools.amass.clone(),
            output: cfg.layout.amass_output.clone(),
            timeout: cfg.tool_timeout,
        }
    }
}

#[async_trait]
impl DiscoveryTool for Amass {
    fn name(&self) -> &str {
        "amass"
    }

    fn source(&self) -> SourceSpec {
        SourceSpec::new(self.name(), &self.output, SourceFormat::PlainLines)
    }

    async fn discover(&self, target: &TargetDomain) -> Result<(), ToolError> {
        ToolCommand::new(self.name(), &self.program)
            .args(["enum", "-passive", "-d", target.as_str(), "-o"])
            .arg(&self.output)
            .timeout(self.timeout)
            .run()
            .await
    }
}

pub struct Subfinder {
    program: PathBuf,
    output: PathBuf,
    timeout: Duration,
}

impl Subfinder {
    const THREADS: &'static str = "10";

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            program: cfg.tools.subfinder.clone(),
            output: cfg.layout.subfinder_output.clone(),
            timeout: cfg.tool_timeout,
        }
    }
}

#[async_trait]
impl DiscoveryTool for Subfinder {
    fn name(&self) -> &str {
        "subfinder"
    }

    fn source(&self) -> SourceSpec {
        SourceSpec::new(self.name(), &self.output, SourceFormat::PlainLines)
    }

    async fn discover(&self, target: &TargetDomain) -> Result<(), ToolError> {
        ToolCommand::new(self.name(), &self.program)
            .args(["-d", target.as_str(), "-t", Self::THREADS, "-nW", "--silent", "-o"])
            .arg(&self.output)
            .timeout(self.timeout)
            .run()
            .await
    }
}

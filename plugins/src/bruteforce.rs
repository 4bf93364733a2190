use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use subsweep_common::collaborator::{DiscoveryTool, SourceFormat, SourceSpec};
use subsweep_common::config::Config;
use subsweep_common::domain::TargetDomain;
use subsweep_common::error::ToolError;

use crate::runner::ToolCommand;

/// Brute-force DNS enumeration. Writes an XML report.
pub struct DnsRecon {
    program: PathBuf,
    wordlist: PathBuf,
    output: PathBuf,
    timeout: Duration,
}

impl DnsRecon {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            program: cfg.tools.dnsrecon.clone(),
            wordlist: cfg.bruteforce_wordlist.clone(),
            output: cfg.layout.dnsrecon_output.clone(),
            timeout: cfg.tool_timeout,
        }
    }
}

#[async_trait]
impl DiscoveryTool for DnsRecon {
    fn name(&self) -> &str {
        "dnsrecon"
    }

    fn source(&self) -> SourceSpec {
        SourceSpec::new(self.name(), &self.output, SourceFormat::Structured)
    }

    async fn discover(&self, target: &TargetDomain) -> Result<(), ToolError> {
        ToolCommand::new(self.name(), &self.program)
            .args(["-d", target.as_str(), "-D"])
            .arg(&self.wordlist)
            .args(["-t", "brt", "--xml"])
            .arg(&self.output)
            .timeout(self.timeout)
            .run()
            .await
    }
}

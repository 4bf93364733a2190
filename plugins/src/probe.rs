use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use subsweep_common::collaborator::HttpProber;
use subsweep_common::config::Config;
use subsweep_common::error::ToolError;

use crate::runner::ToolCommand;

/// HTTP probing with title, tech and status detection.
pub struct Httpx {
    program: PathBuf,
    timeout: Duration,
}

impl Httpx {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            program: cfg.tools.httpx.clone(),
            timeout: cfg.tool_timeout,
        }
    }
}

#[async_trait]
impl HttpProber for Httpx {
    fn name(&self) -> &str {
        "httpx"
    }

    async fn probe(&self, wordlist: &Path, report: &Path) -> Result<(), ToolError> {
        ToolCommand::new(self.name(), &self.program)
            .arg("-l")
            .arg(wordlist)
            .args(["-title", "-tech-detect", "-status-code", "-o"])
            .arg(report)
            .timeout(self.timeout)
            .run()
            .await
    }
}

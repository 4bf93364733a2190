use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use subsweep_common::collaborator::ActiveResolver;
use subsweep_common::config::Config;
use subsweep_common::error::ToolError;

use crate::runner::ToolCommand;

/// Active resolution through puredns. Live domains are read from stdout.
pub struct PureDns {
    program: PathBuf,
    timeout: Duration,
}

impl PureDns {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            program: cfg.tools.puredns.clone(),
            timeout: cfg.resolver_timeout,
        }
    }
}

#[async_trait]
impl ActiveResolver for PureDns {
    fn name(&self) -> &str {
        "puredns"
    }

    async fn resolve(&self, wordlist: &Path) -> Result<Vec<String>, ToolError> {
        let stdout: String = ToolCommand::new(self.name(), &self.program)
            .arg("resolve")
            .arg(wordlist)
            .timeout(self.timeout)
            .capture()
            .await?;

        Ok(stdout.lines().map(str::to_string).collect())
    }
}

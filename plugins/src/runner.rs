//! Process runner shared by every collaborator wrapper.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use subsweep_common::error::ToolError;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// One invocation of an external executable.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    tool: String,
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

impl ToolCommand {
    pub fn new(tool: impl Into<String>, program: impl AsRef<Path>) -> Self {
        Self {
            tool: tool.into(),
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the tool and returns its standard output as text.
    pub async fn capture(&self) -> Result<String, ToolError> {
        let output: Output = self.execute(Stdio::piped()).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs the tool for its side effects, discarding standard output.
    pub async fn run(&self) -> Result<(), ToolError> {
        self.execute(Stdio::null()).await.map(|_| ())
    }

    async fn execute(&self, stdout: Stdio) -> Result<Output, ToolError> {
        debug!("{} {:?}", self.program.display(), self.args);

        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output: Output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(reason)) => {
                return Err(ToolError::Spawn {
                    tool: self.tool.clone(),
                    reason,
                });
            }
            Err(_) => {
                return Err(ToolError::TimedOut {
                    tool: self.tool.clone(),
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(ToolError::Failed {
                tool: self.tool.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output)
    }
}

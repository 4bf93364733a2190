use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::TargetDomain;

/// Everything a run needs, handed explicitly to the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: TargetDomain,
    /// Per-target directory holding every artifact of the run.
    pub layout: ArtifactLayout,
    pub tools: ToolPaths,
    /// Wordlist fed to the brute-force collaborator.
    pub bruteforce_wordlist: PathBuf,
    /// Upper bound for each discovery tool and the HTTP probe.
    pub tool_timeout: Duration,
    /// Upper bound for the active-resolution collaborator.
    pub resolver_timeout: Duration,
    /// Upper bound for a single forward lookup.
    pub lookup_timeout: Duration,
    pub lookup_concurrency: usize,
    /// Skips the HTTP probe side artifact.
    pub no_probe: bool,
}

impl Config {
    /// Defaults for `target`, writing into `<output_root>/<target>`.
    pub fn new(target: TargetDomain, output_root: impl AsRef<Path>) -> Self {
        let layout = ArtifactLayout::new(output_root.as_ref().join(target.as_str()));
        Self {
            target,
            layout,
            tools: ToolPaths::default(),
            bruteforce_wordlist: PathBuf::from(DEFAULT_BRUTEFORCE_WORDLIST),
            tool_timeout: Duration::from_secs(60 * 60),
            resolver_timeout: Duration::from_secs(30 * 60),
            lookup_timeout: Duration::from_secs(5),
            lookup_concurrency: 20,
            no_probe: false,
        }
    }
}

pub const DEFAULT_BRUTEFORCE_WORDLIST: &str = "/opt/test/light-dns-recon2.txt";

/// Locations of the collaborator executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub amass: PathBuf,
    pub subfinder: PathBuf,
    pub dnsrecon: PathBuf,
    pub puredns: PathBuf,
    pub httpx: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            amass: PathBuf::from("/root/go/bin/amass"),
            subfinder: PathBuf::from("/root/go/bin/subfinder"),
            dnsrecon: PathBuf::from("/usr/bin/dnsrecon"),
            puredns: PathBuf::from("/root/go/bin/puredns"),
            httpx: PathBuf::from("/root/go/bin/httpx"),
        }
    }
}

/// Paths of every artifact inside one target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    pub dir: PathBuf,
    pub amass_output: PathBuf,
    pub subfinder_output: PathBuf,
    pub dnsrecon_output: PathBuf,
    pub wordlist: PathBuf,
    pub all_output: PathBuf,
    pub valid_domains: PathBuf,
    pub resolved_ips: PathBuf,
    pub httpx_report: PathBuf,
    pub summary: PathBuf,
    pub lock: PathBuf,
}

impl ArtifactLayout {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir: PathBuf = dir.into();
        Self {
            amass_output: dir.join("amass_output.txt"),
            subfinder_output: dir.join("subfinder_output.txt"),
            dnsrecon_output: dir.join("dnsrecon_output.xml"),
            wordlist: dir.join("updated_wordlist.txt"),
            all_output: dir.join("all_output.txt"),
            valid_domains: dir.join("valid_domains.txt"),
            resolved_ips: dir.join("resolved-ip.txt"),
            httpx_report: dir.join("valid_domain_httpx.txt"),
            summary: dir.join("run_summary.json"),
            lock: dir.join(".subsweep.lock"),
            dir,
        }
    }
}

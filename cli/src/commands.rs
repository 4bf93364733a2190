pub mod run;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use subsweep_common::config::{Config, DEFAULT_BRUTEFORCE_WORDLIST, ToolPaths};
use subsweep_common::domain::TargetDomain;

#[derive(Parser)]
#[command(name = "subsweep")]
#[command(about = "Discover, validate and track the domain assets of a company.")]
#[command(version)]
pub struct CommandLine {
    /// Target domain
    #[arg(short, long, value_name = "TARGET_DOMAIN")]
    pub target: TargetDomain,

    /// Root directory for per-target output
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Wordlist used for brute-force enumeration
    #[arg(short = 'w', long, default_value = DEFAULT_BRUTEFORCE_WORDLIST)]
    pub wordlist: PathBuf,

    #[arg(long, default_value = "/root/go/bin/amass")]
    pub amass: PathBuf,

    #[arg(long, default_value = "/root/go/bin/subfinder")]
    pub subfinder: PathBuf,

    #[arg(long, default_value = "/usr/bin/dnsrecon")]
    pub dnsrecon: PathBuf,

    #[arg(long, default_value = "/root/go/bin/puredns")]
    pub puredns: PathBuf,

    #[arg(long, default_value = "/root/go/bin/httpx")]
    pub httpx: PathBuf,

    /// Seconds each discovery tool and the HTTP probe may run
    #[arg(long, default_value_t = 3600)]
    pub tool_timeout: u64,

    /// Seconds the active resolver may run
    #[arg(long, default_value_t = 1800)]
    pub resolver_timeout: u64,

    /// Milliseconds a single IP lookup may take
    #[arg(long, default_value_t = 5000)]
    pub lookup_timeout: u64,

    /// Concurrent IP lookups
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Skip HTTP probing
    #[arg(long)]
    pub no_probe: bool,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let mut cfg = Config::new(self.target.clone(), &self.output);
        cfg.tools = ToolPaths {
            amass: self.amass.clone(),
            subfinder: self.subfinder.clone(),
            dnsrecon: self.dnsrecon.clone(),
            puredns: self.puredns.clone(),
            httpx: self.httpx.clone(),
        };
        cfg.bruteforce_wordlist = self.wordlist.clone();
        cfg.tool_timeout = Duration::from_secs(self.tool_timeout);
        cfg.resolver_timeout = Duration::from_secs(self.resolver_timeout);
        cfg.lookup_timeout = Duration::from_millis(self.lookup_timeout);
        cfg.lookup_concurrency = usize::from(self.concurrency);
        cfg.no_probe = self.no_probe;
        cfg
    }
}

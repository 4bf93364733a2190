use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use subsweep_common::collaborator::{
    ActiveResolver, DiscoveryTool, HttpProber, SourceFormat, SourceSpec,
};
use subsweep_common::config::Config;
use subsweep_common::domain::TargetDomain;
use subsweep_common::error::{LookupError, ToolError};
use subsweep_core::Collaborators;
use subsweep_core::resolve::HostLookup;

/// Writes fixed lines to its artifact, or fails without writing anything.
pub struct FakeDiscovery {
    pub name: &'static str,
    pub path: PathBuf,
    pub format: SourceFormat,
    pub lines: Option<Vec<&'static str>>,
}

#[async_trait]
impl DiscoveryTool for FakeDiscovery {
    fn name(&self) -> &str {
        self.name
    }

    fn source(&self) -> SourceSpec {
        SourceSpec::new(self.name, &self.path, self.format)
    }

    async fn discover(&self, _target: &TargetDomain) -> Result<(), ToolError> {
        match &self.lines {
            Some(lines) => {
                let mut contents = lines.join("\n");
                contents.push('\n');
                tokio::fs::write(&self.path, contents).await.map_err(|reason| ToolError::Spawn {
                    tool: self.name.to_string(),
                    reason,
                })
            }
            None => Err(ToolError::Failed {
                tool: self.name.to_string(),
                code: Some(1),
                stderr: "no API keys configured".to_string(),
            }),
        }
    }
}

/// Echoes a fixed answer and counts how often it was asked.
pub struct FakeResolver {
    pub answer: Option<Vec<&'static str>>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ActiveResolver for FakeResolver {
    fn name(&self) -> &str {
        "fake-puredns"
    }

    async fn resolve(&self, wordlist: &Path) -> Result<Vec<String>, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(wordlist.exists(), "wordlist must be written before resolution");
        match &self.answer {
            Some(lines) => Ok(lines.iter().map(|l| l.to_string()).collect()),
            None => Err(ToolError::Failed {
                tool: "fake-puredns".to_string(),
                code: Some(2),
                stderr: "resolvers unreachable".to_string(),
            }),
        }
    }
}

pub struct FakeProber;

#[async_trait]
impl HttpProber for FakeProber {
    fn name(&self) -> &str {
        "fake-httpx"
    }

    async fn probe(&self, wordlist: &Path, report: &Path) -> Result<(), ToolError> {
        let contents = tokio::fs::read_to_string(wordlist).await.unwrap_or_default();
        let probed: String = contents.lines().map(|l| format!("https://{l} [200]\n")).collect();
        tokio::fs::write(report, probed).await.map_err(|reason| ToolError::Spawn {
            tool: "fake-httpx".to_string(),
            reason,
        })
    }
}

/// Deterministic DNS: every known domain gets one address, `slow.` names hang.
pub struct FakeLookup {
    pub known: HashMap<String, IpAddr>,
}

impl FakeLookup {
    pub fn for_domains(domains: &[&str]) -> Self {
        let known = domains
            .iter()
            .enumerate()
            .map(|(i, d)| (d.to_string(), IpAddr::V4(Ipv4Addr::new(192, 0, 2, i as u8 + 1))))
            .collect();
        Self { known }
    }
}

#[async_trait]
impl HostLookup for FakeLookup {
    async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>, LookupError> {
        if domain.starts_with("slow.") {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        self.known
            .get(domain)
            .map(|ip| vec![*ip])
            .ok_or_else(|| LookupError::Resolve("NXDOMAIN".to_string()))
    }
}

pub struct Scenario {
    pub passive: Option<Vec<&'static str>>,
    pub bruteforce: Option<Vec<&'static str>>,
    pub resolver: Option<Vec<&'static str>>,
    pub dns: Vec<&'static str>,
}

/// Builds collaborators that write into the layout of `cfg`.
pub fn collaborators(cfg: &Config, scenario: Scenario, calls: Arc<AtomicUsize>) -> Collaborators {
    Collaborators {
        discovery: vec![
            Arc::new(FakeDiscovery {
                name: "passive",
                path: cfg.layout.subfinder_output.clone(),
                format: SourceFormat::PlainLines,
                lines: scenario.passive,
            }),
            Arc::new(FakeDiscovery {
                name: "bruteforce",
                path: cfg.layout.dnsrecon_output.clone(),
                format: SourceFormat::Structured,
                lines: scenario.bruteforce,
            }),
        ],
        resolver: Box::new(FakeResolver {
            answer: scenario.resolver,
            calls,
        }),
        prober: Some(Box::new(FakeProber)),
        lookup: Arc::new(FakeLookup::for_domains(&scenario.dns)),
    }
}

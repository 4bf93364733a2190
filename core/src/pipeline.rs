//! # Recon Pipeline
//!
//! Runs one pass for one target:
//! `Lock → Load previous → Clear stale sources → Discover → Aggregate →
//! Resolve-Valid (‖ HTTP probe) → {Resolve-IPs, Compute-Delta} → Persist → Report`.
//!
//! Stages never re-enter an earlier stage. Per-source, per-tool and per-domain failures end up in
//! the [`RunReport`]; only lock and persistence failures abort the run. When no trustworthy
//! valid set was produced the previous one is kept, and the delta is marked unavailable.

use std::sync::Arc;
use std::time::{Duration, Instant};

use subsweep_common::collaborator::{ActiveResolver, DiscoveryTool, HttpProber, SourceSpec};
use subsweep_common::config::Config;
use subsweep_common::domain::ValidDomainSet;
use subsweep_common::error::{PipelineError, ToolError};
use tokio::task::JoinSet;
use tracing::{Instrument, error, info, info_span, warn};

use crate::aggregate::{SourceReport, aggregate};
use crate::delta::{Delta, DeltaUnavailable, delta};
use crate::lock::TargetLock;
use crate::resolve::{HostLookup, IpResolution, IpResolver};
use crate::store::{RunStore, RunSummary, ToolFailureReport};
use crate::validity::resolve_valid;

/// The external parties a run talks to.
pub struct Collaborators {
    pub discovery: Vec<Arc<dyn DiscoveryTool>>,
    pub resolver: Box<dyn ActiveResolver>,
    pub prober: Option<Box<dyn HttpProber>>,
    pub lookup: Arc<dyn HostLookup>,
}

/// Everything a finished run has to say.
#[derive(Debug)]
pub struct RunReport {
    pub target: String,
    pub elapsed: Duration,
    pub identified: usize,
    pub sources: Vec<SourceReport>,
    pub tool_failures: Vec<ToolFailureReport>,
    /// Set when `valid` is not trustworthy. The previous valid domains were kept and `delta`
    /// carries no meaning.
    pub delta_unavailable: Option<DeltaUnavailable>,
    pub valid: ValidDomainSet,
    pub resolution: IpResolution,
    pub delta: Delta,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            target: self.target.clone(),
            elapsed_secs: self.elapsed.as_secs(),
            identified_domains: self.identified,
            valid_domains: self.valid.len(),
            resolved_domains: self.resolution.resolved.len(),
            resolved_addresses: self.resolution.resolved.address_count(),
            lookup_failures: self
                .resolution
                .failures
                .iter()
                .map(|f| f.domain.clone())
                .collect(),
            had_previous: self.delta.had_previous,
            new_domains: self.delta.new_domains.iter().cloned().collect(),
            delta_unavailable: self.delta_unavailable,
            sources: self.sources.clone(),
            tool_failures: self.tool_failures.clone(),
        }
    }
}

pub struct Pipeline {
    cfg: Config,
    collaborators: Collaborators,
}

impl Pipeline {
    pub fn new(cfg: Config, collaborators: Collaborators) -> Self {
        Self { cfg, collaborators }
    }

    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        let started = Instant::now();
        let store = RunStore::new(self.cfg.layout.clone());
        store.prepare().await?;
        let _lock = TargetLock::acquire(&store.layout().lock)?;

        let previous = store.load_previous().await;

        let sources: Vec<SourceSpec> =
            self.collaborators.discovery.iter().map(|t| t.source()).collect();
        store.clear_stale(sources.iter().map(|s| s.path.as_path())).await;

        let mut tool_failures: Vec<ToolFailureReport> = self
            .discover()
            .instrument(info_span!("discovery"))
            .await
            .iter()
            .map(failure_report)
            .collect();

        let aggregation = aggregate(&sources).instrument(info_span!("aggregate")).await;
        store.write_wordlist(&aggregation.wordlist).await?;
        info!("Number of identified domains: {}", aggregation.wordlist.len());

        let active = self.collaborators.resolver.as_ref();
        let (validity, probe) = tokio::join!(
            resolve_valid(&store.layout().wordlist, &aggregation.wordlist, active)
                .instrument(info_span!("validity")),
            self.probe().instrument(info_span!("probe")),
        );
        if let Some(e) = &validity.failure {
            tool_failures.push(failure_report(e));
        }
        if let Some(e) = probe {
            tool_failures.push(failure_report(&e));
        }

        let resolver = IpResolver::new(
            Arc::clone(&self.collaborators.lookup),
            self.cfg.lookup_concurrency,
            self.cfg.lookup_timeout,
        );
        let resolution = resolver
            .resolve(validity.domains.iter())
            .instrument(info_span!("resolve_ips"))
            .await;
        if resolution.resolved.is_empty() && !validity.domains.is_empty() {
            warn!("None of the {} valid domains resolved", validity.domains.len());
        }
        let delta = delta(previous.as_ref(), validity.domains.domains());

        let delta_unavailable = if aggregation.total_outage() {
            Some(DeltaUnavailable::SourcesUnavailable)
        } else if validity.failure.is_some() {
            Some(DeltaUnavailable::ResolverFailed)
        } else {
            None
        };

        store.persist_all_output().await?;
        match delta_unavailable {
            None => store.persist_valid(&validity.domains).await?,
            Some(reason) => warn!("Keeping previous valid domains, {}", reason.describe()),
        }
        store.write_ip_report(&resolution.resolved).await?;

        let report = RunReport {
            target: self.cfg.target.to_string(),
            elapsed: started.elapsed(),
            identified: aggregation.wordlist.len(),
            sources: aggregation.reports,
            tool_failures,
            delta_unavailable,
            valid: validity.domains,
            resolution,
            delta,
        };
        store.write_summary(&report.summary()).await?;

        Ok(report)
    }

    /// Runs every discovery tool concurrently. They write disjoint artifacts.
    async fn discover(&self) -> Vec<ToolError> {
        let mut workers: JoinSet<(usize, Result<(), ToolError>)> = JoinSet::new();
        for (idx, tool) in self.collaborators.discovery.iter().enumerate() {
            let tool = Arc::clone(tool);
            let target = self.cfg.target.clone();
            workers.spawn(async move {
                info!("Running {}", tool.name());
                (idx, tool.discover(&target).await)
            });
        }

        let mut failures: Vec<(usize, ToolError)> = Vec::new();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((idx, Ok(()))) => {
                    info!("{} completed", self.collaborators.discovery[idx].name())
                }
                Ok((idx, Err(e))) => {
                    error!("Error running {}: {e}", self.collaborators.discovery[idx].name());
                    failures.push((idx, e));
                }
                Err(e) => error!("Discovery worker aborted: {e}"),
            }
        }

        failures.sort_by_key(|(idx, _)| *idx);
        failures.into_iter().map(|(_, e)| e).collect()
    }

    async fn probe(&self) -> Option<ToolError> {
        if self.cfg.no_probe {
            return None;
        }
        let prober = self.collaborators.prober.as_ref()?;

        info!("Running {} for HTTP probing", prober.name());
        match prober.probe(&self.cfg.layout.wordlist, &self.cfg.layout.httpx_report).await {
            Ok(()) => {
                info!("{} completed", prober.name());
                None
            }
            Err(e) => {
                error!("Error running {}: {e}", prober.name());
                Some(e)
            }
        }
    }
}

fn failure_report(e: &ToolError) -> ToolFailureReport {
    ToolFailureReport {
        tool: e.tool().to_string(),
        reason: e.to_string(),
    }
}

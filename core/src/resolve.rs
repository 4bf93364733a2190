//! Forward resolution of valid domains to IP addresses.
//!
//! Lookups run on a bounded worker pool. Each domain succeeds or fails on its own; a failing
//! domain is reported and left out of the [`ResolvedIpMap`].

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use subsweep_common::domain::ResolvedIpMap;
use subsweep_common::error::LookupError;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Resolves one name to its addresses.
#[async_trait]
pub trait HostLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>, LookupError>;
}

/// Uses the operating system resolver, returning IPv4 and IPv6 addresses.
pub struct SystemLookup;

#[async_trait]
impl HostLookup for SystemLookup {
    async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>, LookupError> {
        let addrs = tokio::net::lookup_host((domain, 0))
            .await
            .map_err(|e| LookupError::Resolve(e.to_string()))?;

        let mut ips: Vec<IpAddr> = Vec::new();
        for addr in addrs {
            if !ips.contains(&addr.ip()) {
                ips.push(addr.ip());
            }
        }
        Ok(ips)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub domain: String,
    pub error: LookupError,
}

#[derive(Debug, Default)]
pub struct IpResolution {
    pub resolved: ResolvedIpMap,
    pub failures: Vec<LookupFailure>,
}

pub struct IpResolver {
    lookup: Arc<dyn HostLookup>,
    concurrency: usize,
    timeout: Duration,
}

impl IpResolver {
    pub fn new(lookup: Arc<dyn HostLookup>, concurrency: usize, timeout: Duration) -> Self {
        Self {
            lookup,
            concurrency: concurrency.max(1),
            timeout,
        }
    }

    pub async fn resolve<'a, I>(&self, domains: I) -> IpResolution
    where
        I: IntoIterator<Item = &'a String>,
    {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut workers: JoinSet<(String, Result<Vec<IpAddr>, LookupError>)> = JoinSet::new();
        // domains whose worker has not reported back yet
        let mut pending: BTreeSet<String> = BTreeSet::new();

        for domain in domains {
            let domain: String = domain.clone();
            pending.insert(domain.clone());
            let lookup = Arc::clone(&self.lookup);
            let semaphore = Arc::clone(&semaphore);
            let timeout = self.timeout;

            workers.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (domain, Err(LookupError::Resolve("worker pool closed".into())));
                };
                let result = match tokio::time::timeout(timeout, lookup.lookup(&domain)).await {
                    Ok(Ok(ips)) if ips.is_empty() => Err(LookupError::NoAddresses),
                    Ok(result) => result,
                    Err(_) => Err(LookupError::TimedOut(timeout)),
                };
                (domain, result)
            });
        }

        let mut resolution = IpResolution::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((domain, Ok(ips))) => {
                    debug!("{domain} -> {ips:?}");
                    pending.remove(&domain);
                    resolution.resolved.insert(domain, ips);
                }
                Ok((domain, Err(e))) => {
                    warn!("Error resolving IP for domain {domain}: {e}");
                    pending.remove(&domain);
                    resolution.failures.push(LookupFailure { domain, error: e });
                }
                Err(e) => error!("Lookup worker aborted: {e}"),
            }
        }

        // an aborted worker never hands its domain back
        for domain in pending {
            resolution.failures.push(LookupFailure {
                domain,
                error: LookupError::Resolve("lookup worker aborted".into()),
            });
        }

        resolution.failures.sort_by(|a, b| a.domain.cmp(&b.domain));
        resolution
    }
}

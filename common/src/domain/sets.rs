//! Domain sets flowing through one run.
//!
//! All sets are backed by [`BTreeSet`], so every member is unique and serialization is
//! always in lexicographic order. Identical inputs therefore yield byte-identical artifacts.

use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use super::normalize;

/// Normalized candidates contributed by a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    source: String,
    location: PathBuf,
    domains: BTreeSet<String>,
}

impl CandidateSet {
    /// Builds a set from raw lines. Every line is normalized and blank results are dropped.
    pub fn from_lines<I, S>(
        source: impl Into<String>,
        location: impl Into<PathBuf>,
        lines: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            source: source.into(),
            location: location.into(),
            domains: collect_normalized(lines),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn domains(&self) -> &BTreeSet<String> {
        &self.domains
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// The deduplicated union of every candidate set of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalWordlist(BTreeSet<String>);

impl CanonicalWordlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions a candidate set into the wordlist.
    pub fn merge(&mut self, candidates: CandidateSet) {
        self.0.extend(candidates.domains);
    }

    pub fn domains(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One domain per line, sorted.
    pub fn to_artifact(&self) -> String {
        render_lines(self.0.iter())
    }
}

impl FromIterator<CandidateSet> for CanonicalWordlist {
    fn from_iter<T: IntoIterator<Item = CandidateSet>>(iter: T) -> Self {
        let mut wordlist = Self::new();
        for candidates in iter {
            wordlist.merge(candidates);
        }
        wordlist
    }
}

/// Domains confirmed live by the active-resolution collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidDomainSet(BTreeSet<String>);

impl ValidDomainSet {
    /// Normalizes the collaborator output again, since it may reintroduce the `www.` prefix.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(collect_normalized(lines))
    }

    pub fn domains(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_artifact(&self) -> String {
        render_lines(self.0.iter())
    }
}

/// Valid domains mapped to the addresses they resolved to.
///
/// A domain is only ever present with at least one address. A missing key means the lookup failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedIpMap(BTreeMap<String, Vec<IpAddr>>);

impl ResolvedIpMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the addresses of `domain`. Returns `false` and stores nothing for an empty list.
    pub fn insert(&mut self, domain: String, addresses: Vec<IpAddr>) -> bool {
        if addresses.is_empty() {
            return false;
        }
        self.0.insert(domain, addresses);
        true
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.0.contains_key(domain)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<IpAddr>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of addresses across all domains.
    pub fn address_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// `domain: ip1, ip2` per line.
    pub fn to_report(&self) -> String {
        let mut report = String::new();
        for (domain, addresses) in &self.0 {
            let joined: Vec<String> = addresses.iter().map(IpAddr::to_string).collect();
            report.push_str(&format!("{domain}: {}\n", joined.join(", ")));
        }
        report
    }
}

fn collect_normalized<I, S>(lines: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| normalize(line.as_ref()))
        .filter(|domain| !domain.is_empty())
        .collect()
}

fn render_lines<'a>(domains: impl Iterator<Item = &'a String>) -> String {
    let mut out = String::new();
    for domain in domains {
        out.push_str(domain);
        out.push('\n');
    }
    out
}

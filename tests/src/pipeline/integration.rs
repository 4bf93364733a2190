#![cfg(test)]
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use subsweep_common::config::Config;
use subsweep_common::domain::TargetDomain;
use subsweep_common::error::PipelineError;
use subsweep_core::delta::{DeltaOutcome, DeltaUnavailable};
use subsweep_core::lock::TargetLock;
use subsweep_core::{Pipeline, RunReport};

use super::fakes::{Scenario, collaborators};

fn config(root: &Path) -> Config {
    let mut cfg = Config::new(TargetDomain::from_str("example.com").unwrap(), root);
    cfg.lookup_timeout = Duration::from_millis(200);
    cfg.lookup_concurrency = 4;
    cfg
}

fn standard() -> Scenario {
    Scenario {
        passive: Some(vec!["a.example.com", "b.example.com"]),
        bruteforce: Some(vec!["www.b.example.com", "c.example.com"]),
        resolver: Some(vec!["a.example.com", "www.a.example.com", "b.example.com"]),
        dns: vec!["a.example.com", "b.example.com", "c.example.com", "d.example.com"],
    }
}

async fn run(cfg: &Config, scenario: Scenario) -> (Result<RunReport, PipelineError>, usize) {
    let calls = Arc::new(AtomicUsize::new(0));
    let collaborators = collaborators(cfg, scenario, calls.clone());
    let result = Pipeline::new(cfg.clone(), collaborators).run().await;
    (result, calls.load(Ordering::SeqCst))
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn first_run_merges_validates_and_persists() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());

    let (result, calls) = run(&cfg, standard()).await;
    let report = result.unwrap();

    assert_eq!(calls, 1);
    assert_eq!(report.identified, 3);
    assert!(report.tool_failures.is_empty());
    assert_eq!(report.delta.outcome(), DeltaOutcome::NoPreviousState);

    let layout = &cfg.layout;
    assert_eq!(read(&layout.wordlist), "a.example.com\nb.example.com\nc.example.com\n");
    assert_eq!(read(&layout.all_output), read(&layout.wordlist));
    assert_eq!(read(&layout.valid_domains), "a.example.com\nb.example.com\n");
    assert_eq!(
        read(&layout.resolved_ips),
        "a.example.com: 192.0.2.1\nb.example.com: 192.0.2.2\n"
    );
    assert!(read(&layout.httpx_report).contains("https://c.example.com [200]"));
    assert!(read(&layout.summary).contains("\"identified_domains\": 3"));
    assert!(
        TargetLock::acquire(&layout.lock).is_ok(),
        "lock must be released after the run"
    );
}

#[tokio::test]
async fn second_run_reports_new_domains() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    run(&cfg, standard()).await.0.unwrap();

    let mut next = standard();
    next.passive = Some(vec!["a.example.com", "d.example.com"]);
    next.resolver = Some(vec!["a.example.com", "b.example.com", "d.example.com"]);
    let report = run(&cfg, next).await.0.unwrap();

    match report.delta.outcome() {
        DeltaOutcome::NewDomains(domains) => {
            let names: Vec<&str> = domains.iter().map(String::as_str).collect();
            assert_eq!(names, vec!["d.example.com"]);
        }
        other => panic!("expected new domains, got {other:?}"),
    }
    assert!(report.delta.new_domains.is_subset(report.valid.domains()));
}

#[tokio::test]
async fn unchanged_run_reports_no_new_domains() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    run(&cfg, standard()).await.0.unwrap();

    let report = run(&cfg, standard()).await.0.unwrap();

    assert!(report.delta.had_previous);
    assert_eq!(report.delta.outcome(), DeltaOutcome::NoNewDomains);
}

#[tokio::test]
async fn resolver_failure_keeps_previous_state() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    run(&cfg, standard()).await.0.unwrap();
    let before = read(&cfg.layout.valid_domains);

    let mut broken = standard();
    broken.resolver = None;
    let report = run(&cfg, broken).await.0.unwrap();

    assert_eq!(report.delta_unavailable, Some(DeltaUnavailable::ResolverFailed));
    assert!(report.valid.is_empty());
    assert!(report.resolution.resolved.is_empty());
    assert_eq!(report.tool_failures.len(), 1);
    assert_eq!(report.tool_failures[0].tool, "fake-puredns");
    assert_eq!(read(&cfg.layout.valid_domains), before);
}

#[tokio::test]
async fn failing_sources_still_complete_the_run() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());

    let scenario = Scenario {
        passive: None,
        bruteforce: None,
        ..standard()
    };
    let (result, calls) = run(&cfg, scenario).await;
    let report = result.unwrap();

    assert_eq!(calls, 0, "an empty wordlist is never handed to the resolver");
    assert_eq!(report.identified, 0);
    assert_eq!(report.tool_failures.len(), 2);
    assert_eq!(report.sources.len(), 2);
    assert!(report.valid.is_empty());
    assert_eq!(report.delta_unavailable, Some(DeltaUnavailable::SourcesUnavailable));
    assert_eq!(read(&cfg.layout.wordlist), "");
    assert!(!cfg.layout.valid_domains.exists());
}

#[tokio::test]
async fn total_outage_keeps_baseline_for_next_run() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    run(&cfg, standard()).await.0.unwrap();
    let baseline = read(&cfg.layout.valid_domains);

    let outage = Scenario {
        passive: None,
        bruteforce: None,
        ..standard()
    };
    let report = run(&cfg, outage).await.0.unwrap();

    assert_eq!(report.delta_unavailable, Some(DeltaUnavailable::SourcesUnavailable));
    assert_eq!(read(&cfg.layout.valid_domains), baseline);
    assert!(read(&cfg.layout.summary).contains("\"delta_unavailable\": \"sources_unavailable\""));

    let mut recovered = standard();
    recovered.passive = Some(vec!["a.example.com", "d.example.com"]);
    recovered.resolver = Some(vec!["a.example.com", "b.example.com", "d.example.com"]);
    let report = run(&cfg, recovered).await.0.unwrap();

    assert_eq!(report.delta_unavailable, None);
    let expected = ["d.example.com".to_string()].into_iter().collect();
    assert_eq!(report.delta.outcome(), DeltaOutcome::NewDomains(&expected));
}

#[tokio::test]
async fn stale_artifact_of_failed_tool_is_not_reused() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    run(&cfg, standard()).await.0.unwrap();

    let mut partial = standard();
    partial.bruteforce = None;
    let report = run(&cfg, partial).await.0.unwrap();

    assert_eq!(report.identified, 2);
    assert!(!read(&cfg.layout.wordlist).contains("c.example.com"));
}

#[tokio::test]
async fn one_slow_lookup_is_omitted() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());

    let mut scenario = standard();
    scenario.passive = Some(vec!["a.example.com", "slow.example.com"]);
    scenario.resolver = Some(vec!["a.example.com", "slow.example.com"]);
    scenario.dns = vec!["a.example.com", "slow.example.com"];
    let report = run(&cfg, scenario).await.0.unwrap();

    assert_eq!(report.valid.len(), 2);
    assert!(report.resolution.resolved.contains("a.example.com"));
    assert!(!report.resolution.resolved.contains("slow.example.com"));
    assert_eq!(report.resolution.failures.len(), 1);
    assert_eq!(read(&cfg.layout.resolved_ips), "a.example.com: 192.0.2.1\n");
}

#[tokio::test]
async fn concurrent_run_on_same_target_is_refused() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    fs::create_dir_all(&cfg.layout.dir).unwrap();
    let _held = TargetLock::acquire(&cfg.layout.lock).unwrap();

    let (result, calls) = run(&cfg, standard()).await;

    assert!(matches!(result, Err(PipelineError::Lock(_))));
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn lock_file_left_by_killed_run_is_reclaimed() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    fs::create_dir_all(&cfg.layout.dir).unwrap();
    fs::write(&cfg.layout.lock, "4194304\n").unwrap();

    let (result, calls) = run(&cfg, standard()).await;

    assert!(result.is_ok());
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn unwritable_output_is_fatal() {
    let root = tempfile::tempdir().unwrap();
    let cfg = config(root.path());
    fs::write(&cfg.layout.dir, "not a directory").unwrap();

    let (result, _) = run(&cfg, standard()).await;

    assert!(matches!(result, Err(PipelineError::Persist(_))));
}

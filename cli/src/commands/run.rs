use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use colored::*;
use subsweep_common::config::Config;
use subsweep_core::aggregate::SourceOutcome;
use subsweep_core::delta::{DeltaOutcome, DeltaUnavailable};
use subsweep_core::resolve::SystemLookup;
use subsweep_core::{Collaborators, Pipeline, RunReport};
use subsweep_plugins::{Httpx, PureDns};
use tracing::{Instrument, info_span, warn};

use crate::terminal::{colors, print};

pub async fn run(cfg: Config) -> anyhow::Result<()> {
    print::aligned_line("Target", cfg.target.as_str().bold());
    print::aligned_line("Output", cfg.layout.dir.display());

    let collaborators = Collaborators {
        discovery: subsweep_plugins::discovery_tools(&cfg)
            .into_iter()
            .map(Arc::from)
            .collect(),
        resolver: Box::new(PureDns::from_config(&cfg)),
        prober: Some(Box::new(Httpx::from_config(&cfg))),
        lookup: Arc::new(SystemLookup),
    };

    let pipeline = Pipeline::new(cfg, collaborators);
    // dropping the run releases the target lock and kills running tools
    let report: RunReport = tokio::select! {
        result = pipeline.run().instrument(info_span!("recon")) => {
            result.context("recon run aborted")?
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping running tools");
            anyhow::bail!("recon run interrupted");
        }
    };

    print_summary(&report);
    Ok(())
}

fn print_summary(report: &RunReport) {
    print::header("summary");

    print::aligned_line("Identified domains", report.identified.to_string().bold().green());
    if report.delta_unavailable == Some(DeltaUnavailable::ResolverFailed) {
        print::aligned_line("Valid domains", "resolver failed".color(colors::FAILURE));
    } else {
        print::aligned_line("Valid domains", report.valid.len().to_string().bold().green());
    }
    print::aligned_line(
        "Resolved IPs",
        format!(
            "{} domains, {} addresses",
            report.resolution.resolved.len(),
            report.resolution.resolved.address_count()
        )
        .color(colors::IPV4_ADDR),
    );

    print_failures(report);
    print_delta(report);

    print::fat_separator();
    print::centerln(&format!(
        "Time needed to complete the scan: {}",
        elapsed(report.elapsed).bold().yellow()
    ));
}

fn print_failures(report: &RunReport) {
    let mut details: Vec<(String, ColoredString)> = Vec::new();

    for source in &report.sources {
        if let SourceOutcome::Unavailable { reason } = &source.outcome {
            details.push((format!("source {}", source.name), reason.color(colors::WARNING)));
        }
    }
    for failure in &report.tool_failures {
        details.push((format!("tool {}", failure.tool), failure.reason.color(colors::FAILURE)));
    }
    for failure in &report.resolution.failures {
        details.push((
            format!("lookup {}", failure.domain),
            failure.error.to_string().color(colors::WARNING),
        ));
    }

    if details.is_empty() {
        return;
    }
    print::aligned_line("Problems", details.len().to_string().color(colors::WARNING));
    print::as_tree_one_level(&details);
}

fn print_delta(report: &RunReport) {
    if let Some(reason) = report.delta_unavailable {
        let message = format!("unavailable, {}", reason.describe());
        print::aligned_line("Delta", message.color(colors::FAILURE));
        return;
    }

    match report.delta.outcome() {
        DeltaOutcome::NoPreviousState => print::aligned_line(
            "Delta",
            "previous scan data not found, cannot determine delta domains".color(colors::WARNING),
        ),
        DeltaOutcome::NoNewDomains => {
            print::aligned_line("Delta", "no new domains found since last scan".green())
        }
        DeltaOutcome::NewDomains(domains) => {
            print::aligned_line(
                "New domains",
                domains.len().to_string().bold().color(colors::ACCENT),
            );
            let details: Vec<(String, ColoredString)> = domains
                .iter()
                .map(|d| ("+".to_string(), d.as_str().color(colors::ACCENT)))
                .collect();
            print::as_tree_one_level(&details);
        }
    }
}

fn elapsed(total: Duration) -> String {
    let secs = total.as_secs();
    format!("{} minutes ({:.2}s)", secs / 60, total.as_secs_f64())
}

//! Output formatting module
//!
//! Handles:
//! - Human-readable scan results grouped by set
//! - Human-readable set and filter listings
//! - Summary statistics

use anyhow::Result;
use std::collections::BTreeMap;

use triageset::definitions::ReconcileReport;
use triageset::models::{HitRecord, ScanOutput, ScanSummary, SetSummary};

/// Format scan output in human-readable format
pub fn format_human(output: &ScanOutput) -> Result<()> {
    if output.hits.is_empty() {
        println!("No interesting files found.");
    } else {
        let mut by_set: BTreeMap<&str, Vec<&HitRecord>> = BTreeMap::new();
        for hit in &output.hits {
            by_set.entry(hit.set.as_str()).or_default().push(hit);
        }

        println!(
            "Found {} interesting files in {} sets:\n",
            output.hits.len(),
            by_set.len()
        );

        for (set, mut hits) in by_set {
            hits.sort_by(|a, b| a.path.cmp(&b.path));
            println!("{}:", set);
            for hit in hits {
                println!("  {} ({})", hit.path, hit.rule);
            }
            println!();
        }
    }

    print_summary(&output.ingest_filter, &output.summary);
    Ok(())
}

fn print_summary(ingest_filter: &str, summary: &ScanSummary) {
    println!("Scan Summary:");
    println!("  Ingest filter: {}", ingest_filter);
    println!("  Discovered: {} entries", summary.discovered);
    println!("  Examined: {} entries", summary.examined);

    if summary.filtered_out > 0 {
        println!("  Filtered out: {} entries", summary.filtered_out);
    }
    println!("  Hits: {}", summary.hits);
    if summary.skipped_unreadable > 0 {
        println!("  Skipped (unreadable): {} entries", summary.skipped_unreadable);
    }
    if summary.errors > 0 {
        println!("  Errors: {}", summary.errors);
    }

    let duration_sec = summary.duration_ms as f64 / 1000.0;
    if duration_sec < 1.0 {
        println!("  Duration: {}ms", summary.duration_ms);
    } else {
        println!("  Duration: {:.2}s", duration_sec);
    }

    if let Some(true) = summary.interrupted {
        println!("  Status: Interrupted by user");
    }
}

/// List sets with their rules
pub fn format_sets(heading: &str, sets: &[SetSummary]) {
    if sets.is_empty() {
        println!("No {} defined.", heading.to_lowercase());
        return;
    }

    println!("{} ({}):\n", heading, sets.len());
    for set in sets {
        let origin = if set.standard {
            format!("standard, v{}", set.version)
        } else {
            "custom".to_string()
        };
        println!("{} [{}]", set.name, origin);
        if !set.description.is_empty() {
            println!("  {}", set.description);
        }
        if set.ignore_known_files {
            println!("  ignores known files");
        }
        if set.ignore_unallocated_space {
            println!("  ignores unallocated space");
        }
        for rule in &set.rules {
            println!("  - {}: {}", rule.name, rule.conditions.join(", "));
        }
        println!();
    }
}

pub fn format_reconcile(report: &ReconcileReport) {
    if report.is_empty() {
        println!("Standard sets are up to date.");
        return;
    }

    for name in &report.added {
        println!("Added standard set: {}", name);
    }
    for change in &report.upgraded {
        println!("Upgraded {}: v{} -> v{}", change.name, change.from, change.to);
    }
    for rename in &report.renamed {
        println!("Renamed custom set: {} -> {}", rename.from, rename.to);
    }
}

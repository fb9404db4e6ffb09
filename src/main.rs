#![forbid(unsafe_code)]

mod cli;
mod output;

use anyhow::{anyhow, Context, Result};
use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use cli::CliCommand;
use triageset::config::TriageConfiguration;
use triageset::definitions::{DefinitionsManager, DefinitionsStore};
use triageset::ingest::{CollectingSink, JobSettings, JobSnapshotTable, LogInbox, OpenCase};
use triageset::logging::{self, EventLogger};
use triageset::models::{HitRecord, ScanConfig, ScanOutput, ScanSummary, SetSummary};
use triageset::pipeline::{self, JobContext, JobSpec};
use triageset::scan::{self, ExtensionMimeClassifier};

fn main() -> Result<()> {
    let args = cli::parse_args()?;

    let (config, config_path) = TriageConfiguration::load(args.config_path.as_deref())
        .context("Failed to load configuration")?;
    logging::init_logging(config.log_level()?)?;
    config.ensure_directories()?;

    let events = EventLogger::default();
    events.log_startup(&config_path, &config.definitions.directory);

    let store = Arc::new(DefinitionsStore::open(&config.definitions.directory));
    let manager =
        DefinitionsManager::new(store).with_standard_sets_dir(config.definitions.standard_sets_dir.clone());

    match args.command {
        CliCommand::Scan(scan_config) => run_scan(&config, &manager, &events, &scan_config),
        CliCommand::ListSets { json_output } => {
            reconcile_quietly(&manager, &events);
            let sets = manager
                .interesting_sets()
                .context("Failed to load interesting files sets")?;
            let summaries: Vec<SetSummary> = sets.values().map(SetSummary::from).collect();
            print_sets("Interesting files sets", &summaries, json_output)
        }
        CliCommand::ReconcileSets => {
            let report = manager
                .reconcile_on_startup()
                .context("Failed to save reconciled definitions")?;
            events.log_reconcile(&report);
            output::format_reconcile(&report);
            Ok(())
        }
        CliCommand::ListFilters { json_output } => {
            let filters = manager
                .ingest_filters()
                .context("Failed to load file ingest filters")?;
            let summaries: Vec<SetSummary> = filters.values().map(SetSummary::from).collect();
            print_sets("File ingest filters", &summaries, json_output)
        }
    }
}

/// Startup reconciliation; failures are logged and the command continues
fn reconcile_quietly(manager: &DefinitionsManager, events: &EventLogger) {
    match manager.reconcile_on_startup() {
        Ok(report) if !report.is_empty() => events.log_reconcile(&report),
        Ok(_) => {}
        Err(e) => warn!("Standard sets not reconciled: {}", e),
    }
}

fn print_sets(heading: &str, summaries: &[SetSummary], json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(summaries)?);
    } else {
        output::format_sets(heading, summaries);
    }
    Ok(())
}

fn run_scan(
    config: &TriageConfiguration,
    manager: &DefinitionsManager,
    events: &EventLogger,
    scan_config: &ScanConfig,
) -> Result<()> {
    // Set up interrupt handling
    let interrupted = Arc::new(AtomicBool::new(false));
    let _ = signal_hook::flag::register(signal_hook::consts::SIGINT, interrupted.clone());
    let _ = signal_hook::flag::register(signal_hook::consts::SIGTERM, interrupted.clone());

    let start_time = Instant::now();
    reconcile_quietly(manager, events);

    let filter_name = scan_config
        .ingest_filter
        .clone()
        .unwrap_or_else(|| config.ingest.ingest_filter.clone());
    let ingest_filter = manager
        .ingest_filter(&filter_name)
        .context("Failed to load file ingest filters")?
        .ok_or_else(|| anyhow!("Unknown ingest filter: {}", filter_name))?;

    let available = manager
        .interesting_sets()
        .context("Failed to load interesting files sets")?;
    let settings = JobSettings::from_selection(
        &scan_config.set_selections,
        available.keys().map(String::as_str),
    );
    let applied: Vec<String> = available
        .keys()
        .filter(|name| settings.is_enabled(name))
        .cloned()
        .collect();

    if !scan_config.quiet_mode && !scan_config.json_output {
        eprintln!("Discovering files...");
    }
    let discovery = scan::discover(&scan_config.roots, &ExtensionMimeClassifier, &interrupted);
    if !scan_config.quiet_mode && !scan_config.json_output {
        eprintln!(
            "Applying {} sets to {} entries...",
            applied.len(),
            discovery.files.len()
        );
    }

    let sink = Arc::new(CollectingSink::new());
    let context = JobContext {
        table: Arc::new(JobSnapshotTable::new(Arc::new(manager.clone()))),
        case: Arc::new(OpenCase::new(sink.clone())),
        inbox: Arc::new(LogInbox),
        events: events.clone(),
    };
    let spec = JobSpec {
        job_id: u64::from(std::process::id()),
        settings,
        ingest_filter,
        worker_threads: scan_config
            .worker_threads
            .unwrap_or(config.ingest.worker_threads),
    };
    let stats = pipeline::run_job(&spec, &context, &discovery.files, &interrupted)
        .context("Ingest job failed")?;

    let mut hits: Vec<HitRecord> = sink.hits().iter().map(HitRecord::from).collect();
    hits.sort_by(|a, b| (&a.path, &a.set).cmp(&(&b.path, &b.set)));

    let was_interrupted = discovery.interrupted || interrupted.load(Ordering::Relaxed);
    let scan_output = ScanOutput {
        ingest_filter: filter_name,
        sets: applied,
        summary: ScanSummary {
            discovered: discovery.files.len(),
            examined: stats.examined,
            filtered_out: stats.filtered_out,
            hits: hits.len(),
            errors: stats.errors,
            skipped_unreadable: discovery.skipped,
            duration_ms: start_time.elapsed().as_millis() as u64,
            interrupted: if was_interrupted { Some(true) } else { None },
        },
        hits,
    };

    if scan_config.json_output {
        println!("{}", serde_json::to_string_pretty(&scan_output)?);
    } else {
        output::format_human(&scan_output)?;
    }

    Ok(())
}

//! Logging setup and structured events
//!
//! Plain diagnostics go through the `log` macros to env_logger. Lifecycle
//! events (startup, reconcile, job start/stop, hits, errors) are also
//! emitted as one-line JSON payloads so they can be grepped and parsed.

use anyhow::{anyhow, Result};
use log::{error, info, LevelFilter};
use serde_json::json;
use std::path::Path;

use crate::definitions::ReconcileReport;
use crate::ingest::{Hit, JobId};

/// Install env_logger at `level`; RUST_LOG still overrides per module
pub fn init_logging(level: LevelFilter) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| anyhow!("Failed to set logger: {}", e))
}

/// Parse a configured level name
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Severity of a structured event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Info,
}

/// Emits structured lifecycle events
#[derive(Debug, Clone)]
pub struct EventLogger {
    level: LogLevel,
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl EventLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn log_startup(&self, config_path: &Path, definitions_dir: &Path) {
        let data = json!({
            "event": "startup",
            "pid": std::process::id(),
            "config_path": config_path.display().to_string(),
            "definitions_dir": definitions_dir.display().to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        self.log_structured(LogLevel::Info, "Started", &data);
    }

    pub fn log_reconcile(&self, report: &ReconcileReport) {
        let data = json!({
            "event": "standard_sets_reconciled",
            "added": report.added,
            "upgraded": report.upgraded.iter().map(|change| json!({
                "name": change.name,
                "from": change.from,
                "to": change.to,
            })).collect::<Vec<_>>(),
            "renamed": report.renamed.iter().map(|rename| json!({
                "from": rename.from,
                "to": rename.to,
            })).collect::<Vec<_>>(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        self.log_structured(LogLevel::Info, "Standard sets reconciled", &data);
    }

    pub fn log_job_started(&self, job_id: JobId, set_count: usize) {
        let data = json!({
            "event": "job_started",
            "job_id": job_id,
            "set_count": set_count,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        self.log_structured(LogLevel::Info, &format!("Job {} started", job_id), &data);
    }

    pub fn log_job_finished(&self, job_id: JobId) {
        let data = json!({
            "event": "job_finished",
            "job_id": job_id,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        self.log_structured(LogLevel::Info, &format!("Job {} finished", job_id), &data);
    }

    pub fn log_hit(&self, hit: &Hit) {
        let data = json!({
            "event": "interesting_file",
            "job_id": hit.job_id,
            "file_id": hit.file_id,
            "path": hit.file_path,
            "set": hit.set_name,
            "rule": hit.rule_name,
            "timestamp": hit.detected_at.to_rfc3339(),
        });

        self.log_structured(LogLevel::Info, &format!("Interesting file: {}", hit.file_path), &data);
    }

    pub fn log_error(&self, job_id: JobId, error_message: &str) {
        let data = json!({
            "event": "error",
            "job_id": job_id,
            "message": error_message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        self.log_structured(LogLevel::Error, error_message, &data);
    }

    fn log_structured(&self, level: LogLevel, message: &str, data: &serde_json::Value) {
        if !self.should_log(level) {
            return;
        }

        match level {
            LogLevel::Error => error!("{} | {}", message, data),
            LogLevel::Info => info!("{} | {}", message, data),
        }
    }

    fn should_log(&self, level: LogLevel) -> bool {
        matches!(
            (self.level, level),
            (LogLevel::Info, _) | (LogLevel::Error, LogLevel::Error)
        )
    }
}

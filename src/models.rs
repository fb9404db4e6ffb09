//! Data models for command output
//!
//! Defines:
//! - ScanConfig: parsed command-line options for a scan
//! - HitRecord / ScanOutput / ScanSummary: scan results
//! - SetSummary: a files set as listed by `sets list` and `filters list`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ingest::Hit;
use crate::rules::FilesSet;

/// Options for the scan operation
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Files or directories to scan
    pub roots: Vec<PathBuf>,
    /// Set name patterns to enable (empty = all)
    pub set_selections: Vec<String>,
    /// Ingest filter override
    pub ingest_filter: Option<String>,
    /// Worker thread override
    pub worker_threads: Option<usize>,
    pub json_output: bool,
    pub quiet_mode: bool,
}

/// One flagged file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitRecord {
    pub path: String,
    pub set: String,
    pub rule: String,
}

impl From<&Hit> for HitRecord {
    fn from(hit: &Hit) -> Self {
        Self {
            path: hit.file_path.clone(),
            set: hit.set_name.clone(),
            rule: hit.rule_name.clone(),
        }
    }
}

/// Summary statistics for the scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Entries found under the roots
    pub discovered: usize,
    /// Entries passed to the files identifier
    pub examined: usize,
    /// Entries excluded by the ingest filter
    pub filtered_out: usize,
    pub hits: usize,
    pub errors: usize,
    /// Entries that could not be read
    pub skipped_unreadable: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interrupted: Option<bool>,
}

/// Complete scan output for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    pub ingest_filter: String,
    /// Sets applied by the job
    pub sets: Vec<String>,
    pub hits: Vec<HitRecord>,
    pub summary: ScanSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub name: String,
    pub conditions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSummary {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub standard: bool,
    pub version: u32,
    pub ignore_known_files: bool,
    pub ignore_unallocated_space: bool,
    pub rules: Vec<RuleSummary>,
}

impl From<&FilesSet> for SetSummary {
    fn from(set: &FilesSet) -> Self {
        Self {
            name: set.name().to_string(),
            description: set.description().to_string(),
            standard: set.is_standard(),
            version: set.version(),
            ignore_known_files: set.ignores_known_files(),
            ignore_unallocated_space: set.ignores_unallocated_space(),
            rules: set
                .rules()
                .values()
                .map(|rule| RuleSummary {
                    name: rule.name().to_string(),
                    conditions: rule.conditions().iter().map(ToString::to_string).collect(),
                })
                .collect(),
        }
    }
}

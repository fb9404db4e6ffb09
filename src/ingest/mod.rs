//! Applying files sets during an ingest job
//!
//! Handles:
//! - Per-job selection of enabled sets
//! - One immutable snapshot per job, built by the first worker and freed
//!   by the last
//! - Per-worker evaluation of every file against the snapshot
//! - Hit events for the artifact sink and the message inbox
//! - The ingest filter decision of whether a file is processed at all

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod filter;
pub mod identifier;
pub mod selection;
pub mod settings;
pub mod sinks;
pub mod snapshot;

pub use filter::should_process;
pub use identifier::FilesIdentifier;
pub use settings::JobSettings;
pub use sinks::{
    ArtifactSink, CaseContext, CaseUnavailable, CollectingSink, InboxMessage, LogInbox,
    MessageInbox, OpenCase, SinkError,
};
pub use snapshot::{JobSnapshot, JobSnapshotTable};

use crate::definitions::StoreError;
use crate::rules::FileAttributes;

pub type JobId = u64;

/// Outcome of processing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessResult {
    Ok,
    Error,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to load files sets for ingest job {job_id}: {source}")]
    DefinitionsUnavailable {
        job_id: JobId,
        #[source]
        source: StoreError,
    },
    #[error("Files identifier used before start_up")]
    NotStarted,
}

/// A file satisfied a rule of a set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub job_id: JobId,
    pub file_id: u64,
    pub file_path: String,
    pub set_name: String,
    pub rule_name: String,
    pub detected_at: DateTime<Utc>,
}

impl Hit {
    pub fn new<F: FileAttributes + ?Sized>(job_id: JobId, file: &F, set_name: &str, rule_name: &str) -> Self {
        Self {
            job_id,
            file_id: file.id(),
            file_path: file.full_path(),
            set_name: set_name.to_string(),
            rule_name: rule_name.to_string(),
            detected_at: Utc::now(),
        }
    }

    /// Same file, set and rule; the detection time is ignored
    pub fn same_artifact(&self, other: &Hit) -> bool {
        self.file_id == other.file_id && self.set_name == other.set_name && self.rule_name == other.rule_name
    }
}

//! Collaborators that receive hits
//!
//! The real artifact store and inbox belong to the surrounding
//! application; the implementations here back the CLI and tests.

use log::info;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use super::Hit;

#[derive(Debug, Error)]
#[error("Failed to post hit: {0}")]
pub struct SinkError(pub String);

#[derive(Debug, Error)]
#[error("No case is currently open")]
pub struct CaseUnavailable;

/// Persists hits as artifacts
pub trait ArtifactSink: Send + Sync {
    fn post(&self, hit: &Hit) -> Result<(), SinkError>;

    /// Whether an equivalent artifact was already posted
    fn contains(&self, _hit: &Hit) -> bool {
        false
    }
}

/// User-facing notification for a hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InboxMessage {
    pub subject: String,
    pub details: String,
    pub file_id: u64,
}

impl InboxMessage {
    pub fn for_hit(hit: &Hit) -> Self {
        Self {
            subject: format!("Interesting file found: {}", hit.set_name),
            details: format!("{} (rule: {})", hit.file_path, hit.rule_name),
            file_id: hit.file_id,
        }
    }
}

pub trait MessageInbox: Send + Sync {
    fn post_message(&self, message: InboxMessage);
}

/// The case an ingest job writes into
pub trait CaseContext: Send + Sync {
    fn artifact_sink(&self) -> Result<Arc<dyn ArtifactSink>, CaseUnavailable>;
}

/// Keeps every posted hit in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    hits: Mutex<Vec<Hit>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.hits.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactSink for CollectingSink {
    fn post(&self, hit: &Hit) -> Result<(), SinkError> {
        self.hits.lock().push(hit.clone());
        Ok(())
    }

    fn contains(&self, hit: &Hit) -> bool {
        self.hits.lock().iter().any(|posted| posted.same_artifact(hit))
    }
}

/// Writes inbox messages to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogInbox;

impl MessageInbox for LogInbox {
    fn post_message(&self, message: InboxMessage) {
        info!("{} | {}", message.subject, message.details);
    }
}

/// A case that can be closed while jobs still hold a reference to it
pub struct OpenCase {
    sink: Mutex<Option<Arc<dyn ArtifactSink>>>,
}

impl OpenCase {
    pub fn new(sink: Arc<dyn ArtifactSink>) -> Self {
        Self {
            sink: Mutex::new(Some(sink)),
        }
    }

    pub fn close(&self) {
        self.sink.lock().take();
    }
}

impl CaseContext for OpenCase {
    fn artifact_sink(&self) -> Result<Arc<dyn ArtifactSink>, CaseUnavailable> {
        self.sink.lock().clone().ok_or(CaseUnavailable)
    }
}

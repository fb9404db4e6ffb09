use log::{debug, error};
use std::sync::Arc;

use super::{
    CaseContext, Hit, InboxMessage, IngestError, JobId, JobSettings, JobSnapshot, JobSnapshotTable,
    MessageInbox, ProcessResult,
};
use crate::logging::EventLogger;
use crate::rules::{FileAttributes, FileType};

/// Per-worker ingest module that flags interesting files
///
/// Each worker owns one instance. After `start_up` the job snapshot is
/// held locally, so `process` never touches the shared table.
pub struct FilesIdentifier {
    table: Arc<JobSnapshotTable>,
    settings: JobSettings,
    case: Arc<dyn CaseContext>,
    inbox: Arc<dyn MessageInbox>,
    events: EventLogger,
    job: Option<Arc<JobSnapshot>>,
}

impl FilesIdentifier {
    pub fn new(
        table: Arc<JobSnapshotTable>,
        settings: JobSettings,
        case: Arc<dyn CaseContext>,
        inbox: Arc<dyn MessageInbox>,
    ) -> Self {
        Self {
            table,
            settings,
            case,
            inbox,
            events: EventLogger::default(),
            job: None,
        }
    }

    pub fn with_event_logger(mut self, events: EventLogger) -> Self {
        self.events = events;
        self
    }

    /// Join `job_id`, releasing any job this module was already part of
    pub fn start_up(&mut self, job_id: JobId) -> Result<(), IngestError> {
        self.shut_down();
        let snapshot = self.table.start_up(job_id, &self.settings)?;
        self.events.log_job_started(job_id, snapshot.sets().len());
        self.job = Some(snapshot);
        Ok(())
    }

    pub fn job_id(&self) -> Option<JobId> {
        self.job.as_ref().map(|snapshot| snapshot.job_id())
    }

    /// Check one file against every enabled set and post a hit per membership
    pub fn process<F: FileAttributes + ?Sized>(&self, file: &F) -> ProcessResult {
        let Some(snapshot) = self.job.as_ref() else {
            error!("Cannot process file {}: {}", file.id(), IngestError::NotStarted);
            return ProcessResult::Error;
        };

        let sink = match self.case.artifact_sink() {
            Ok(sink) => sink,
            Err(e) => {
                self.events.log_error(snapshot.job_id(), &e.to_string());
                return ProcessResult::Error;
            }
        };

        if file.file_type() == FileType::Slack {
            return ProcessResult::Ok;
        }

        for (set_name, rule_name) in snapshot.memberships(file) {
            let hit = Hit::new(snapshot.job_id(), file, set_name, rule_name);

            if sink.contains(&hit) {
                debug!("{} already flagged by {}/{}", hit.file_path, set_name, rule_name);
                continue;
            }

            if let Err(e) = sink.post(&hit) {
                error!("Unable to record hit for {}: {}", hit.file_path, e);
                continue;
            }

            self.events.log_hit(&hit);
            self.inbox.post_message(InboxMessage::for_hit(&hit));
        }

        ProcessResult::Ok
    }

    pub fn shut_down(&mut self) {
        if let Some(snapshot) = self.job.take() {
            let job_id = snapshot.job_id();
            drop(snapshot);
            if self.table.shut_down(job_id) {
                self.events.log_job_finished(job_id);
            }
        }
    }
}

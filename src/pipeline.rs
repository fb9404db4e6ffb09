//! Running an ingest job over a batch of files
//!
//! A fixed-size rayon pool processes the files. Each pool thread owns one
//! `FilesIdentifier`, chosen by the thread's index in the pool.

use log::{debug, warn};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use crate::constants::{WORKER_THREADS_MAX, WORKER_THREADS_MIN};
use crate::ingest::{
    should_process, CaseContext, FilesIdentifier, IngestError, JobId, JobSettings, JobSnapshotTable,
    MessageInbox, ProcessResult,
};
use crate::logging::EventLogger;
use crate::rules::{FileRecord, FilesSet};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("Worker thread count {value} is outside {min}..={max}")]
    WorkerThreads { value: usize, min: usize, max: usize },
}

/// What to run and with which settings
#[derive(Debug, Clone)]
pub struct JobSpec {
    pub job_id: JobId,
    pub settings: JobSettings,
    pub ingest_filter: FilesSet,
    pub worker_threads: usize,
}

/// Counters for a finished job
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobStats {
    pub examined: usize,
    pub filtered_out: usize,
    pub errors: usize,
    pub duration_ms: u64,
    pub interrupted: bool,
}

/// Collaborators shared by every worker of a job
pub struct JobContext {
    pub table: Arc<JobSnapshotTable>,
    pub case: Arc<dyn CaseContext>,
    pub inbox: Arc<dyn MessageInbox>,
    pub events: EventLogger,
}

pub fn run_job(
    spec: &JobSpec,
    context: &JobContext,
    files: &[FileRecord],
    interrupted: &AtomicBool,
) -> Result<JobStats, PipelineError> {
    if !(WORKER_THREADS_MIN..=WORKER_THREADS_MAX).contains(&spec.worker_threads) {
        return Err(PipelineError::WorkerThreads {
            value: spec.worker_threads,
            min: WORKER_THREADS_MIN,
            max: WORKER_THREADS_MAX,
        });
    }

    let start_time = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(spec.worker_threads)
        .thread_name(|index| format!("ingest-worker-{}", index))
        .build()?;

    let mut modules: Vec<FilesIdentifier> = (0..spec.worker_threads)
        .map(|_| {
            FilesIdentifier::new(
                Arc::clone(&context.table),
                spec.settings.clone(),
                Arc::clone(&context.case),
                Arc::clone(&context.inbox),
            )
            .with_event_logger(context.events.clone())
        })
        .collect();

    let started: Vec<Result<(), IngestError>> = pool.install(|| {
        modules
            .par_iter_mut()
            .map(|module| module.start_up(spec.job_id))
            .collect()
    });
    if let Some(failure) = started.into_iter().find_map(Result::err) {
        pool.install(|| modules.par_iter_mut().for_each(FilesIdentifier::shut_down));
        return Err(failure.into());
    }
    debug!("Job {}: {} workers started", spec.job_id, modules.len());

    let examined = AtomicUsize::new(0);
    let filtered_out = AtomicUsize::new(0);
    let errors = AtomicUsize::new(0);

    pool.install(|| {
        files.par_iter().for_each(|file| {
            if interrupted.load(Ordering::Relaxed) {
                return;
            }
            if !should_process(&spec.ingest_filter, file) {
                filtered_out.fetch_add(1, Ordering::Relaxed);
                return;
            }

            let Some(module) = rayon::current_thread_index().and_then(|index| modules.get(index)) else {
                warn!("No worker module for file {}", file.id);
                errors.fetch_add(1, Ordering::Relaxed);
                return;
            };

            examined.fetch_add(1, Ordering::Relaxed);
            if module.process(file) == ProcessResult::Error {
                errors.fetch_add(1, Ordering::Relaxed);
            }
        });
    });

    pool.install(|| modules.par_iter_mut().for_each(FilesIdentifier::shut_down));

    Ok(JobStats {
        examined: examined.into_inner(),
        filtered_out: filtered_out.into_inner(),
        errors: errors.into_inner(),
        duration_ms: start_time.elapsed().as_millis() as u64,
        interrupted: interrupted.load(Ordering::Relaxed),
    })
}

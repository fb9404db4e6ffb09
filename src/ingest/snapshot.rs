use log::{debug, info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use super::{IngestError, JobId, JobSettings};
use crate::definitions::DefinitionsSource;
use crate::rules::{FileAttributes, FilesSet};

/// The enabled files sets for one ingest job, frozen at job start
#[derive(Debug)]
pub struct JobSnapshot {
    job_id: JobId,
    sets: Vec<FilesSet>,
}

impl JobSnapshot {
    pub fn new(job_id: JobId, sets: Vec<FilesSet>) -> Self {
        Self { job_id, sets }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn sets(&self) -> &[FilesSet] {
        &self.sets
    }

    /// (set name, rule name) for every set the file is a member of
    pub fn memberships<'a, F: FileAttributes + ?Sized>(
        &'a self,
        file: &'a F,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.sets.iter().filter_map(move |set| {
            set.first_satisfied_rule_name(file)
                .map(|rule_name| (set.name(), rule_name))
        })
    }
}

struct JobEntry {
    references: usize,
    snapshot: Arc<JobSnapshot>,
}

/// Reference-counted snapshots shared by the workers of each job
///
/// The first worker of a job to start builds the snapshot while holding
/// the table lock, so concurrent starters never observe a partial one.
/// The last worker to shut down frees it.
pub struct JobSnapshotTable {
    source: Arc<dyn DefinitionsSource>,
    jobs: Mutex<HashMap<JobId, JobEntry>>,
}

impl JobSnapshotTable {
    pub fn new(source: Arc<dyn DefinitionsSource>) -> Self {
        Self {
            source,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Register a worker for `job_id`, building the snapshot if it is the first
    ///
    /// On failure the worker is not counted and no snapshot is left behind.
    pub fn start_up(&self, job_id: JobId, settings: &JobSettings) -> Result<Arc<JobSnapshot>, IngestError> {
        let mut jobs = self.jobs.lock();

        if let Some(entry) = jobs.get_mut(&job_id) {
            entry.references += 1;
            debug!("Job {} now has {} workers", job_id, entry.references);
            return Ok(Arc::clone(&entry.snapshot));
        }

        let all_sets = self
            .source
            .interesting_sets()
            .map_err(|source| IngestError::DefinitionsUnavailable { job_id, source })?;

        let sets: Vec<FilesSet> = all_sets
            .into_values()
            .filter(|set| settings.is_enabled(set.name()))
            .collect();
        info!("Job {}: applying {} interesting files sets", job_id, sets.len());

        let snapshot = Arc::new(JobSnapshot::new(job_id, sets));
        jobs.insert(
            job_id,
            JobEntry {
                references: 1,
                snapshot: Arc::clone(&snapshot),
            },
        );
        Ok(snapshot)
    }

    /// Release one worker of `job_id`; returns true when the snapshot was freed
    pub fn shut_down(&self, job_id: JobId) -> bool {
        let mut jobs = self.jobs.lock();

        let remaining = match jobs.get_mut(&job_id) {
            Some(entry) => {
                entry.references -= 1;
                entry.references
            }
            None => {
                warn!("Shut down requested for unknown job {}", job_id);
                return false;
            }
        };

        if remaining == 0 {
            jobs.remove(&job_id);
            debug!("Job {}: snapshot released", job_id);
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self, job_id: JobId) -> Option<Arc<JobSnapshot>> {
        self.jobs.lock().get(&job_id).map(|entry| Arc::clone(&entry.snapshot))
    }

    pub fn references(&self, job_id: JobId) -> usize {
        self.jobs.lock().get(&job_id).map_or(0, |entry| entry.references)
    }

    pub fn active_jobs(&self) -> usize {
        self.jobs.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{DefinitionsMap, StoreError};
    use crate::rules::{FileRecord, NameCondition, Rule};
    use std::io;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        sets: DefinitionsMap,
        loads: AtomicUsize,
    }

    impl DefinitionsSource for CountingSource {
        fn interesting_sets(&self) -> Result<DefinitionsMap, StoreError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.sets.clone())
        }
    }

    struct BrokenSource;

    impl DefinitionsSource for BrokenSource {
        fn interesting_sets(&self) -> Result<DefinitionsMap, StoreError> {
            Err(StoreError::Io {
                path: PathBuf::from("/nowhere/interesting_sets.toml"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    fn docs_set(name: &str) -> FilesSet {
        let rule = Rule::new("Word", [NameCondition::extensions("docx").unwrap().into()]).unwrap();
        FilesSet::builder(name).rule(rule).build().unwrap()
    }

    fn counting_source() -> Arc<CountingSource> {
        let mut sets = DefinitionsMap::new();
        sets.insert("Docs".to_string(), docs_set("Docs"));
        sets.insert("Other".to_string(), docs_set("Other"));
        Arc::new(CountingSource {
            sets,
            loads: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_first_start_builds_last_stop_frees() {
        let source = counting_source();
        let table = JobSnapshotTable::new(source.clone());
        let settings = JobSettings::all_enabled();

        let first = table.start_up(7, &settings).unwrap();
        let second = table.start_up(7, &settings).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert_eq!(table.references(7), 2);

        assert!(!table.shut_down(7));
        assert!(table.snapshot(7).is_some());
        assert!(table.shut_down(7));
        assert!(table.snapshot(7).is_none());
        assert_eq!(table.active_jobs(), 0);
    }

    #[test]
    fn test_disabled_sets_are_left_out() {
        let table = JobSnapshotTable::new(counting_source());
        let settings = JobSettings::new(Vec::new(), vec!["Other".to_string()]);
        let snapshot = table.start_up(1, &settings).unwrap();
        let names: Vec<&str> = snapshot.sets().iter().map(FilesSet::name).collect();
        assert_eq!(names, vec!["Docs"]);
    }

    #[test]
    fn test_failed_start_leaves_no_entry() {
        let table = JobSnapshotTable::new(Arc::new(BrokenSource));
        let err = table.start_up(3, &JobSettings::all_enabled()).unwrap_err();
        assert!(err.to_string().contains("job 3"));
        assert_eq!(table.references(3), 0);
        assert_eq!(table.active_jobs(), 0);
    }

    #[test]
    fn test_unknown_shut_down_is_ignored() {
        let table = JobSnapshotTable::new(counting_source());
        assert!(!table.shut_down(42));
        assert_eq!(table.active_jobs(), 0);
    }

    #[test]
    fn test_jobs_are_independent() {
        let source = counting_source();
        let table = JobSnapshotTable::new(source.clone());
        table.start_up(1, &JobSettings::all_enabled()).unwrap();
        table.start_up(2, &JobSettings::all_enabled()).unwrap();
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
        table.shut_down(1);
        assert!(table.snapshot(1).is_none());
        assert!(table.snapshot(2).is_some());
    }

    #[test]
    fn test_memberships() {
        let table = JobSnapshotTable::new(counting_source());
        let snapshot = table.start_up(1, &JobSettings::all_enabled()).unwrap();
        let file = FileRecord::new(1, "/docs/a.docx");
        let found: Vec<(&str, &str)> = snapshot.memberships(&file).collect();
        assert_eq!(found, vec![("Docs", "Word"), ("Other", "Word")]);
    }
}

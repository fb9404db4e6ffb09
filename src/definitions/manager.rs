use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;

use super::merge::{reconcile_with_report, ReconcileReport};
use super::standard::{
    bundled_ingest_filters, bundled_standard_sets, is_standard_ingest_filter, load_standard_dir,
    merge_highest_version,
};
use super::store::{DefinitionsStore, StoreKey};
use super::{DefinitionsMap, DefinitionsSource, StoreError};
use crate::rules::FilesSet;

/// Access point for files set definitions
///
/// Owns nothing global: construct one at startup and hand it (or an `Arc`
/// of it) to whoever needs definitions.
#[derive(Debug, Clone)]
pub struct DefinitionsManager {
    store: Arc<DefinitionsStore>,
    standard_sets_dir: Option<PathBuf>,
}

impl DefinitionsManager {
    pub fn new(store: Arc<DefinitionsStore>) -> Self {
        Self {
            store,
            standard_sets_dir: None,
        }
    }

    pub fn with_standard_sets_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.standard_sets_dir = dir;
        self
    }

    pub fn store(&self) -> &Arc<DefinitionsStore> {
        &self.store
    }

    /// Bundled standard sets plus any from the standard sets directory
    pub fn standard_sets(&self) -> DefinitionsMap {
        let mut sets = bundled_standard_sets();
        if let Some(dir) = &self.standard_sets_dir {
            merge_highest_version(&mut sets, load_standard_dir(dir));
        }
        sets
    }

    /// Bring the user's interesting sets up to date with the standard sets
    ///
    /// If the user store cannot be read the merge still runs against an
    /// empty map, but nothing is written back so the unreadable store is
    /// left for inspection.
    pub fn reconcile_on_startup(&self) -> Result<ReconcileReport, StoreError> {
        let standard = self.standard_sets();
        let (user, writable) = match self.store.load(StoreKey::InterestingItems) {
            Ok(user) => (user, true),
            Err(err) => {
                error!("Failed to load interesting files sets, continuing without them: {}", err);
                (DefinitionsMap::new(), false)
            }
        };

        let (merged, report) = reconcile_with_report(&standard, &user);
        if !writable {
            warn!("Reconciled definitions not saved because the existing store is unreadable");
        } else if !report.is_empty() {
            self.store.save(StoreKey::InterestingItems, &merged)?;
            info!(
                "Reconciled standard definitions: {} added, {} upgraded, {} renamed",
                report.added.len(),
                report.upgraded.len(),
                report.renamed.len()
            );
        }
        Ok(report)
    }

    pub fn interesting_sets(&self) -> Result<DefinitionsMap, StoreError> {
        self.store.load(StoreKey::InterestingItems)
    }

    pub fn save_interesting_sets(&self, sets: &DefinitionsMap) -> Result<(), StoreError> {
        self.store.save(StoreKey::InterestingItems, sets)
    }

    /// Standard ingest filters followed by the user's custom filters
    pub fn ingest_filters(&self) -> Result<DefinitionsMap, StoreError> {
        let mut filters = self.store.load(StoreKey::FileIngestFilters)?;
        filters.retain(|name, _| !is_standard_ingest_filter(name));
        filters.extend(bundled_ingest_filters());
        Ok(filters)
    }

    pub fn ingest_filter(&self, name: &str) -> Result<Option<FilesSet>, StoreError> {
        Ok(self.ingest_filters()?.remove(name))
    }

    /// Persist custom ingest filters; the standard filters are never stored
    pub fn save_ingest_filters(&self, filters: &DefinitionsMap) -> Result<(), StoreError> {
        let custom: DefinitionsMap = filters
            .iter()
            .filter(|(name, _)| !is_standard_ingest_filter(name))
            .map(|(name, set)| (name.clone(), set.clone()))
            .collect();
        self.store.save(StoreKey::FileIngestFilters, &custom)
    }
}

impl DefinitionsSource for DefinitionsManager {
    fn interesting_sets(&self) -> Result<DefinitionsMap, StoreError> {
        DefinitionsManager::interesting_sets(self)
    }
}

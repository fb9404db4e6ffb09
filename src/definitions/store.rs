//! Persisted definitions stores
//!
//! One handle serves both stores. Each store key has its own lock, so
//! loading interesting items never waits on a save of ingest filters.
//! Saves go through a temporary file in the same directory and a rename,
//! so a concurrent reader sees either the old or the new content.

use log::{debug, info};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

use super::codec::{decode_with_fallback, DefinitionsCodec, TomlCodec};
use super::{DefinitionsMap, StoreError};
use crate::constants::{
    INGEST_FILTERS_FILE, INTERESTING_SETS_FILE, LEGACY_INGEST_FILTERS_FILE,
    LEGACY_INTERESTING_SETS_FILE,
};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Which definitions store an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKey {
    InterestingItems,
    FileIngestFilters,
}

impl StoreKey {
    pub fn file_name(self) -> &'static str {
        match self {
            StoreKey::InterestingItems => INTERESTING_SETS_FILE,
            StoreKey::FileIngestFilters => INGEST_FILTERS_FILE,
        }
    }

    pub fn legacy_file_name(self) -> &'static str {
        match self {
            StoreKey::InterestingItems => LEGACY_INTERESTING_SETS_FILE,
            StoreKey::FileIngestFilters => LEGACY_INGEST_FILTERS_FILE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StoreKey::InterestingItems => "interesting items",
            StoreKey::FileIngestFilters => "file ingest filters",
        }
    }
}

/// Change notification published after every successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionsEvent {
    Saved { store: StoreKey, set_count: usize },
}

/// Handle to the definitions stores in one directory
#[derive(Debug)]
pub struct DefinitionsStore {
    directory: PathBuf,
    interesting_items_lock: Mutex<()>,
    ingest_filters_lock: Mutex<()>,
    events: broadcast::Sender<DefinitionsEvent>,
}

impl DefinitionsStore {
    pub fn open(directory: impl Into<PathBuf>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            directory: directory.into(),
            interesting_items_lock: Mutex::new(()),
            ingest_filters_lock: Mutex::new(()),
            events,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn path_for(&self, key: StoreKey) -> PathBuf {
        self.directory.join(key.file_name())
    }

    fn lock_for(&self, key: StoreKey) -> &Mutex<()> {
        match key {
            StoreKey::InterestingItems => &self.interesting_items_lock,
            StoreKey::FileIngestFilters => &self.ingest_filters_lock,
        }
    }

    /// Receive a [`DefinitionsEvent`] for every later save
    ///
    /// The store keeps no reference to subscribers; dropping the receiver
    /// is enough to unsubscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<DefinitionsEvent> {
        self.events.subscribe()
    }

    /// Load a store; a store that was never saved is empty
    pub fn load(&self, key: StoreKey) -> Result<DefinitionsMap, StoreError> {
        let _guard = self.lock_for(key).lock();
        let path = self.path_for(key);

        match fs::read(&path) {
            Ok(bytes) => decode_with_fallback(&bytes).map_err(|source| StoreError::Decode { path, source }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => self.import_legacy(key),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn import_legacy(&self, key: StoreKey) -> Result<DefinitionsMap, StoreError> {
        let path = self.directory.join(key.legacy_file_name());
        match fs::read(&path) {
            Ok(bytes) => {
                let sets = decode_with_fallback(&bytes)
                    .map_err(|source| StoreError::Decode { path: path.clone(), source })?;
                info!(
                    "Imported {} {} definitions from legacy store {}",
                    sets.len(),
                    key.label(),
                    path.display()
                );
                Ok(sets)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No {} store at {}, starting empty", key.label(), self.directory.display());
                Ok(DefinitionsMap::new())
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Replace the content of a store and notify subscribers
    pub fn save(&self, key: StoreKey, sets: &DefinitionsMap) -> Result<(), StoreError> {
        let bytes = TomlCodec.encode(sets).map_err(StoreError::Encode)?;
        let path = self.path_for(key);

        {
            let _guard = self.lock_for(key).lock();
            fs::create_dir_all(&self.directory).map_err(|source| StoreError::Io {
                path: self.directory.clone(),
                source,
            })?;

            let mut temp = tempfile::NamedTempFile::new_in(&self.directory).map_err(|source| StoreError::Io {
                path: self.directory.clone(),
                source,
            })?;
            temp.write_all(&bytes)
                .and_then(|_| temp.as_file().sync_all())
                .map_err(|source| StoreError::Io { path: path.clone(), source })?;
            temp.persist(&path).map_err(|err| StoreError::Io {
                path: path.clone(),
                source: err.error,
            })?;
        }

        debug!("Saved {} {} definitions to {}", sets.len(), key.label(), path.display());

        // No subscribers is not an error
        let _ = self.events.send(DefinitionsEvent::Saved {
            store: key,
            set_count: sets.len(),
        });
        Ok(())
    }
}

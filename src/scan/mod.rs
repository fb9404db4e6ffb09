//! Filesystem discovery for local scans
//!
//! Responsible for:
//! - Traversing directory trees under the requested roots
//! - Building a file record per entry with size, times and MIME type
//! - Deterministic ordering of results
//! - Stopping early when interrupted

use chrono::{DateTime, Utc};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::rules::{FileRecord, FileType, KnownStatus, MetaType};

pub mod mime;

pub use mime::{ExtensionMimeClassifier, MimeClassifier};

/// Outcome of walking the scan roots
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<FileRecord>,
    /// Entries that could not be read
    pub skipped: usize,
    pub interrupted: bool,
}

/// Collect records for every entry under `roots`
///
/// A root that is a regular file yields just that file. Directories are
/// walked recursively; symlinks are recorded but never followed.
pub fn discover(roots: &[PathBuf], classifier: &dyn MimeClassifier, interrupted: &AtomicBool) -> Discovery {
    let mut walker = Walker {
        classifier,
        interrupted,
        discovery: Discovery::default(),
    };

    for root in roots {
        if interrupted.load(Ordering::Relaxed) {
            walker.discovery.interrupted = true;
            break;
        }

        match fs::symlink_metadata(root) {
            Ok(metadata) if metadata.is_dir() => walker.walk(root),
            Ok(metadata) => walker.record(root, &metadata),
            Err(e) => {
                warn!("Cannot access {}: {}", root.display(), e);
                walker.discovery.skipped += 1;
            }
        }
    }

    walker.discovery
}

struct Walker<'a> {
    classifier: &'a dyn MimeClassifier,
    interrupted: &'a AtomicBool,
    discovery: Discovery,
}

impl Walker<'_> {
    fn walk(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read directory {}: {}", dir.display(), e);
                self.discovery.skipped += 1;
                return;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Cannot read entry in {}: {}", dir.display(), e);
                    self.discovery.skipped += 1;
                    None
                }
            })
            .collect();
        paths.sort();

        for path in paths {
            if self.interrupted.load(Ordering::Relaxed) {
                self.discovery.interrupted = true;
                return;
            }

            let metadata = match fs::symlink_metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Cannot stat {}: {}", path.display(), e);
                    self.discovery.skipped += 1;
                    continue;
                }
            };

            self.record(&path, &metadata);
            if metadata.is_dir() {
                self.walk(&path);
            }
        }
    }

    fn record(&mut self, path: &Path, metadata: &fs::Metadata) {
        let id = self.discovery.files.len() as u64 + 1;
        let path_text = path.to_string_lossy();

        let meta_type = if metadata.is_dir() {
            MetaType::Directory
        } else if metadata.is_file() {
            MetaType::Regular
        } else {
            MetaType::Other
        };

        let mut record = FileRecord::new(id, &path_text)
            .with_meta_type(meta_type)
            .with_file_type(FileType::Local)
            .with_known(KnownStatus::Unknown)
            .with_size(if metadata.is_file() { metadata.len() } else { 0 });

        if let Ok(modified) = metadata.modified() {
            record = record.with_modified(DateTime::<Utc>::from(modified));
        }
        if meta_type == MetaType::Regular {
            if let Some(mime_type) = self.classifier.classify(path) {
                record = record.with_mime_type(mime_type);
            }
        }

        self.discovery.files.push(record);
    }
}

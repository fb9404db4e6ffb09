//! Files set definitions: persistence, standard sets and upgrades
//!
//! Handles:
//! - Loading and saving the interesting items and file ingest filter stores
//! - Canonical TOML encoding with a legacy JSON fallback
//! - Bundled standard definitions and the standard ingest filters
//! - Reconciling standard definitions with user definitions on startup

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

pub mod codec;
pub mod manager;
pub mod merge;
pub mod standard;
pub mod store;

pub use codec::{CodecError, DefinitionsCodec, JsonCodec, TomlCodec};
pub use manager::DefinitionsManager;
pub use merge::{reconcile, reconcile_with_report, ReconcileReport};
pub use store::{DefinitionsEvent, DefinitionsStore, StoreKey};

use crate::rules::FilesSet;

/// Set name to files set, ordered by name
pub type DefinitionsMap = BTreeMap<String, FilesSet>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode definitions in {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("Failed to encode definitions: {0}")]
    Encode(#[source] CodecError),
}

/// Source of the current interesting files sets
///
/// Ingest jobs read their snapshot through this seam, once per job.
pub trait DefinitionsSource: Send + Sync {
    fn interesting_sets(&self) -> Result<DefinitionsMap, StoreError>;
}

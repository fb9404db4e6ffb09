//! Standard (shipped) definitions
//!
//! Bundled sets are compiled into the binary. Extra standard sets can be
//! dropped as `.toml` files into a directory named in the configuration;
//! everything loaded from there is flagged standard regardless of what
//! the file says. A standard source that cannot be read is logged and
//! skipped, never fatal.

use log::{debug, warn};
use std::fs;
use std::path::Path;

use super::codec::{decode_with_fallback, DefinitionsCodec, TomlCodec};
use super::DefinitionsMap;
use crate::constants::{ALL_FILES_AND_UNALLOCATED_FILTER, ALL_FILES_FILTER};

const BUNDLED_STANDARD_SETS: &str = include_str!("bundled/standard_sets.toml");
const BUNDLED_INGEST_FILTERS: &str = include_str!("bundled/standard_ingest_filters.toml");

fn decode_bundled(label: &str, text: &str) -> DefinitionsMap {
    match TomlCodec.decode(text.as_bytes()) {
        Ok(sets) => mark_standard(sets),
        Err(err) => {
            warn!("Bundled {} could not be decoded: {}", label, err);
            DefinitionsMap::new()
        }
    }
}

fn mark_standard(sets: DefinitionsMap) -> DefinitionsMap {
    sets.into_iter()
        .map(|(name, set)| (name, set.as_standard()))
        .collect()
}

/// Interesting files sets shipped with the application
pub fn bundled_standard_sets() -> DefinitionsMap {
    decode_bundled("standard sets", BUNDLED_STANDARD_SETS)
}

/// The two "all files" ingest filters
pub fn bundled_ingest_filters() -> DefinitionsMap {
    decode_bundled("ingest filters", BUNDLED_INGEST_FILTERS)
}

pub fn is_standard_ingest_filter(name: &str) -> bool {
    name == ALL_FILES_FILTER || name == ALL_FILES_AND_UNALLOCATED_FILTER
}

/// Load every `*.toml` file in `dir` as standard definitions
pub fn load_standard_dir(dir: &Path) -> DefinitionsMap {
    let mut sets = DefinitionsMap::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Cannot read standard definitions directory {}: {}", dir.display(), err);
            return sets;
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("toml"))
        .collect();
    paths.sort();

    for path in paths {
        let decoded = fs::read(&path)
            .map_err(|err| err.to_string())
            .and_then(|bytes| decode_with_fallback(&bytes).map_err(|err| err.to_string()));
        match decoded {
            Ok(loaded) => {
                debug!("Loaded {} standard sets from {}", loaded.len(), path.display());
                merge_highest_version(&mut sets, mark_standard(loaded));
            }
            Err(err) => warn!("Skipping standard definitions file {}: {}", path.display(), err),
        }
    }

    sets
}

/// Merge `incoming` into `sets`, keeping the higher version per name
pub fn merge_highest_version(sets: &mut DefinitionsMap, incoming: DefinitionsMap) {
    for (name, set) in incoming {
        match sets.get(&name) {
            Some(existing) if existing.version() >= set.version() => {}
            _ => {
                sets.insert(name, set);
            }
        }
    }
}

//! Global constants for triageset
//!
//! Centralized location for application-wide constants

/// Application name, used for the configuration directory and log events
pub const APP_NAME: &str = "triageset";

/// Configuration file name inside the application config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Canonical store file for interesting files sets
pub const INTERESTING_SETS_FILE: &str = "interesting_file_sets.toml";

/// Canonical store file for file ingest filters
pub const INGEST_FILTERS_FILE: &str = "file_ingest_filters.toml";

/// Legacy store files, imported when the canonical file does not exist yet
pub const LEGACY_INTERESTING_SETS_FILE: &str = "interesting_file_sets.json";
pub const LEGACY_INGEST_FILTERS_FILE: &str = "file_ingest_filters.json";

/// Suffix appended to a custom set whose name collides with a standard set
pub const CUSTOM_SET_SUFFIX: &str = " (Custom)";

/// Ingest filter that processes every file except unallocated space
pub const ALL_FILES_FILTER: &str = "All Files and Directories (Not Unallocated Space)";

/// Ingest filter that processes every file including unallocated space
pub const ALL_FILES_AND_UNALLOCATED_FILTER: &str = "All Files, Directories, and Unallocated Space";

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Worker thread bounds for the ingest pool
pub const WORKER_THREADS_MIN: usize = 1;
pub const WORKER_THREADS_MAX: usize = 256;

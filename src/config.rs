//! Configuration management
//!
//! Handles TOML configuration parsing, defaults and validation

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants::{
    ALL_FILES_FILTER, APP_NAME, CONFIG_FILE_NAME, WORKER_THREADS_MAX, WORKER_THREADS_MIN,
};
use crate::logging::parse_level;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse configuration {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("worker_threads must be between {min} and {max}, got {value}")]
    WorkerThreads { value: usize, min: usize, max: usize },
    #[error("Unknown log level '{0}'")]
    LogLevel(String),
    #[error("ingest_filter must not be empty")]
    EmptyIngestFilter,
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriageConfiguration {
    #[serde(default)]
    pub definitions: DefinitionsSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the set definitions live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionsSettings {
    /// Directory holding the user stores
    #[serde(default = "default_definitions_dir")]
    pub directory: PathBuf,
    /// Extra directory of standard set files, merged over the bundled ones
    #[serde(default)]
    pub standard_sets_dir: Option<PathBuf>,
}

impl Default for DefinitionsSettings {
    fn default() -> Self {
        Self {
            directory: default_definitions_dir(),
            standard_sets_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestSettings {
    /// Worker threads in the ingest pool (1-256)
    #[serde(default = "default_worker_threads")]
    pub worker_threads: usize,
    /// Name of the file ingest filter applied before the sets
    #[serde(default = "default_ingest_filter")]
    pub ingest_filter: String,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            worker_threads: default_worker_threads(),
            ingest_filter: default_ingest_filter(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_definitions_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

fn default_worker_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(WORKER_THREADS_MIN)
        .clamp(WORKER_THREADS_MIN, WORKER_THREADS_MAX)
}

fn default_ingest_filter() -> String {
    ALL_FILES_FILTER.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl TriageConfiguration {
    /// `<config_dir>/triageset/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse and validate a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit path, or the default path if it exists
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        match path {
            Some(path) => Ok((Self::load_from_file(path)?, path.to_path_buf())),
            None => {
                let default_path = Self::default_config_path()?;
                if default_path.exists() {
                    Ok((Self::load_from_file(&default_path)?, default_path))
                } else {
                    Ok((Self::default(), default_path))
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threads = self.ingest.worker_threads;
        if !(WORKER_THREADS_MIN..=WORKER_THREADS_MAX).contains(&threads) {
            return Err(ConfigError::WorkerThreads {
                value: threads,
                min: WORKER_THREADS_MIN,
                max: WORKER_THREADS_MAX,
            });
        }

        if self.ingest.ingest_filter.trim().is_empty() {
            return Err(ConfigError::EmptyIngestFilter);
        }

        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.logging.level).ok_or_else(|| ConfigError::LogLevel(self.logging.level.clone()))
    }

    /// Create the definitions directory if needed
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        let dir = &self.definitions.directory;
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = TriageConfiguration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ingest.ingest_filter, ALL_FILES_FILTER);
        assert_eq!(config.log_level().unwrap(), LevelFilter::Warn);
        assert!(config.definitions.directory.ends_with(APP_NAME));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[definitions]
directory = "/tmp/triage-defs"

[ingest]
worker_threads = 4
"#,
        )
        .unwrap();

        let config = TriageConfiguration::load_from_file(&path).unwrap();
        assert_eq!(config.definitions.directory, PathBuf::from("/tmp/triage-defs"));
        assert_eq!(config.definitions.standard_sets_dir, None);
        assert_eq!(config.ingest.worker_threads, 4);
        assert_eq!(config.ingest.ingest_filter, ALL_FILES_FILTER);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_worker_thread_bounds() {
        let mut config = TriageConfiguration::default();
        config.ingest.worker_threads = 0;
        assert!(matches!(config.validate(), Err(ConfigError::WorkerThreads { value: 0, .. })));
        config.ingest.worker_threads = 257;
        assert!(config.validate().is_err());
        config.ingest.worker_threads = 256;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = TriageConfiguration::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ingest\nworker_threads = ").unwrap();
        let err = TriageConfiguration::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            TriageConfiguration::load(Some(&missing)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = TempDir::new().unwrap();
        let mut config = TriageConfiguration::default();
        config.definitions.directory = dir.path().join("nested").join("defs");
        config.ensure_directories().unwrap();
        assert!(config.definitions.directory.is_dir());
    }
}

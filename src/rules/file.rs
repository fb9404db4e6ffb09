//! File attributes consumed by rule evaluation
//!
//! The ingest framework owns the real file objects; rules only see them
//! through [`FileAttributes`]. [`FileRecord`] is the plain-data
//! implementation used by the CLI and by tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File system meta type of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaType {
    Regular,
    Directory,
    VirtualDirectory,
    Other,
}

/// Origin of a file within the data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    FileSystem,
    Local,
    Derived,
    Carved,
    Slack,
    Unallocated,
}

impl FileType {
    /// Slack and unallocated blocks are not part of any allocated file
    pub fn is_unallocated_space(self) -> bool {
        matches!(self, FileType::Slack | FileType::Unallocated)
    }
}

/// Result of a known-file lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownStatus {
    #[default]
    Unknown,
    Known,
    KnownBad,
}

/// Attributes of a file that conditions can inspect
pub trait FileAttributes {
    fn id(&self) -> u64;
    /// Full name, including extension
    fn name(&self) -> &str;
    /// Lower-cased extension without the leading '.', empty when absent
    fn extension(&self) -> &str;
    /// Parent path using '/' as the separator
    fn parent_path(&self) -> &str;
    fn meta_type(&self) -> MetaType;
    fn file_type(&self) -> FileType;
    fn mime_type(&self) -> Option<&str>;
    fn size(&self) -> u64;
    fn modified(&self) -> Option<DateTime<Utc>>;
    fn known(&self) -> KnownStatus;

    fn full_path(&self) -> String {
        let parent = self.parent_path().trim_end_matches('/');
        format!("{}/{}", parent, self.name())
    }
}

/// Owned file description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: u64,
    pub name: String,
    pub extension: String,
    pub parent_path: String,
    pub meta_type: MetaType,
    pub file_type: FileType,
    pub mime_type: Option<String>,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub known: KnownStatus,
}

impl FileRecord {
    /// Build a regular file record from a '/'-separated path
    pub fn new(id: u64, path: &str) -> Self {
        let path = path.replace('\\', "/");
        let (parent, name) = match path.rfind('/') {
            Some(idx) => (&path[..=idx], &path[idx + 1..]),
            None => ("/", path.as_str()),
        };
        let parent_path = if parent.starts_with('/') {
            parent.to_string()
        } else {
            format!("/{}", parent)
        };

        Self {
            id,
            name: name.to_string(),
            extension: extension_of(name),
            parent_path,
            meta_type: MetaType::Regular,
            file_type: FileType::FileSystem,
            mime_type: None,
            size: 0,
            modified: None,
            known: KnownStatus::Unknown,
        }
    }

    pub fn with_meta_type(mut self, meta_type: MetaType) -> Self {
        self.meta_type = meta_type;
        self
    }

    pub fn with_file_type(mut self, file_type: FileType) -> Self {
        self.file_type = file_type;
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_known(mut self, known: KnownStatus) -> Self {
        self.known = known;
        self
    }
}

/// Extension after the last '.', lower-cased. Names whose only dot is the
/// first character ("`.bashrc`") or that end with a dot have none.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => name[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

impl FileAttributes for FileRecord {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn extension(&self) -> &str {
        &self.extension
    }

    fn parent_path(&self) -> &str {
        &self.parent_path
    }

    fn meta_type(&self) -> MetaType {
        self.meta_type
    }

    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    fn known(&self) -> KnownStatus {
        self.known
    }
}

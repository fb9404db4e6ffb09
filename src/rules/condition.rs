//! Leaf predicates over a single file attribute
//!
//! Every condition is validated when it is built (or decoded from a
//! store) so evaluation never fails. Text forms come in two flavours:
//! literals compared case-insensitively, and regular expressions
//! compiled case-insensitively and matched anywhere in the subject.

use chrono::{DateTime, Duration, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ConstructionError;
use super::file::{FileAttributes, MetaType};
use crate::constants::SECONDS_PER_DAY;

/// Condition kinds, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConditionKind {
    Name,
    MetaType,
    ParentPath,
    MimeType,
    FileSize,
    Date,
}

impl ConditionKind {
    pub fn label(self) -> &'static str {
        match self {
            ConditionKind::Name => "name",
            ConditionKind::MetaType => "meta type",
            ConditionKind::ParentPath => "parent path",
            ConditionKind::MimeType => "MIME type",
            ConditionKind::FileSize => "file size",
            ConditionKind::Date => "date",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single predicate over one file attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    Name(NameCondition),
    MetaType(MetaTypeCondition),
    ParentPath(ParentPathCondition),
    MimeType(MimeTypeCondition),
    FileSize(FileSizeCondition),
    Date(DateCondition),
}

impl Condition {
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::Name(_) => ConditionKind::Name,
            Condition::MetaType(_) => ConditionKind::MetaType,
            Condition::ParentPath(_) => ConditionKind::ParentPath,
            Condition::MimeType(_) => ConditionKind::MimeType,
            Condition::FileSize(_) => ConditionKind::FileSize,
            Condition::Date(_) => ConditionKind::Date,
        }
    }

    pub fn passes<F: FileAttributes + ?Sized>(&self, file: &F) -> bool {
        self.passes_at(file, Utc::now())
    }

    /// Evaluate with an explicit "now" for date conditions
    pub fn passes_at<F: FileAttributes + ?Sized>(&self, file: &F, now: DateTime<Utc>) -> bool {
        match self {
            Condition::Name(c) => c.passes(file),
            Condition::MetaType(c) => c.passes(file),
            Condition::ParentPath(c) => c.passes(file),
            Condition::MimeType(c) => c.passes(file),
            Condition::FileSize(c) => c.passes(file),
            Condition::Date(c) => c.passes_at(file, now),
        }
    }
}

impl From<NameCondition> for Condition {
    fn from(c: NameCondition) -> Self {
        Condition::Name(c)
    }
}

impl From<MetaTypeCondition> for Condition {
    fn from(c: MetaTypeCondition) -> Self {
        Condition::MetaType(c)
    }
}

impl From<ParentPathCondition> for Condition {
    fn from(c: ParentPathCondition) -> Self {
        Condition::ParentPath(c)
    }
}

impl From<MimeTypeCondition> for Condition {
    fn from(c: MimeTypeCondition) -> Self {
        Condition::MimeType(c)
    }
}

impl From<FileSizeCondition> for Condition {
    fn from(c: FileSizeCondition) -> Self {
        Condition::FileSize(c)
    }
}

impl From<DateCondition> for Condition {
    fn from(c: DateCondition) -> Self {
        Condition::Date(c)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Name(c) => {
                let subject = match c.scope() {
                    NameScope::FullName => "name",
                    NameScope::Extension => "extension",
                };
                let verb = if c.is_regex() { "matches" } else { "is" };
                write!(f, "{} {} {}", subject, verb, c.pattern())
            }
            Condition::MetaType(c) => {
                let admitted = match c.meta_type {
                    MetaTypeFilter::Files => "files",
                    MetaTypeFilter::Directories => "directories",
                    MetaTypeFilter::FilesAndDirectories => "files and directories",
                    MetaTypeFilter::All => "anything",
                };
                write!(f, "meta type is {}", admitted)
            }
            Condition::ParentPath(c) => {
                let verb = if c.is_regex() { "matches" } else { "contains" };
                write!(f, "parent path {} {}", verb, c.pattern())
            }
            Condition::MimeType(c) => write!(f, "MIME type is {}", c.mime_type()),
            Condition::FileSize(c) => {
                let unit = match c.unit() {
                    SizeUnit::Bytes => "B",
                    SizeUnit::Kilobytes => "KB",
                    SizeUnit::Megabytes => "MB",
                    SizeUnit::Gigabytes => "GB",
                };
                write!(f, "size {} {} {}", c.comparator().symbol(), c.value(), unit)
            }
            Condition::Date(c) => write!(f, "modified within {} days", c.days_included),
        }
    }
}

/// Compiled text matcher shared by name and path conditions
#[derive(Debug, Clone)]
enum TextMatcher {
    Equals(String),
    Contains(String),
    AnyOf(Vec<String>),
    Regex(Regex),
}

impl TextMatcher {
    fn regex(pattern: &str) -> Result<Self, ConstructionError> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(TextMatcher::Regex)
            .map_err(|source| ConstructionError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })
    }

    fn matches(&self, subject: &str) -> bool {
        match self {
            TextMatcher::Equals(text) => subject.to_lowercase() == *text,
            TextMatcher::Contains(text) => subject.to_lowercase().contains(text.as_str()),
            TextMatcher::AnyOf(values) => {
                let subject = subject.to_lowercase();
                values.iter().any(|value| *value == subject)
            }
            TextMatcher::Regex(regex) => regex.is_match(subject),
        }
    }
}

/// Which part of the file name a [`NameCondition`] looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameScope {
    FullName,
    Extension,
}

/// Match on the full file name or its extension
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NameConditionRepr", into = "NameConditionRepr")]
pub struct NameCondition {
    scope: NameScope,
    pattern: String,
    regex: bool,
    matcher: TextMatcher,
}

#[derive(Serialize, Deserialize)]
struct NameConditionRepr {
    scope: NameScope,
    pattern: String,
    #[serde(default)]
    regex: bool,
}

impl NameCondition {
    pub fn new(scope: NameScope, pattern: &str, regex: bool) -> Result<Self, ConstructionError> {
        if pattern.trim().is_empty() {
            return Err(ConstructionError::EmptyPattern("name"));
        }

        let matcher = match (scope, regex) {
            (_, true) => TextMatcher::regex(pattern)?,
            (NameScope::FullName, false) => TextMatcher::Equals(pattern.to_lowercase()),
            (NameScope::Extension, false) => {
                let extensions: Vec<String> = pattern
                    .split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect();
                if extensions.is_empty() {
                    return Err(ConstructionError::EmptyPattern("extension"));
                }
                TextMatcher::AnyOf(extensions)
            }
        };

        Ok(Self {
            scope,
            pattern: pattern.to_string(),
            regex,
            matcher,
        })
    }

    pub fn full_name(name: &str) -> Result<Self, ConstructionError> {
        Self::new(NameScope::FullName, name, false)
    }

    pub fn full_name_regex(pattern: &str) -> Result<Self, ConstructionError> {
        Self::new(NameScope::FullName, pattern, true)
    }

    /// Comma-separated list of extensions, e.g. `"jpg,jpeg,.gif"`
    pub fn extensions(list: &str) -> Result<Self, ConstructionError> {
        Self::new(NameScope::Extension, list, false)
    }

    pub fn extension_regex(pattern: &str) -> Result<Self, ConstructionError> {
        Self::new(NameScope::Extension, pattern, true)
    }

    pub fn scope(&self) -> NameScope {
        self.scope
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_regex(&self) -> bool {
        self.regex
    }

    pub fn passes<F: FileAttributes + ?Sized>(&self, file: &F) -> bool {
        let subject = match self.scope {
            NameScope::FullName => file.name(),
            NameScope::Extension => file.extension(),
        };
        self.matcher.matches(subject)
    }
}

impl PartialEq for NameCondition {
    fn eq(&self, other: &Self) -> bool {
        self.scope == other.scope && self.pattern == other.pattern && self.regex == other.regex
    }
}

impl TryFrom<NameConditionRepr> for NameCondition {
    type Error = ConstructionError;

    fn try_from(repr: NameConditionRepr) -> Result<Self, Self::Error> {
        Self::new(repr.scope, &repr.pattern, repr.regex)
    }
}

impl From<NameCondition> for NameConditionRepr {
    fn from(c: NameCondition) -> Self {
        Self {
            scope: c.scope,
            pattern: c.pattern,
            regex: c.regex,
        }
    }
}

/// Which meta types a [`MetaTypeCondition`] admits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetaTypeFilter {
    Files,
    Directories,
    FilesAndDirectories,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTypeCondition {
    pub meta_type: MetaTypeFilter,
}

impl MetaTypeCondition {
    pub fn new(meta_type: MetaTypeFilter) -> Self {
        Self { meta_type }
    }

    pub fn passes<F: FileAttributes + ?Sized>(&self, file: &F) -> bool {
        let is_dir = matches!(
            file.meta_type(),
            MetaType::Directory | MetaType::VirtualDirectory
        );
        match self.meta_type {
            MetaTypeFilter::Files => file.meta_type() == MetaType::Regular,
            MetaTypeFilter::Directories => is_dir,
            MetaTypeFilter::FilesAndDirectories => file.meta_type() == MetaType::Regular || is_dir,
            MetaTypeFilter::All => true,
        }
    }
}

/// Match on the parent path of a file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ParentPathConditionRepr", into = "ParentPathConditionRepr")]
pub struct ParentPathCondition {
    pattern: String,
    regex: bool,
    matcher: TextMatcher,
}

#[derive(Serialize, Deserialize)]
struct ParentPathConditionRepr {
    pattern: String,
    #[serde(default)]
    regex: bool,
}

/// Normalize to '/' separators with exactly one leading and trailing '/'
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

impl ParentPathCondition {
    pub fn new(pattern: &str, regex: bool) -> Result<Self, ConstructionError> {
        if pattern.trim().is_empty() {
            return Err(ConstructionError::EmptyPattern("parent path"));
        }

        let matcher = if regex {
            TextMatcher::regex(pattern)?
        } else {
            TextMatcher::Contains(normalize_path(pattern).to_lowercase())
        };

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
            matcher,
        })
    }

    pub fn literal(path: &str) -> Result<Self, ConstructionError> {
        Self::new(path, false)
    }

    pub fn regex(pattern: &str) -> Result<Self, ConstructionError> {
        Self::new(pattern, true)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_regex(&self) -> bool {
        self.regex
    }

    pub fn passes<F: FileAttributes + ?Sized>(&self, file: &F) -> bool {
        self.matcher.matches(&normalize_path(file.parent_path()))
    }
}

impl PartialEq for ParentPathCondition {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.regex == other.regex
    }
}

impl TryFrom<ParentPathConditionRepr> for ParentPathCondition {
    type Error = ConstructionError;

    fn try_from(repr: ParentPathConditionRepr) -> Result<Self, Self::Error> {
        Self::new(&repr.pattern, repr.regex)
    }
}

impl From<ParentPathCondition> for ParentPathConditionRepr {
    fn from(c: ParentPathCondition) -> Self {
        Self {
            pattern: c.pattern,
            regex: c.regex,
        }
    }
}

/// Exact match against the classifier's MIME type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MimeTypeConditionRepr", into = "MimeTypeConditionRepr")]
pub struct MimeTypeCondition {
    mime_type: String,
}

#[derive(Serialize, Deserialize)]
struct MimeTypeConditionRepr {
    mime_type: String,
}

impl MimeTypeCondition {
    pub fn new(mime_type: &str) -> Result<Self, ConstructionError> {
        if mime_type.trim().is_empty() {
            return Err(ConstructionError::EmptyPattern("MIME type"));
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn passes<F: FileAttributes + ?Sized>(&self, file: &F) -> bool {
        file.mime_type() == Some(self.mime_type.as_str())
    }
}

impl TryFrom<MimeTypeConditionRepr> for MimeTypeCondition {
    type Error = ConstructionError;

    fn try_from(repr: MimeTypeConditionRepr) -> Result<Self, Self::Error> {
        Self::new(&repr.mime_type)
    }
}

impl From<MimeTypeCondition> for MimeTypeConditionRepr {
    fn from(c: MimeTypeCondition) -> Self {
        Self {
            mime_type: c.mime_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeComparator {
    GreaterThan,
    LessThan,
    Equal,
}

impl SizeComparator {
    pub fn symbol(self) -> &'static str {
        match self {
            SizeComparator::GreaterThan => ">",
            SizeComparator::LessThan => "<",
            SizeComparator::Equal => "=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl SizeUnit {
    pub fn bytes(self) -> u64 {
        match self {
            SizeUnit::Bytes => 1,
            SizeUnit::Kilobytes => 1024,
            SizeUnit::Megabytes => 1024 * 1024,
            SizeUnit::Gigabytes => 1024 * 1024 * 1024,
        }
    }
}

/// Compare the file size against `value` expressed in `unit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FileSizeConditionRepr", into = "FileSizeConditionRepr")]
pub struct FileSizeCondition {
    comparator: SizeComparator,
    unit: SizeUnit,
    value: u64,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
struct FileSizeConditionRepr {
    comparator: SizeComparator,
    unit: SizeUnit,
    value: u64,
}

impl FileSizeCondition {
    pub fn new(comparator: SizeComparator, unit: SizeUnit, value: u64) -> Result<Self, ConstructionError> {
        if value == 0 && comparator != SizeComparator::Equal {
            return Err(ConstructionError::ZeroSize);
        }
        Ok(Self {
            comparator,
            unit,
            value,
        })
    }

    pub fn comparator(&self) -> SizeComparator {
        self.comparator
    }

    pub fn unit(&self) -> SizeUnit {
        self.unit
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn threshold_bytes(&self) -> u64 {
        self.value.saturating_mul(self.unit.bytes())
    }

    pub fn passes<F: FileAttributes + ?Sized>(&self, file: &F) -> bool {
        let threshold = self.threshold_bytes();
        match self.comparator {
            SizeComparator::GreaterThan => file.size() > threshold,
            SizeComparator::LessThan => file.size() < threshold,
            SizeComparator::Equal => file.size() == threshold,
        }
    }
}

impl TryFrom<FileSizeConditionRepr> for FileSizeCondition {
    type Error = ConstructionError;

    fn try_from(repr: FileSizeConditionRepr) -> Result<Self, Self::Error> {
        Self::new(repr.comparator, repr.unit, repr.value)
    }
}

impl From<FileSizeCondition> for FileSizeConditionRepr {
    fn from(c: FileSizeCondition) -> Self {
        Self {
            comparator: c.comparator,
            unit: c.unit,
            value: c.value,
        }
    }
}

/// Modification time within the last `days_included` days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCondition {
    pub days_included: u32,
}

impl DateCondition {
    pub fn new(days_included: u32) -> Self {
        Self { days_included }
    }

    pub fn passes_at<F: FileAttributes + ?Sized>(&self, file: &F, now: DateTime<Utc>) -> bool {
        let window = Duration::seconds(i64::from(self.days_included) * SECONDS_PER_DAY);
        match (file.modified(), now.checked_sub_signed(window)) {
            (Some(modified), Some(earliest)) => modified >= earliest,
            // Window reaches past the earliest representable time
            (Some(_), None) => true,
            (None, _) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::file::FileRecord;

    fn file(path: &str) -> FileRecord {
        FileRecord::new(1, path)
    }

    #[test]
    fn test_display() {
        let size: Condition = FileSizeCondition::new(SizeComparator::GreaterThan, SizeUnit::Megabytes, 5)
            .unwrap()
            .into();
        assert_eq!(size.to_string(), "size > 5 MB");
        assert_eq!(Condition::from(DateCondition::new(7)).to_string(), "modified within 7 days");
        assert_eq!(
            Condition::from(MetaTypeCondition::new(MetaTypeFilter::Directories)).to_string(),
            "meta type is directories"
        );
    }

    #[test]
    fn test_full_name_literal_is_case_insensitive_equality() {
        let condition = NameCondition::full_name("Thumbs.db").unwrap();
        assert!(condition.passes(&file("/a/thumbs.DB")));
        assert!(!condition.passes(&file("/a/thumbs.db.bak")));
    }

    #[test]
    fn test_full_name_regex_uses_find() {
        let condition = NameCondition::full_name_regex("^pass.*\\.txt").unwrap();
        assert!(condition.passes(&file("/home/PASSWORDS.TXT")));
        assert!(condition.passes(&file("/home/passwords.txt.old")));
        assert!(!condition.passes(&file("/home/mypasswords.txt")));
    }

    #[test]
    fn test_extension_list_matches_any_alternative() {
        let condition = NameCondition::extensions("jpg,jpeg,gif").unwrap();
        assert!(condition.passes(&file("/pics/a.jpeg")));
        assert!(condition.passes(&file("/pics/b.GIF")));
        assert!(!condition.passes(&file("/pics/c.jpegx")));
        assert!(!condition.passes(&file("/pics/noext")));
    }

    #[test]
    fn test_extension_literal_strips_leading_dot() {
        let condition = NameCondition::extensions(" .docx , .XLSX").unwrap();
        assert!(condition.passes(&file("/a/b.docx")));
        assert!(condition.passes(&file("/a/b.xlsx")));
    }

    #[test]
    fn test_extension_regex_with_comma_is_one_pattern() {
        let condition = NameCondition::extension_regex("^(a|b){1,2}$").unwrap();
        assert!(condition.passes(&file("/x/y.ab")));
        assert!(!condition.passes(&file("/x/y.abc")));
    }

    #[test]
    fn test_invalid_regex_rejected_at_construction() {
        let err = NameCondition::full_name_regex("(unclosed").unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidRegex { .. }));
        assert!(ParentPathCondition::regex("[a-").is_err());
    }

    #[test]
    fn test_empty_patterns_rejected() {
        assert!(NameCondition::full_name("  ").is_err());
        assert!(NameCondition::extensions(" , ,").is_err());
        assert!(ParentPathCondition::literal("").is_err());
        assert!(MimeTypeCondition::new("").is_err());
    }

    #[test]
    fn test_meta_type_filters() {
        let regular = file("/a/b.txt");
        let dir = file("/a/b").with_meta_type(MetaType::Directory);
        let virtual_dir = file("/a/$Carved").with_meta_type(MetaType::VirtualDirectory);
        let other = file("/a/link").with_meta_type(MetaType::Other);

        let files = MetaTypeCondition::new(MetaTypeFilter::Files);
        assert!(files.passes(&regular));
        assert!(!files.passes(&dir));

        let dirs = MetaTypeCondition::new(MetaTypeFilter::Directories);
        assert!(dirs.passes(&dir));
        assert!(dirs.passes(&virtual_dir));
        assert!(!dirs.passes(&regular));

        let both = MetaTypeCondition::new(MetaTypeFilter::FilesAndDirectories);
        assert!(both.passes(&regular) && both.passes(&dir));
        assert!(!both.passes(&other));

        assert!(MetaTypeCondition::new(MetaTypeFilter::All).passes(&other));
    }

    #[test]
    fn test_parent_path_literal_is_normalized_substring() {
        let condition = ParentPathCondition::literal("Users\\Alice").unwrap();
        assert!(condition.passes(&file("/users/alice/Documents/x.txt")));
        assert!(condition.passes(&file("/Users/Alice/y.txt")));
        assert!(!condition.passes(&file("/Users/Alicia/y.txt")));
    }

    #[test]
    fn test_parent_path_regex() {
        let condition = ParentPathCondition::regex("/appdata/.*/dropbox/").unwrap();
        assert!(condition.passes(&file("/Users/bob/AppData/Roaming/Dropbox/x.db")));
        assert!(!condition.passes(&file("/Users/bob/Documents/x.db")));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a/b"), "/a/b/");
        assert_eq!(normalize_path("//a/b//"), "/a/b/");
        assert_eq!(normalize_path("\\a\\b"), "/a/b/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_mime_type_exact() {
        let condition = MimeTypeCondition::new("application/pdf").unwrap();
        assert!(condition.passes(&file("/a.pdf").with_mime_type("application/pdf")));
        assert!(!condition.passes(&file("/a.pdf").with_mime_type("application/pdf2")));
        assert!(!condition.passes(&file("/a.pdf")));
    }

    #[test]
    fn test_zero_size_only_valid_with_equal() {
        assert_eq!(
            FileSizeCondition::new(SizeComparator::GreaterThan, SizeUnit::Kilobytes, 0),
            Err(ConstructionError::ZeroSize)
        );
        assert!(FileSizeCondition::new(SizeComparator::LessThan, SizeUnit::Bytes, 0).is_err());

        let empty = FileSizeCondition::new(SizeComparator::Equal, SizeUnit::Kilobytes, 0).unwrap();
        assert!(empty.passes(&file("/empty").with_size(0)));
        assert!(!empty.passes(&file("/one").with_size(1)));
    }

    #[test]
    fn test_size_compares_in_bytes() {
        let over = FileSizeCondition::new(SizeComparator::GreaterThan, SizeUnit::Megabytes, 1).unwrap();
        assert!(over.passes(&file("/big").with_size(1024 * 1024 + 1)));
        assert!(!over.passes(&file("/exact").with_size(1024 * 1024)));

        let under = FileSizeCondition::new(SizeComparator::LessThan, SizeUnit::Kilobytes, 2).unwrap();
        assert!(under.passes(&file("/small").with_size(2047)));
        assert!(!under.passes(&file("/edge").with_size(2048)));
    }

    #[test]
    fn test_date_window() {
        let now = Utc::now();
        let condition = DateCondition::new(7);
        let recent = file("/r").with_modified(now - Duration::days(3));
        let old = file("/o").with_modified(now - Duration::days(8));
        assert!(condition.passes_at(&recent, now));
        assert!(!condition.passes_at(&old, now));
        assert!(!condition.passes_at(&file("/none"), now));
    }

    #[test]
    fn test_date_window_wider_than_calendar() {
        let now = Utc::now();
        let condition = DateCondition::new(u32::MAX);
        let ancient = file("/a").with_modified(DateTime::<Utc>::MIN_UTC);
        assert!(condition.passes_at(&file("/r").with_modified(now), now));
        assert!(condition.passes_at(&ancient, now));
        assert!(!condition.passes_at(&file("/none"), now));
    }

    #[test]
    fn test_condition_kind_order() {
        assert!(ConditionKind::Name < ConditionKind::MetaType);
        assert!(ConditionKind::FileSize < ConditionKind::Date);
        let condition: Condition = DateCondition::new(1).into();
        assert_eq!(condition.kind(), ConditionKind::Date);
    }
}

//! Files set rule model
//!
//! Handles:
//! - Leaf conditions over a single file attribute
//! - Rules as conjunctions of conditions
//! - Files sets as versioned unions of rules with set-level policy flags
//! - The file attribute view consumed by evaluation

pub mod condition;
pub mod error;
pub mod file;
pub mod files_set;
pub mod rule;

pub use condition::{
    Condition, ConditionKind, DateCondition, FileSizeCondition, MetaTypeCondition, MetaTypeFilter,
    MimeTypeCondition, NameCondition, NameScope, ParentPathCondition, SizeComparator, SizeUnit,
};
pub use error::ConstructionError;
pub use file::{FileAttributes, FileRecord, FileType, KnownStatus, MetaType};
pub use files_set::{membership_rule_name, FilesSet, FilesSetBuilder};
pub use rule::Rule;

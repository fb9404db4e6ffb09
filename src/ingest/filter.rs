use crate::constants::{ALL_FILES_AND_UNALLOCATED_FILTER, ALL_FILES_FILTER};
use crate::rules::{FileAttributes, FilesSet};

/// Whether an ingest filter lets a file through to the ingest modules
///
/// The two "all files" filters match everything without consulting their
/// rules; only the one that includes unallocated space admits unallocated
/// and slack blocks. Any other filter is a plain membership test.
pub fn should_process<F: FileAttributes + ?Sized>(filter: &FilesSet, file: &F) -> bool {
    match filter.name() {
        ALL_FILES_AND_UNALLOCATED_FILTER => true,
        ALL_FILES_FILTER => !file.file_type().is_unallocated_space(),
        _ => filter.first_satisfied_rule_name(file).is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{FileRecord, FileType, MetaType, MetaTypeCondition, MetaTypeFilter, NameCondition, Rule};

    fn unallocated() -> FileRecord {
        FileRecord::new(1, "/$Unalloc/Unalloc_1_0_1024").with_file_type(FileType::Unallocated)
    }

    #[test]
    fn test_all_files_filter_skips_unallocated() {
        let filter = FilesSet::builder(ALL_FILES_FILTER).build().unwrap();
        assert!(should_process(&filter, &FileRecord::new(2, "/a.txt")));
        assert!(should_process(
            &filter,
            &FileRecord::new(3, "/dir").with_meta_type(MetaType::Directory)
        ));
        assert!(!should_process(&filter, &unallocated()));
    }

    #[test]
    fn test_all_files_and_unallocated_filter_admits_everything() {
        // Sentinels match even with no rules at all
        let filter = FilesSet::builder(ALL_FILES_AND_UNALLOCATED_FILTER).build().unwrap();
        assert!(should_process(&filter, &unallocated()));
        assert!(should_process(&filter, &FileRecord::new(2, "/a.txt")));
    }

    #[test]
    fn test_custom_filter_is_membership() {
        let rule = Rule::new(
            "Pictures",
            [
                NameCondition::extensions("jpg,png").unwrap().into(),
                MetaTypeCondition::new(MetaTypeFilter::Files).into(),
            ],
        )
        .unwrap();
        let filter = FilesSet::builder("Pictures only").rule(rule).build().unwrap();
        assert!(should_process(&filter, &FileRecord::new(1, "/p/a.JPG")));
        assert!(!should_process(&filter, &FileRecord::new(2, "/p/a.txt")));
    }
}

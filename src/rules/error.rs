use thiserror::Error;

/// Rejection of a malformed condition, rule or files set
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),
    #[error("Empty pattern for {0} condition")]
    EmptyPattern(&'static str),
    #[error("Invalid file size condition: value must be greater than 0 unless the comparator is '='")]
    ZeroSize,
    #[error("Rule '{0}' must have at least one condition")]
    NoConditions(String),
    #[error("Rule '{rule}' has more than one {kind} condition")]
    DuplicateCondition { rule: String, kind: &'static str },
    #[error("Files set '{set}' has more than one rule with id '{id}'")]
    DuplicateRuleId { set: String, id: String },
}

//! Selecting files sets by name for a job
//!
//! A selection pattern containing glob characters ('*', '?', '[') is
//! matched as a glob; anything else must equal the set name exactly.

use glob::Pattern;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid glob pattern '{pattern}': {reason}")]
pub struct SelectionError {
    pub pattern: String,
    pub reason: String,
}

/// Check if a selection string contains glob pattern characters
pub fn is_glob_pattern(selection: &str) -> bool {
    selection.contains('*') || selection.contains('?') || selection.contains('[')
}

/// Match a set name against one selection pattern
pub fn matches_selection(set_name: &str, selection: &str) -> bool {
    if is_glob_pattern(selection) {
        match Pattern::new(selection) {
            Ok(pattern) => pattern.matches(set_name),
            // Invalid patterns are rejected by validate_selection; fall back to exact
            Err(_) => set_name == selection,
        }
    } else {
        set_name == selection
    }
}

/// True when no selection is given or any pattern matches
pub fn name_matches_any(set_name: &str, selections: &[String]) -> bool {
    selections.is_empty() || selections.iter().any(|selection| matches_selection(set_name, selection))
}

pub fn validate_selection(selections: &[String]) -> Result<(), SelectionError> {
    for selection in selections {
        if is_glob_pattern(selection) {
            Pattern::new(selection).map_err(|e| SelectionError {
                pattern: selection.clone(),
                reason: e.to_string(),
            })?;
        }
    }
    Ok(())
}
